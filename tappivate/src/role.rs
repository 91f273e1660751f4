// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element roles, parsed from a space-separated role attribute.
//!
//! A role attribute behaves like a whitespace-aware attribute selector: each
//! word is matched whole, so `"list nav"` declares both [`Role::List`] and
//! [`Role::Nav`], while `"navigation"` declares neither.
//!
//! ```
//! use tappivate::role::{Role, Roles};
//!
//! let roles = Roles::parse("list  nav");
//! assert!(roles.has(Role::List));
//! assert!(roles.has(Role::Nav));
//! assert!(!roles.has(Role::Button));
//!
//! assert_eq!("btn".parse::<Role>(), Ok(Role::Button));
//! assert!("navigation".parse::<Role>().is_err());
//! ```

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;

/// A single recognized role word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// `btn`: a pressable button.
    Button,
    /// `list`: a list container; its direct children are selectable items.
    List,
    /// `nav`: a list container whose items soft-deactivate on cancel.
    Nav,
}

impl Role {
    /// Returns the attribute word for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "btn",
            Self::List => "list",
            Self::Nav => "nav",
        }
    }

    const fn flag(self) -> Roles {
        match self {
            Self::Button => Roles::BUTTON,
            Self::List => Roles::LIST,
            Self::Nav => Roles::NAV,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a word is not a recognized role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The word that failed to parse.
    pub word: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role {:?}, expected one of btn, list, nav", self.word)
    }
}

impl core::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btn" => Ok(Self::Button),
            "list" => Ok(Self::List),
            "nav" => Ok(Self::Nav),
            _ => Err(ParseRoleError { word: s.into() }),
        }
    }
}

bitflags! {
    /// The set of roles an element declares.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Roles: u8 {
        /// See [`Role::Button`].
        const BUTTON = 1 << 0;
        /// See [`Role::List`].
        const LIST = 1 << 1;
        /// See [`Role::Nav`].
        const NAV = 1 << 2;
    }
}

impl Roles {
    /// Parses a role attribute, keeping the recognized words.
    ///
    /// Unknown words are skipped rather than rejected; hosts commonly share
    /// the attribute with other behaviors.
    #[must_use]
    pub fn parse(attr: &str) -> Self {
        attr.split_ascii_whitespace()
            .filter_map(|word| word.parse::<Role>().ok())
            .fold(Self::empty(), |acc, role| acc | role.flag())
    }

    /// Returns `true` if `role` is in this set.
    #[must_use]
    pub fn has(self, role: Role) -> bool {
        self.contains(role.flag())
    }

    /// Returns `true` if this set names a list-like container.
    #[must_use]
    pub fn is_container(self) -> bool {
        self.intersects(Self::LIST | Self::NAV)
    }
}

impl From<Role> for Roles {
    fn from(role: Role) -> Self {
        role.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_matching() {
        assert_eq!(Roles::parse("btn"), Roles::BUTTON);
        assert_eq!(Roles::parse("btnx"), Roles::empty());
        assert_eq!(Roles::parse("xbtn list"), Roles::LIST);
        assert_eq!(Roles::parse("\tnav\nlist "), Roles::LIST | Roles::NAV);
    }

    #[test]
    fn empty_attr_declares_nothing() {
        assert!(Roles::parse("").is_empty());
        assert!(Roles::parse("   ").is_empty());
    }

    #[test]
    fn containers() {
        assert!(Roles::parse("list").is_container());
        assert!(Roles::parse("nav").is_container());
        assert!(!Roles::parse("btn").is_container());
    }

    #[test]
    fn round_trips_through_display() {
        for role in [Role::Button, Role::List, Role::Nav] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn parse_error_names_the_word() {
        let err = "button".parse::<Role>().unwrap_err();
        assert_eq!(err.word, "button");
        assert_eq!(
            alloc::format!("{err}"),
            "unknown role \"button\", expected one of btn, list, nav"
        );
    }
}

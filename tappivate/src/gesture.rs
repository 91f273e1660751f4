// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture kinds and the host event names that produce them.
//!
//! Touch, mouse and pointer input all collapse to the same five [`Gesture`]s.
//! Hosts that deliver events by name can parse them with [`EventName`]:
//!
//! ```
//! use tappivate::gesture::{EventName, Gesture, Input};
//!
//! let name: EventName = "pointercancel".parse().unwrap();
//! assert_eq!(name.gesture, Gesture::Cancel);
//! assert_eq!(name.input, Input::Pointer);
//! assert_eq!(name.as_str(), "pointercancel");
//! ```

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// An abstract press-and-optionally-drag signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Finger down or button press.
    Start,
    /// The contact moved.
    Move,
    /// Finger lifted or button released.
    End,
    /// The system interrupted the gesture.
    Cancel,
    /// The contact left the element.
    Leave,
}

/// The input mechanism behind a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Touch events (`touchstart`, ...).
    Touch,
    /// Mouse events (`mousedown`, ...).
    Mouse,
    /// Unified pointer events (`pointerdown`, ...).
    Pointer,
}

/// A recognized host event name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventName {
    /// What the event means.
    pub gesture: Gesture,
    /// Where it came from.
    pub input: Input,
}

const NAMES: &[(&str, Gesture, Input)] = &[
    ("touchstart", Gesture::Start, Input::Touch),
    ("touchmove", Gesture::Move, Input::Touch),
    ("touchend", Gesture::End, Input::Touch),
    ("touchcancel", Gesture::Cancel, Input::Touch),
    ("mousedown", Gesture::Start, Input::Mouse),
    ("mousemove", Gesture::Move, Input::Mouse),
    ("mouseup", Gesture::End, Input::Mouse),
    ("mouseleave", Gesture::Leave, Input::Mouse),
    ("pointerdown", Gesture::Start, Input::Pointer),
    ("pointermove", Gesture::Move, Input::Pointer),
    ("pointerup", Gesture::End, Input::Pointer),
    ("pointercancel", Gesture::Cancel, Input::Pointer),
    ("pointerleave", Gesture::Leave, Input::Pointer),
];

impl EventName {
    /// Returns the host name for this event, if the input has one.
    ///
    /// Touch input has no leave event and mouse input has no cancel event.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(_, g, i)| *g == self.gesture && *i == self.input)
            .map(|(name, ..)| *name)
    }

    /// Returns the host name for this event, or `""` if the input has none.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.name().unwrap_or("")
    }
}

/// Error returned for an event name Tappivate does not listen to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseGestureError {
    /// The name that failed to parse.
    pub name: String,
}

impl fmt::Display for ParseGestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized gesture event {:?}", self.name)
    }
}

impl core::error::Error for ParseGestureError {}

impl FromStr for EventName {
    type Err = ParseGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(name, ..)| *name == s)
            .map(|&(_, gesture, input)| Self { gesture, input })
            .ok_or_else(|| ParseGestureError { name: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_input_has_start_move_end() {
        for input in [Input::Touch, Input::Mouse, Input::Pointer] {
            for gesture in [Gesture::Start, Gesture::Move, Gesture::End] {
                let name = EventName { gesture, input }.name();
                assert!(name.is_some(), "{input:?} lacks {gesture:?}");
            }
        }
    }

    #[test]
    fn missing_combinations_have_no_name() {
        let touch_leave = EventName {
            gesture: Gesture::Leave,
            input: Input::Touch,
        };
        assert_eq!(touch_leave.name(), None);
        assert_eq!(touch_leave.as_str(), "");
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "click".parse::<EventName>().unwrap_err();
        assert_eq!(err.name, "click");
        assert!("TouchStart".parse::<EventName>().is_err());
    }
}

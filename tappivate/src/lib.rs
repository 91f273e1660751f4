// Copyright 2026 the Tappivate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tappivate: native-feeling press feedback for tappable buttons and lists.
//!
//! Touch interfaces feel sluggish when a button gives no sign that it was
//! hit. They feel twitchy when every list row lights up as the finger
//! scrolls past. This crate holds two small state machines that turn raw
//! gesture sequences into visual state:
//!
//! - [`button::ButtonHandler`] activates a button the moment it is pressed.
//!   It deactivates the button a short delay after release, so even a very
//!   fast tap visibly flashes.
//! - [`list::ListHandler`] activates a list item only after a short delay. A
//!   touch that turns into a scroll is therefore ignored. A completed tap is
//!   committed as the list's single selected item.
//!
//! Both compose a [`delay::DelaySlot`], which owns at most one pending timer in
//! a shared [`tappivate_timing::TimerQueue`]. Every new deferred or immediate
//! action cancels the one before it.
//!
//! ## Hosts
//!
//! The crate does not assume any particular UI framework. A host implements
//! [`host::Document`] over its element tree. That trait covers parents,
//! children, a role attribute, and named markers such as `active` and
//! `selected`. The host then forwards gestures to a [`binder::Binder`]
//! together with a monotonic timestamp in milliseconds. [`memory::MemoryDocument`]
//! is a ready-made implementation for tests and headless use.
//!
//! Elements opt in through their role attribute. The roles are `btn` for
//! buttons, `list` for containers of selectable items, and `nav` for
//! containers whose items soft-deactivate when the system cancels a touch.
//! See [`role`].
//!
//! ## Example
//!
//! ```rust
//! use tappivate::binder::Binder;
//! use tappivate::config::Config;
//! use tappivate::host::{ACTIVE, Document};
//! use tappivate::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let toolbar = doc.append(doc.root(), None);
//! let save = doc.append(toolbar, Some("btn"));
//!
//! let mut binder = Binder::new(toolbar, Config::default());
//!
//! binder.handle_named(&mut doc, "touchstart", save, 0).unwrap();
//! binder.handle_named(&mut doc, "touchend", save, 8).unwrap();
//! assert!(doc.has_marker(save, ACTIVE));
//!
//! // The host wakes up at the next deadline and lets the timer fire.
//! let wake = binder.next_deadline().unwrap();
//! assert_eq!(wake, 108);
//! binder.advance(&mut doc, wake);
//! assert!(!doc.has_marker(save, ACTIVE));
//! ```
//!
//! ## Logging
//!
//! Transitions are reported through the [`log`] facade: `trace` for
//! scheduling and timer activity, `debug` for committed selections and for
//! events dropped by the nested-role guard. Installing a logger is up to the
//! host.
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library.
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod binder;
pub mod button;
pub mod config;
pub mod delay;
pub mod gesture;
pub mod host;
pub mod list;
pub mod memory;
pub mod role;

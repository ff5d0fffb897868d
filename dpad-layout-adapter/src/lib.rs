//! Adapter utilities for the `dpad-layout` crate.
//!
//! The `dpad-layout` crate is UI-agnostic and focuses on layout math and selection state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Tween-driven smooth selection (the host supplies the clock)
//! - A keyed registry for the saved state of nested layouts
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod key;
mod registry;
mod tween;


pub use controller::Controller;
pub use key::StateKey;
pub use registry::ScrollStateRegistry;
pub use tween::{Easing, Tween};

//! A headless pivot layout engine for directional (D-pad) navigation.
//!
//! For adapter-level utilities (animated selection, scroll-state registry), see the
//! `dpad-layout-adapter` crate.
//!
//! The engine lays out a virtualized list or grid around one selected item, the pivot, and keeps
//! that item aligned to a configurable keyline while the user moves the selection with directional
//! input. Only the items needed to cover the viewport (plus optional extra space) stay attached;
//! everything else goes back to the host's pool.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport size
//! - item handles that can be measured and positioned ([`ItemHandle`])
//! - a pool that hands out and takes back item handles ([`RecyclerPool`])
//! - directional input and, for smooth scrolling, a frame clock
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod alignment;
mod axis;
mod direction;
mod error;
mod host;
mod key;
mod layout;
mod options;
mod pending;
mod provider;
mod recycler;
mod request;
mod scroller;
mod span;
mod span_focus;
mod state;
mod structure;
mod types;

#[cfg(test)]
mod tests;

pub use alignment::{ChildAlignment, Edge, ParentAlignment, compute_child_offset, compute_keyline};
pub use direction::{FocusDirection, ItemDirection, resolve};
pub use error::{ConfigError, ProviderError};
pub use host::{ItemHandle, RecyclerPool};
pub use layout::{PivotLayout, ScrollLimits};
pub use options::{LayoutOptions, SelectionCallback, SpanSizeLookup};
pub use pending::PendingScrollMovements;
pub use provider::{PoolProvider, ProvidedItem, ScrapItem, ScrapProvider, ViewProvider};
pub use recycler::RecycleOutcome;
pub use request::{LayoutRequest, LayoutState};
pub use span::SpanEntry;
pub use state::SavedLayoutState;
pub use structure::LaidOutItem;
pub use types::{
    DisappearingItem, ItemChange, LayoutDirection, LayoutReport, MeasureSpec, Orientation,
    Padding, PivotInfo, SelectionEvent, Size, ViewBounds,
};

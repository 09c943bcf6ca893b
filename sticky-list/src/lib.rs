//! A headless sticky-header list engine.
//!
//! Long lists grouped by a key render one header per group. While a group scrolls beneath the top
//! edge its header stays pinned there, and when the next group arrives its header pushes the
//! pinned one off ("hand-off"). This crate provides the two pieces that make that work:
//!
//! - [`PositionIndex`]: flattens an ordered item list plus a grouping function into a position
//!   space that interleaves synthesized headers.
//! - [`ScrollEngine`]: consumes one-dimensional scroll deltas, materializes and recycles boxes at
//!   the viewport edges, decides which header is pinned, and notifies listeners once per change.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`Viewport`] that owns boxes (create, measure, place, recycle)
//! - scroll deltas from user input
//! - paint ordering via [`ScrollEngine::draw_order`] (or its own elevation scheme)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod draw_order;
mod engine;
mod error;
mod index;
mod key;
mod notify;
mod options;
mod state;
mod types;
mod viewport;

#[cfg(test)]
mod testing;

pub use adapter::StickyAdapter;
pub use draw_order::DrawOrder;
pub use engine::ScrollEngine;
pub use error::{Error, Result};
pub use index::{GroupingFn, PositionIndex};
pub use key::IdentifierKey;
pub use notify::{NotificationBus, StickyChange, StickyListener};
pub use options::EngineOptions;
pub use state::PinState;
pub use types::{
    Bounds, DEFAULT_CONTENT_VIEW_TYPE, DEFAULT_HEADER_VIEW_TYPE, Entry, Insets, ScrollDirection,
    Span, StickyState, ViewType,
};
pub use viewport::{Viewport, WindowEdge};

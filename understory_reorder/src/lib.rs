// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: headless drag-to-reorder for vertical lists.
//!
//! This crate implements the interaction logic behind "press, drag, drop" list
//! reordering without knowing anything about widgets or drawing. Hosts feed it
//! pointer events and frame ticks; it tells the host's viewport what to hide,
//! translate and scroll, and mutates the backing collection exactly once when
//! a drag is committed.
//!
//! The core concepts are:
//!
//! - [`ReorderSource`]: the ordered collection, with stable [`ItemId`]s. Sources
//!   opt into dragging through [`DraggableItems`], which can veto drags and
//!   restrict them to a [`DraggableRange`].
//! - [`ReorderAdapter`]: presents the in-drag display order. While a drag is in
//!   progress the source is untouched and display positions are mapped to
//!   source positions through a single displacement (see
//!   [`display_to_source`]).
//! - [`Viewport`]: the scrolling container. It reports rendered items
//!   ([`RenderedItem`]) and applies translations, visibility and scrolling.
//!   [`StripViewport`] is a self-contained implementation useful for tests and
//!   simple hosts.
//! - [`ReorderManager`]: the drag controller. It decides when a drag starts
//!   (on move past the touch slop, on long press, or both), drives the
//!   [`FloatingItem`], swaps neighbours with midpoint hysteresis, slides the
//!   swap target out of the way ([`SwapTargetOperator`]), autoscrolls near the
//!   edges, pulls the [`EdgeGlow`], and settles items back when the drag ends.
//! - [`DragStateFlags`]: per-item state for renderers, with
//!   [`DragStateTracker`] deriving the `UPDATED` bit.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point};
//! use understory_reorder::{
//!     DraggableItems, ItemId, RenderedItem, ReorderManager, ReorderSource, StripViewport,
//! };
//!
//! struct Rows(Vec<u64>);
//!
//! impl ReorderSource for Rows {
//!     fn len(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn item_id(&self, position: usize) -> Option<ItemId> {
//!         self.0.get(position).copied().map(ItemId)
//!     }
//!     fn move_item(&mut self, from: usize, to: usize) {
//!         let row = self.0.remove(from);
//!         self.0.insert(to, row);
//!     }
//!     fn draggable(&self) -> Option<&dyn DraggableItems> {
//!         Some(self)
//!     }
//! }
//!
//! impl DraggableItems for Rows {
//!     fn can_start_drag(&self, _: &RenderedItem, _: usize, _: Point) -> bool {
//!         true
//!     }
//! }
//!
//! // Five 40px rows, pushed into the middle of a tall viewport.
//! let mut manager: ReorderManager<Rows, StripViewport> =
//!     ReorderManager::new(Rows(vec![10, 11, 12, 13, 14]));
//! let mut viewport = StripViewport::new(200.0, 1000.0)
//!     .with_default_extent(40.0)
//!     .with_padding(Insets::new(0.0, 400.0, 0.0, 0.0));
//! viewport.sync(manager.adapter());
//!
//! // Press row 2, move past the touch slop, then drag it down past row 4.
//! manager.on_pointer_down(&mut viewport, Point::new(10.0, 500.0), 0);
//! manager.on_pointer_move(&mut viewport, Point::new(10.0, 510.0), 8).unwrap();
//! assert!(manager.is_dragging());
//! manager.on_pointer_move(&mut viewport, Point::new(10.0, 590.0), 16).unwrap();
//! manager.on_frame(&mut viewport, 16).unwrap();
//! manager.on_pointer_up(&mut viewport);
//!
//! assert_eq!(manager.source().0, vec![10, 11, 13, 14, 12]);
//! ```
//!
//! Hosts typically:
//! - render rows in the order given by [`ReorderManager::adapter`] and apply
//!   [`Viewport`] calls to their views,
//! - call [`ReorderManager::on_frame`] every frame while it returns `true`,
//! - report recycled and rebound rows through
//!   [`ReorderManager::on_item_recycled`] and [`ReorderManager::on_item_bound`],
//! - report source edits through [`ReorderManager::on_source_changed`], which
//!   cancels any drag in progress.
//!
//! With the `tracing` feature enabled, drag lifecycle events are logged
//! through the `tracing` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod config;
mod easing;
mod edge_glow;
mod error;
mod flags;
mod floating;
mod manager;
mod range;
mod settle;
mod source;
mod strip;
mod swap;
mod util;
mod viewport;

pub use adapter::{FinishedDrag, ReorderAdapter, display_to_source, source_to_display};
pub use config::{AutoscrollConfig, DragStartMode, ReorderConfig};
pub use easing::Easing;
pub use edge_glow::EdgeGlow;
pub use error::ReorderError;
pub use flags::{DragStateFlags, DragStateTracker};
pub use floating::FloatingItem;
pub use manager::{DragPhase, ItemBinding, ReorderListener, ReorderManager, ScrollDirections};
pub use range::DraggableRange;
pub use settle::{SettleAnimation, SettleParams};
pub use source::{
    DisplayChange, DisplaySequence, DraggableItems, HandleId, ItemId, ReorderSource, SourceChange,
};
pub use strip::StripViewport;
pub use swap::{SwapSmoothing, SwapTargetOperator, find_swap_target, should_swap, swap_phase};
pub use viewport::{RenderedItem, Viewport};

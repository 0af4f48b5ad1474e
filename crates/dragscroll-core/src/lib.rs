#![forbid(unsafe_code)]

//! Core: pointer gesture state machine for drag-to-scroll containers.
//!
//! # Role
//! `dragscroll-core` decides, one pointer event at a time, whether a press on
//! a scroll container is a click or a vertical drag. Drags move the
//! container's scroll offset; clicks pass through untouched, and the click
//! that trails a real drag is vetoed exactly once.
//!
//! # Primary responsibilities
//! - **DragScroll**: the `Idle -> Armed -> Dragging` controller.
//! - **Host traits**: scroll surface, optional pointer capture and the
//!   document-wide text-selection mode, implemented by the embedding UI.
//! - **SelectionGuard**: exact save/restore of the selection mode.
//! - **ClickVetoSlot**: single-use suppression of the trailing click.
//!
//! # How it fits
//! `dragscroll-web` implements the host traits over DOM elements and feeds
//! browser `PointerEvent`s into [`DragScroll`]. [`memory::MemoryHost`] does
//! the same headlessly.

pub mod click_veto;
pub mod config;
pub mod controller;
pub mod host;
pub mod memory;
pub mod pointer;
pub mod selection;

pub use click_veto::{ClickDisposition, ClickVetoSlot};
pub use config::{
    ConfigError, DEFAULT_DISABLED_SELECTION_MODE, DEFAULT_DRAG_THRESHOLD, DragScrollConfig,
    IgnoreZone,
};
pub use controller::{
    DragScroll, GestureDispatch, GestureOutcome, GesturePhase, IgnoredReason, LifecyclePhase,
};
pub use host::{DragScrollHost, PointerCapture, ScrollSurface, SelectionStyle};
pub use pointer::{GestureEnd, PointerButton, PointerDown, PointerId, PointerKind, PointerMove};
pub use selection::SelectionGuard;

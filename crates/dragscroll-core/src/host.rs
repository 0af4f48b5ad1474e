#![forbid(unsafe_code)]

//! Capabilities the embedding UI layer provides to the controller.
//!
//! The controller never touches a platform API directly. A browser binding
//! implements these traits over DOM elements; tests implement them over
//! plain structs.

use crate::pointer::PointerId;

/// The scrollable container a controller is attached to.
pub trait ScrollSurface {
    /// Hit-test target type carried by pointer-down events.
    type Target;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Write the vertical scroll offset. Hosts clamp as their platform does.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Apply a style/class token to the container.
    fn add_marker(&mut self, marker: &str);

    /// Remove a style/class token from the container.
    fn remove_marker(&mut self, marker: &str);

    /// Whether `target` lies inside a sub-element matching `selector`.
    fn target_matches(&self, target: &Self::Target, selector: &str) -> bool;
}

/// Optional exclusive pointer routing.
///
/// Both operations report success instead of failing; a host without the
/// capability keeps the defaults and dragging still works from move events.
pub trait PointerCapture {
    /// Route all further events of `pointer_id` to the container.
    fn request_capture(&mut self, pointer_id: PointerId) -> bool {
        let _ = pointer_id;
        false
    }

    /// Stop routing events of `pointer_id` to the container.
    fn release_capture(&mut self, pointer_id: PointerId) -> bool {
        let _ = pointer_id;
        false
    }
}

/// Document-wide text-selection mode shared by every controller.
pub trait SelectionStyle {
    /// Current mode; `None` when no explicit mode is set.
    fn selection_mode(&self) -> Option<String>;

    /// Replace the mode; `None` clears it.
    fn set_selection_mode(&mut self, mode: Option<&str>);
}

/// Everything a [`DragScroll`](crate::DragScroll) needs from its host.
pub trait DragScrollHost: ScrollSurface + PointerCapture + SelectionStyle {}

impl<H> DragScrollHost for H where H: ScrollSurface + PointerCapture + SelectionStyle {}

#![forbid(unsafe_code)]

//! In-memory host for headless embedding and deterministic tests.
//!
//! [`MemoryHost`] stands in for a scrollable element: it stores a clamped
//! scroll offset, a set of marker tokens, a registry of ignored hit-test
//! targets and an optional pointer-capture capability. The text-selection
//! mode lives in a [`SharedSelection`] so several hosts can observe the same
//! document-wide value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{PointerCapture, ScrollSurface, SelectionStyle};
use crate::pointer::PointerId;

/// Document-wide selection mode shared between hosts.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection(Rc<RefCell<Option<String>>>);

impl SharedSelection {
    #[must_use]
    pub fn new(mode: Option<&str>) -> Self {
        Self(Rc::new(RefCell::new(mode.map(str::to_owned))))
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    pub fn set(&self, mode: Option<&str>) {
        *self.0.borrow_mut() = mode.map(str::to_owned);
    }
}

/// One pointer-capture call observed by a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCall {
    Request { pointer_id: PointerId, granted: bool },
    Release { pointer_id: PointerId, released: bool },
}

/// Headless scroll container; hit-test targets are plain node ids.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    scroll_offset: f64,
    max_scroll_offset: f64,
    markers: Vec<String>,
    ignored: Vec<(String, u32)>,
    selection: SharedSelection,
    capture_supported: bool,
    captured: Option<PointerId>,
    capture_calls: Vec<CaptureCall>,
}

impl MemoryHost {
    /// Container that can scroll between `0` and `max_scroll_offset`.
    #[must_use]
    pub fn new(max_scroll_offset: f64, selection: SharedSelection) -> Self {
        Self {
            scroll_offset: 0.0,
            max_scroll_offset: max_scroll_offset.max(0.0),
            markers: Vec::new(),
            ignored: Vec::new(),
            selection,
            capture_supported: true,
            captured: None,
            capture_calls: Vec::new(),
        }
    }

    /// Start at `offset` (clamped).
    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.set_scroll_offset(offset);
        self
    }

    /// Behave like a platform without pointer capture.
    #[must_use]
    pub fn without_capture(mut self) -> Self {
        self.capture_supported = false;
        self
    }

    /// Declare that `target` sits inside an element matching `selector`.
    pub fn mark_ignored(&mut self, selector: impl Into<String>, target: u32) {
        self.ignored.push((selector.into(), target));
    }

    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Pointer currently holding capture.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.captured
    }

    /// Platform-side revocation of capture (e.g. the element was hidden).
    pub fn revoke_capture(&mut self) -> Option<PointerId> {
        self.captured.take()
    }

    #[must_use]
    pub fn capture_calls(&self) -> &[CaptureCall] {
        &self.capture_calls
    }

    #[must_use]
    pub fn selection(&self) -> &SharedSelection {
        &self.selection
    }
}

impl ScrollSurface for MemoryHost {
    type Target = u32;

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset);
    }

    fn add_marker(&mut self, marker: &str) {
        if !self.has_marker(marker) {
            self.markers.push(marker.to_owned());
        }
    }

    fn remove_marker(&mut self, marker: &str) {
        self.markers.retain(|m| m != marker);
    }

    fn target_matches(&self, target: &u32, selector: &str) -> bool {
        self.ignored
            .iter()
            .any(|(sel, node)| sel == selector && node == target)
    }
}

impl PointerCapture for MemoryHost {
    fn request_capture(&mut self, pointer_id: PointerId) -> bool {
        let granted = self.capture_supported;
        if granted {
            self.captured = Some(pointer_id);
        }
        self.capture_calls
            .push(CaptureCall::Request { pointer_id, granted });
        granted
    }

    fn release_capture(&mut self, pointer_id: PointerId) -> bool {
        let released = self.captured == Some(pointer_id);
        if released {
            self.captured = None;
        }
        self.capture_calls
            .push(CaptureCall::Release { pointer_id, released });
        released
    }
}

impl SelectionStyle for MemoryHost {
    fn selection_mode(&self) -> Option<String> {
        self.selection.get()
    }

    fn set_selection_mode(&mut self, mode: Option<&str>) {
        self.selection.set(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_offset_is_clamped() {
        let mut host = MemoryHost::new(100.0, SharedSelection::default());
        host.set_scroll_offset(-5.0);
        assert_eq!(host.scroll_offset(), 0.0);
        host.set_scroll_offset(250.0);
        assert_eq!(host.scroll_offset(), 100.0);
    }

    #[test]
    fn markers_are_a_set() {
        let mut host = MemoryHost::new(0.0, SharedSelection::default());
        host.add_marker("active");
        host.add_marker("active");
        assert_eq!(host.markers(), ["active".to_owned()]);
        host.remove_marker("active");
        assert!(host.markers().is_empty());
    }

    #[test]
    fn capture_unsupported_reports_failure() {
        let mut host = MemoryHost::new(0.0, SharedSelection::default()).without_capture();
        assert!(!host.request_capture(PointerId(1)));
        assert_eq!(host.captured(), None);
        assert!(!host.release_capture(PointerId(1)));
    }

    #[test]
    fn selection_is_shared_between_hosts() {
        let selection = SharedSelection::new(Some("text"));
        let mut a = MemoryHost::new(0.0, selection.clone());
        let b = MemoryHost::new(0.0, selection);
        a.set_selection_mode(Some("none"));
        assert_eq!(b.selection_mode().as_deref(), Some("none"));
    }
}

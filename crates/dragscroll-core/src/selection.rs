#![forbid(unsafe_code)]

//! Save/restore pairing for the document-wide text-selection mode.

use crate::host::SelectionStyle;

/// Holds the selection mode that was in effect before a drag disabled it.
///
/// Acquiring writes the disabled mode; [`release`](SelectionGuard::release)
/// consumes the guard and writes the saved mode back, so a gesture can
/// restore at most once. Dropping a guard without releasing it leaves the
/// document disabled; the controller keeps its guard inside the dragging
/// state and releases it on every path back to idle.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a selection guard must be released to restore the document"]
pub struct SelectionGuard {
    saved: Option<String>,
}

impl SelectionGuard {
    /// Save the current mode and replace it with `disabled_mode`.
    pub fn acquire<S: SelectionStyle + ?Sized>(style: &mut S, disabled_mode: &str) -> Self {
        let saved = style.selection_mode();
        style.set_selection_mode(Some(disabled_mode));
        Self { saved }
    }

    /// Mode that will be restored on release.
    #[must_use]
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    /// Restore the saved mode exactly, including "unset".
    pub fn release<S: SelectionStyle + ?Sized>(self, style: &mut S) {
        style.set_selection_mode(self.saved.as_deref());
    }
}

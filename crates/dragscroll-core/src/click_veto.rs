#![forbid(unsafe_code)]

//! One-shot suppression of the click that trails a drag.

/// What the host should do with a click that reached the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Let the click reach its normal handlers.
    Deliver,
    /// Cancel the click and stop its propagation.
    Cancel,
}

/// Single-use veto for the next click after a drag ended with a release.
///
/// The slot is emptied by the first [`ClickVetoSlot::intercept`] call, so a
/// veto can never swallow more than one click.
#[derive(Debug, Default)]
pub struct ClickVetoSlot {
    pending: Option<ClickVeto>,
}

#[derive(Debug)]
struct ClickVeto;

impl ClickVetoSlot {
    /// Install a veto for the next click. Re-arming an armed slot is a no-op.
    pub fn arm(&mut self) {
        self.pending.get_or_insert(ClickVeto);
    }

    /// Whether the next click will be cancelled.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the veto, if any, for one click.
    pub fn intercept(&mut self) -> ClickDisposition {
        match self.pending.take() {
            Some(ClickVeto) => ClickDisposition::Cancel,
            None => ClickDisposition::Deliver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_delivers() {
        let mut slot = ClickVetoSlot::default();
        assert_eq!(slot.intercept(), ClickDisposition::Deliver);
    }

    #[test]
    fn armed_slot_cancels_exactly_once() {
        let mut slot = ClickVetoSlot::default();
        slot.arm();
        slot.arm();
        assert!(slot.is_armed());
        assert_eq!(slot.intercept(), ClickDisposition::Cancel);
        assert!(!slot.is_armed());
        assert_eq!(slot.intercept(), ClickDisposition::Deliver);
    }
}

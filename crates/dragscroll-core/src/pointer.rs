#![forbid(unsafe_code)]

//! Normalized pointer input consumed by the drag-scroll controller.
//!
//! Hosts translate their native pointer events into these types. Only the
//! vertical coordinate is carried: horizontal motion never affects the
//! gesture.

/// Identifier of one pointer as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

impl PointerId {
    /// Raw platform identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for PointerId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for PointerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device class that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
    /// A device type the host could not classify.
    Unknown,
}

impl PointerKind {
    /// Whether a pointer-down of this kind with `button` may arm a drag.
    ///
    /// Touch always keeps native scrolling. A pen arms with any button
    /// (tip, barrel or eraser). Mouse and unclassified devices arm only with
    /// the primary button.
    #[must_use]
    pub const fn arms_drag(self, button: PointerButton) -> bool {
        match self {
            Self::Touch => false,
            Self::Pen => true,
            Self::Mouse | Self::Unknown => matches!(button, PointerButton::Primary),
        }
    }
}

/// Button that changed state on pointer-down, using DOM numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Back,
    Forward,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }
}

/// A pointer going down inside the scroll container.
///
/// `target` is the host's hit-test result, used to evaluate the ignore zone.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDown<T> {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    pub button: PointerButton,
    pub y: f64,
    pub target: Option<T>,
}

impl<T> PointerDown<T> {
    /// Primary-button mouse press without a hit-test target.
    #[must_use]
    pub fn mouse(pointer_id: impl Into<PointerId>, y: f64) -> Self {
        Self {
            pointer_id: pointer_id.into(),
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            y,
            target: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }
}

/// A pointer moving while the controller may own it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMove {
    pub pointer_id: PointerId,
    pub y: f64,
}

impl PointerMove {
    #[must_use]
    pub fn new(pointer_id: impl Into<PointerId>, y: f64) -> Self {
        Self {
            pointer_id: pointer_id.into(),
            y,
        }
    }
}

/// Signal that ends a gesture for one pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEnd {
    Up,
    Leave,
    Cancel,
    /// The platform revoked pointer capture on its own.
    LostCapture,
}

impl GestureEnd {
    /// Only a release may be followed by a synthetic click worth vetoing.
    #[inline]
    #[must_use]
    pub const fn may_click(self) -> bool {
        matches!(self, Self::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_never_arms() {
        for button in [
            PointerButton::Primary,
            PointerButton::Secondary,
            PointerButton::Auxiliary,
        ] {
            assert!(!PointerKind::Touch.arms_drag(button));
        }
    }

    #[test]
    fn mouse_and_unknown_arm_only_with_primary() {
        for kind in [PointerKind::Mouse, PointerKind::Unknown] {
            assert!(kind.arms_drag(PointerButton::Primary));
            assert!(!kind.arms_drag(PointerButton::Secondary));
            assert!(!kind.arms_drag(PointerButton::Auxiliary));
            assert!(!kind.arms_drag(PointerButton::Other(7)));
        }
    }

    #[test]
    fn pen_arms_with_any_button() {
        for button in [
            PointerButton::Primary,
            PointerButton::Secondary,
            PointerButton::from_dom(5),
        ] {
            assert!(PointerKind::Pen.arms_drag(button));
        }
    }

    #[test]
    fn dom_button_numbering() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Auxiliary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(4), PointerButton::Forward);
        assert_eq!(PointerButton::from_dom(-1), PointerButton::Other(-1));
    }

    #[test]
    fn only_release_may_click() {
        assert!(GestureEnd::Up.may_click());
        assert!(!GestureEnd::Leave.may_click());
        assert!(!GestureEnd::Cancel.may_click());
        assert!(!GestureEnd::LostCapture.may_click());
    }
}

#![forbid(unsafe_code)]

//! Platform-independent mapping from DOM pointer fields to core types.
//!
//! Kept free of `web-sys` so the mapping rules are testable off-browser.

use dragscroll_core::{ConfigError, DragScrollConfig, PointerButton, PointerKind};

/// CSS property carrying the document-wide text-selection mode.
pub const DEFAULT_SELECTION_PROPERTY: &str = "user-select";

/// Map `PointerEvent.pointerType`.
#[must_use]
pub fn pointer_kind_from_dom(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "mouse" => PointerKind::Mouse,
        "pen" => PointerKind::Pen,
        "touch" => PointerKind::Touch,
        _ => PointerKind::Unknown,
    }
}

/// Map `MouseEvent.button`.
#[inline]
#[must_use]
pub fn pointer_button_from_dom(button: i16) -> PointerButton {
    PointerButton::from_dom(button)
}

/// DOM events the binding listens to on the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    PointerCancel,
    LostPointerCapture,
}

impl GestureEvent {
    pub const ALL: [Self; 6] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerLeave,
        Self::PointerCancel,
        Self::LostPointerCapture,
    ];

    /// DOM event type name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerLeave => "pointerleave",
            Self::PointerCancel => "pointercancel",
            Self::LostPointerCapture => "lostpointercapture",
        }
    }
}

/// Options accepted when attaching to a DOM element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOptions {
    /// Elements matching this selector (and their descendants) never start a drag.
    pub ignore_selector: Option<String>,
    /// Class added to the container while dragging.
    pub active_class: Option<String>,
    /// Overrides the default 2px drag threshold.
    pub drag_threshold: Option<f64>,
}

impl BindingOptions {
    /// Controller configuration for these options.
    pub fn to_config(&self) -> Result<DragScrollConfig, ConfigError> {
        let mut config = DragScrollConfig::default();
        if let Some(threshold) = self.drag_threshold {
            config = config.with_drag_threshold(threshold);
        }
        if let Some(class) = &self.active_class {
            config = config.with_active_marker(class.clone());
        }
        config.validate()?;
        Ok(config)
    }

    /// Selector for the ignore zone, with blank selectors treated as absent.
    #[must_use]
    pub fn ignore_selector(&self) -> Option<&str> {
        self.ignore_selector
            .as_deref()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_types_map() {
        assert_eq!(pointer_kind_from_dom("mouse"), PointerKind::Mouse);
        assert_eq!(pointer_kind_from_dom("pen"), PointerKind::Pen);
        assert_eq!(pointer_kind_from_dom("touch"), PointerKind::Touch);
        assert_eq!(pointer_kind_from_dom(""), PointerKind::Unknown);
        assert_eq!(pointer_kind_from_dom("Mouse"), PointerKind::Unknown);
    }

    #[test]
    fn buttons_follow_dom_numbering() {
        assert_eq!(pointer_button_from_dom(0), PointerButton::Primary);
        assert_eq!(pointer_button_from_dom(2), PointerButton::Secondary);
    }

    #[test]
    fn dom_names_are_unique() {
        let mut names: Vec<_> = GestureEvent::ALL.iter().map(|e| e.dom_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GestureEvent::ALL.len());
    }

    #[test]
    fn options_build_config() {
        let options = BindingOptions {
            ignore_selector: Some(" .search ".to_owned()),
            active_class: Some("is-dragging".to_owned()),
            drag_threshold: Some(4.0),
        };
        let config = options.to_config().expect("valid options");
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.active_marker.as_deref(), Some("is-dragging"));
        assert_eq!(options.ignore_selector(), Some(".search"));
    }

    #[test]
    fn blank_selector_is_absent() {
        let options = BindingOptions {
            ignore_selector: Some("   ".to_owned()),
            ..BindingOptions::default()
        };
        assert_eq!(options.ignore_selector(), None);
    }

    #[test]
    fn bad_class_is_rejected() {
        let options = BindingOptions {
            active_class: Some("a b".to_owned()),
            ..BindingOptions::default()
        };
        assert!(matches!(
            options.to_config(),
            Err(ConfigError::InvalidMarker { .. })
        ));
    }
}

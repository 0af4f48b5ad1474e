#![forbid(unsafe_code)]

//! Controller configuration and ignore-zone description.

use std::fmt;

/// Default vertical displacement (px) a pointer must exceed to start a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 2.0;

/// Default selection mode written while a drag is in progress.
pub const DEFAULT_DISABLED_SELECTION_MODE: &str = "none";

/// Tunables for one controller instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DragScrollConfig {
    /// A drag starts once `|Δy|` is strictly greater than this (default: 2.0).
    pub drag_threshold: f64,
    /// Token applied to the container while dragging.
    pub active_marker: Option<String>,
    /// Selection mode written to the document while dragging (default: `"none"`).
    pub disabled_selection_mode: String,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            active_marker: None,
            disabled_selection_mode: DEFAULT_DISABLED_SELECTION_MODE.to_owned(),
        }
    }
}

impl DragScrollConfig {
    /// Set the token applied to the container while dragging.
    #[must_use]
    pub fn with_active_marker(mut self, marker: impl Into<String>) -> Self {
        self.active_marker = Some(marker.into());
        self
    }

    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Check thresholds and tokens before a controller is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::InvalidDragThreshold {
                threshold: self.drag_threshold,
            });
        }
        if let Some(marker) = &self.active_marker {
            validate_token(marker)?;
        }
        if self.disabled_selection_mode.trim().is_empty() {
            return Err(ConfigError::EmptySelectionMode);
        }
        Ok(())
    }
}

fn validate_token(marker: &str) -> Result<(), ConfigError> {
    if marker.is_empty() || marker.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidMarker {
            marker: marker.to_owned(),
        });
    }
    Ok(())
}

/// Rejected controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDragThreshold { threshold: f64 },
    InvalidMarker { marker: String },
    EmptySelectionMode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDragThreshold { threshold } => {
                write!(f, "drag threshold must be finite and >= 0 (got {threshold})")
            }
            Self::InvalidMarker { marker } => {
                write!(f, "active marker must be a single non-empty token (got {marker:?})")
            }
            Self::EmptySelectionMode => write!(f, "disabled selection mode must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Sub-region of the container that never starts a drag.
pub enum IgnoreZone<T> {
    /// Targets inside an element matching this selector are ignored.
    Selector(String),
    /// Targets for which the predicate returns `true` are ignored.
    Predicate(Box<dyn Fn(&T) -> bool>),
}

impl<T> IgnoreZone<T> {
    #[must_use]
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    #[must_use]
    pub fn predicate(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self::Predicate(Box::new(predicate))
    }
}

impl<T> fmt::Debug for IgnoreZone<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DragScrollConfig::default();
        assert_eq!(config.drag_threshold, DEFAULT_DRAG_THRESHOLD);
        assert_eq!(config.disabled_selection_mode, "none");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_threshold_is_allowed() {
        let config = DragScrollConfig::default().with_drag_threshold(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_or_nan_threshold_is_rejected() {
        for threshold in [-1.0, f64::NAN, f64::INFINITY] {
            let config = DragScrollConfig::default().with_drag_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidDragThreshold { .. })
            ));
        }
    }

    #[test]
    fn marker_must_be_single_token() {
        assert!(
            DragScrollConfig::default()
                .with_active_marker("is-dragging")
                .validate()
                .is_ok()
        );
        for bad in ["", "two words", "tab\there"] {
            let err = DragScrollConfig::default()
                .with_active_marker(bad)
                .validate()
                .expect_err("marker should be rejected");
            assert_eq!(
                err,
                ConfigError::InvalidMarker {
                    marker: bad.to_owned()
                }
            );
        }
    }

    #[test]
    fn empty_selection_mode_is_rejected() {
        let config = DragScrollConfig {
            disabled_selection_mode: "  ".to_owned(),
            ..DragScrollConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySelectionMode));
    }

    #[test]
    fn error_messages_name_the_value() {
        let err = ConfigError::InvalidDragThreshold { threshold: -2.0 };
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn ignore_zone_debug_hides_closure() {
        let zone: IgnoreZone<u32> = IgnoreZone::predicate(|target| *target == 3);
        assert_eq!(format!("{zone:?}"), "Predicate(..)");
        let zone: IgnoreZone<u32> = IgnoreZone::selector("input");
        assert_eq!(format!("{zone:?}"), "Selector(\"input\")");
    }
}

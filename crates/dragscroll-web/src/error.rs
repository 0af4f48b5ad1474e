#![forbid(unsafe_code)]

use dragscroll_core::ConfigError;

/// Failure to attach a drag-scroll binding to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachError {
    /// No global `window` (e.g. running in a worker).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// The attach options were rejected.
    Config(ConfigError),
    /// The browser refused to register a listener.
    Listener { event: &'static str, message: String },
}

impl core::fmt::Display for AttachError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window exists"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::Config(error) => write!(f, "invalid drag-scroll options: {error}"),
            Self::Listener { event, message } => {
                write!(f, "failed to register {event} listener: {message}")
            }
        }
    }
}

impl std::error::Error for AttachError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigError> for AttachError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<AttachError> for wasm_bindgen::JsValue {
    fn from(error: AttachError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

#![forbid(unsafe_code)]

//! `dragscroll-web` binds the drag-scroll controller to browser DOM elements.
//!
//! Design goals:
//! - **Host traits over `web-sys`**: `scrollTop`, `classList`,
//!   `setPointerCapture` and the body's `user-select` back the core
//!   capabilities.
//! - **Owned listeners**: closures live in the binding and are removed on
//!   detach, so no handler outlives its container.
//! - **One-shot click veto**: a capturing `{ once: true }` window listener
//!   cancels the click that trails a drag.
//!
//! The DOM parts compile only for `wasm32`; the event/field mapping in
//! [`dom_input`] is platform independent.

pub mod dom_input;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod binding;

#[cfg(target_arch = "wasm32")]
pub use binding::{DomHost, DragScrollBinding, DragScrollHandle};
pub use dom_input::{BindingOptions, GestureEvent};
pub use error::AttachError;

//! Error types for hookmix.
//!
//! Handler failures are plain [`BoxError`]s: the dispatcher hands back
//! exactly the error a handler returned. The named types here cover the
//! framework's own failure modes:
//!
//! - [`RegistrationError`] - Errors while assembling a dispatcher
//! - [`UnknownEvent`] - A lifecycle event name that is not in the registry

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering mixins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Two mixins in one dispatcher reported the same name.
    #[error("mixin `{0}` is already registered")]
    DuplicateMixin(&'static str),
}

/// A string did not name any lifecycle event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown lifecycle event: {0}")]
pub struct UnknownEvent(pub String);

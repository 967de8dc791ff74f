//! # hookmix-core
//!
//! Core traits for the hookmix lifecycle hook framework.
//!
//! This crate has minimal dependencies and is meant to be imported by mixin
//! authors who do not need the dispatcher and standard mixins from
//! `hookmix-std`.
//!
//! # Building Blocks
//!
//! ## Lifecycle Event Registry ([`LifecycleEvent`], [`Capabilities`])
//!
//! The closed set of named extension points in a create/read/update/delete
//! flow. Each event has a fixed positional argument shape, and each has a
//! flag in [`Capabilities`] so a mixin can state which events it handles.
//!
//! ## Host ([`Host`])
//!
//! The owning API object. It is passed to every handler as the receiver and
//! names the opaque collaborator types (options, model, request, ...) that
//! flow through the handlers untouched by the framework.
//!
//! ## Mixin ([`Mixin`], [`DynMixin`])
//!
//! A pluggable bundle of zero or more lifecycle handlers. Handlers receive the
//! host and a per-event argument struct ([`ModelArgs`], [`QueryArgs`], ...)
//! and communicate by mutating what they are given.
//!
//! # Error Types
//!
//! - [`BoxError`] - What handlers return; propagated unchanged by dispatch
//! - [`RegistrationError`] - Dispatcher construction errors
//! - [`UnknownEvent`] - Parsing an unknown lifecycle event name

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod error;
mod host;
mod lifecycle;
mod mixin;

// Re-exports
pub use args::{ConfigureArgs, EndpointArgs, ModelArgs, QueryArgs, ResultsArgs};
pub use error::{BoxError, RegistrationError, UnknownEvent};
pub use host::Host;
pub use lifecycle::{Capabilities, LifecycleEvent};
pub use mixin::{DynMixin, Mixin};

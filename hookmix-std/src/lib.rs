//! # hookmix-std
//!
//! Standard implementations for the hookmix lifecycle hook framework.
//!
//! This crate provides:
//! - **Dispatch**: [`Dispatcher`], [`DispatcherBuilder`] and the [`Owner`] delegation trait
//! - **Closure mixins**: [`FnMixin`]
//! - **Static chains**: [`HCons`], [`HNil`], [`mixins!`] macro
//! - **Standard mixins**: logging, conditional gating, tracing instrumentation
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hookmix_core;

// Modules
pub mod chain;
pub mod dispatcher;
pub mod fn_mixin;
pub mod mixins;
pub mod owner;
pub mod testing;

pub use chain::{HCons, HNil};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use fn_mixin::FnMixin;
pub use owner::Owner;

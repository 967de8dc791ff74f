//! # hookmix - Ordered Lifecycle Hooks for API Objects
//!
//! `hookmix` lets an API object (the **host**) accept any number of pluggable
//! **mixins**, each contributing behavior at named points of a
//! create/read/update/delete flow. A [`Dispatcher`] fans each lifecycle event
//! out to every mixin that handles it, in registration order, with the same
//! arguments and the same host.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookmix::prelude::*;
//!
//! struct Checksum;
//!
//! #[hookmix::mixin(name = "checksum")]
//! impl Mixin<ArticlesApi> for Checksum {
//!     async fn before_create(
//!         &self,
//!         _api: &ArticlesApi,
//!         args: &mut ModelArgs<'_, ArticlesApi>,
//!     ) -> Result<(), BoxError> {
//!         args.model.checksum = Some(digest(&args.model.body));
//!         Ok(())
//!     }
//! }
//!
//! let hooks = Dispatcher::builder()
//!     .with(LoggingMixin::new())
//!     .with(Checksum)
//!     .build()?;
//!
//! hooks.before_create(&api, &mut article, &mut req, &mut res, &options).await?;
//! ```
//!
//! ## Features
//!
//! - `macros` (default): the [`mixin`] attribute.
//! - `tracing`: dispatcher diagnostics and the `Instrumented` mixin wrapper.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Lifecycle
pub use hookmix_core::{Capabilities, LifecycleEvent};

// Host and arguments
pub use hookmix_core::{ConfigureArgs, EndpointArgs, Host, ModelArgs, QueryArgs, ResultsArgs};

// Mixin
pub use hookmix_core::{DynMixin, Mixin};

// Errors
pub use hookmix_core::{BoxError, RegistrationError, UnknownEvent};

// Dispatch
pub use hookmix_std::{
    Dispatcher, DispatcherBuilder, FnMixin, Owner,
    chain::{ChainLen, HCons, HNil},
};

// Standard mixins (module) and the `mixins!` chain macro share the name.
pub use hookmix_std::mixins;

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use hookmix_std::testing::*;
}

/// Prelude module - common imports for hookmix.
///
/// # Usage
///
/// ```rust,ignore
/// use hookmix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Capabilities, ConfigureArgs, Dispatcher, EndpointArgs, FnMixin, Host,
        LifecycleEvent, Mixin, ModelArgs, Owner, QueryArgs, ResultsArgs,
        mixins::{LoggingMixin, When},
    };
}

#[cfg(feature = "macros")]
pub use hookmix_macros::mixin;

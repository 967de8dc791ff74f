//! # Mixin
//!
//! A mixin is a pluggable bundle of lifecycle handlers. It may implement any
//! subset of the events in [`LifecycleEvent`], including none at all.
//!
//! Handlers receive the host that fired the event and the event's argument
//! struct. They return nothing the framework consumes: results are written
//! into the arguments (annotating a model, adding a response header) or into
//! the host. An `Err` aborts the rest of the dispatch and reaches the caller
//! unchanged.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Mixin`] uses native `async fn` for zero-cost static dispatch. Ordered
//! collections of heterogeneous mixins store them as [`DynMixin`] trait
//! objects; every `Mixin` is a `DynMixin` through a blanket implementation.
//!
//! [`LifecycleEvent`]: crate::LifecycleEvent

use crate::{
    args::{ConfigureArgs, EndpointArgs, ModelArgs, QueryArgs, ResultsArgs},
    error::BoxError,
    host::Host,
    lifecycle::Capabilities,
};
use futures::future::BoxFuture;
use std::future::Future;

/// A bundle of lifecycle handlers.
///
/// Every handler has a no-op default. A mixin lists the handlers it really
/// implements in [`capabilities`](Mixin::capabilities); the dispatcher skips
/// the others without calling them. `capabilities` has no default, so every
/// implementation states its set. The `#[mixin]` attribute from the
/// `hookmix` crate derives that set from the methods present in the impl
/// block.
///
/// Handlers take `&self`. Configuration captured during `configure` must be
/// stored through interior mutability, and must be synchronized if the host
/// dispatches concurrently.
///
/// # Example
///
/// ```rust,ignore
/// struct Checksum;
///
/// impl Mixin<ArticlesApi> for Checksum {
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::BEFORE_CREATE | Capabilities::BEFORE_UPDATE
///     }
///
///     async fn before_create(
///         &self,
///         _host: &ArticlesApi,
///         args: &mut ModelArgs<'_, ArticlesApi>,
///     ) -> Result<(), BoxError> {
///         args.model.checksum = Some(digest(&args.model.body));
///         Ok(())
///     }
///
///     // before_update ...
/// }
/// ```
///
/// An implementation that writes a handler but leaves out `capabilities`
/// does not compile:
///
/// ```compile_fail,E0046
/// use hookmix_core::{BoxError, Host, Mixin, ModelArgs};
///
/// struct Api;
///
/// impl Host for Api {
///     type Options = ();
///     type Endpoint = ();
///     type Model = ();
///     type Query = ();
///     type Request = ();
///     type Response = ();
/// }
///
/// struct Plain;
///
/// impl Mixin<Api> for Plain {
///     async fn before_create(
///         &self,
///         _host: &Api,
///         _args: &mut ModelArgs<'_, Api>,
///     ) -> Result<(), BoxError> {
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Mixin` for host `{H}`",
    label = "missing `Mixin<{H}>` implementation",
    note = "Implement `Mixin<{H}>`: declare `capabilities` and override the lifecycle handlers it lists."
)]
pub trait Mixin<H: Host>: Send + Sync + 'static {
    /// Name of the mixin. Names are unique within one dispatcher.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The lifecycle events this mixin handles.
    ///
    /// The dispatcher calls a handler only when its event is in this set.
    /// A mixin without handlers returns [`Capabilities::empty()`].
    fn capabilities(&self) -> Capabilities;

    /// `configure(options)`: the host or mixin set is being initialized.
    fn configure(
        &self,
        host: &H,
        args: &mut ConfigureArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `endpoint(endpoint, options)`: a route is being registered.
    fn endpoint(
        &self,
        host: &H,
        args: &mut EndpointArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `beforeRequest(model, request, response, options)`.
    fn before_request(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `beforeCreate(model, request, response, options)`.
    fn before_create(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `afterCreate(model, request, response, options)`.
    fn after_create(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `beforeUpdate(model, request, response, options)`.
    fn before_update(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `afterUpdate(model, request, response, options)`.
    fn after_update(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `beforeRead(queryCriteria, request, response, options)`.
    fn before_read(
        &self,
        host: &H,
        args: &mut QueryArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `afterRead(models, request, response, options)`.
    fn after_read(
        &self,
        host: &H,
        args: &mut ResultsArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }

    /// `beforeDelete(model, request, response, options)`.
    fn before_delete(
        &self,
        host: &H,
        args: &mut ModelArgs<'_, H>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        let _ = (host, args);
        async { Ok(()) }
    }
}

/// Dynamic object-safe version of [`Mixin`].
///
/// Use this trait when mixins of different types share one collection.
pub trait DynMixin<H: Host>: Send + Sync + 'static {
    /// See [`Mixin::name`].
    fn name_dyn(&self) -> &'static str;

    /// See [`Mixin::capabilities`].
    fn capabilities_dyn(&self) -> Capabilities;

    /// See [`Mixin::configure`].
    fn configure_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ConfigureArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::endpoint`].
    fn endpoint_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut EndpointArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::before_request`].
    fn before_request_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::before_create`].
    fn before_create_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::after_create`].
    fn after_create_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::before_update`].
    fn before_update_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::after_update`].
    fn after_update_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::before_read`].
    fn before_read_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut QueryArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::after_read`].
    fn after_read_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ResultsArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// See [`Mixin::before_delete`].
    fn before_delete_dyn<'a>(
        &'a self,
        host: &'a H,
        args: &'a mut ModelArgs<'_, H>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

macro_rules! blanket_dyn_mixin {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        // Blanket implementation: any type implementing Mixin implements DynMixin automatically.
        impl<H: Host, T: Mixin<H>> DynMixin<H> for T {
            fn name_dyn(&self) -> &'static str {
                Mixin::name(self)
            }

            fn capabilities_dyn(&self) -> Capabilities {
                Mixin::capabilities(self)
            }

            $(
                fn $dyn_method<'a>(
                    &'a self,
                    host: &'a H,
                    args: &'a mut $args<'_, H>,
                ) -> BoxFuture<'a, Result<(), BoxError>> {
                    Box::pin(Mixin::$method(self, host, args))
                }
            )*
        }

        // Allow Box<dyn DynMixin> to be used where Mixin is expected.
        impl<H: Host> Mixin<H> for Box<dyn DynMixin<H>> {
            fn name(&self) -> &'static str {
                (**self).name_dyn()
            }

            fn capabilities(&self) -> Capabilities {
                (**self).capabilities_dyn()
            }

            $(
                async fn $method(
                    &self,
                    host: &H,
                    args: &mut $args<'_, H>,
                ) -> Result<(), BoxError> {
                    (**self).$dyn_method(host, args).await
                }
            )*
        }
    };
}

crate::__for_each_handler!(blanket_dyn_mixin);

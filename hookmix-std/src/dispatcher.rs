//! The hook dispatcher.
//!
//! A [`Dispatcher`] owns an ordered, fixed list of mixins and exposes one
//! dispatch method per lifecycle event. Dispatching an event calls, in
//! registration order, the handler of every mixin that declared the event in
//! its capabilities. Mixins that did not are skipped without being called.
//!
//! Handlers run one after another: each handler's future completes before the
//! next handler is even created. The first handler error ends the dispatch and
//! is returned to the caller as-is; the remaining handlers do not run.
//!
//! # Example
//!
//! ```rust,ignore
//! let hooks = Dispatcher::builder()
//!     .with(Checksum)
//!     .with(NestedModels::default())
//!     .with(LoggingMixin::new())
//!     .build()?;
//!
//! hooks.before_create(&api, &mut article, &mut req, &mut res, &options).await?;
//! ```

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, DynMixin, EndpointArgs, Host, LifecycleEvent, Mixin,
    ModelArgs, QueryArgs, RegistrationError, ResultsArgs,
};

/// A registered mixin with the name and capabilities it reported at
/// registration.
struct MixinEntry<H: Host> {
    mixin: Box<dyn DynMixin<H>>,
    name: &'static str,
    capabilities: Capabilities,
}

impl<H: Host> MixinEntry<H> {
    fn new(mixin: Box<dyn DynMixin<H>>) -> Self {
        let name = mixin.name_dyn();
        let capabilities = mixin.capabilities_dyn();
        Self {
            mixin,
            name,
            capabilities,
        }
    }

    fn mixin(&self) -> &dyn DynMixin<H> {
        &*self.mixin
    }
}

/// Name of a dispatcher built without [`DispatcherBuilder::named`].
const DEFAULT_NAME: &str = "dispatcher";

// ============================================================================
// DispatcherBuilder
// ============================================================================

/// Builder for constructing a [`Dispatcher`].
///
/// Mixins run in the order they are added.
///
/// # Example
/// ```ignore
/// let hooks = DispatcherBuilder::new()
///     .with(Checksum)
///     .with_boxed(plugin)
///     .build()?;
/// ```
pub struct DispatcherBuilder<H: Host> {
    name: &'static str,
    mixins: Vec<Box<dyn DynMixin<H>>>,
}

impl<H: Host> DispatcherBuilder<H> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME,
            mixins: Vec::new(),
        }
    }

    /// Name the dispatcher.
    ///
    /// The name is what the dispatcher reports when it is nested in another
    /// dispatcher, so sibling sub-dispatchers need distinct names.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Append a mixin.
    pub fn with<M: Mixin<H>>(mut self, mixin: M) -> Self {
        self.push(mixin);
        self
    }

    /// Append an already boxed mixin.
    pub fn with_boxed(mut self, mixin: Box<dyn DynMixin<H>>) -> Self {
        self.mixins.push(mixin);
        self
    }

    /// Append a mixin (mutable version).
    pub fn push<M: Mixin<H>>(&mut self, mixin: M) {
        self.mixins.push(Box::new(mixin));
    }

    /// Get the number of mixins added so far.
    pub fn len(&self) -> usize {
        self.mixins.len()
    }

    /// Check if no mixin was added.
    pub fn is_empty(&self) -> bool {
        self.mixins.is_empty()
    }

    /// Build the dispatcher.
    ///
    /// Fails if two mixins report the same name.
    pub fn build(self) -> Result<Dispatcher<H>, RegistrationError> {
        let mut dispatcher = Dispatcher::new(self.mixins)?;
        dispatcher.name = self.name;
        Ok(dispatcher)
    }
}

impl<H: Host> Default for DispatcherBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Fans lifecycle events out to an ordered list of mixins.
///
/// The mixin list is fixed at construction. The dispatcher has no other
/// state, so one instance can serve concurrent dispatches; any state shared
/// between those dispatches belongs to the mixins or the host.
pub struct Dispatcher<H: Host> {
    name: &'static str,
    entries: Vec<MixinEntry<H>>,
}

impl<H: Host> Dispatcher<H> {
    /// Create a dispatcher running `mixins` in the given order.
    ///
    /// No handler is invoked during construction.
    pub fn new(mixins: Vec<Box<dyn DynMixin<H>>>) -> Result<Self, RegistrationError> {
        let mut entries: Vec<MixinEntry<H>> = Vec::with_capacity(mixins.len());
        for mixin in mixins {
            let entry = MixinEntry::new(mixin);
            if entries.iter().any(|e| e.name == entry.name) {
                return Err(RegistrationError::DuplicateMixin(entry.name));
            }
            entries.push(entry);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            host = std::any::type_name::<H>(),
            mixins = ?entries.iter().map(|e| e.name).collect::<Vec<_>>(),
            "hook dispatcher built"
        );

        Ok(Self {
            name: DEFAULT_NAME,
            entries,
        })
    }

    /// Create a dispatcher with no mixins. Every dispatch is a no-op.
    pub fn empty() -> Self {
        Self {
            name: DEFAULT_NAME,
            entries: Vec::new(),
        }
    }

    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder<H> {
        DispatcherBuilder::new()
    }

    /// The name this dispatcher reports as a nested mixin.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the number of registered mixins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no mixin is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered mixins, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Names of the mixins that run for `event`, in the order they run.
    pub fn handlers(&self, event: LifecycleEvent) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.capabilities.handles(event))
            .map(|e| e.name)
    }

    /// Union of the capabilities of all registered mixins.
    pub fn capabilities(&self) -> Capabilities {
        self.entries
            .iter()
            .fold(Capabilities::empty(), |acc, e| acc | e.capabilities)
    }

    /// Registered mixins implementing `event`, in registration order.
    fn implementing(&self, event: LifecycleEvent) -> impl Iterator<Item = &dyn DynMixin<H>> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.capabilities.handles(event))
            .map(move |e| {
                #[cfg(feature = "tracing")]
                tracing::trace!(mixin = e.name, %event, "invoking lifecycle handler");
                e.mixin()
            })
    }

    /// Dispatch `configure(options)`.
    pub async fn configure(&self, host: &H, options: &mut H::Options) -> Result<(), BoxError> {
        let mut args = ConfigureArgs { options };
        Mixin::configure(self, host, &mut args).await
    }

    /// Dispatch `endpoint(endpoint, options)`.
    pub async fn endpoint(
        &self,
        host: &H,
        endpoint: &mut H::Endpoint,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = EndpointArgs { endpoint, options };
        Mixin::endpoint(self, host, &mut args).await
    }

    /// Dispatch `beforeRequest(model, request, response, options)`.
    pub async fn before_request(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::before_request(self, host, &mut args).await
    }

    /// Dispatch `beforeCreate(model, request, response, options)`.
    pub async fn before_create(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::before_create(self, host, &mut args).await
    }

    /// Dispatch `afterCreate(model, request, response, options)`.
    pub async fn after_create(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::after_create(self, host, &mut args).await
    }

    /// Dispatch `beforeUpdate(model, request, response, options)`.
    pub async fn before_update(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::before_update(self, host, &mut args).await
    }

    /// Dispatch `afterUpdate(model, request, response, options)`.
    pub async fn after_update(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::after_update(self, host, &mut args).await
    }

    /// Dispatch `beforeRead(queryCriteria, request, response, options)`.
    pub async fn before_read(
        &self,
        host: &H,
        query: &mut H::Query,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = QueryArgs {
            query,
            request,
            response,
            options,
        };
        Mixin::before_read(self, host, &mut args).await
    }

    /// Dispatch `afterRead(models, request, response, options)`.
    pub async fn after_read(
        &self,
        host: &H,
        models: &mut Vec<H::Model>,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ResultsArgs {
            models,
            request,
            response,
            options,
        };
        Mixin::after_read(self, host, &mut args).await
    }

    /// Dispatch `beforeDelete(model, request, response, options)`.
    pub async fn before_delete(
        &self,
        host: &H,
        model: &mut H::Model,
        request: &mut H::Request,
        response: &mut H::Response,
        options: &H::Options,
    ) -> Result<(), BoxError> {
        let mut args = ModelArgs {
            model,
            request,
            response,
            options,
        };
        Mixin::before_delete(self, host, &mut args).await
    }
}

impl<H: Host> Default for Dispatcher<H> {
    fn default() -> Self {
        Self::empty()
    }
}

// A dispatcher is itself a mixin, so dispatchers nest. The argument struct is
// built once by the caller and lent to every handler in turn.
macro_rules! fan_out {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        impl<H: Host> Mixin<H> for Dispatcher<H> {
            fn name(&self) -> &'static str {
                self.name
            }

            fn capabilities(&self) -> Capabilities {
                Dispatcher::capabilities(self)
            }

            $(
                async fn $method(&self, host: &H, args: &mut $args<'_, H>) -> Result<(), BoxError> {
                    for mixin in self.implementing(LifecycleEvent::$event) {
                        mixin.$dyn_method(host, args).await?;
                    }
                    Ok(())
                }
            )*
        }
    };
}

hookmix_core::__for_each_handler!(fan_out);

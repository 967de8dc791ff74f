//! Closure-based mixins.
//!
//! [`FnMixin`] holds one optional handler slot per lifecycle event. An empty
//! slot is an explicit "no handler": the event is left out of the mixin's
//! capabilities and the dispatcher never reaches it.
//!
//! Slot handlers are synchronous closures. Mixins that need to await inside
//! a handler implement [`Mixin`] directly.

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};

type ConfigureFn<H> = Box<dyn Fn(&H, &mut ConfigureArgs<'_, H>) -> Result<(), BoxError> + Send + Sync>;
type EndpointFn<H> = Box<dyn Fn(&H, &mut EndpointArgs<'_, H>) -> Result<(), BoxError> + Send + Sync>;
type ModelFn<H> = Box<dyn Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync>;
type QueryFn<H> = Box<dyn Fn(&H, &mut QueryArgs<'_, H>) -> Result<(), BoxError> + Send + Sync>;
type ResultsFn<H> = Box<dyn Fn(&H, &mut ResultsArgs<'_, H>) -> Result<(), BoxError> + Send + Sync>;

/// A mixin assembled from closures.
///
/// # Example
///
/// ```rust,ignore
/// let stamper = FnMixin::new("stamper")
///     .on_before_create(|_api, args| {
///         args.model.created_at = Some(now());
///         Ok(())
///     })
///     .on_after_create(|_api, args| {
///         args.response.status = 201;
///         Ok(())
///     });
/// ```
pub struct FnMixin<H: Host> {
    name: &'static str,
    configure: Option<ConfigureFn<H>>,
    endpoint: Option<EndpointFn<H>>,
    before_request: Option<ModelFn<H>>,
    before_create: Option<ModelFn<H>>,
    after_create: Option<ModelFn<H>>,
    before_update: Option<ModelFn<H>>,
    after_update: Option<ModelFn<H>>,
    before_read: Option<QueryFn<H>>,
    after_read: Option<ResultsFn<H>>,
    before_delete: Option<ModelFn<H>>,
}

impl<H: Host> FnMixin<H> {
    /// Create a mixin with no handlers.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            configure: None,
            endpoint: None,
            before_request: None,
            before_create: None,
            after_create: None,
            before_update: None,
            after_update: None,
            before_read: None,
            after_read: None,
            before_delete: None,
        }
    }

    /// Handle `configure`.
    pub fn on_configure<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ConfigureArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.configure = Some(Box::new(handler));
        self
    }

    /// Handle `endpoint`.
    pub fn on_endpoint<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut EndpointArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.endpoint = Some(Box::new(handler));
        self
    }

    /// Handle `beforeRequest`.
    pub fn on_before_request<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_request = Some(Box::new(handler));
        self
    }

    /// Handle `beforeCreate`.
    pub fn on_before_create<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_create = Some(Box::new(handler));
        self
    }

    /// Handle `afterCreate`.
    pub fn on_after_create<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after_create = Some(Box::new(handler));
        self
    }

    /// Handle `beforeUpdate`.
    pub fn on_before_update<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_update = Some(Box::new(handler));
        self
    }

    /// Handle `afterUpdate`.
    pub fn on_after_update<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after_update = Some(Box::new(handler));
        self
    }

    /// Handle `beforeRead`.
    pub fn on_before_read<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut QueryArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_read = Some(Box::new(handler));
        self
    }

    /// Handle `afterRead`.
    pub fn on_after_read<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ResultsArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.after_read = Some(Box::new(handler));
        self
    }

    /// Handle `beforeDelete`.
    pub fn on_before_delete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&H, &mut ModelArgs<'_, H>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.before_delete = Some(Box::new(handler));
        self
    }
}

macro_rules! slot_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        fn capabilities(&self) -> Capabilities {
            let mut capabilities = Capabilities::empty();
            $(
                capabilities.set(
                    Capabilities::of(LifecycleEvent::$event),
                    self.$method.is_some(),
                );
            )*
            capabilities
        }

        $(
            async fn $method(&self, host: &H, args: &mut $args<'_, H>) -> Result<(), BoxError> {
                match &self.$method {
                    Some(handler) => handler(host, args),
                    None => Ok(()),
                }
            }
        )*
    };
}

impl<H: Host> Mixin<H> for FnMixin<H> {
    fn name(&self) -> &'static str {
        self.name
    }

    hookmix_core::__for_each_handler!(slot_handlers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dispatcher;

    struct Api;

    impl Host for Api {
        type Options = ();
        type Endpoint = Vec<String>;
        type Model = Vec<String>;
        type Query = ();
        type Request = ();
        type Response = ();
    }

    #[test]
    fn test_capabilities_follow_filled_slots() {
        let mixin = FnMixin::<Api>::new("partial")
            .on_endpoint(|_, _| Ok(()))
            .on_after_update(|_, _| Ok(()));

        assert_eq!(
            mixin.capabilities(),
            Capabilities::ENDPOINT | Capabilities::AFTER_UPDATE
        );
        assert!(FnMixin::<Api>::new("empty").capabilities().is_empty());
    }

    #[tokio::test]
    async fn test_closures_see_each_others_writes() {
        let hooks = Dispatcher::builder()
            .with(FnMixin::new("writer").on_before_create(|_, args: &mut ModelArgs<'_, Api>| {
                args.model.push("written".to_owned());
                Ok(())
            }))
            .with(FnMixin::new("reader").on_before_create(|_, args: &mut ModelArgs<'_, Api>| {
                let seen = args.model.len();
                args.model.push(format!("saw {seen}"));
                Ok(())
            }))
            .build()
            .unwrap();

        let mut model = Vec::new();
        hooks
            .before_create(&Api, &mut model, &mut (), &mut (), &())
            .await
            .unwrap();

        assert_eq!(model, vec!["written", "saw 1"]);
    }

    #[tokio::test]
    async fn test_closure_error_propagates() {
        let hooks = Dispatcher::builder()
            .with(FnMixin::<Api>::new("routes").on_endpoint(|_, args| {
                if args.endpoint.is_empty() {
                    return Err("endpoint has no path".into());
                }
                Ok(())
            }))
            .build()
            .unwrap();

        let err = hooks.endpoint(&Api, &mut Vec::new(), &()).await.unwrap_err();
        assert_eq!(err.to_string(), "endpoint has no path");

        hooks
            .endpoint(&Api, &mut vec!["/articles".to_owned()], &())
            .await
            .unwrap();
    }
}

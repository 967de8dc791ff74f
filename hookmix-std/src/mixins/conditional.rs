//! Conditional mixins - run a mixin only for some hosts.

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};

/// A mixin that runs an inner mixin only when a predicate holds for the host.
///
/// The predicate is evaluated on every dispatch, against the host that fired
/// the event. When it is `false` the handler returns `Ok(())` without calling
/// the inner mixin.
///
/// `When` reports the inner mixin's name and capabilities, so it takes the
/// inner mixin's place in a dispatcher.
///
/// # Example
///
/// ```rust,ignore
/// // Encrypt fields only for APIs that opted in.
/// let crypto = When::new(|api: &ArticlesApi| api.options.encrypted, Crypto::default());
///
/// let hooks = Dispatcher::builder().with(Meta).with(crypto).build()?;
/// ```
pub struct When<P, M> {
    predicate: P,
    inner: M,
}

impl<P, M> When<P, M> {
    /// Create a new `When`.
    ///
    /// The inner mixin only runs when `predicate(host)` returns `true`.
    pub fn new(predicate: P, inner: M) -> Self {
        Self { predicate, inner }
    }

    /// The wrapped mixin.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

macro_rules! gated_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, host: &H, args: &mut $args<'_, H>) -> Result<(), BoxError> {
                if (self.predicate)(host) {
                    self.inner.$method(host, args).await
                } else {
                    Ok(())
                }
            }
        )*
    };
}

impl<H, P, M> Mixin<H> for When<P, M>
where
    H: Host,
    P: Fn(&H) -> bool + Send + Sync + 'static,
    M: Mixin<H>,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }

    hookmix_core::__for_each_handler!(gated_handlers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Dispatcher,
        testing::{RecordingMixin, Trace},
    };

    struct Api {
        encrypted: bool,
    }

    impl Host for Api {
        type Options = ();
        type Endpoint = ();
        type Model = ();
        type Query = ();
        type Request = ();
        type Response = ();
    }

    #[tokio::test]
    async fn test_when_gates_on_host() {
        let trace = Trace::new();
        let hooks = Dispatcher::builder()
            .with(When::new(
                |api: &Api| api.encrypted,
                RecordingMixin::new("crypto", &trace).only(Capabilities::BEFORE_UPDATE),
            ))
            .build()
            .unwrap();

        let plain = Api { encrypted: false };
        hooks
            .before_update(&plain, &mut (), &mut (), &mut (), &())
            .await
            .unwrap();
        assert!(trace.is_empty());

        let sealed = Api { encrypted: true };
        hooks
            .before_update(&sealed, &mut (), &mut (), &mut (), &())
            .await
            .unwrap();
        assert_eq!(trace.names(), vec!["crypto"]);
    }

    #[test]
    fn test_when_reports_inner_identity() {
        let trace = Trace::new();
        let gated = When::new(
            |_: &Api| true,
            RecordingMixin::new("meta", &trace).only(Capabilities::ENDPOINT),
        );
        assert_eq!(Mixin::<Api>::name(&gated), "meta");
        assert_eq!(Mixin::<Api>::capabilities(&gated), Capabilities::ENDPOINT);
    }
}

//! Tracing instrumentation for mixins.

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};
use tracing::Instrument;

/// A mixin wrapper that runs every handler of the inner mixin inside a
/// `tracing` span.
///
/// The span is named `mixin` and carries the inner mixin's name and the
/// event. Errors pass through untouched. The wrapper keeps the inner mixin's
/// name and capabilities.
///
/// # Example
///
/// ```rust,ignore
/// let hooks = Dispatcher::builder()
///     .with(Instrumented::new(Crypto::default()))
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Instrumented<M> {
    inner: M,
}

impl<M> Instrumented<M> {
    /// Wrap `inner`.
    pub const fn new(inner: M) -> Self {
        Self { inner }
    }
}

macro_rules! instrumented_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, host: &H, args: &mut $args<'_, H>) -> Result<(), BoxError> {
                let span = tracing::debug_span!(
                    "mixin",
                    mixin = self.inner.name(),
                    event = %LifecycleEvent::$event,
                );
                self.inner.$method(host, args).instrument(span).await
            }
        )*
    };
}

impl<H, M> Mixin<H> for Instrumented<M>
where
    H: Host,
    M: Mixin<H>,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }

    hookmix_core::__for_each_handler!(instrumented_handlers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Dispatcher,
        testing::{FailingMixin, NullHost, RecordingMixin, Trace},
    };

    #[tokio::test]
    async fn test_instrumented_passthrough() {
        let trace = Trace::new();
        let hooks = Dispatcher::builder()
            .with(Instrumented::new(
                RecordingMixin::new("traced", &trace).only(Capabilities::BEFORE_READ),
            ))
            .build()
            .unwrap();

        assert_eq!(hooks.names().collect::<Vec<_>>(), vec!["traced"]);
        hooks
            .before_read(&NullHost, &mut (), &mut (), &mut (), &())
            .await
            .unwrap();
        assert_eq!(trace.names(), vec!["traced"]);
    }

    #[tokio::test]
    async fn test_instrumented_keeps_error() {
        let trace = Trace::new();
        let hooks = Dispatcher::builder()
            .with(Instrumented::new(FailingMixin::new(
                "boom",
                LifecycleEvent::BeforeDelete,
                &trace,
            )))
            .build()
            .unwrap();

        let err = hooks
            .before_delete(&NullHost, &mut (), &mut (), &mut (), &())
            .await
            .unwrap_err();
        assert!(err.is::<crate::testing::InjectedFailure>());
    }
}

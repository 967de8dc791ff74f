//! Logging mixin for lifecycle observation.

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};

/// A mixin that logs every lifecycle event it sees.
///
/// It handles all events, never fails and never touches the arguments.
/// Records are emitted through `tracing` at debug level when the `tracing`
/// feature is enabled; otherwise the mixin is a silent participant.
///
/// # Example
///
/// ```rust,ignore
/// let hooks = Dispatcher::builder()
///     .with(LoggingMixin::named("articles-log"))
///     .with(Checksum)
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingMixin {
    name: &'static str,
}

impl LoggingMixin {
    /// Create a new `LoggingMixin` named `"logging"`.
    pub fn new() -> Self {
        Self { name: "logging" }
    }

    /// Create a new `LoggingMixin` with a custom name.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    fn log<H: Host>(&self, event: LifecycleEvent) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                mixin = self.name,
                host = std::any::type_name::<H>(),
                %event,
                "lifecycle event"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
    }
}

impl Default for LoggingMixin {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! logging_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, _host: &H, _args: &mut $args<'_, H>) -> Result<(), BoxError> {
                self.log::<H>(LifecycleEvent::$event);
                Ok(())
            }
        )*
    };
}

impl<H: Host> Mixin<H> for LoggingMixin {
    fn name(&self) -> &'static str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    hookmix_core::__for_each_handler!(logging_handlers);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Dispatcher,
        testing::{NullHost, RecordingMixin, Trace},
    };

    #[tokio::test]
    async fn test_logging_mixin_is_transparent() {
        let trace = Trace::new();
        let hooks = Dispatcher::builder()
            .with(LoggingMixin::new())
            .with(RecordingMixin::new("next", &trace))
            .build()
            .unwrap();

        hooks
            .after_create(&NullHost, &mut (), &mut (), &mut (), &())
            .await
            .unwrap();

        assert_eq!(trace.names(), vec!["next"]);
        assert_eq!(
            hooks.handlers(LifecycleEvent::AfterCreate).collect::<Vec<_>>(),
            vec!["logging", "next"]
        );
    }

    #[test]
    fn test_logging_mixin_named() {
        let mixin = LoggingMixin::named("audit");
        assert_eq!(Mixin::<NullHost>::name(&mixin), "audit");
        assert_eq!(
            Mixin::<NullHost>::capabilities(&mixin),
            Capabilities::all()
        );
    }
}

//! Testing utilities for hookmix.
//!
//! This module provides utilities to make testing mixins and dispatchers
//! easier.
//!
//! # Features
//!
//! - [`Trace`]: A shared, ordered log of handler invocations
//! - [`RecordingMixin`]: A mixin that records every event it handles
//! - [`FailingMixin`]: A mixin that fails on one chosen event
//! - [`NullHost`]: A host whose collaborator types are all `()`

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

// ============================================================================
// Null Host
// ============================================================================

/// A host for tests that do not look at handler arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl Host for NullHost {
    type Options = ();
    type Endpoint = ();
    type Model = ();
    type Query = ();
    type Request = ();
    type Response = ();
}

// ============================================================================
// Trace
// ============================================================================

/// A shared, ordered log of `(mixin, event)` invocations.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let trace = Trace::new();
/// let hooks = Dispatcher::builder()
///     .with(RecordingMixin::new("a", &trace))
///     .build()?;
///
/// hooks.configure(&host, &mut options).await?;
/// assert_eq!(trace.names(), vec!["a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trace {
    entries: Arc<Mutex<Vec<(&'static str, LifecycleEvent)>>>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invocation.
    pub fn record(&self, mixin: &'static str, event: LifecycleEvent) {
        self.lock().push((mixin, event));
    }

    /// Get a copy of every recorded invocation.
    pub fn entries(&self) -> Vec<(&'static str, LifecycleEvent)> {
        self.lock().clone()
    }

    /// Get the mixin names in invocation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(|(name, _)| *name).collect()
    }

    /// Get the events a given mixin handled, in order.
    pub fn events_of(&self, mixin: &str) -> Vec<LifecycleEvent> {
        self.lock()
            .iter()
            .filter(|(name, _)| *name == mixin)
            .map(|(_, event)| *event)
            .collect()
    }

    /// Get the number of recorded invocations.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(&'static str, LifecycleEvent)>> {
        // A panicking test thread must not hide the invocations recorded so far.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Recording Mixin
// ============================================================================

/// A mixin that records every event it handles into a [`Trace`].
///
/// Handles every event unless narrowed with [`only`](RecordingMixin::only).
#[derive(Debug, Clone)]
pub struct RecordingMixin {
    name: &'static str,
    capabilities: Capabilities,
    trace: Trace,
}

impl RecordingMixin {
    /// Create a recording mixin handling every event.
    pub fn new(name: &'static str, trace: &Trace) -> Self {
        Self {
            name,
            capabilities: Capabilities::all(),
            trace: trace.clone(),
        }
    }

    /// Restrict the events this mixin handles.
    pub fn only(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

macro_rules! recording_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, _host: &H, _args: &mut $args<'_, H>) -> Result<(), BoxError> {
                self.trace.record(self.name, LifecycleEvent::$event);
                Ok(())
            }
        )*
    };
}

impl<H: Host> Mixin<H> for RecordingMixin {
    fn name(&self) -> &'static str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    hookmix_core::__for_each_handler!(recording_handlers);
}

// ============================================================================
// Failing Mixin
// ============================================================================

/// The error raised by [`FailingMixin`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{mixin} failed on {event}")]
pub struct InjectedFailure {
    /// Name of the failing mixin.
    pub mixin: &'static str,
    /// The event it failed on.
    pub event: LifecycleEvent,
}

/// A mixin that handles a single event and always fails on it.
///
/// The invocation is recorded into the trace before the failure is returned.
#[derive(Debug, Clone)]
pub struct FailingMixin {
    name: &'static str,
    event: LifecycleEvent,
    trace: Trace,
}

impl FailingMixin {
    /// Create a mixin failing on `event`.
    pub fn new(name: &'static str, event: LifecycleEvent, trace: &Trace) -> Self {
        Self {
            name,
            event,
            trace: trace.clone(),
        }
    }

    fn fail(&self, event: LifecycleEvent) -> Result<(), BoxError> {
        self.trace.record(self.name, event);
        if event == self.event {
            Err(Box::new(InjectedFailure {
                mixin: self.name,
                event,
            }))
        } else {
            Ok(())
        }
    }
}

macro_rules! failing_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, _host: &H, _args: &mut $args<'_, H>) -> Result<(), BoxError> {
                self.fail(LifecycleEvent::$event)
            }
        )*
    };
}

impl<H: Host> Mixin<H> for FailingMixin {
    fn name(&self) -> &'static str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::of(self.event)
    }

    hookmix_core::__for_each_handler!(failing_handlers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_mixin_records_in_order() {
        let trace = Trace::new();
        let recorder = RecordingMixin::new("rec", &trace);

        let mut args = ModelArgs::<NullHost> {
            model: &mut (),
            request: &mut (),
            response: &mut (),
            options: &(),
        };
        recorder.before_create(&NullHost, &mut args).await.unwrap();
        recorder.after_create(&NullHost, &mut args).await.unwrap();

        assert_eq!(
            trace.entries(),
            vec![
                ("rec", LifecycleEvent::BeforeCreate),
                ("rec", LifecycleEvent::AfterCreate),
            ]
        );
        assert_eq!(
            trace.events_of("rec"),
            vec![LifecycleEvent::BeforeCreate, LifecycleEvent::AfterCreate]
        );
        assert!(trace.events_of("other").is_empty());
    }

    #[tokio::test]
    async fn test_failing_mixin_error_is_downcastable() {
        let trace = Trace::new();
        let failing = FailingMixin::new("boom", LifecycleEvent::Configure, &trace);
        assert_eq!(
            Mixin::<NullHost>::capabilities(&failing),
            Capabilities::CONFIGURE
        );

        let err = Mixin::<NullHost>::configure(
            &failing,
            &NullHost,
            &mut ConfigureArgs { options: &mut () },
        )
        .await
        .unwrap_err();

        let failure = err.downcast_ref::<InjectedFailure>().unwrap();
        assert_eq!(failure.event, LifecycleEvent::Configure);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_trace_clones_share_entries() {
        let trace = Trace::new();
        let other = trace.clone();
        other.record("x", LifecycleEvent::Endpoint);
        assert_eq!(trace.names(), vec!["x"]);
        trace.clear();
        assert!(other.is_empty());
    }
}

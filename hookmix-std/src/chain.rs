//! Static mixin chains.
//!
//! An HList of mixins is itself a mixin: each handler runs the head (when the
//! head handles the event) and then the tail. The whole chain is known at
//! compile time, so it dispatches without boxing.
//!
//! A chain registered in a [`Dispatcher`] counts as a single mixin; names
//! inside a chain are not checked for uniqueness.
//!
//! [`Dispatcher`]: crate::Dispatcher

use hookmix_core::{
    BoxError, Capabilities, ConfigureArgs, EndpointArgs, Host, LifecycleEvent, Mixin, ModelArgs,
    QueryArgs, ResultsArgs,
};

/// HList terminator - an empty mixin chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HNil;

/// HList cons cell - a mixin followed by more mixins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HCons<A, B> {
    /// The mixin that runs first.
    pub head: A,
    /// The rest of the chain.
    pub tail: B,
}

impl<H: Host> Mixin<H> for HNil {
    fn name(&self) -> &'static str {
        "nil"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }
}

macro_rules! chain_handlers {
    ($($method:ident, $dyn_method:ident, $event:ident, $args:ident;)*) => {
        $(
            async fn $method(&self, host: &H, args: &mut $args<'_, H>) -> Result<(), BoxError> {
                if self.head.capabilities().handles(LifecycleEvent::$event) {
                    self.head.$method(host, args).await?;
                }
                self.tail.$method(host, args).await
            }
        )*
    };
}

impl<H, A, B> Mixin<H> for HCons<A, B>
where
    H: Host,
    A: Mixin<H>,
    B: Mixin<H>,
{
    fn capabilities(&self) -> Capabilities {
        self.head.capabilities() | self.tail.capabilities()
    }

    hookmix_core::__for_each_handler!(chain_handlers);
}

/// Trait for computing HList length at compile time.
pub trait ChainLen {
    /// The number of mixins in the chain.
    const LEN: usize;
}

impl ChainLen for HNil {
    const LEN: usize = 0;
}

impl<A, B: ChainLen> ChainLen for HCons<A, B> {
    const LEN: usize = 1 + B::LEN;
}

/// Construct a static mixin chain from a list of mixins.
///
/// # Example
/// ```ignore
/// let chain = mixins![Meta, Checksum, NestedModels::default()];
/// let hooks = Dispatcher::builder().with(chain).build()?;
/// ```
#[macro_export]
macro_rules! mixins {
    () => { $crate::chain::HNil };
    ($mixin:expr $(,)?) => {
        $crate::chain::HCons {
            head: $mixin,
            tail: $crate::chain::HNil,
        }
    };
    ($mixin:expr, $($rest:expr),+ $(,)?) => {
        $crate::chain::HCons {
            head: $mixin,
            tail: $crate::mixins!($($rest),+),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Dispatcher,
        testing::{FailingMixin, NullHost, RecordingMixin, Trace},
    };

    #[tokio::test]
    async fn test_chain_runs_implementers_in_order() {
        let trace = Trace::new();
        let chain = crate::mixins![
            RecordingMixin::new("a", &trace).only(Capabilities::AFTER_READ),
            RecordingMixin::new("b", &trace).only(Capabilities::CONFIGURE),
            RecordingMixin::new("c", &trace).only(Capabilities::AFTER_READ),
        ];
        assert_eq!(
            Mixin::<NullHost>::capabilities(&chain),
            Capabilities::AFTER_READ | Capabilities::CONFIGURE
        );

        let mut models = Vec::new();
        let mut args = ResultsArgs::<NullHost> {
            models: &mut models,
            request: &mut (),
            response: &mut (),
            options: &(),
        };
        chain.after_read(&NullHost, &mut args).await.unwrap();

        assert_eq!(trace.names(), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_chain_in_dispatcher_fails_fast() {
        let trace = Trace::new();
        let chain = crate::mixins![
            RecordingMixin::new("a", &trace),
            FailingMixin::new("b", LifecycleEvent::BeforeRequest, &trace),
            RecordingMixin::new("c", &trace),
        ];
        let hooks = Dispatcher::builder()
            .with(chain)
            .with(RecordingMixin::new("after-chain", &trace))
            .build()
            .unwrap();

        let result = hooks
            .before_request(&NullHost, &mut (), &mut (), &mut (), &())
            .await;

        assert!(result.is_err());
        assert_eq!(trace.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_chain_len() {
        type Three = HCons<HNil, HCons<HNil, HCons<HNil, HNil>>>;
        assert_eq!(<Three as ChainLen>::LEN, 3);
        assert_eq!(HNil::LEN, 0);
    }
}

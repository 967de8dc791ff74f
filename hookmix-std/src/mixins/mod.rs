//! Standard mixin implementations.

pub mod conditional;
#[cfg(feature = "tracing")]
pub mod instrument;
pub mod logging;

pub use conditional::When;
#[cfg(feature = "tracing")]
pub use instrument::Instrumented;
pub use logging::LoggingMixin;

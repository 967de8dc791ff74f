//! Argument shapes of the lifecycle events.
//!
//! A dispatch builds one of these structs from the references it was given
//! and passes the same struct to every handler in turn. Handlers therefore see
//! the caller's objects, never copies, and observe each other's writes.

use crate::host::Host;

/// Arguments of `configure`: `(options)`.
pub struct ConfigureArgs<'a, H: Host> {
    /// Options being assembled; mixins may fill in defaults.
    pub options: &'a mut H::Options,
}

/// Arguments of `endpoint`: `(endpoint, options)`.
pub struct EndpointArgs<'a, H: Host> {
    /// The route being registered.
    pub endpoint: &'a mut H::Endpoint,
    /// Host options.
    pub options: &'a H::Options,
}

/// Arguments of the single-model events: `(model, request, response, options)`.
///
/// Shared by `beforeRequest`, `beforeCreate`, `afterCreate`, `beforeUpdate`,
/// `afterUpdate` and `beforeDelete`.
pub struct ModelArgs<'a, H: Host> {
    /// The model being handled.
    pub model: &'a mut H::Model,
    /// The incoming request.
    pub request: &'a mut H::Request,
    /// The outgoing response.
    pub response: &'a mut H::Response,
    /// Host options.
    pub options: &'a H::Options,
}

/// Arguments of `beforeRead`: `(queryCriteria, request, response, options)`.
pub struct QueryArgs<'a, H: Host> {
    /// Criteria of the read about to run.
    pub query: &'a mut H::Query,
    /// The incoming request.
    pub request: &'a mut H::Request,
    /// The outgoing response.
    pub response: &'a mut H::Response,
    /// Host options.
    pub options: &'a H::Options,
}

/// Arguments of `afterRead`: `(models, request, response, options)`.
pub struct ResultsArgs<'a, H: Host> {
    /// Models returned by the read.
    pub models: &'a mut Vec<H::Model>,
    /// The incoming request.
    pub request: &'a mut H::Request,
    /// The outgoing response.
    pub response: &'a mut H::Response,
    /// Host options.
    pub options: &'a H::Options,
}

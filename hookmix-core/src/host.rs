//! The owning API object.

/// The object that owns a dispatcher and fires its lifecycle events.
///
/// A host is handed to every handler as its receiver, so all mixins taking
/// part in one dispatch observe the same host. Shared state written by one
/// mixin and read by another lives behind interior mutability on the host,
/// or in the arguments themselves.
///
/// The associated types are the collaborators of a request-handling flow.
/// hookmix never inspects them; it only forwards references.
///
/// # Example
///
/// ```rust,ignore
/// struct ArticlesApi { /* router, collection handle, ... */ }
///
/// impl Host for ArticlesApi {
///     type Options = ApiOptions;
///     type Endpoint = Route;
///     type Model = Article;
///     type Query = Criteria;
///     type Request = HttpRequest;
///     type Response = HttpResponse;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hookmix `Host`",
    label = "missing `Host` implementation",
    note = "Hosts name the option, endpoint, model, query, request and response types their mixins see."
)]
pub trait Host: Send + Sync + 'static {
    /// Configuration handed to `configure`, `endpoint` and every request event.
    type Options: Send + Sync + 'static;
    /// A route being registered.
    type Endpoint: Send + Sync + 'static;
    /// A persisted document.
    type Model: Send + Sync + 'static;
    /// Criteria of a read.
    type Query: Send + Sync + 'static;
    /// The incoming request.
    type Request: Send + Sync + 'static;
    /// The outgoing response.
    type Response: Send + Sync + 'static;
}

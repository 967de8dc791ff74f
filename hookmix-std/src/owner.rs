//! Delegation from a host to its dispatcher.
//!
//! A host that owns a [`Dispatcher`] implements [`Owner`] to expose the
//! dispatch methods on itself. The host then fires `api.before_create(...)`
//! directly, and every handler receives that host as its receiver.

use crate::dispatcher::Dispatcher;
use hookmix_core::{BoxError, Host};
use std::future::Future;

/// A host that owns the dispatcher for its mixins.
///
/// # Example
///
/// ```rust,ignore
/// struct ArticlesApi {
///     hooks: Dispatcher<ArticlesApi>,
///     options: ApiOptions,
/// }
///
/// impl Owner for ArticlesApi {
///     fn hooks(&self) -> &Dispatcher<Self> {
///         &self.hooks
///     }
/// }
///
/// // Inside request handling:
/// api.before_create(&mut article, &mut req, &mut res, &api.options).await?;
/// ```
pub trait Owner: Host + Sized {
    /// The dispatcher holding this host's mixins.
    fn hooks(&self) -> &Dispatcher<Self>;

    /// Fire `configure(options)` with `self` as receiver.
    fn configure(
        &self,
        options: &mut Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks().configure(self, options)
    }

    /// Fire `endpoint(endpoint, options)` with `self` as receiver.
    fn endpoint(
        &self,
        endpoint: &mut Self::Endpoint,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks().endpoint(self, endpoint, options)
    }

    /// Fire `beforeRequest(model, request, response, options)` with `self` as receiver.
    fn before_request(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .before_request(self, model, request, response, options)
    }

    /// Fire `beforeCreate(model, request, response, options)` with `self` as receiver.
    fn before_create(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .before_create(self, model, request, response, options)
    }

    /// Fire `afterCreate(model, request, response, options)` with `self` as receiver.
    fn after_create(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .after_create(self, model, request, response, options)
    }

    /// Fire `beforeUpdate(model, request, response, options)` with `self` as receiver.
    fn before_update(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .before_update(self, model, request, response, options)
    }

    /// Fire `afterUpdate(model, request, response, options)` with `self` as receiver.
    fn after_update(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .after_update(self, model, request, response, options)
    }

    /// Fire `beforeRead(queryCriteria, request, response, options)` with `self` as receiver.
    fn before_read(
        &self,
        query: &mut Self::Query,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .before_read(self, query, request, response, options)
    }

    /// Fire `afterRead(models, request, response, options)` with `self` as receiver.
    fn after_read(
        &self,
        models: &mut Vec<Self::Model>,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .after_read(self, models, request, response, options)
    }

    /// Fire `beforeDelete(model, request, response, options)` with `self` as receiver.
    fn before_delete(
        &self,
        model: &mut Self::Model,
        request: &mut Self::Request,
        response: &mut Self::Response,
        options: &Self::Options,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        self.hooks()
            .before_delete(self, model, request, response, options)
    }
}

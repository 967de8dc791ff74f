#![allow(dead_code)]

use hookmix::{BoxError, Capabilities, Host, Mixin, ModelArgs};
use std::{
    collections::{BTreeMap, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
    sync::{Mutex, PoisonError},
};

// ============================================================================
// Test Host: a document API
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiOptions {
    pub collection: String,
    pub defaults: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub middleware: Vec<&'static str>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub id: Option<u64>,
    pub body: String,
    pub checksum: Option<u64>,
    pub tags: Vec<String>,
}

impl Document {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria {
    pub tag: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    pub user: Option<String>,
    pub annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// A host that keeps a journal its mixins write into.
#[derive(Debug, Default)]
pub struct DocsApi {
    journal: Mutex<Vec<&'static str>>,
}

impl DocsApi {
    pub fn note(&self, entry: &'static str) {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn journal(&self) -> Vec<&'static str> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Host for DocsApi {
    type Options = ApiOptions;
    type Endpoint = Route;
    type Model = Document;
    type Query = Criteria;
    type Request = Request;
    type Response = Response;
}

/// Empty arguments for a model event.
pub fn model_args() -> (Document, Request, Response, ApiOptions) {
    (
        Document::new("hello"),
        Request::default(),
        Response::default(),
        ApiOptions::default(),
    )
}

// ============================================================================
// Test Mixins
// ============================================================================

pub fn digest(body: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    hasher.finish()
}

/// Stamps a checksum on the model and announces it on the request.
pub struct Checksum;

impl Checksum {
    fn stamp(args: &mut ModelArgs<'_, DocsApi>) {
        let sum = digest(&args.model.body);
        args.model.checksum = Some(sum);
        args.request
            .annotations
            .insert("checksum".to_string(), sum.to_string());
    }
}

impl Mixin<DocsApi> for Checksum {
    fn name(&self) -> &'static str {
        "checksum"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BEFORE_CREATE | Capabilities::BEFORE_UPDATE
    }

    async fn before_create(
        &self,
        _api: &DocsApi,
        args: &mut ModelArgs<'_, DocsApi>,
    ) -> Result<(), BoxError> {
        Self::stamp(args);
        Ok(())
    }

    async fn before_update(
        &self,
        _api: &DocsApi,
        args: &mut ModelArgs<'_, DocsApi>,
    ) -> Result<(), BoxError> {
        Self::stamp(args);
        Ok(())
    }
}

/// Tags the model with what earlier mixins left on the request.
pub struct NestedModels;

impl Mixin<DocsApi> for NestedModels {
    fn name(&self) -> &'static str {
        "nested-models"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::BEFORE_CREATE
    }

    async fn before_create(
        &self,
        _api: &DocsApi,
        args: &mut ModelArgs<'_, DocsApi>,
    ) -> Result<(), BoxError> {
        if let Some(sum) = args.request.annotations.get("checksum") {
            args.model.tags.push(format!("checksum:{sum}"));
        }
        Ok(())
    }
}

/// A mixin with no handlers at all.
pub struct Inert;

impl Mixin<DocsApi> for Inert {
    fn name(&self) -> &'static str {
        "inert"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }
}

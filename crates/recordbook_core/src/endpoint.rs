//! Request shapes for the remote backend.
//!
//! When collections live on a server instead of in a local key-value
//! store, the client only shapes requests; id assignment and not-found
//! detection happen server-side with the same collection invariants. This
//! module builds those requests without sending them, and reports which
//! cached responses a successful mutation makes stale.

use crate::collection::{JsonRecord, Record};
use crate::entity::LooseId;
use crate::kinds::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// HTTP method of a backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Replace.
    Put,
    /// Remove.
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// A request to the remote backend.
///
/// Serializes as `{"url", "method", "params"?, "data"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Resource path.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Query parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    /// JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Cached responses that become stale once this request succeeds.
    #[serde(skip)]
    pub invalidates: Vec<String>,
}

impl ApiRequest {
    fn new(url: String, method: Method) -> Self {
        Self {
            url,
            method,
            params: Map::new(),
            data: None,
            invalidates: Vec::new(),
        }
    }

    /// Returns the key a response to this request is cached under.
    ///
    /// This is the URL plus its `id` parameter, e.g. `/api/parks?id=3`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self.params.get("id") {
            Some(id) if self.params.len() == 1 => {
                format!("{}?id={}", self.url, LooseId::from_json(id))
            }
            _ => self.url.clone(),
        }
    }
}

/// Builds requests for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    kind: EntityKind,
}

impl Endpoint {
    /// Creates the endpoint for `kind`.
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self { kind }
    }

    /// Returns the entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Key of the cached list response.
    #[must_use]
    pub fn list_cache_key(&self) -> String {
        format!("{}/all", self.kind.api_base())
    }

    /// `GET /api/<kind>/all`
    #[must_use]
    pub fn list(&self) -> ApiRequest {
        ApiRequest::new(self.list_cache_key(), Method::Get)
    }

    /// `GET /api/<kind>?id=<id>`
    #[must_use]
    pub fn get(&self, id: impl Into<LooseId>) -> ApiRequest {
        let mut request = ApiRequest::new(self.kind.api_base().to_string(), Method::Get);
        request.params.insert("id".into(), id.into().to_json());
        request
    }

    /// `POST /api/<kind>/post` with the record's fields as parameters.
    ///
    /// Any `id` on the record is dropped; the server assigns one.
    #[must_use]
    pub fn create(&self, record: &JsonRecord) -> ApiRequest {
        let mut request = ApiRequest::new(format!("{}/post", self.kind.api_base()), Method::Post);
        request.params = record.fields_without_id();
        request.invalidates.push(self.list_cache_key());
        request
    }

    /// `PUT /api/<kind>?id=<id>` with the other fields as the body.
    #[must_use]
    pub fn update(&self, record: &JsonRecord) -> ApiRequest {
        let mut request = ApiRequest::new(self.kind.api_base().to_string(), Method::Put);
        request.params.insert("id".into(), record.id().to_json());
        request.data = Some(Value::Object(record.fields_without_id()));
        request.invalidates.push(request.cache_key());
        request
    }

    /// `DELETE /api/<kind>?id=<id>`
    #[must_use]
    pub fn delete(&self, id: impl Into<LooseId>) -> ApiRequest {
        let mut request = ApiRequest::new(self.kind.api_base().to_string(), Method::Delete);
        request.params.insert("id".into(), id.into().to_json());
        request.invalidates.push(self.list_cache_key());
        request
    }

    /// Message shown after a successful delete.
    #[must_use]
    pub fn delete_message(&self, id: impl Into<LooseId>) -> String {
        format!("{} with id {} deleted", self.kind.display_name(), id.into())
    }
}

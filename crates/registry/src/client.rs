//! PDS Registry API client.
//!
//! This module provides a lightweight client for the registry's search
//! endpoints. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults (30s timeout,
//!   consistent User-Agent)
//! - Validating `PDS_SEARCH_API_BASE` overrides for safety
//! - Content negotiation between `application/json` and
//!   `application/kvp+json` response shapes
//! - The search/get operations shared by every tool surface
//!
//! The primary entry point is [`RegistryClient`]. Create an instance via
//! [`RegistryClient::from_env`], then call the operation methods.

use std::env;
use std::time::Duration;

use reqwest::{Client, header};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::context::ContextCategory;
use crate::params::{SearchParams, build_search_url};
use crate::urn::clean_urn;

/// Default public registry endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pds.mcp.nasa.gov/api/search/1";

/// Environment variable overriding the registry base URL.
pub const BASE_URL_ENV_VAR: &str = "PDS_SEARCH_API_BASE";

/// Base domains allowed for non-local configurations of
/// `PDS_SEARCH_API_BASE`. Subdomains are also allowed.
const ALLOWED_REGISTRY_DOMAINS: &[&str] = &["nasa.gov"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry responded with a non-2xx status.
    #[error("HTTP error occurred: {status} - {body}")]
    Status { status: u16, body: String },

    /// Network-level failure: connection, TLS, or timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client construction or configuration failure.
    #[error("{0}")]
    Config(String),
}

/// Accept-header selection for registry responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Nested `application/json` shape.
    Json,
    /// Flattened key-value-pair `application/kvp+json` shape.
    KvpJson,
}

impl ResponseFormat {
    pub fn accept_header(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::KvpJson => "application/kvp+json",
        }
    }
}

/// Class-scoped search endpoints under `/classes/{class}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductClass {
    Collection,
    Bundle,
}

impl ProductClass {
    pub fn path_segment(self) -> &'static str {
        match self {
            ProductClass::Collection => "collection",
            ProductClass::Bundle => "bundle",
        }
    }
}

/// Thin wrapper around a configured `reqwest::Client` for registry access.
///
/// The client validates its base URL at construction and builds every
/// request with a consistent User-Agent. All operations are read-only GETs.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl RegistryClient {
    /// Construct a client from `PDS_SEARCH_API_BASE`, falling back to the
    /// public registry endpoint.
    pub fn from_env() -> Result<Self, RegistryError> {
        let base_url = env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Construct a client against an explicit base URL.
    ///
    /// Non-localhost hosts must use HTTPS and sit within an allowed NASA
    /// domain.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|error| RegistryError::Config(format!("build http client: {error}")))?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("pds-registry-mcp/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// The validated base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` a URL and decode the JSON body.
    ///
    /// Non-2xx responses become [`RegistryError::Status`] carrying the status
    /// code and response body.
    pub async fn get_json(&self, url: &str, format: ResponseFormat) -> Result<Value, RegistryError> {
        debug!(%url, accept = format.accept_header(), "registry GET");
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, format.accept_header())
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Search the latest-versioned instances of all PDS products.
    ///
    /// `GET /products` with the caller's full parameter set.
    pub async fn search_products(&self, params: &SearchParams) -> Result<Value, RegistryError> {
        let url = build_search_url(&format!("{}/products", self.base_url), params);
        let body = self.get_json(&url, ResponseFormat::Json).await?;
        Ok(unwrap_data_envelope(body))
    }

    /// Search a class-scoped endpoint (`/classes/collection` or
    /// `/classes/bundle`).
    pub async fn search_class(&self, class: ProductClass, params: &SearchParams) -> Result<Value, RegistryError> {
        let url = build_search_url(&format!("{}/classes/{}", self.base_url, class.path_segment()), params);
        let body = self.get_json(&url, ResponseFormat::Json).await?;
        Ok(unwrap_data_envelope(body))
    }

    /// Search context products of one category, with optional keyword and
    /// type filters.
    pub async fn search_context(
        &self,
        category: ContextCategory,
        keywords: &[String],
        type_filter: Option<&str>,
        limit: u32,
    ) -> Result<Value, RegistryError> {
        let predicate = category.search_predicate(keywords, type_filter);
        let fields = category.default_fields().iter().map(|field| field.to_string()).collect();
        let params = SearchParams::filtered(predicate.to_query_string(), fields, limit);
        self.search_products(&params).await
    }

    /// Retrieve one product by its URN identifier.
    ///
    /// The identifier's `::<version>` suffix, if any, is stripped first; the
    /// registry resolves the bare LID to its latest version.
    pub async fn get_product(&self, identifier: &str) -> Result<Value, RegistryError> {
        let url = self.product_url(identifier);
        self.get_json(&url, ResponseFormat::Json).await
    }

    /// Single-product URL for a (possibly versioned) identifier.
    pub fn product_url(&self, identifier: &str) -> String {
        format!("{}/products/{}", self.base_url, clean_urn(identifier))
    }
}

/// Envelope-unwrapping rule shared by every search operation.
///
/// Search endpoints wrap matches in `{"summary": .., "data": [..]}`. When the
/// body is such an envelope the `data` array is returned; any other shape is
/// returned whole. The upstream implementation was inconsistent here; the
/// array form is the documented contract.
pub fn unwrap_data_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_array) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn validate_base_url(base: &str) -> Result<(), RegistryError> {
    let parsed = Url::parse(base).map_err(|error| RegistryError::Config(format!("invalid {BASE_URL_ENV_VAR} URL '{base}': {error}")))?;

    let host_name = parsed
        .host_str()
        .ok_or_else(|| RegistryError::Config(format!("{BASE_URL_ENV_VAR} must include a host")))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS.iter().any(|&allowed| host_name.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(RegistryError::Config(format!(
            "{BASE_URL_ENV_VAR} must use https for non-localhost hosts; got '{}://'",
            parsed.scheme()
        )));
    }

    let is_allowed_domain = ALLOWED_REGISTRY_DOMAINS
        .iter()
        .any(|&domain| host_name.eq_ignore_ascii_case(domain) || host_name.ends_with(&format!(".{domain}")));
    if !is_allowed_domain {
        return Err(RegistryError::Config(format!(
            "{BASE_URL_ENV_VAR} host '{host_name}' is not allowed; must be within {ALLOWED_REGISTRY_DOMAINS:?} or localhost"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_data_array_from_envelope() {
        let body = json!({
            "summary": {"hits": 1},
            "data": [{"title": "Cassini-Huygens", "lid": "urn:nasa:pds:context:investigation:mission.cassini-huygens"}]
        });
        assert_eq!(
            unwrap_data_envelope(body),
            json!([{"title": "Cassini-Huygens", "lid": "urn:nasa:pds:context:investigation:mission.cassini-huygens"}])
        );
    }

    #[test]
    fn non_envelope_bodies_pass_through() {
        let body = json!({"title": "Mars", "lid": "urn:nasa:pds:context:target:planet.mars"});
        assert_eq!(unwrap_data_envelope(body.clone()), body);

        let body = json!({"data": "not an array"});
        assert_eq!(unwrap_data_envelope(body.clone()), body);

        let body = json!([1, 2, 3]);
        assert_eq!(unwrap_data_envelope(body.clone()), body);
    }

    #[test]
    fn default_base_url_is_accepted() {
        let client = RegistryClient::with_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = RegistryClient::with_base_url(format!("{DEFAULT_BASE_URL}/")).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn non_https_remote_base_is_rejected() {
        let error = RegistryClient::with_base_url("http://pds.mcp.nasa.gov/api/search/1").unwrap_err();
        assert!(error.to_string().contains("https"));
    }

    #[test]
    fn non_nasa_remote_base_is_rejected() {
        assert!(RegistryClient::with_base_url("https://example.com/api").is_err());
    }

    #[test]
    fn localhost_base_is_allowed_with_any_scheme() {
        assert!(RegistryClient::with_base_url("http://127.0.0.1:8080/api/search/1").is_ok());
        assert!(RegistryClient::with_base_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn from_env_honors_override() {
        temp_env::with_var(BASE_URL_ENV_VAR, Some("http://localhost:9999/search"), || {
            let client = RegistryClient::from_env().unwrap();
            assert_eq!(client.base_url(), "http://localhost:9999/search");
        });
        temp_env::with_var_unset(BASE_URL_ENV_VAR, || {
            let client = RegistryClient::from_env().unwrap();
            assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        });
    }

    #[test]
    fn product_url_cleans_versioned_identifier() {
        let client = RegistryClient::with_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            client.product_url("urn:nasa:pds:context:target:planet.mercury::1.2"),
            format!("{DEFAULT_BASE_URL}/products/urn:nasa:pds:context:target:planet.mercury")
        );
    }
}

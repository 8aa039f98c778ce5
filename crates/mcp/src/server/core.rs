use std::sync::Arc;

use crate::server::resources::{list_resources, read_resource};
use crate::server::schemas::{ContextSearchRequestParam, ProductRequestParam, SearchRequestParam};
use pds_registry::{ContextCategory, ProductClass, RegistryClient, RegistryError, SearchParams, crawl};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData as McpError, Implementation, ListResourcesResult, PaginatedRequestParams, ProtocolVersion,
    ReadResourceRequestParams, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{ServerHandler, ServiceExt, service::RequestContext, tool, tool_handler, tool_router};
use serde_json::Value;
use tracing::warn;

/// Fields returned by `search_products` when the caller specifies none.
const DEFAULT_PRODUCT_FIELDS: &[&str] = &["id", "lid", "title", "description"];

/// Fields returned by the collection/bundle searches when the caller
/// specifies none. The `ref_lid_*` fields carry the URNs needed for
/// follow-up queries.
const DEFAULT_CLASS_FIELDS: &[&str] = &[
    "lid",
    "title",
    "description",
    "ref_lid_instrument",
    "ref_lid_instrument_host",
    "ref_lid_investigation",
    "ref_lid_target",
];

const DEFAULT_LIMIT: u32 = 10;

/// MCP handler exposing the PDS Registry search API.
#[derive(Clone)]
pub struct PdsMcpCore {
    tool_router: ToolRouter<Self>,
    registry: Arc<RegistryClient>,
}

#[tool_router]
impl PdsMcpCore {
    /// Create a handler backed by the provided registry client.
    pub fn new(registry: Arc<RegistryClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            registry,
        }
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search the latest-versioned instances of all PDS data products, including bundles, collections, documentation, context and observational products. Accepts a filter expression in the registry query grammar plus fields/limit/sort/search_after/facet parameters."
    )]
    async fn search_products(&self, param: Parameters<SearchRequestParam>) -> Result<CallToolResult, McpError> {
        let params = search_params(param.0, DEFAULT_PRODUCT_FIELDS);
        Ok(render(self.registry.search_products(&params).await))
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS collections of observational data products. Returns ref_lid_* URNs usable in follow-up provenance queries."
    )]
    async fn search_collections(&self, param: Parameters<SearchRequestParam>) -> Result<CallToolResult, McpError> {
        let params = search_params(param.0, DEFAULT_CLASS_FIELDS);
        Ok(render(self.registry.search_class(ProductClass::Collection, &params).await))
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS bundles, the coarsest level of the PDS4 product hierarchy. Returns ref_lid_* URNs usable in follow-up provenance queries."
    )]
    async fn search_bundles(&self, param: Parameters<SearchRequestParam>) -> Result<CallToolResult, McpError> {
        let params = search_params(param.0, DEFAULT_CLASS_FIELDS);
        Ok(render(self.registry.search_class(ProductClass::Bundle, &params).await))
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS Context products that are Investigations (missions, field campaigns, observing campaigns). Optional keywords match title/description; optional type_filter uses the pds://context/investigation-types values."
    )]
    async fn search_investigations(&self, param: Parameters<ContextSearchRequestParam>) -> Result<CallToolResult, McpError> {
        self.search_context(ContextCategory::Investigation, param.0).await
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS Context products that are Targets (planets, satellites, comets, asteroids, and other observed bodies). Optional keywords match title/description; optional type_filter uses the pds://context/target-types values."
    )]
    async fn search_targets(&self, param: Parameters<ContextSearchRequestParam>) -> Result<CallToolResult, McpError> {
        self.search_context(ContextCategory::Target, param.0).await
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS Context products that are Instruments. Optional keywords match title/description; optional type_filter uses the pds://context/instrument-types values."
    )]
    async fn search_instruments(&self, param: Parameters<ContextSearchRequestParam>) -> Result<CallToolResult, McpError> {
        self.search_context(ContextCategory::Instrument, param.0).await
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Search PDS Context products that are Instrument Hosts (spacecraft, landers, rovers, Earth-based facilities). Optional keywords match title/description; optional type_filter uses the pds://context/instrument-host-types values."
    )]
    async fn search_instrument_hosts(&self, param: Parameters<ContextSearchRequestParam>) -> Result<CallToolResult, McpError> {
        self.search_context(ContextCategory::InstrumentHost, param.0).await
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Retrieve a specific PDS product by its URN identifier, for example urn:nasa:pds:context:target:planet.mercury. A ::<version> suffix is stripped and the latest version is returned."
    )]
    async fn get_product(&self, param: Parameters<ProductRequestParam>) -> Result<CallToolResult, McpError> {
        Ok(render(self.registry.get_product(&param.0.identifier).await))
    }

    #[tool(
        annotations(read_only_hint = true, open_world_hint = true),
        description = "Retrieve the context products referenced by a PDS product, grouped into investigations, observing_system_components, and targets. Each reference is reduced to title, description, and id. Unresolvable references are skipped rather than failing the call."
    )]
    async fn get_product_references(&self, param: Parameters<ProductRequestParam>) -> Result<CallToolResult, McpError> {
        let outcome = crawl::crawl_references(&self.registry, &param.0.identifier)
            .await
            .and_then(|result| Ok(serde_json::to_value(result)?));
        Ok(render(outcome))
    }

    async fn search_context(&self, category: ContextCategory, param: ContextSearchRequestParam) -> Result<CallToolResult, McpError> {
        let keywords = param.keywords.unwrap_or_default();
        let limit = param.limit.unwrap_or(DEFAULT_LIMIT);
        let outcome = self
            .registry
            .search_context(category, &keywords, param.type_filter.as_deref(), limit)
            .await;
        Ok(render(outcome))
    }
}

#[tool_handler]
impl ServerHandler for PdsMcpCore {
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        std::future::ready(Ok(list_resources()))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        std::future::ready(read_resource(&request.uri))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().enable_resources().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "pds-registry-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("PDS Registry MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "This server provides access to NASA's Planetary Data System (PDS) search API.\n\
                 The PDS is a collection of PDS4 products organized into three hierarchical levels:\n\
                 bundles, collections, and observationals, in that order. Observationals are the\n\
                 labels for actual NASA data.\n\
                 QUERY FORMAT:\n\
                 Filter expressions use parenthesized eq/like comparisons with double-quoted operands,\n\
                 combined with and/or. Some queries require URN identifiers gathered from previous\n\
                 search results, for example a collection URN for a provenance filter.\n\
                 OUTPUT RULES:\n\
                 - Report the URNs of retrieved products to the user for future queries.\n\
                 - Suggest next steps for the user's data search."
                    .to_string(),
            ),
        }
    }
}

/// Serve the handler on stdio until the client disconnects.
pub async fn serve_stdio(registry: Arc<RegistryClient>) -> anyhow::Result<()> {
    let running = PdsMcpCore::new(registry).serve(stdio()).await?;
    running.waiting().await?;
    Ok(())
}

/// Lower a tool request into registry search parameters, filling in the
/// tool's default field list and result limit where the caller gave none.
fn search_params(param: SearchRequestParam, default_fields: &[&str]) -> SearchParams {
    SearchParams {
        query: param.query,
        fields: Some(
            param
                .fields
                .unwrap_or_else(|| default_fields.iter().map(|field| field.to_string()).collect()),
        ),
        limit: Some(param.limit.unwrap_or(DEFAULT_LIMIT)),
        sort: param.sort,
        search_after: param.search_after,
        facet_fields: param.facet_fields,
        facet_limit: param.facet_limit,
    }
}

/// Convert an operation outcome into tool-call content.
///
/// Successes carry the pretty-printed JSON body. Remote failures are
/// reported as human-readable text with the error flag set; they never
/// propagate as protocol errors, so one failed call cannot poison the
/// session.
fn render(outcome: Result<Value, RegistryError>) -> CallToolResult {
    match outcome {
        Ok(body) => {
            let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
            CallToolResult::success(vec![Content::text(text)])
        }
        Err(error @ RegistryError::Status { .. }) => {
            warn!(%error, "registry operation failed");
            CallToolResult::error(vec![Content::text(error.to_string())])
        }
        Err(error) => {
            warn!(%error, "registry operation failed");
            CallToolResult::error(vec![Content::text(format!("Error occurred: {error}"))])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|content| content.as_text())
            .map(|text| text.text.clone())
            .unwrap()
    }

    #[test]
    fn render_success_pretty_prints_json() {
        let result = render(Ok(json!([{"lid": "urn:nasa:pds:context:target:planet.mars"}])));
        assert_ne!(result.is_error, Some(true));
        assert!(first_text(&result).contains("urn:nasa:pds:context:target:planet.mars"));
    }

    #[test]
    fn render_status_error_formats_status_and_body() {
        let result = render(Err(RegistryError::Status {
            status: 500,
            body: "upstream broke".to_string(),
        }));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(first_text(&result), "HTTP error occurred: 500 - upstream broke");
    }

    #[test]
    fn search_params_fill_default_fields_and_limit() {
        let param: SearchRequestParam = serde_json::from_str("{}").unwrap();
        let params = search_params(param, DEFAULT_PRODUCT_FIELDS);
        assert_eq!(
            params.fields,
            Some(vec!["id".to_string(), "lid".to_string(), "title".to_string(), "description".to_string()])
        );
        assert_eq!(params.limit, Some(DEFAULT_LIMIT));
    }

    #[test]
    fn search_params_keep_caller_values() {
        let param: SearchRequestParam = serde_json::from_str(r#"{"fields": ["lid"], "limit": 2}"#).unwrap();
        let params = search_params(param, DEFAULT_PRODUCT_FIELDS);
        assert_eq!(params.fields, Some(vec!["lid".to_string()]));
        assert_eq!(params.limit, Some(2));
    }

    #[test]
    fn render_other_errors_use_generic_prefix() {
        let result = render(Err(RegistryError::Config("bad base url".to_string())));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(first_text(&result), "Error occurred: bad base url");
    }
}

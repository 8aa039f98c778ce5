use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters shared by the product, collection, and bundle search tools.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequestParam {
    /// Filter expression in the registry query grammar.
    #[schemars(
        description = "Filter expression, for example: (((title like \"pepssi\") or (description like \"pepssi\")) and ((title like \"pluto\") or (description like \"pluto\"))). Use URN identifiers from previous results for provenance filters such as (ops:Provenance.ops:parent_collection_identifier like \"urn:nasa:pds:cassini_iss_saturn:data_raw\")."
    )]
    pub query: Option<String>,
    /// Fields to return for each matching product.
    #[schemars(description = "Fields to return in the response. Defaults to id, lid, title, description.")]
    pub fields: Option<Vec<String>>,
    /// Maximum number of matching results returned, for pagination.
    #[schemars(description = "Maximum number of matching results returned (default: 10).")]
    pub limit: Option<u32>,
    /// Fields to sort by. The registry currently only sorts ascending.
    #[schemars(description = "Fields to sort by. Currently only sorts ascending.")]
    pub sort: Option<Vec<String>>,
    /// Pagination cursor from the last result of the previous page.
    #[schemars(description = "For pagination: field values of the last result returned in the previous page.")]
    pub search_after: Option<Vec<String>>,
    /// Fields to compute bucket aggregations for.
    #[schemars(description = "Return bucket aggregations for each field specified.")]
    pub facet_fields: Option<Vec<String>>,
    /// Number of most populous buckets returned per facet.
    #[schemars(description = "Number of most populous buckets to return for facets.")]
    pub facet_limit: Option<u32>,
}

/// Parameters for the context-category search tools.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContextSearchRequestParam {
    /// Keywords matched against product title and description.
    #[schemars(description = "Keywords to match against title and description, searched as one phrase.")]
    pub keywords: Option<Vec<String>>,
    /// Category type filter, one of the values from the matching type resource.
    #[schemars(description = "Optional type filter. Valid values are listed by the pds://context/*-types resources.")]
    pub type_filter: Option<String>,
    /// Maximum number of matching results returned.
    #[schemars(description = "Maximum number of matching results returned (default: 10).")]
    pub limit: Option<u32>,
}

/// Parameters for single-product tools.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductRequestParam {
    /// Product URN, with or without a `::<version>` suffix.
    #[schemars(
        description = "URN identifier of the PDS product, for example: urn:nasa:pds:context:target:planet.mercury. A ::<version> suffix is stripped before lookup."
    )]
    pub identifier: String,
}

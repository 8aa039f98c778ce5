//! Search URL construction.
//!
//! Every search endpoint of the registry accepts the same set of query
//! parameters. [`build_search_url`] serializes a [`SearchParams`] into the
//! exact query-string shape the upstream API expects, including its literal
//! single-quoting convention for the `q` filter expression.

use serde::{Deserialize, Serialize};

/// Common parameters for PDS search operations.
///
/// Every field is optional; absent fields are omitted from the query string
/// entirely. List-valued fields keep the caller's order, which the API treats
/// as significant (column order, sort precedence).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Filter expression in the registry query grammar. See [`crate::query`].
    pub query: Option<String>,
    /// Fields to return in each matching product.
    pub fields: Option<Vec<String>>,
    /// Maximum number of matching results returned.
    pub limit: Option<u32>,
    /// Fields to sort by, ascending only.
    pub sort: Option<Vec<String>>,
    /// Pagination cursor: field values of the last result on the previous page.
    pub search_after: Option<Vec<String>>,
    /// Fields to compute bucket aggregations for.
    pub facet_fields: Option<Vec<String>>,
    /// Number of most populous buckets to return per facet.
    pub facet_limit: Option<u32>,
}

impl SearchParams {
    /// Params carrying a filter expression, a field list, and a result limit,
    /// the shape used by the category search operations.
    pub fn filtered(query: String, fields: Vec<String>, limit: u32) -> Self {
        Self {
            query: Some(query),
            fields: Some(fields),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Build a search URL from a base endpoint URL and a parameter set.
///
/// Parameters appear in a fixed canonical order: `q`, `fields`, `limit`,
/// `sort`, `search-after`, `facet-fields`, `facet-limit`. Strings and lists
/// are included only when non-empty; the integer limits are included whenever
/// present (zero is a valid value). The `q` value is wrapped in single quotes,
/// reproducing the upstream convention.
///
/// Values are interpolated literally with no percent-encoding. The live API
/// parses the quoted filter grammar out of the raw query string, and encoding
/// the quotes breaks that parse, so this mirrors the observed wire format.
///
/// When every parameter is absent the result is `base_url` followed by a bare
/// `?`, matching the upstream client's output byte for byte.
pub fn build_search_url(base_url: &str, params: &SearchParams) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(query) = params.query.as_deref()
        && !query.is_empty()
    {
        pairs.push(("q", format!("'{query}'")));
    }
    push_list(&mut pairs, "fields", params.fields.as_deref());
    if let Some(limit) = params.limit {
        pairs.push(("limit", limit.to_string()));
    }
    push_list(&mut pairs, "sort", params.sort.as_deref());
    push_list(&mut pairs, "search-after", params.search_after.as_deref());
    push_list(&mut pairs, "facet-fields", params.facet_fields.as_deref());
    if let Some(facet_limit) = params.facet_limit {
        pairs.push(("facet-limit", facet_limit.to_string()));
    }

    let query_string = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<String>>()
        .join("&");
    format!("{base_url}?{query_string}")
}

fn push_list(pairs: &mut Vec<(&'static str, String)>, key: &'static str, values: Option<&[String]>) {
    if let Some(values) = values
        && !values.is_empty()
    {
        pairs.push((key, values.join(",")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pds.mcp.nasa.gov/api/search/1/products";

    #[test]
    fn all_absent_yields_bare_question_mark() {
        let url = build_search_url(BASE, &SearchParams::default());
        assert_eq!(url, format!("{BASE}?"));
        for token in ["q=", "fields=", "limit=", "sort=", "search-after=", "facet-fields=", "facet-limit="] {
            assert!(!url.contains(token), "unexpected token {token} in {url}");
        }
    }

    #[test]
    fn query_is_single_quoted_and_limit_literal() {
        let params = SearchParams {
            query: Some("X".to_string()),
            limit: Some(5),
            ..SearchParams::default()
        };
        assert_eq!(build_search_url(BASE, &params), format!("{BASE}?q='X'&limit=5"));
    }

    #[test]
    fn lists_are_comma_joined_in_caller_order() {
        let params = SearchParams {
            fields: Some(vec!["a".into(), "b".into(), "c".into()]),
            ..SearchParams::default()
        };
        assert_eq!(build_search_url(BASE, &params), format!("{BASE}?fields=a,b,c"));
    }

    #[test]
    fn zero_limit_is_included() {
        let params = SearchParams {
            limit: Some(0),
            facet_limit: Some(0),
            ..SearchParams::default()
        };
        assert_eq!(build_search_url(BASE, &params), format!("{BASE}?limit=0&facet-limit=0"));
    }

    #[test]
    fn empty_strings_and_lists_are_suppressed() {
        let params = SearchParams {
            query: Some(String::new()),
            fields: Some(Vec::new()),
            sort: Some(Vec::new()),
            ..SearchParams::default()
        };
        assert_eq!(build_search_url(BASE, &params), format!("{BASE}?"));
    }

    #[test]
    fn canonical_key_order() {
        let params = SearchParams {
            query: Some("(title like \"pluto\")".to_string()),
            fields: Some(vec!["id".into(), "title".into()]),
            limit: Some(10),
            sort: Some(vec!["title".into()]),
            search_after: Some(vec!["pluto".into()]),
            facet_fields: Some(vec!["ref_lid_target".into()]),
            facet_limit: Some(3),
        };
        assert_eq!(
            build_search_url(BASE, &params),
            format!(
                "{BASE}?q='(title like \"pluto\")'&fields=id,title&limit=10&sort=title&search-after=pluto&facet-fields=ref_lid_target&facet-limit=3"
            )
        );
    }

    #[test]
    fn deterministic() {
        let params = SearchParams::filtered("(title like \"moon\")".to_string(), vec!["lid".into()], 10);
        assert_eq!(build_search_url(BASE, &params), build_search_url(BASE, &params));
    }
}

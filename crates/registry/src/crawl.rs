//! Multi-hop crawling of a product's context references.
//!
//! A registry product response carries `{id, href}` cross-references to the
//! context products it relates to, grouped by relation category. The crawler
//! fetches the product, then follows every reference and reduces each
//! referenced product to a small summary, keyed by category and identifier.

use futures_util::{StreamExt, stream};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{RegistryClient, RegistryError, ResponseFormat};

/// Relation categories followed by the crawler, in presentation order.
pub const RELATION_CATEGORIES: [&str; 3] = ["investigations", "observing_system_components", "targets"];

/// Concurrent in-flight reference fetches. Fan-out is a latency optimization
/// only; result assembly is order-independent.
const REFERENCE_FETCH_CONCURRENCY: usize = 8;

/// A named edge from one product to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReference {
    pub id: String,
    pub href: String,
}

/// Reduced projection of a referenced product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub title: Option<String>,
    pub description: Option<String>,
    pub id: Option<String>,
}

/// Crawl result: relation category -> referenced URN -> summary.
///
/// All three category keys are always present; categories without resolvable
/// references map to empty tables.
pub type CrawlResult = IndexMap<String, IndexMap<String, ProductSummary>>;

/// Fetch `identifier` and resolve its context references into a
/// [`CrawlResult`].
///
/// Only a failure on the initial product fetch aborts the crawl. Each
/// reference fetch is isolated: a non-2xx status or malformed body drops that
/// one entry from the result and the crawl still succeeds. Total network
/// calls: one for the product plus one per reference, no retries.
pub async fn crawl_references(client: &RegistryClient, identifier: &str) -> Result<CrawlResult, RegistryError> {
    let product = client.get_product(identifier).await?;
    let references = extract_references(&product);

    let total: usize = references.values().map(Vec::len).sum();
    debug!(identifier, total, "crawling product references");

    let fetches: Vec<_> = references
        .iter()
        .flat_map(|(category, edges)| {
            edges.iter().map(move |edge| async move {
                let outcome = client.get_json(&edge.href, ResponseFormat::KvpJson).await;
                (category.as_str(), edge, outcome)
            })
        })
        .collect();

    let outcomes = stream::iter(fetches)
        .buffer_unordered(REFERENCE_FETCH_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;
    Ok(assemble_result(outcomes))
}

/// Fold fetch outcomes into the final result table.
///
/// A failed fetch drops only its own entry; the reference is logged and the
/// crawl still succeeds. All three category keys are present regardless of
/// which fetches resolved.
fn assemble_result<'a>(
    outcomes: impl IntoIterator<Item = (&'a str, &'a ProductReference, Result<Value, RegistryError>)>,
) -> CrawlResult {
    let mut result = empty_result();
    for (category, edge, outcome) in outcomes {
        match outcome {
            Ok(body) => {
                result
                    .entry(category.to_string())
                    .or_default()
                    .insert(edge.id.clone(), project_summary(&body));
            }
            Err(error) => {
                warn!(category, id = %edge.id, href = %edge.href, %error, "skipping unresolvable reference");
            }
        }
    }
    result
}

/// Collect `{id, href}` pairs from the three relation arrays of a decoded
/// product body. Missing or malformed arrays yield no references; entries
/// without both `id` and `href` are dropped.
pub fn extract_references(product: &Value) -> IndexMap<String, Vec<ProductReference>> {
    let mut references = IndexMap::new();
    for category in RELATION_CATEGORIES {
        let edges = product
            .get(category)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(reference_from_item).collect())
            .unwrap_or_default();
        references.insert(category.to_string(), edges);
    }
    references
}

fn reference_from_item(item: &Value) -> Option<ProductReference> {
    let id = item.get("id")?.as_str()?.to_string();
    let href = item.get("href")?.as_str()?.to_string();
    Some(ProductReference { id, href })
}

/// Reduce a referenced product body to its three-field summary.
///
/// The `application/kvp+json` shape may present a field as either a scalar
/// or a single-element array; both are accepted.
pub fn project_summary(body: &Value) -> ProductSummary {
    ProductSummary {
        title: scalar_field(body, "title"),
        description: scalar_field(body, "description"),
        id: scalar_field(body, "id"),
    }
}

fn scalar_field(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn empty_result() -> CrawlResult {
    RELATION_CATEGORIES
        .iter()
        .map(|category| (category.to_string(), IndexMap::new()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_references_per_category() {
        let product = json!({
            "id": "urn:nasa:pds:dawn-grand-mars:data_calibrated",
            "investigations": [{"id": "I1", "href": "H1"}],
            "targets": [
                {"id": "T1", "href": "H2"},
                {"id": "T2", "href": "H3"}
            ]
        });
        let references = extract_references(&product);
        assert_eq!(
            references["investigations"],
            vec![ProductReference { id: "I1".into(), href: "H1".into() }]
        );
        assert!(references["observing_system_components"].is_empty());
        assert_eq!(references["targets"].len(), 2);
    }

    #[test]
    fn entries_missing_id_or_href_are_dropped() {
        let product = json!({
            "investigations": [
                {"id": "I1"},
                {"href": "H1"},
                {"id": "I2", "href": "H2"},
                {"id": 42, "href": "H3"}
            ]
        });
        let references = extract_references(&product);
        assert_eq!(
            references["investigations"],
            vec![ProductReference { id: "I2".into(), href: "H2".into() }]
        );
    }

    #[test]
    fn summary_projection_keeps_three_fields() {
        let body = json!({"title": "T", "description": "D", "id": "I1", "extra": "ignored"});
        assert_eq!(
            project_summary(&body),
            ProductSummary {
                title: Some("T".into()),
                description: Some("D".into()),
                id: Some("I1".into()),
            }
        );
    }

    #[test]
    fn summary_projection_accepts_kvp_array_scalars() {
        let body = json!({"title": ["Apollo 12"], "description": [], "id": ["urn:nasa:pds:context:instrument:pse.a12a"]});
        assert_eq!(
            project_summary(&body),
            ProductSummary {
                title: Some("Apollo 12".into()),
                description: None,
                id: Some("urn:nasa:pds:context:instrument:pse.a12a".into()),
            }
        );
    }

    #[test]
    fn missing_fields_project_as_none() {
        assert_eq!(project_summary(&json!({})), ProductSummary::default());
    }

    #[test]
    fn assembled_result_groups_summaries_by_category() {
        let investigation = ProductReference { id: "I1".into(), href: "H1".into() };
        let outcomes = vec![(
            "investigations",
            &investigation,
            Ok(json!({"title": "Dawn", "description": "D", "id": "I1"})),
        )];
        let result = assemble_result(outcomes);
        assert_eq!(
            result.keys().collect::<Vec<_>>(),
            vec!["investigations", "observing_system_components", "targets"]
        );
        assert_eq!(
            result["investigations"]["I1"],
            ProductSummary {
                title: Some("Dawn".into()),
                description: Some("D".into()),
                id: Some("I1".into()),
            }
        );
        assert!(result["observing_system_components"].is_empty());
        assert!(result["targets"].is_empty());
    }

    #[test]
    fn failed_reference_fetch_drops_only_that_entry() {
        let resolved = ProductReference { id: "T1".into(), href: "H1".into() };
        let broken = ProductReference { id: "T2".into(), href: "H2".into() };
        let outcomes = vec![
            ("targets", &resolved, Ok(json!({"title": "Mars", "id": "T1"}))),
            (
                "targets",
                &broken,
                Err(RegistryError::Status { status: 404, body: "not found".to_string() }),
            ),
        ];
        let result = assemble_result(outcomes);
        assert_eq!(result["targets"].len(), 1);
        assert!(result["targets"].contains_key("T1"));
        assert!(!result["targets"].contains_key("T2"));
    }

    #[test]
    fn empty_result_carries_all_categories() {
        let result = empty_result();
        assert_eq!(
            result.keys().collect::<Vec<_>>(),
            vec!["investigations", "observing_system_components", "targets"]
        );
        assert!(result.values().all(IndexMap::is_empty));
    }
}

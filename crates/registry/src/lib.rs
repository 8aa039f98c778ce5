//! Client for NASA's Planetary Data System (PDS) Registry search API.
//!
//! The PDS Registry organizes PDS4 products into three hierarchical levels:
//! bundles, collections, and observationals. Context products describe the
//! missions, targets, instruments, and instrument hosts behind the data.
//! This crate provides:
//!
//! - Search URL construction from a common parameter set ([`SearchParams`],
//!   [`build_search_url`])
//! - A structured filter-expression builder serializing to the registry's
//!   query grammar ([`query::Expr`])
//! - URN/LID handling ([`clean_urn`])
//! - A configured HTTP client with the search operations ([`RegistryClient`])
//! - Multi-hop crawling of a product's context references
//!   ([`crawl::crawl_references`])

pub mod client;
pub mod context;
pub mod crawl;
pub mod params;
pub mod query;
pub mod urn;

pub use client::{ProductClass, RegistryClient, RegistryError};
pub use context::ContextCategory;
pub use crawl::{CrawlResult, ProductSummary};
pub use params::{SearchParams, build_search_url};
pub use urn::clean_urn;

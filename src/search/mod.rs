//! Search Module
//!
//! Builds arXiv API query-strings and relays them upstream:
//! - `query` - pure builders for the structured and free-form query-strings
//! - `arxiv` - HTTP client bound to the configured arXiv endpoint

pub mod arxiv;
pub mod query;

pub use arxiv::{ArxivClient, UpstreamResponse};
pub use query::{build_free_query, build_query, encode_terms};

//! BOLD search tools and their pipeline.
//!
//! Each tool call runs the same linear pipeline: the query mapper validates
//! arguments into a [`query::SearchQuery`], the [`client::BoldClient`]
//! performs one bounded GET, and [`records::parse_records`] normalizes the
//! TSV body into specimen records.

pub mod client;
pub mod common;
pub mod error;
pub mod query;
pub mod records;

mod combined;
mod specimen;

pub use client::{BoldClient, Endpoint};
pub use combined::CombinedSearchTool;
pub use error::{SearchError, SearchResult};
pub use query::{CombinedSearchParams, SearchQuery, SpecimenSearchParams};
pub use records::{SequenceData, SpecimenRecord, SpecimenSearchResult};
pub use specimen::SpecimenSearchTool;

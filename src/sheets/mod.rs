//! Vocabulary sheets: fetching, parsing and combining published CSV exports
//!
//! This module provides:
//! - Header-aware CSV row parsing
//! - HTTP and local-file fetching behind one trait
//! - Concurrent all-or-nothing aggregation into a tagged deck

pub mod aggregator;
pub mod fetch;
pub mod models;
pub mod parser;

pub use aggregator::{AggregationError, SourceAggregator, SourceFailure};
pub use fetch::{FetchError, HttpFetcher, SheetFetcher, SourceLocator};
pub use models::*;
pub use parser::{parse_rows, ParseError};

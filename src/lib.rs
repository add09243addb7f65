//! Supplementary Information Link Gatherer
//!
//! Reads a list of DOIs, renders each landing page in a headless browser,
//! collects links to supplementary documents (PDF / Word) and writes the
//! DOI to links mapping as YAML. A companion converter turns downloaded Word
//! documents into PDFs.
//!
//! # Architecture
//!
//! - [`parser`] - Identifier list parsing
//! - [`resolver`] - Routing and page rendering (headless Chromium)
//! - [`extractor`] - Link extraction strategies and filters
//! - [`gather`] - Sequential batch driver and range selection
//! - [`output`] - YAML persistence
//! - [`convert`] - Word to PDF batch conversion
//! - [`config`] - Run configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod convert;
pub mod extractor;
pub mod gather;
pub mod output;
pub mod parser;
pub mod resolver;

// Re-export commonly used types
pub use config::{ConfigError, GatherConfig};
pub use convert::{
    ConvertError, DocumentConverter, LibreOfficeConverter, convert_all, discover_documents,
};
pub use extractor::{LinkExtractor, LinkSet, extractor_for};
pub use gather::{
    GatherOutcome, GatherReport, GatherSummary, LinkGatherer, RangeSelection, ResultMapping,
    select_range,
};
pub use output::{OutputError, write_link_mapping};
pub use parser::{Identifier, InputError, read_identifier_file};
pub use resolver::{ChromeRenderer, IdentifierResolver, ResolveError, Route};

//! roster-core: Core library for merging per-college roster CSV exports
//!
//! This library provides functionality to:
//! - Read CSV headers and detect subject columns
//! - Plan a canonical, duplicate-free output column order
//! - Merge any number of roster files into one id-assigned CSV
//! - Discover input files in a data directory
//! - Record merge runs as JSON reports

pub mod discover;
pub mod error;
pub mod header;
pub mod merger;
pub mod report;
pub mod schema;

pub use discover::discover_inputs;
pub use error::{Error, Result};
pub use header::{extract_subjects, read_header};
pub use merger::{merge_file, merge_files, write_header, IdCounter, MergeSummary, SourceRows};
pub use report::MergeReport;
pub use schema::{plan_column_order, Column, ColumnOrder, REQUIRED_COLUMNS};

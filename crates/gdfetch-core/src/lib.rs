//! Core domain types for gdfetch.
//!
//! Pure data types and destination-directory housekeeping shared by the
//! retrieval engine and the CLI. No networking lives here.

#![deny(unused_crate_dependencies)]

pub mod fetch;
pub mod paths;

// Re-export commonly used types
pub use fetch::{
    FetchError, FetchOutcome, FetchResult, FetchTarget, FileId, ParseFileIdError, StrategyFailure,
    StrategyKind,
};
pub use paths::{ARCHIVE_FILE_NAME, archive_path, dir_listing, reset_dir};

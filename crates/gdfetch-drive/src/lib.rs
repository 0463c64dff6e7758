//! Google Drive retrieval engine for gdfetch.
//!
//! [`DriveFetcher`] turns a remote identifier plus a destination directory
//! into an extracted dataset. Retrieval runs an ordered chain of three
//! strategies (direct, sharing-link normalization, confirmed session) and
//! every run terminates in a typed [`FetchOutcome`] instead of an error.

#![deny(unused_crate_dependencies)]

mod archive;
mod client;
mod download;
mod fetcher;
mod progress;
mod strategy;
mod urls;

pub use download::ProgressFn;
pub use fetcher::DriveFetcher;
pub use progress::ProgressThrottle;
pub use urls::sharing_url;

// Re-export core types for convenience
pub use gdfetch_core::{
    ARCHIVE_FILE_NAME, FetchError, FetchOutcome, FetchResult, FetchTarget, FileId,
    StrategyFailure, StrategyKind,
};

// Exercised by the integration tests only; the unit-test target doesn't see them.
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use wiremock as _;

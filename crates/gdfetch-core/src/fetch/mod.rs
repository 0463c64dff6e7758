//! Fetch domain types, errors, and outcomes.
//!
//! This module contains pure data types for the fetch-and-extract pipeline.
//! No I/O, networking, or runtime dependencies allowed.
//!
//! # Structure
//!
//! - `types` - Identifiers and targets (`FileId`, `FetchTarget`, `StrategyKind`)
//! - `errors` - Error types for retrieval and archive handling
//! - `outcome` - Typed run results (`FetchOutcome`, `StrategyFailure`)

pub mod errors;
pub mod outcome;
pub mod types;

// Re-export commonly used types
pub use errors::{FetchError, FetchResult};
pub use outcome::{FetchOutcome, StrategyFailure};
pub use types::{FetchTarget, FileId, ParseFileIdError, StrategyKind};

//! Typed outcome of a fetch-and-extract run.
//!
//! Callers branch on [`FetchOutcome`] instead of parsing console text: it
//! names the strategy that produced the archive (or records why every
//! strategy failed) and distinguishes a malformed archive from a blocked
//! request.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::errors::FetchError;
use super::types::StrategyKind;

/// A retrieval strategy that was attempted and failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyFailure {
    /// Which strategy failed.
    pub strategy: StrategyKind,
    /// Why it failed.
    pub error: FetchError,
}

/// Terminal result of one fetch-and-extract run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// The archive was downloaded, validated, extracted, and deleted.
    Extracted {
        /// The strategy that produced the archive.
        strategy: StrategyKind,
        /// Sorted top-level names now present in the destination.
        entries: Vec<String>,
    },

    /// A strategy wrote a file, but it is not a well-formed archive.
    ///
    /// The file is left in place for inspection; extraction never ran. This
    /// usually means the host returned an error page instead of real data.
    ArchiveInvalid {
        /// The strategy that produced the file.
        strategy: StrategyKind,
        /// Where the malformed file sits.
        archive: PathBuf,
    },

    /// The archive validated but unpacking it failed partway.
    ExtractionFailed {
        /// The strategy that produced the archive.
        strategy: StrategyKind,
        /// The extraction failure.
        error: FetchError,
    },

    /// No strategy produced an archive file.
    Failed {
        /// Every attempt, in the order it ran.
        attempts: Vec<StrategyFailure>,
    },
}

impl FetchOutcome {
    /// True only for a fully extracted destination.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }

    /// The strategy that produced a file, if any did.
    #[must_use]
    pub const fn strategy(&self) -> Option<StrategyKind> {
        match self {
            Self::Extracted { strategy, .. }
            | Self::ArchiveInvalid { strategy, .. }
            | Self::ExtractionFailed { strategy, .. } => Some(*strategy),
            Self::Failed { .. } => None,
        }
    }
}

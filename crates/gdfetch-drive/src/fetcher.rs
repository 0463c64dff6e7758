//! The fetch-and-extract orchestrator.

use gdfetch_core::{
    FetchError, FetchOutcome, FetchResult, FetchTarget, StrategyFailure, paths,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::archive;
use crate::client;
use crate::download::ProgressFn;
use crate::strategy::STRATEGY_ORDER;
use crate::urls;

/// Retrieval engine bound to one HTTP client and one host.
pub struct DriveFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl DriveFetcher {
    /// Build a fetcher against the production host.
    pub fn new() -> FetchResult<Self> {
        Self::with_base_url(urls::DEFAULT_BASE_URL)
    }

    /// Build a fetcher against a different host. Tests point this at a local
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> FetchResult<Self> {
        Ok(Self {
            client: client::build_client()?,
            base_url: base_url.into(),
        })
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the archive for `target` and unpack it into the destination.
    ///
    /// The destination is wiped and recreated first, then the strategies run
    /// in order until one writes an archive. Every retrieval-path failure is
    /// folded into the returned [`FetchOutcome`]; the `Err` case is reserved
    /// for not being able to prepare the destination at all.
    pub async fn fetch_and_extract(
        &self,
        target: &FetchTarget,
        progress: Option<ProgressFn<'_>>,
    ) -> FetchResult<FetchOutcome> {
        paths::reset_dir(target.dest_dir())?;
        let archive_file = target.archive_path();

        let mut attempts = Vec::new();
        let mut succeeded = None;
        for kind in STRATEGY_ORDER {
            info!(strategy = %kind, file_id = %target.file_id(), "attempting retrieval");
            match self
                .attempt(kind, target.file_id(), &archive_file, progress)
                .await
            {
                Ok(()) => {
                    succeeded = Some(kind);
                    break;
                }
                Err(error) => {
                    warn!(strategy = %kind, %error, "retrieval attempt failed");
                    discard_partial(&archive_file);
                    attempts.push(StrategyFailure {
                        strategy: kind,
                        error,
                    });
                }
            }
        }

        let Some(strategy) = succeeded else {
            return Ok(FetchOutcome::Failed { attempts });
        };
        if !archive_file.is_file() {
            attempts.push(StrategyFailure {
                strategy,
                error: FetchError::MissingFile { path: archive_file },
            });
            return Ok(FetchOutcome::Failed { attempts });
        }

        if let Err(error) = archive::validate(&archive_file) {
            debug!(%error, "downloaded file failed archive validation");
            return Ok(FetchOutcome::ArchiveInvalid {
                strategy,
                archive: archive_file,
            });
        }

        if let Err(error) = archive::extract_all(&archive_file, target.dest_dir()) {
            return Ok(FetchOutcome::ExtractionFailed { strategy, error });
        }
        if let Err(e) = fs::remove_file(&archive_file) {
            return Ok(FetchOutcome::ExtractionFailed {
                strategy,
                error: FetchError::from_io_error(&e),
            });
        }

        let entries = match paths::dir_listing(target.dest_dir()) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "could not list the extracted destination");
                Vec::new()
            }
        };
        info!(strategy = %strategy, dest = %target.dest_dir().display(), "archive extracted");
        Ok(FetchOutcome::Extracted { strategy, entries })
    }
}

/// A failed attempt must not leave a partial file behind: "an archive exists"
/// always means "the last attempt completed its write loop".
fn discard_partial(archive_file: &Path) {
    if archive_file.exists() {
        debug!(path = %archive_file.display(), "discarding partially written archive");
        let _ = fs::remove_file(archive_file);
    }
}

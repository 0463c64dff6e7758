//! The ordered retrieval fallback chain.
//!
//! Each strategy is a pure attempt-then-fall-through step. The only state
//! they share is whether an archive file has been written yet; a failed
//! attempt never aborts the chain.

use gdfetch_core::{FetchError, FetchResult, FileId, StrategyKind};
use reqwest::Response;
use std::path::Path;
use tracing::{debug, info};

use crate::download::{self, ProgressFn};
use crate::fetcher::DriveFetcher;
use crate::urls;

/// Strategies in the order they are attempted.
pub(crate) const STRATEGY_ORDER: [StrategyKind; 3] = [
    StrategyKind::Direct,
    StrategyKind::SharingLink,
    StrategyKind::ConfirmedSession,
];

/// Marker the host embeds in its scan-warning interstitial.
const SCAN_WARNING_MARKER: &str = "virus scan";

/// Cookie name prefix carrying the confirmation token for flagged files.
const WARNING_COOKIE_PREFIX: &str = "download_warning";

/// Fixed confirmation value the host accepts for large files.
const FALLBACK_CONFIRM_TOKEN: &str = "t";

impl DriveFetcher {
    /// Run a single retrieval strategy, writing the archive on success.
    pub(crate) async fn attempt(
        &self,
        kind: StrategyKind,
        file_id: &FileId,
        archive: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> FetchResult<()> {
        match kind {
            StrategyKind::Direct => self.attempt_direct(file_id, archive, progress).await,
            StrategyKind::SharingLink => {
                self.attempt_sharing_link(file_id, archive, progress).await
            }
            StrategyKind::ConfirmedSession => {
                self.attempt_confirmed(file_id, archive, progress).await
            }
        }
    }

    /// Plain GET of the download endpoint for the identifier as given.
    async fn attempt_direct(
        &self,
        file_id: &FileId,
        archive: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> FetchResult<()> {
        let response = self
            .get(&urls::download_url(self.base_url(), file_id))
            .await?;
        let response = require_content(response)?;
        download::write_body(response, archive, progress).await?;
        Ok(())
    }

    /// Re-derive the identifier from sharing-link forms, then GET.
    ///
    /// Users routinely paste a whole sharing URL where an identifier is
    /// expected; this strategy tolerates that.
    async fn attempt_sharing_link(
        &self,
        file_id: &FileId,
        archive: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> FetchResult<()> {
        let normalized = FileId::extract(file_id.as_str())
            .ok_or_else(|| FetchError::invalid_identifier(file_id.as_str()))?;
        debug!(original = %file_id, normalized = %normalized, "derived identifier from sharing form");

        let response = self
            .get(&urls::download_url(self.base_url(), &normalized))
            .await?;
        let response = require_content(response)?;
        download::write_body(response, archive, progress).await?;
        Ok(())
    }

    /// Cookie-aware session that answers the host's scan-warning prompt.
    ///
    /// Files the host has flagged for scanning answer with a token cookie;
    /// echoing the token back as `confirm` authorizes the download. When the
    /// response still looks like a warning page, one retry with the fixed
    /// confirmation value is made before giving up.
    async fn attempt_confirmed(
        &self,
        file_id: &FileId,
        archive: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> FetchResult<()> {
        let mut response = self
            .get(&urls::download_url(self.base_url(), file_id))
            .await?;

        if let Some(token) = warning_cookie_token(&response) {
            debug!(file_id = %file_id, "host issued a download-warning token");
            response = self
                .get(&urls::confirmed_download_url(
                    self.base_url(),
                    file_id,
                    &token,
                ))
                .await?;
        }

        match screen_scan_warning(response).await? {
            Screened::Content(response) => {
                download::write_body(response, archive, progress).await?;
            }
            Screened::Page(body) => {
                // An HTML page without a scan marker is recorded verbatim;
                // archive validation decides what it really was.
                download::write_bytes(body.as_bytes(), archive)?;
            }
            Screened::NeedsConfirmation(reason) => {
                info!(%reason, "scan warning detected, retrying with the fixed confirmation value");
                let response = self
                    .get(&urls::confirmed_download_url(
                        self.base_url(),
                        file_id,
                        FALLBACK_CONFIRM_TOKEN,
                    ))
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::status(
                        "download rejected after confirmation",
                        status.as_u16(),
                    ));
                }
                download::write_body(response, archive, progress).await?;
            }
        }
        Ok(())
    }

    pub(crate) async fn get(&self, url: &str) -> FetchResult<Response> {
        self.http().get(url).send().await.map_err(|e| {
            e.status().map_or_else(
                || FetchError::network(e.to_string()),
                |status| FetchError::status(e.to_string(), status.as_u16()),
            )
        })
    }
}

/// Accept a response only when it is a success that does not look like an
/// HTML interstitial.
fn require_content(response: Response) -> FetchResult<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::status(
            "download request failed",
            status.as_u16(),
        ));
    }
    if is_html(&response) {
        return Err(FetchError::warning_page(
            "host answered with an HTML page instead of file content",
        ));
    }
    Ok(response)
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

fn warning_cookie_token(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name().starts_with(WARNING_COOKIE_PREFIX))
        .map(|cookie| cookie.value().to_string())
}

/// What to do with a possibly-interstitial response.
enum Screened {
    /// Binary content, safe to stream.
    Content(Response),
    /// HTML without a scan marker, recorded verbatim for later validation.
    Page(String),
    /// Needs the fixed-confirmation retry (scan marker or error status).
    NeedsConfirmation(String),
}

async fn screen_scan_warning(response: Response) -> FetchResult<Screened> {
    let status = response.status();
    if !status.is_success() {
        return Ok(Screened::NeedsConfirmation(format!("status {status}")));
    }
    if !is_html(&response) {
        return Ok(Screened::Content(response));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::network(format!("error reading response body: {e}")))?;
    if body.to_lowercase().contains(SCAN_WARNING_MARKER) {
        return Ok(Screened::NeedsConfirmation(
            "scan-warning marker in body".to_string(),
        ));
    }
    Ok(Screened::Page(body))
}

//! HTTP client construction.

use gdfetch_core::{FetchError, FetchResult};
use reqwest::Client;

/// Browser user agent; the host serves interstitials to unknown clients.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the shared HTTP client.
///
/// The cookie store is enabled so the confirmed-session strategy can read the
/// download-warning token the host sets. No timeout is configured beyond the
/// client's defaults.
pub(crate) fn build_client() -> FetchResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()
        .map_err(|e| FetchError::network(format!("failed to build HTTP client: {e}")))
}

//! Endpoint templates for the hosting service.

use gdfetch_core::FileId;

/// Production host. Tests substitute a local mock server.
pub(crate) const DEFAULT_BASE_URL: &str = "https://drive.google.com";

/// Download endpoint for an identifier.
pub(crate) fn download_url(base_url: &str, id: &FileId) -> String {
    format!("{base_url}/uc?export=download&id={id}")
}

/// Download endpoint with a confirmation token attached.
pub(crate) fn confirmed_download_url(base_url: &str, id: &FileId, token: &str) -> String {
    format!("{base_url}/uc?export=download&id={id}&confirm={token}")
}

/// Human-facing sharing URL for an identifier, as shown in manual-recovery
/// instructions.
#[must_use]
pub fn sharing_url(id: &FileId) -> String {
    format!("{DEFAULT_BASE_URL}/file/d/{id}/view?usp=sharing")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_url_renders_id_and_export() {
        let id = FileId::new("abc123");
        assert_eq!(
            download_url("https://host.test", &id),
            "https://host.test/uc?export=download&id=abc123"
        );
    }

    #[test]
    fn confirmed_url_appends_the_token() {
        let id = FileId::new("abc123");
        assert_eq!(
            confirmed_download_url("https://host.test", &id, "tok-42"),
            "https://host.test/uc?export=download&id=abc123&confirm=tok-42"
        );
    }

    #[test]
    fn sharing_url_uses_the_production_host() {
        let id = FileId::new("abc123");
        assert_eq!(
            sharing_url(&id),
            "https://drive.google.com/file/d/abc123/view?usp=sharing"
        );
    }
}

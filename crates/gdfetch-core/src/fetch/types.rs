//! Core identifiers and targets for a fetch run.
//!
//! Pure data types with no I/O dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Opaque identifier of a remote file on the hosting service.
///
/// Holds the bare identifier string. Use [`FileId::extract`] to recover an
/// identifier leniently from the sharing-URL forms users tend to paste.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    /// Wrap a bare identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leniently recover an identifier from a bare id or a sharing link.
    ///
    /// Accepted forms:
    /// - a bare identifier (`1YY8eKBg-...`)
    /// - `.../file/d/<id>/view?usp=sharing`
    /// - `.../open?id=<id>`
    /// - `.../uc?export=download&id=<id>`
    ///
    /// Returns `None` when no identifier can be found in the input.
    #[must_use]
    pub fn extract(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        // Sharing form: the id is the path segment after /file/d/.
        if let Some((_, rest)) = input.split_once("/file/d/") {
            let id = rest.split(['/', '?', '#']).next().unwrap_or_default();
            return (!id.is_empty()).then(|| Self::new(id));
        }

        // Query forms: open?id=<id>, uc?export=download&id=<id>.
        if let Some((_, query)) = input.split_once('?') {
            return query
                .split('&')
                .find_map(|pair| pair.strip_prefix("id="))
                .filter(|id| !id.is_empty())
                .map(Self::new);
        }

        // A bare identifier carries no path separators.
        if input.contains('/') {
            return None;
        }
        Some(Self::new(input))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when no file identifier can be recovered from an input string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("not a recognizable file identifier: {0:?}")]
pub struct ParseFileIdError(pub String);

impl FromStr for FileId {
    type Err = ParseFileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::extract(s).ok_or_else(|| ParseFileIdError(s.to_string()))
    }
}

/// A remote file paired with the local directory it should populate.
///
/// Ephemeral: exists only for the duration of one fetch-and-extract run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTarget {
    file_id: FileId,
    dest_dir: PathBuf,
}

impl FetchTarget {
    /// Pair an identifier with a destination directory.
    pub fn new(file_id: FileId, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_id,
            dest_dir: dest_dir.into(),
        }
    }

    /// The remote file identifier.
    #[must_use]
    pub const fn file_id(&self) -> &FileId {
        &self.file_id
    }

    /// The destination directory.
    #[must_use]
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Where the transient archive is written inside the destination.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        crate::paths::archive_path(&self.dest_dir)
    }
}

/// The retrieval strategies, in the order they are attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Plain GET of the download endpoint for the bare identifier.
    Direct,
    /// Re-derive the identifier from sharing-link forms, then GET.
    SharingLink,
    /// Cookie-aware session that answers the host's scan-warning prompt.
    ConfirmedSession,
}

impl StrategyKind {
    /// Short human-readable label used in logs and console output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::SharingLink => "sharing-link",
            Self::ConfirmedSession => "confirmed-session",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_accepts_bare_id() {
        let id = FileId::extract("1YY8eKBg-qVgeTaClZmMS8Lf_KU5QOHZn").unwrap();
        assert_eq!(id.as_str(), "1YY8eKBg-qVgeTaClZmMS8Lf_KU5QOHZn");
    }

    #[test]
    fn extract_accepts_sharing_url() {
        let id =
            FileId::extract("https://drive.google.com/file/d/abc123XYZ/view?usp=sharing").unwrap();
        assert_eq!(id.as_str(), "abc123XYZ");
    }

    #[test]
    fn extract_accepts_sharing_url_without_suffix() {
        let id = FileId::extract("https://drive.google.com/file/d/abc123XYZ").unwrap();
        assert_eq!(id.as_str(), "abc123XYZ");
    }

    #[test]
    fn extract_accepts_open_url() {
        let id = FileId::extract("https://drive.google.com/open?id=abc123XYZ").unwrap();
        assert_eq!(id.as_str(), "abc123XYZ");
    }

    #[test]
    fn extract_accepts_uc_url() {
        let id =
            FileId::extract("https://drive.google.com/uc?export=download&id=abc123XYZ").unwrap();
        assert_eq!(id.as_str(), "abc123XYZ");
    }

    #[test]
    fn extract_rejects_empty_and_unrecognized() {
        assert_eq!(FileId::extract(""), None);
        assert_eq!(FileId::extract("   "), None);
        assert_eq!(FileId::extract("https://example.com/nothing/here"), None);
        assert_eq!(FileId::extract("https://example.com/?export=download"), None);
    }

    #[test]
    fn from_str_reports_the_offending_input() {
        let err = "https://example.com/nope".parse::<FileId>().unwrap_err();
        assert!(err.to_string().contains("example.com/nope"));
    }

    #[test]
    fn target_archive_path_is_inside_destination() {
        let target = FetchTarget::new(FileId::new("abc"), "/tmp/data");
        assert_eq!(
            target.archive_path(),
            Path::new("/tmp/data").join(crate::paths::ARCHIVE_FILE_NAME)
        );
    }

    #[test]
    fn strategy_labels_are_stable() {
        assert_eq!(StrategyKind::Direct.to_string(), "direct");
        assert_eq!(StrategyKind::SharingLink.to_string(), "sharing-link");
        assert_eq!(
            StrategyKind::ConfirmedSession.to_string(),
            "confirmed-session"
        );
    }
}

//! Destination-directory housekeeping.
//!
//! The destination contract is wipe-and-recreate: whatever lives at the
//! target path is removed before new content is written. No merge semantics.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::fetch::{FetchError, FetchResult};

/// File name of the transient archive written inside the destination.
pub const ARCHIVE_FILE_NAME: &str = "datasets.zip";

/// Remove `path` recursively if it exists, then recreate it empty.
///
/// Destructive and unconditional; callers own the decision to wipe.
pub fn reset_dir(path: &Path) -> FetchResult<()> {
    if path.exists() {
        debug!(path = %path.display(), "removing existing destination directory");
        fs::remove_dir_all(path).map_err(|e| FetchError::from_io_error(&e))?;
    }
    fs::create_dir_all(path).map_err(|e| FetchError::from_io_error(&e))?;
    Ok(())
}

/// Deterministic location of the transient archive inside a destination.
#[must_use]
pub fn archive_path(dest_dir: &Path) -> PathBuf {
    dest_dir.join(ARCHIVE_FILE_NAME)
}

/// Sorted top-level entry names of a directory, for reporting.
pub fn dir_listing(path: &Path) -> FetchResult<Vec<String>> {
    let mut entries: Vec<String> = fs::read_dir(path)
        .map_err(|e| FetchError::from_io_error(&e))?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn reset_dir_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("fresh");
        assert!(!dest.exists());

        reset_dir(&dest).unwrap();
        assert!(dest.is_dir());
        assert_eq!(dir_listing(&dest).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn reset_dir_wipes_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("data");
        fs::create_dir_all(dest.join("nested")).unwrap();
        let mut f = File::create(dest.join("nested").join("old.txt")).unwrap();
        f.write_all(b"stale").unwrap();

        reset_dir(&dest).unwrap();
        assert!(dest.is_dir());
        assert_eq!(dir_listing(&dest).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn archive_path_uses_the_fixed_name() {
        assert_eq!(
            archive_path(Path::new("/tmp/data")),
            Path::new("/tmp/data").join("datasets.zip")
        );
    }

    #[test]
    fn dir_listing_is_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        File::create(tmp.path().join("b.txt")).unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();
        fs::create_dir(tmp.path().join("c")).unwrap();

        assert_eq!(dir_listing(tmp.path()).unwrap(), vec!["a.txt", "b.txt", "c"]);
    }
}

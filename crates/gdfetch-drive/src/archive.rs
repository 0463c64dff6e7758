//! ZIP validation and extraction.

use gdfetch_core::{FetchError, FetchResult};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Check that `path` holds a readable ZIP archive.
pub(crate) fn validate(path: &Path) -> FetchResult<()> {
    let file = File::open(path).map_err(|e| FetchError::from_io_error(&e))?;
    ZipArchive::new(file)
        .map(|_| ())
        .map_err(|e| FetchError::archive(format!("not a valid ZIP archive: {e}")))
}

/// Unpack every entry of the archive into `dest_dir`.
///
/// Entries whose names would escape the destination are skipped rather than
/// written outside it. Unix permissions recorded in the archive are restored.
pub(crate) fn extract_all(archive_path: &Path, dest_dir: &Path) -> FetchResult<usize> {
    let file = File::open(archive_path).map_err(|e| FetchError::from_io_error(&e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| FetchError::archive(e.to_string()))?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| FetchError::archive(format!("cannot read entry {index}: {e}")))?;
        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping entry with unsafe path");
            continue;
        };
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| FetchError::from_io_error(&e))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| FetchError::from_io_error(&e))?;
        }

        let mut out_file = File::create(&out_path).map_err(|e| FetchError::from_io_error(&e))?;
        io::copy(&mut entry, &mut out_file).map_err(|e| FetchError::from_io_error(&e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .map_err(|e| FetchError::from_io_error(&e))?;
        }

        extracted += 1;
    }

    debug!(files = extracted, dest = %dest_dir.display(), "archive entries extracted");
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_sample_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        writer.start_file("readme.txt", options).unwrap();
        writer.write_all(b"hello").unwrap();

        writer.add_directory("nested/", options).unwrap();
        writer.start_file("nested/inner.csv", options).unwrap();
        writer.write_all(b"a,b\n1,2\n").unwrap();

        writer.finish().unwrap();
    }

    #[test]
    fn validate_accepts_a_real_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("sample.zip");
        write_sample_zip(&archive);

        validate(&archive).unwrap();
    }

    #[test]
    fn validate_rejects_non_archive_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("bogus.zip");
        fs::write(&bogus, b"<html>not a zip</html>").unwrap();

        let err = validate(&bogus).unwrap_err();
        assert!(matches!(err, FetchError::Archive { .. }));
    }

    #[test]
    fn extract_all_recreates_the_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("sample.zip");
        write_sample_zip(&archive);
        let dest = tmp.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        let extracted = extract_all(&archive, &dest).unwrap();
        assert_eq!(extracted, 2);
        assert_eq!(fs::read_to_string(dest.join("readme.txt")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(dest.join("nested").join("inner.csv")).unwrap(),
            "a,b\n1,2\n"
        );
    }

    #[test]
    fn extract_all_fails_on_non_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("bogus.zip");
        fs::write(&bogus, b"garbage").unwrap();

        let err = extract_all(&bogus, tmp.path()).unwrap_err();
        assert!(matches!(err, FetchError::Archive { .. }));
    }
}

//! Console presentation: status lines, progress bar, manual-recovery text.

use std::fmt::Write as _;

use gdfetch_drive::{
    ARCHIVE_FILE_NAME, DriveFetcher, FetchOutcome, FetchTarget, FileId, sharing_url,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Run one fetch and narrate it. Never fails; every outcome becomes text.
pub async fn run(fetcher: &DriveFetcher, target: &FetchTarget) {
    println!();
    println!(
        "Fetching archive {} into {}",
        target.file_id(),
        target.dest_dir().display()
    );

    let bar = progress_bar();
    let report = |downloaded: u64, total: u64| {
        if total > 0 && bar.length() != Some(total) {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    };

    match fetcher.fetch_and_extract(target, Some(&report)).await {
        Ok(outcome) => {
            bar.finish_and_clear();
            render(target, &outcome);
        }
        Err(error) => {
            bar.finish_and_clear();
            println!(
                "  ✗ Could not prepare {}: {error}",
                target.dest_dir().display()
            );
            print!("{}", manual_instructions(target.file_id()));
        }
    }
}

fn render(target: &FetchTarget, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Extracted { strategy, entries } => {
            println!("  ✓ Downloaded via {strategy} retrieval");
            println!("  ✓ Extracted into {}", target.dest_dir().display());
            if !entries.is_empty() {
                println!("  Contents: {}", entries.join(", "));
            }
        }
        FetchOutcome::ArchiveInvalid { archive, .. } => {
            println!(
                "  ✗ Downloaded file is not a valid ZIP archive: {}",
                archive.display()
            );
            println!("    The file may be an HTML error page; check the sharing link permissions.");
        }
        FetchOutcome::ExtractionFailed { error, .. } => {
            println!("  ✗ Error during extraction: {error}");
        }
        FetchOutcome::Failed { attempts } => {
            for attempt in attempts {
                println!("  ✗ {} retrieval failed: {}", attempt.strategy, attempt.error);
            }
            print!("{}", manual_instructions(target.file_id()));
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
            .unwrap()
            .progress_chars("█▓░"),
    );
    bar
}

/// The fixed manual-recovery block shown when no strategy produced a file.
fn manual_instructions(file_id: &FileId) -> String {
    let mut text = String::new();
    writeln!(text).unwrap();
    writeln!(text, "MANUAL DOWNLOAD REQUIRED").unwrap();
    writeln!(text, "{}", "=".repeat(50)).unwrap();
    writeln!(text, "Please download the archive yourself:").unwrap();
    writeln!(text, "1. Open: {}", sharing_url(file_id)).unwrap();
    writeln!(
        text,
        "2. Click 'Download anyway' if a virus scan warning appears"
    )
    .unwrap();
    writeln!(
        text,
        "3. Save the file as '{ARCHIVE_FILE_NAME}' in your project folder"
    )
    .unwrap();
    writeln!(text, "4. Extract it into the destination directory").unwrap();
    writeln!(text).unwrap();
    writeln!(
        text,
        "The scan warning is expected for large files and safe to dismiss."
    )
    .unwrap();
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_instructions_reference_the_sharing_url() {
        let id = FileId::new("abc123");
        let text = manual_instructions(&id);
        assert!(text.contains("https://drive.google.com/file/d/abc123/view?usp=sharing"));
        assert!(text.contains(ARCHIVE_FILE_NAME));
        assert!(text.contains("safe to dismiss"));
    }
}

use std::path::Path;

use walkdir::WalkDir;

use crate::bundle::DOCUMENT_EXTENSION;
use crate::report::Reporter;

/// Remove every previously generated detail document below `folder`.
///
/// A file that can't be removed is reported and skipped. Returns the number of
/// files actually removed.
pub fn purge(folder: &Path, reporter: &Reporter) -> usize {
    let suffix = format!(".{DOCUMENT_EXTENSION}");
    let mut removed = 0;

    for entry in WalkDir::new(folder).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !entry.file_name().to_string_lossy().ends_with(&suffix) {
            continue;
        }

        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                tracing::debug!(path = %entry.path().display(), error = %err, "remove failed");
                reporter.warn(format!("Could not remove {}", entry.path().display()));
            }
        }
    }

    removed
}

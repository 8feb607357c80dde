use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Finds project folders such as `Carthage/Checkouts` or `Settings.bundle`
/// when they are not given on the command line.
///
/// The search starts at a directory, looks below it, and then climbs to the
/// parent for as long as the parent holds one of the marker files (a
/// dependency manifest like `Cartfile`).
pub struct FolderLocator<'a> {
    markers: &'a [String],
}

impl<'a> FolderLocator<'a> {
    pub fn new(markers: &'a [String]) -> Self {
        Self { markers }
    }

    pub fn locate(&self, start_dir: &Path, target: &str) -> Option<PathBuf> {
        let mut current = absolute(start_dir);

        loop {
            if let Some(found) = search_below(&current, target) {
                tracing::debug!(folder = target, found = %found.display(), "located folder");
                return Some(found);
            }

            let parent = current.parent()?.to_path_buf();
            if !self.has_marker(&parent) {
                tracing::debug!(folder = target, stopped_at = %parent.display(), "no marker file, giving up");
                return None;
            }
            current = parent;
        }
    }

    fn has_marker(&self, dir: &Path) -> bool {
        self.markers.iter().any(|m| dir.join(m).exists())
    }
}

/// One search rooted at `base`, without climbing to the parent.
fn search_below(base: &Path, target: &str) -> Option<PathBuf> {
    let target_leaf = Path::new(target).file_name();
    if target_leaf.is_some() && base.file_name() == target_leaf && base.is_dir() {
        return Some(base.to_path_buf());
    }

    let direct = base.join(target);
    if direct.is_dir() {
        return Some(direct);
    }

    // Prefix match: a folder named "Carthage" (or even "Car") makes its
    // parent a candidate root for "Carthage/Checkouts".
    for entry in WalkDir::new(base).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        // A linked folder can match by name; the walk still does not enter it.
        let is_dir = entry.file_type().is_dir()
            || (entry.path_is_symlink() && entry.path().is_dir());
        if !is_dir {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !target.starts_with(name.as_ref()) {
            continue;
        }
        if let Some(root) = entry.path().parent() {
            let candidate = root.join(target);
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
    }

    None
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::models::Component;

/// Walks a checkouts folder looking for license files.
pub struct LicenseScanner {
    /// Lower-cased filename suffixes, e.g. `license.txt`.
    suffixes: Vec<String>,
    max_depth: usize,
}

impl LicenseScanner {
    pub fn new(license_names: &[String], max_depth: usize) -> Self {
        Self {
            suffixes: license_names.iter().map(|n| n.to_lowercase()).collect(),
            max_depth,
        }
    }

    pub fn is_license_file(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|s| lower.ends_with(s.as_str()))
    }

    /// Scan `input_root`, calling `on_match` for each license as soon as it is
    /// found. Components are returned in traversal order.
    ///
    /// Files directly in `input_root` or in its immediate subfolders sit at
    /// depth 0; each further level adds one. Files at depth `max_depth` or
    /// deeper are ignored.
    pub fn scan<F>(&self, input_root: &Path, mut on_match: F) -> Result<Vec<Component>>
    where
        F: FnMut(&Component) -> Result<()>,
    {
        let mut components = Vec::new();

        // A file's walk depth is its folder depth plus two (plus one at the root).
        let walker = WalkDir::new(input_root)
            .follow_links(false)
            .max_depth(self.max_depth.saturating_add(1));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // Linked directories are not entered, but a linked LICENSE still counts.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            if entry.depth().saturating_sub(2) >= self.max_depth {
                continue;
            }
            if !self.is_license_file(&entry.file_name().to_string_lossy()) {
                continue;
            }

            let path = entry.path();
            let Some(name) = path.parent().and_then(Path::file_name) else {
                continue;
            };

            let component = Component::new(name.to_string_lossy(), path);
            tracing::debug!(component = %component, path = %path.display(), "found license");
            on_match(&component)?;
            components.push(component);
        }

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_scanner(max_depth: usize) -> LicenseScanner {
        let names = vec![
            "license".to_string(),
            "license.txt".to_string(),
            "license.md".to_string(),
        ];
        LicenseScanner::new(&names, max_depth)
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "text").unwrap();
    }

    fn names(components: &[Component]) -> Vec<String> {
        let mut names: Vec<String> = components.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_filename_matching_is_case_insensitive() {
        let scanner = default_scanner(1);
        assert!(scanner.is_license_file("LICENSE"));
        assert!(scanner.is_license_file("License.txt"));
        assert!(scanner.is_license_file("license.md"));
        assert!(scanner.is_license_file("MIT-LICENSE"));
        assert!(!scanner.is_license_file("LICENSE.rst"));
        assert!(!scanner.is_license_file("COPYING"));
    }

    #[test]
    fn test_one_level_of_subfolders_by_default() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("Alpha").join("LICENSE"));
        touch(&root.join("Beta").join("LICENSE.md"));
        touch(&root.join("Beta").join("vendor").join("Gamma").join("LICENSE"));
        touch(&root.join("Delta").join("docs").join("LICENSE.txt"));

        let found = default_scanner(1).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_deeper_scan() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("Alpha").join("LICENSE"));
        touch(&root.join("Delta").join("docs").join("LICENSE.txt"));
        touch(&root.join("Delta").join("a").join("b").join("LICENSE"));

        let found = default_scanner(2).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Alpha", "docs"]);
    }

    #[test]
    fn test_root_level_license_uses_root_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("LICENSE"));

        let found = default_scanner(1).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Checkouts"]);
    }

    #[test]
    fn test_zero_depth_scans_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("LICENSE"));
        touch(&root.join("Alpha").join("LICENSE"));

        assert!(default_scanner(0).scan(&root, |_| Ok(())).unwrap().is_empty());
    }

    #[test]
    fn test_callback_sees_every_match_and_can_abort() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("Alpha").join("LICENSE"));
        touch(&root.join("Beta").join("LICENSE"));

        let mut seen = Vec::new();
        let found = default_scanner(1)
            .scan(&root, |c| {
                seen.push(c.name.clone());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen.len(), found.len());

        let err = default_scanner(1).scan(&root, |_| anyhow::bail!("disk full"));
        assert!(err.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_license_is_found() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared").join("LICENSE");
        touch(&shared);
        let root = dir.path().join("Checkouts");
        fs::create_dir_all(root.join("Alpha")).unwrap();
        std::os::unix::fs::symlink(&shared, root.join("Alpha").join("LICENSE")).unwrap();

        let found = default_scanner(1).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Alpha"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folder_is_not_entered() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside");
        touch(&outside.join("LICENSE"));
        let root = dir.path().join("Checkouts");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("Linked")).unwrap();

        assert!(default_scanner(1).scan(&root, |_| Ok(())).unwrap().is_empty());
    }

    #[test]
    fn test_unbounded_depth_does_not_overflow() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("Alpha").join("LICENSE"));
        touch(&root.join("Alpha").join("a").join("b").join("c").join("LICENSE.txt"));

        let found = default_scanner(usize::MAX).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Alpha", "c"]);
    }

    #[test]
    fn test_duplicate_names_are_not_merged() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Checkouts");
        touch(&root.join("Alpha").join("LICENSE"));
        touch(&root.join("Alpha").join("LICENSE.md"));

        let found = default_scanner(1).scan(&root, |_| Ok(())).unwrap();
        assert_eq!(names(&found), vec!["Alpha", "Alpha"]);
    }
}

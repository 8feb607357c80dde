use std::path::PathBuf;

/// A third-party dependency discovered through a license file in its checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Basename of the directory that holds the license file.
    pub name: String,
    pub license_path: PathBuf,
}

impl Component {
    pub fn new(name: impl Into<String>, license_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            license_path: license_path.into(),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The components produced by one generation run, in scan order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub components: Vec<Component>,
    /// Number of stale detail documents removed before scanning.
    pub purged: usize,
}

impl RunSummary {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

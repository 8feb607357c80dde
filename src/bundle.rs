//! Settings bundle documents.
//!
//! Each license becomes a `Licenses/<name>.plist` child pane holding the text
//! as a group footer; `Acknowledgements.plist` lists every child pane.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::Component;
use crate::plist::{self, Value};

pub const LICENSES_DIR: &str = "Licenses";
pub const INDEX_FILE: &str = "Acknowledgements.plist";
pub const DOCUMENT_EXTENSION: &str = "plist";

const SPECIFIERS_KEY: &str = "PreferenceSpecifiers";

/// Path of the detail document for a component named `name`.
pub fn license_document_path(licenses_dir: &Path, name: &str) -> PathBuf {
    licenses_dir.join(format!("{name}.{DOCUMENT_EXTENSION}"))
}

pub fn license_document(license_text: &str) -> Value {
    let group = Value::dictionary([
        ("Type", Value::string("PSGroupSpecifier")),
        ("FooterText", Value::string(license_text)),
    ]);
    Value::dictionary([(SPECIFIERS_KEY, Value::Array(vec![group]))])
}

/// Build the index, one child pane per component, sorted by name.
pub fn index_document(components: &[Component]) -> Value {
    let mut sorted: Vec<&Component> = components.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let panes = sorted
        .into_iter()
        .map(|c| {
            Value::dictionary([
                ("Type", Value::string("PSChildPaneSpecifier")),
                ("File", Value::string(format!("{LICENSES_DIR}/{}", c.name))),
                ("Title", Value::string(c.name.as_str())),
            ])
        })
        .collect();

    Value::dictionary([(SPECIFIERS_KEY, Value::Array(panes))])
}

pub fn write_license_document(
    component: &Component,
    license_text: &str,
    out_path: &Path,
) -> Result<()> {
    tracing::debug!(component = %component, path = %out_path.display(), "writing license document");
    plist::write_file(&license_document(license_text), out_path)
}

pub fn write_index_document(components: &[Component], out_path: &Path) -> Result<()> {
    tracing::debug!(count = components.len(), path = %out_path.display(), "writing index document");
    plist::write_file(&index_document(components), out_path)
}

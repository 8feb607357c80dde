//! Folder resolution and the generation run itself.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::bundle::{
    license_document_path, write_index_document, write_license_document, INDEX_FILE, LICENSES_DIR,
};
use crate::cleanup;
use crate::cli::Cli;
use crate::config::load_config;
use crate::error::AckError;
use crate::license::normalizer::Normalizer;
use crate::locator::FolderLocator;
use crate::models::RunSummary;
use crate::report::Reporter;
use crate::scanner::LicenseScanner;

/// Resolve folders relative to `start_dir`, then generate the bundle documents.
pub fn run(cli: &Cli, start_dir: &Path, reporter: &Reporter) -> Result<RunSummary> {
    let config = load_config(start_dir, cli.config.as_deref())?;
    let locator = FolderLocator::new(&config.locate.markers);

    let input = resolve_folder(cli.input.as_deref(), start_dir, &config.locate.input, &locator)
        .ok_or(AckError::MissingInput)?;
    if !input.is_dir() {
        return Err(AckError::InvalidInput { path: input }.into());
    }
    // Canonical, so a license at the root is named after the real folder.
    let input = input.canonicalize().unwrap_or(input);
    reporter.info(format!("Input folder: {}", input.display()));

    let output = resolve_folder(cli.output.as_deref(), start_dir, &config.locate.output, &locator)
        .ok_or(AckError::MissingOutput)?;
    if !output.is_dir() {
        return Err(AckError::InvalidOutput { path: output }.into());
    }
    reporter.info(format!("Output folder: {}", output.display()));

    let max_depth = cli.max_depth.unwrap_or(config.scan.max_depth);
    let scanner = LicenseScanner::new(&config.scan.license_names, max_depth);

    let summary = generate(&input, &output, &scanner, !cli.no_clean, reporter)?;
    tracing::info!(
        components = summary.components.len(),
        purged = summary.purged,
        "acknowledgements generated"
    );
    Ok(summary)
}

/// An explicit path wins; otherwise search for `target` from `start_dir`.
fn resolve_folder(
    explicit: Option<&Path>,
    start_dir: &Path,
    target: &str,
    locator: &FolderLocator<'_>,
) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(start_dir.join(path)),
        None => locator.locate(start_dir, target),
    }
}

pub fn generate(
    input: &Path,
    output: &Path,
    scanner: &LicenseScanner,
    clean_up: bool,
    reporter: &Reporter,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    let licenses_dir = output.join(LICENSES_DIR);
    if !licenses_dir.exists() {
        reporter.step("Creating Licenses folder");
        fs::create_dir_all(&licenses_dir)
            .with_context(|| format!("failed to create {}", licenses_dir.display()))?;
    } else if clean_up {
        reporter.step("Removing old license plists");
        summary.purged = cleanup::purge(&licenses_dir, reporter);
    }

    reporter.step("Searching licenses...");
    let normalizer = Normalizer::new()?;

    summary.components = scanner.scan(input, |component| {
        reporter.info(format!("  Creating license plist for {}", component.name.as_str().bold()));

        let raw = fs::read_to_string(&component.license_path)
            .with_context(|| format!("failed to read license {}", component.license_path.display()))?;
        let out_path = license_document_path(&licenses_dir, &component.name);
        write_license_document(component, &normalizer.normalize(&raw), &out_path)
    })?;

    if summary.is_empty() {
        reporter.info("No licenses found");
    }

    reporter.step("Creating acknowledgements plist");
    write_index_document(&summary.components, &output.join(INDEX_FILE))?;

    Ok(summary)
}

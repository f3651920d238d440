//! File converter: rewrites matched bundles through the dictionary.
//!
//! For each matched file:
//! 1. Load its entries
//! 2. Run every value through the dictionary, keeping only matched entries
//! 3. Write the kept entries next to the source under the suffixed name
//!
//! A failure on one file is recorded and the run moves on; only a dictionary
//! or scan failure aborts the whole run.

use crate::config::ConvertConfig;
use crate::dictionary::{self, Dictionary};
use crate::error::{Error, Result};
use crate::output::BulkResult;
use crate::properties::PropertyFile;
use crate::scanner;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Result of converting one source file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConversion {
    pub source: String,
    pub output: String,
    pub entries_read: usize,
    pub entries_written: usize,
    pub replacements: usize,
    pub written: bool,
}

/// Totals across every successfully converted file.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTotals {
    pub entries_read: usize,
    pub entries_written: usize,
    pub replacements: usize,
}

/// The full result of a conversion run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub root: String,
    pub dictionary: String,
    pub dictionary_entries: usize,
    pub dry_run: bool,
    pub files: BulkResult<FileConversion>,
    pub totals: ConversionTotals,
}

impl ConversionReport {
    pub fn has_failures(&self) -> bool {
        self.files.has_failures()
    }
}

// ============================================================================
// Output naming
// ============================================================================

/// `A.B` + suffix → `A<suffix>.B`, splitting at the last dot.
///
/// Returns `None` when `base_name` has no extension.
pub fn output_file_name(base_name: &str, suffix: &str) -> Option<String> {
    let (stem, ext) = base_name.rsplit_once('.')?;
    Some(format!("{}{}.{}", stem, suffix, ext))
}

/// Sibling path for a source file's converted output.
///
/// Every occurrence of `base_name` in the file name is swapped for the
/// suffixed name. Returns `None` when the file name does not contain
/// `base_name`, or when `base_name` has no extension.
pub fn output_path(source: &Path, base_name: &str, suffix: &str) -> Option<PathBuf> {
    let file_name = source.file_name()?.to_str()?;
    if !file_name.contains(base_name) {
        return None;
    }

    let renamed = file_name.replace(base_name, &output_file_name(base_name, suffix)?);
    Some(source.with_file_name(renamed))
}

// ============================================================================
// Conversion
// ============================================================================

/// Keep only the entries the dictionary changed, in source order.
///
/// Returns the kept entries and the number of keyword occurrences replaced.
pub fn convert_entries(source: &PropertyFile, dictionary: &Dictionary) -> (PropertyFile, usize) {
    let mut converted = PropertyFile::new();
    let mut replacements = 0;

    for entry in source.iter() {
        if let Some(sub) = dictionary.apply(&entry.value) {
            replacements += sub.replacements;
            converted.insert(entry.key.clone(), sub.value);
        }
    }

    (converted, replacements)
}

fn timestamp_header() -> String {
    chrono::Local::now()
        .format("%a %b %d %H:%M:%S %Z %Y")
        .to_string()
}

/// Convert a single file and write its output (unless dry-run).
///
/// The output file is always written, even when no entry matched, so every
/// source has a counterpart.
pub fn convert_file(
    path: &Path,
    dictionary: &Dictionary,
    config: &ConvertConfig,
    options: ConvertOptions,
) -> Result<FileConversion> {
    let output = output_path(path, &config.base_name, &config.suffix).ok_or_else(|| {
        Error::validation_invalid_argument(
            "path",
            format!(
                "File name does not contain '{}': {}",
                config.base_name,
                path.display()
            ),
            None,
            None,
        )
    })?;

    let source = PropertyFile::load(path)?;
    let (converted, replacements) = convert_entries(&source, dictionary);

    if !options.dry_run {
        let header = config.timestamp_header.then(timestamp_header);
        converted.save(&output, header.as_deref())?;
    }

    Ok(FileConversion {
        source: path.display().to_string(),
        output: output.display().to_string(),
        entries_read: source.len(),
        entries_written: converted.len(),
        replacements,
        written: !options.dry_run,
    })
}

/// Convert every file in `files` with an already-loaded dictionary.
pub fn convert_files(
    files: &[PathBuf],
    dictionary: &Dictionary,
    config: &ConvertConfig,
    options: ConvertOptions,
) -> (BulkResult<FileConversion>, ConversionTotals) {
    let mut bulk = BulkResult::new(if options.dry_run { "preview" } else { "convert" });
    let mut totals = ConversionTotals::default();

    for file in files {
        let id = file.display().to_string();
        match convert_file(file, dictionary, config, options) {
            Ok(conversion) => {
                if options.dry_run {
                    log_status!("convert", "Would convert: {}", id);
                } else {
                    log_status!("convert", "Converted: {}", id);
                }
                totals.entries_read += conversion.entries_read;
                totals.entries_written += conversion.entries_written;
                totals.replacements += conversion.replacements;
                bulk.record_success(id, conversion);
            }
            Err(err) => {
                log_status!("convert", "Failed: {}: {}", id, err);
                bulk.record_failure(id, &err);
            }
        }
    }

    (bulk, totals)
}

/// Run the whole pipeline: load dictionary, scan, convert each file.
///
/// A dictionary or scan error aborts before any file is written.
pub fn convert(config: &ConvertConfig, options: ConvertOptions) -> Result<ConversionReport> {
    let dictionary = dictionary::load(&config.dictionary)?;
    log_status!(
        "convert",
        "Loaded {} replacement(s) from {}",
        dictionary.len(),
        config.dictionary.display()
    );

    let files = scanner::find_matching_files(&config.root, &config.base_name, &config.exclude)?;
    log_status!(
        "convert",
        "Found {} file(s) matching '{}' under {}",
        files.len(),
        config.base_name,
        config.root.display()
    );

    let (files, totals) = convert_files(&files, &dictionary, config, options);

    Ok(ConversionReport {
        root: config.root.display().to_string(),
        dictionary: config.dictionary.display().to_string(),
        dictionary_entries: dictionary.len(),
        dry_run: options.dry_run,
        files,
        totals,
    })
}

// ============================================================================
// Tests
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use scout_core::{AppViewModel, ValidatedCandidate};
use scout_engine::AtomicFileWriter;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct ExportRecord<'a> {
    url: &'a str,
    region: &'a str,
    category: &'a str,
    priority: bool,
}

/// Visible rows as a JSON array.
pub fn results_json(view: &AppViewModel) -> serde_json::Result<String> {
    let records: Vec<_> = view
        .results
        .iter()
        .map(|row| ExportRecord {
            url: &row.url,
            region: &row.region,
            category: &row.category,
            priority: row.priority,
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Link list with a comment header naming the scan.
pub fn links_document(
    view: &AppViewModel,
    category: Option<&str>,
    exported_at: DateTime<Utc>,
) -> String {
    let mut doc = format!(
        "# asset-scout {} {} exported {}\n",
        view.name_input.trim(),
        view.category.map(|c| c.to_string()).unwrap_or_default(),
        exported_at.to_rfc3339()
    );
    if let Some(region) = &view.region_filter {
        doc.push_str(&format!("# region: {region}\n"));
    }
    if let Some(category) = category {
        doc.push_str(&format!("# category: {category}\n"));
    }
    let links = view.copy_text(category);
    if !links.is_empty() {
        doc.push_str(&links);
        doc.push('\n');
    }
    doc
}

pub fn write_links(path: &Path, content: &str) -> anyhow::Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("export path {:?} has no file name", path))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    AtomicFileWriter::new(dir)
        .write(filename, content.as_bytes())
        .with_context(|| format!("failed to write links to {:?}", path))
}

/// Results that pass the region filter, for downloading.
pub fn visible_results(
    results: &[ValidatedCandidate],
    region: Option<&str>,
) -> Vec<ValidatedCandidate> {
    results
        .iter()
        .filter(|item| region.map_or(true, |r| item.region() == r))
        .cloned()
        .collect()
}

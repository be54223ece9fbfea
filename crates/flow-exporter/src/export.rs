//! JSON output and run summary.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use eio_core::{Diagnostic, FlowDocument, FlowResult, DOLLARS_KEY};

/// Serialize `document` to `path`, creating parent directories as needed.
/// Returns the size of the written file in bytes.
pub fn write_document(document: &FlowDocument, path: &Path, pretty: bool) -> FlowResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writer.flush()?;

    Ok(fs::metadata(path)?.len())
}

/// Log counts, sample accounts and output size for a finished run.
pub fn log_summary(document: &FlowDocument, diagnostics: &[Diagnostic], path: &Path, bytes: u64) {
    tracing::info!("=== Summary ===");
    tracing::info!("Sectors: {}", document.industries.len());
    tracing::info!("Flow types: {}", document.flow_types.len());
    for (key, flow_type) in &document.flow_types {
        tracing::info!("  - {}: {} flows", key, flow_type.top_flows.len());
    }

    if let Some(account) = document
        .sector_accounts
        .get(DOLLARS_KEY)
        .and_then(|t| t.as_dollars())
        .and_then(|accounts| accounts.get(&0))
    {
        tracing::info!("Sector 0 dollars: {:?}", account);
    }
    if let Some(account) = document
        .sector_accounts
        .get("GHG")
        .and_then(|t| t.as_factor())
        .and_then(|accounts| accounts.get(&0))
    {
        tracing::info!("Sector 0 GHG: {:?}", account);
    }

    if !diagnostics.is_empty() {
        tracing::warn!("{} diagnostics raised:", diagnostics.len());
        for diagnostic in diagnostics {
            tracing::warn!("  - {}", diagnostic);
        }
    }

    tracing::info!(
        "Output file: {} ({:.2} MB)",
        path.display(),
        bytes as f64 / 1e6
    );
}

//! JSON output document for collected brochures.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use prospekt_core::BrochureRecord;

const INDENT: &[u8] = b"   ";

/// Writes `records` to `path` as a pretty-printed JSON array, creating
/// parent directories as needed. An existing file is replaced.
pub(crate) fn write_records(path: &Path, records: &[BrochureRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;

    fs::write(path, buf).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote output");
    Ok(())
}

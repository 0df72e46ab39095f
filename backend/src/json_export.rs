//! Writes the converted verse collection as a JSON document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::logger;
use crate::types::VerseRecord;

/// Serialize the records as a pretty-printed JSON array (2-space
/// indentation, non-ASCII written literally) and write them to
/// `json_path`, creating missing parent directories first.
///
/// The key order per record is fixed by the [`VerseRecord`] field
/// order, so repeated runs on identical input are byte-identical.
pub fn write_verses_json(verses: &[VerseRecord], json_path: &Path) -> Result<()> {
    if let Some(parent) = json_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(verses)
        .context("Failed to serialize verse records to JSON")?;

    fs::write(json_path, json)
        .with_context(|| format!("Failed to write JSON file: {:?}", json_path))?;

    logger::debug(&format!(
        "Wrote {} verse records to {:?}",
        verses.len(),
        json_path
    ));

    Ok(())
}

//! Reads a verses.tsv file and maps each row to a [`VerseRecord`].
//!
//! The TSV must have a header row containing (not necessarily
//! exclusively) the 17 canonical column names; extra columns are
//! ignored and column order does not matter. Rows with a blank `id`
//! are skipped, everything else degrades to empty/default values
//! rather than failing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::helpers::{norm, truthy};
use crate::logger;
use crate::types::{AudioFiles, Availability, ConvertError, Gloss, PadaText, VerseRecord};

/// Canonical v1 header columns of verses.tsv.
pub static REQUIRED_COLS: [&str; 17] = [
    "id", "title", "meter", "full",
    "p1", "p2", "p3", "p4",
    "pr_p1", "pr_p2", "pr_p3", "pr_p4",
    "needs_split_practice", "has_p12", "has_p34",
    "artha_sa", "meaning_en",
];

/// Column-name to field-position map built from the TSV header row.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    columns: Vec<String>,
}

impl HeaderIndex {
    pub fn parse(header_line: &str) -> Self {
        let columns: Vec<String> = header_line
            .split('\t')
            .map(|c| c.trim().to_string())
            .collect();

        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        HeaderIndex { positions, columns }
    }

    /// Check that every required column is present in the header.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let missing: Vec<&str> = REQUIRED_COLS
            .iter()
            .filter(|c| !self.positions.contains_key(**c))
            .copied()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::MissingColumns {
                missing: missing.join(", "),
                found: self.columns.join(", "),
            })
        }
    }

    /// Normalized value of the named column in a split data row.
    /// Columns past the end of a short row read as empty.
    pub fn get(&self, fields: &[&str], col: &str) -> String {
        let value = self
            .positions
            .get(col)
            .and_then(|&i| fields.get(i).copied());
        norm(value)
    }
}

/// Map one data row to a VerseRecord, or None when `id` is blank.
pub fn convert_row(header: &HeaderIndex, fields: &[&str]) -> Option<VerseRecord> {
    let g = |col: &str| header.get(fields, col);

    let id = g("id");
    if id.is_empty() {
        return None;
    }

    let has_p12 = truthy(&g("has_p12"));
    let has_p34 = truthy(&g("has_p34"));
    let needs_split_practice = truthy(&g("needs_split_practice"));

    // Canonical pāda split, always kept for reference
    let text = PadaText {
        p1: g("p1"),
        p2: g("p2"),
        p3: g("p3"),
        p4: g("p4"),
    };

    let or_canonical = |pr: String, canonical: &str| {
        if pr.is_empty() { canonical.to_string() } else { pr }
    };

    let practice = PadaText {
        p1: or_canonical(g("pr_p1"), &text.p1),
        p2: or_canonical(g("pr_p2"), &text.p2),
        p3: or_canonical(g("pr_p3"), &text.p3),
        p4: or_canonical(g("pr_p4"), &text.p4),
    };

    // Bare filenames with no directory component; the front end
    // resolves them against its own audio directory.
    let take = |segment: &str| format!("{}_{}.mp3", id, segment);

    let audio = AudioFiles {
        p1: take("p1"),
        p2: take("p2"),
        p3: take("p3"),
        p4: take("p4"),
        p12: if has_p12 { Some(take("p12")) } else { None },
        p34: if has_p34 { Some(take("p34")) } else { None },
        full: take("full"),
    };

    let title = g("title");
    let meter = g("meter");

    Some(VerseRecord {
        title: if title.is_empty() { id.clone() } else { title },
        meter: if meter.is_empty() { "—".to_string() } else { meter },
        full: g("full"),
        text,
        practice,
        needs_split_practice,
        available: Availability {
            p12: has_p12,
            p34: has_p34,
        },
        audio,
        gloss: Gloss {
            sa: g("artha_sa"),
            en: g("meaning_en"),
        },
        id,
    })
}

/// Parse the full text of a verses.tsv file into records, preserving
/// row order. Duplicate ids are kept as-is.
pub fn parse_verses_tsv(content: &str) -> Result<Vec<VerseRecord>> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(ConvertError::NoHeader)?;
    let header = HeaderIndex::parse(header_line);
    header.validate()?;

    let mut verses = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();

        if let Some(record) = convert_row(&header, &fields) {
            verses.push(record);
        }
    }

    logger::debug(&format!("Parsed {} verse records", verses.len()));

    Ok(verses)
}

/// Load and convert a verses.tsv file from disk.
pub fn load_verses(tsv_path: &Path) -> Result<Vec<VerseRecord>> {
    if !tsv_path.exists() {
        return Err(ConvertError::InputNotFound(tsv_path.to_path_buf()).into());
    }

    let content = fs::read_to_string(tsv_path)
        .with_context(|| format!("Failed to read TSV file: {:?}", tsv_path))?;

    parse_verses_tsv(&content)
}

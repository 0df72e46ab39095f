//! Data structures for the verse collection document.
//!
//! These types model the verses.json format consumed by the Learn Stotras
//! front end: one record per verse, with canonical and practice pāda text,
//! audio segment availability, and derived audio filenames.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One quarter-line (pāda) split of a four-line verse.
///
/// Used both for the canonical reference text and for the practice
/// rendering. Empty strings are valid, the shape is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadaText {
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub p4: String,
}

/// Whether combined-pāda audio segments exist for a verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub p12: bool,
    pub p34: bool,
}

/// Derived audio filenames for the seven takes of a verse.
///
/// Each present filename is "{id}_{segment}.mp3" with no directory
/// component. `p12`/`p34` are None (JSON null) when the corresponding
/// availability flag is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFiles {
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub p4: String,
    pub p12: Option<String>,
    pub p34: Option<String>,
    pub full: String,
}

/// Meaning/commentary text in Sanskrit and English. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gloss {
    pub sa: String,
    pub en: String,
}

/// One verse of the output collection.
///
/// Field order here is the serialized key order of the JSON document,
/// so reordering fields changes the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: String,
    /// Defaults to `id` when the TSV field is blank.
    pub title: String,
    /// Defaults to "—" when the TSV field is blank.
    pub meter: String,
    pub full: String,
    /// Canonical pāda split, verbatim from the TSV.
    pub text: PadaText,
    /// Practice text, each pāda falling back to the canonical value.
    pub practice: PadaText,
    /// The front end hides the per-pāda practice buttons for verses
    /// that need split practice.
    #[serde(rename = "needsSplitPractice")]
    pub needs_split_practice: bool,
    pub available: Availability,
    pub audio: AudioFiles,
    pub gloss: Gloss,
}

/// Fatal conversion errors. Either of these aborts the whole run
/// before any output is written.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Input TSV not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("TSV appears to have no header row.")]
    NoHeader,

    #[error("Missing required columns in TSV: {missing}\nFound columns: {found}")]
    MissingColumns { missing: String, found: String },
}

pub mod types;
pub mod helpers;
pub mod logger;
pub mod tsv_import;
pub mod json_export;

use std::path::{Path, PathBuf};

pub static DATA_SUBDIR: &'static str = "data";
pub static VERSES_TSV: &'static str = "verses.tsv";
pub static VERSES_JSON: &'static str = "verses.json";

/// Default input location for a stotra directory: <stotra_dir>/data/verses.tsv
pub fn default_tsv_path(stotra_dir: &Path) -> PathBuf {
    stotra_dir.join(DATA_SUBDIR).join(VERSES_TSV)
}

/// Default output location for a stotra directory: <stotra_dir>/data/verses.json
pub fn default_json_path(stotra_dir: &Path) -> PathBuf {
    stotra_dir.join(DATA_SUBDIR).join(VERSES_JSON)
}

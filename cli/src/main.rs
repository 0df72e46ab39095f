use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

use stotra_backend::json_export::write_verses_json;
use stotra_backend::logger;
use stotra_backend::tsv_import::load_verses;
use stotra_backend::{default_json_path, default_tsv_path};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Convert stotra verses.tsv to verses.json (Nitishatakam-compatible structure).")]
struct Cli {
    /// Path to verses.tsv (default: <stotra_dir>/data/verses.tsv)
    #[arg(long = "in", value_name = "FILE_PATH")]
    tsv_path: Option<PathBuf>,

    /// Path to output verses.json (default: <stotra_dir>/data/verses.json)
    #[arg(long = "out", value_name = "FILE_PATH")]
    json_path: Option<PathBuf>,

    /// Stotra directory, used to resolve default --in/--out and audio paths.
    /// If not provided, the STOTRA_DIR environment variable will be used.
    #[arg(long, value_name = "DIRECTORY_PATH", env = "STOTRA_DIR", default_value = ".")]
    stotra_dir: PathBuf,

    /// Audio directory name relative to the stotra dir
    #[arg(long, value_name = "DIRECTORY_NAME", default_value = "audio")]
    audio_subdir: String,
}

fn run(cli: Cli) -> Result<(usize, PathBuf)> {
    let tsv_path = cli
        .tsv_path
        .unwrap_or_else(|| default_tsv_path(&cli.stotra_dir));
    let json_path = cli
        .json_path
        .unwrap_or_else(|| default_json_path(&cli.stotra_dir));

    // The audio subdir names where the front end keeps the recorded
    // takes; the generated filenames themselves stay bare.
    let audio_prefix = cli.audio_subdir.trim_end_matches('/');
    logger::debug(&format!(
        "Converting {:?} → {:?} (audio subdir: {})",
        tsv_path, json_path, audio_prefix
    ));

    let verses = load_verses(&tsv_path)?;
    write_verses_json(&verses, &json_path)?;

    Ok((verses.len(), json_path))
}

fn main() {
    // A .env file may define STOTRA_DIR; clap picks it up via `env`.
    dotenv().ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok((count, json_path)) => {
            println!("Generated {} verses → {}", count, json_path.display());
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    }
}

//! `reqlock hash` - show the digests a generator should embed

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Cell;

use reqlock_core::{HashComment, HashStrategy};

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Input files to hash
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Digests of one input file.
struct FileHashes {
    raw: String,
    robust: String,
}

impl FileHashes {
    fn compute(path: &Path) -> Result<Self> {
        let raw = HashStrategy::Raw
            .compute(path)
            .with_context(|| format!("failed to hash {}", path.display()))?;
        let robust = HashStrategy::Robust
            .compute(path)
            .with_context(|| format!("failed to hash {}", path.display()))?;
        Ok(Self { raw, robust })
    }

    /// Comment line for the generated file.
    fn comment(&self) -> Result<HashComment> {
        Ok(HashComment::new(self.robust.clone())?)
    }
}

pub fn run(args: HashArgs) -> Result<ExitCode> {
    let mut table = super::table(&["File", "Raw", "Robust", "Comment"]);

    for path in &args.files {
        let hashes = FileHashes::compute(path)?;
        let comment = hashes.comment()?;
        table.add_row(vec![
            Cell::new(path.display()),
            Cell::new(&hashes.raw),
            Cell::new(&hashes.robust),
            Cell::new(&comment),
        ]);
    }

    eprintln!("\n{table}");
    Ok(ExitCode::SUCCESS)
}

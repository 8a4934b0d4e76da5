//! Environments: requirement input files paired with their generated outputs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

/// One input specification file and the lock file generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Environment {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Pair `input` with the same path carrying the `out_ext` extension.
    pub fn from_input(input: impl Into<PathBuf>, out_ext: &str) -> Self {
        let input = input.into();
        let output = input.with_extension(out_ext);
        Self::new(input, output)
    }

    /// File stem, e.g. `base` for `requirements/base.in`.
    pub fn name(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Where to look for input files and how outputs are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverOptions {
    pub directory: PathBuf,
    pub in_ext: String,
    pub out_ext: String,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("requirements"),
            in_ext: "in".to_string(),
            out_ext: "txt".to_string(),
        }
    }
}

impl DiscoverOptions {
    /// Glob matching every input file.
    ///
    /// The directory is matched literally; only the extension may carry
    /// glob syntax.
    pub fn pattern(&self) -> String {
        let directory = PathBuf::from(glob::Pattern::escape(&self.directory.to_string_lossy()));
        let pattern = directory.join(format!("*.{}", self.in_ext));
        pattern.to_string_lossy().into_owned()
    }
}

/// Find all environments under `opts.directory`, sorted by input path.
pub fn discover(opts: &DiscoverOptions) -> Result<Vec<Environment>, VerifyError> {
    let pattern = opts.pattern();
    let paths = glob::glob(&pattern).map_err(|source| VerifyError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut inputs: Vec<PathBuf> = paths
        .filter_map(|e| match e {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("skipping {}: {}", e.path().display(), e.error());
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();

    // Sort for deterministic verification order
    inputs.sort();

    log::debug!("{} environments match {pattern}", inputs.len());
    Ok(inputs
        .into_iter()
        .map(|input| Environment::from_input(input, &opts.out_ext))
        .collect())
}

/// Build environments from explicit input paths.
pub fn from_inputs<P: AsRef<Path>>(inputs: &[P], out_ext: &str) -> Vec<Environment> {
    inputs
        .iter()
        .map(|p| Environment::from_input(p.as_ref(), out_ext))
        .collect()
}

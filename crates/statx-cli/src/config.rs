//! Process configuration.
//!
//! Settings come from CLI flags, then the `.env` file, then the process
//! environment. `.env` is loaded before argument parsing with override
//! semantics, so its values replace stale shell exports.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub const ENV_FILE: &str = ".env";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TEMP_DIR: &str = "temp_exports";

pub const DEFAULT_ENV_CONTENT: &str = "# Environment variables for the statx export service
DATA_DIR=data
TEMP_DIR=temp_exports
";

/// Directories an export service works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where datasets are read from.
    pub data_dir: PathBuf,
    /// Where workbooks are written and served from.
    pub temp_dir: PathBuf,
}

impl Settings {
    pub fn new(data_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Create both directories if they are missing.
    pub fn prepare(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.temp_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        debug!(
            data_dir = %self.data_dir.display(),
            temp_dir = %self.temp_dir.display(),
            "directories ready"
        );
        Ok(())
    }
}

/// Load `path` into the process environment, overriding existing values.
///
/// Returns `false` when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path_override(path) {
        Ok(()) => Ok(true),
        Err(error) if error.not_found() => Ok(false),
        Err(error) => Err(error).with_context(|| format!("load {}", path.display())),
    }
}

/// What `init-env` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitEnvOutcome {
    Created,
    Overwritten,
    Kept,
}

/// Write [`DEFAULT_ENV_CONTENT`] to `path`.
///
/// An existing file is only replaced when `force` is set or `confirm`
/// answers yes.
pub fn write_default_env<F>(path: &Path, force: bool, confirm: F) -> Result<InitEnvOutcome>
where
    F: FnOnce() -> io::Result<bool>,
{
    let existed = path.exists();
    if existed && !force && !confirm().context("read confirmation")? {
        return Ok(InitEnvOutcome::Kept);
    }
    fs::write(path, DEFAULT_ENV_CONTENT).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "environment file written");
    Ok(if existed {
        InitEnvOutcome::Overwritten
    } else {
        InitEnvOutcome::Created
    })
}

/// Ask on stdout and read a `y`/`n` answer from `input`.
pub fn prompt_overwrite<R: BufRead>(path: &Path, mut input: R) -> io::Result<bool> {
    print!("{} already exists. Overwrite it? (y/n): ", path.display());
    io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

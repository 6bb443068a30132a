//! Writes generated files below the output root

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::generators::{GeneratedFile, WriteMode};

/// What happened to a file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was created
    Created,
    /// An existing file was replaced (`--force`)
    Overwritten,
    /// Content was appended to the file
    Appended,
    /// The appended block was already present
    Unchanged,
}

/// Filesystem sink for generator output
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter {
    force: bool,
}

impl FileWriter {
    /// Writer that refuses to replace existing files unless `force` is set
    #[must_use]
    pub const fn new(force: bool) -> Self {
        Self { force }
    }

    /// Write `file` below `root`, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if a file to be created already exists and `force`
    /// is off, or if any filesystem operation fails.
    pub fn write(&self, root: &Path, file: &GeneratedFile) -> Result<(PathBuf, WriteOutcome)> {
        let full_path = root.join(&file.path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let outcome = match &file.mode {
            WriteMode::Create => self.create(&full_path, &file.content)?,
            WriteMode::Append { header } => Self::append(&full_path, &file.content, header)?,
        };

        tracing::debug!(path = %full_path.display(), ?outcome, "wrote file");
        Ok((full_path, outcome))
    }

    fn create(&self, path: &Path, content: &str) -> Result<WriteOutcome> {
        let outcome = if path.exists() {
            if !self.force {
                bail!(
                    "File already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            tracing::warn!(path = %path.display(), "overwriting existing file");
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(outcome)
    }

    fn append(path: &Path, content: &str, header: &str) -> Result<WriteOutcome> {
        let mut existing = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?
        } else {
            header.to_string()
        };

        if existing.contains(content.trim_end()) {
            tracing::info!(path = %path.display(), "entry already present, skipping");
            return Ok(WriteOutcome::Unchanged);
        }

        if !existing.is_empty() && !existing.ends_with('\n') {
            existing.push('\n');
        }
        existing.push_str(content);

        fs::write(path, existing)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(WriteOutcome::Appended)
    }
}

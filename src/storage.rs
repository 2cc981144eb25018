use crate::schedule::ScheduleData;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file holding every project.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load all projects. A missing or empty file is an empty collection.
    pub fn load(&self) -> Result<ScheduleData> {
        if !self.file_path.exists() {
            tracing::info!(
                "{} does not exist yet, starting with no projects",
                self.file_path.display()
            );
            return Ok(ScheduleData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(ScheduleData::new());
        }
        let data: ScheduleData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        tracing::debug!(
            "loaded {} project(s) from {}",
            data.len(),
            self.file_path.display()
        );
        Ok(data)
    }

    pub fn save(&self, data: &ScheduleData) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize projects")?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        tracing::debug!(
            "saved {} project(s) to {}",
            data.len(),
            self.file_path.display()
        );
        Ok(())
    }
}

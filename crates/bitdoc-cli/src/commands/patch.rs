use std::path::PathBuf;

use anyhow::{Context, Result};
use bitdoc::{config::Config, patch::patch_file};

#[derive(clap::Args)]
pub struct PatchCmd {
    /// LaTeX document to rewrite
    file: PathBuf,
}

impl PatchCmd {
    pub fn run(&self, config: &Config) -> Result<()> {
        let changed = patch_file(&self.file, config)
            .with_context(|| format!("Failed to patch {}", self.file.display()))?;

        if !changed {
            tracing::info!("nothing to do");
        }

        Ok(())
    }
}

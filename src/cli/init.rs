use std::path::PathBuf;

use cvrf_writer::Config;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Where to write the configuration
    #[arg(default_value = super::CONFIG_FILE)]
    path: PathBuf,
}

impl Command {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        if self.path.exists() {
            anyhow::bail!("Configuration already exists at {}", self.path.display());
        }

        Config::default()
            .save(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", self.path.display()))?;

        println!("Created {}", self.path.display());
        Ok(())
    }
}

use std::path::PathBuf;

use anyhow::Context;
use cvrf_writer::{Renderer, storage::load_document};
use tracing::instrument;

use super::terminal::{Stream, Tone};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Advisory description (.yaml, .yml or .toml)
    input: PathBuf,
}

impl Command {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        let document = load_document(&self.input)
            .with_context(|| format!("failed to load {}", self.input.display()))?;

        let rendered = Renderer::new(&document).ignore_violations(true).render()?;

        if rendered.is_complete() {
            println!(
                "{}",
                Tone::Success.paint(
                    format!("{} is a complete advisory", self.input.display()),
                    Stream::Stdout
                )
            );
            return Ok(());
        }

        println!("{}", Tone::Info.paint(self.input.display(), Stream::Stdout));
        for violation in rendered.violations() {
            println!(
                "  {} {}",
                Tone::Warning.paint("missing", Stream::Stdout),
                violation.field()
            );
        }

        anyhow::bail!(
            "{} required field(s) missing",
            rendered.violations().len()
        )
    }
}

use std::{fs, path::PathBuf};

use anyhow::Context;
use cvrf_writer::{Config, Renderer, storage::load_document};
use tracing::instrument;

use super::terminal::{Stream, Tone};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Advisory description (.yaml, .yml or .toml)
    input: PathBuf,

    /// Write the XML to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoding to declare in the XML header
    #[arg(long)]
    encoding: Option<String>,

    /// Report missing required fields as warnings instead of failing
    #[arg(long)]
    ignore_violations: bool,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,
}

impl Command {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let document = load_document(&self.input)
            .with_context(|| format!("failed to load {}", self.input.display()))?;

        let mut renderer = Renderer::new(&document);
        if let Some(encoding) = self.encoding.or_else(|| config.encoding.clone()) {
            renderer.set_encoding(encoding)?;
        }
        renderer.ignore_violations(self.ignore_violations || config.ignore_violations);

        let rendered = renderer.render()?;
        for violation in rendered.violations() {
            eprintln!(
                "{}",
                Tone::Warning.paint(format!("warning: {violation}"), Stream::Stderr)
            );
        }

        let xml = rendered.to_xml_with_indent(self.indent.unwrap_or_else(|| config.indent()));
        match self.output {
            Some(path) => {
                fs::write(&path, xml)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Wrote {}", path.display());
                eprintln!(
                    "{}",
                    Tone::Success.paint(format!("Rendered {}", path.display()), Stream::Stderr)
                );
            }
            None => print!("{xml}"),
        }

        Ok(())
    }
}

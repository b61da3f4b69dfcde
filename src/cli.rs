use std::path::{Path, PathBuf};

mod check;
mod init;
mod render;
mod terminal;

use clap::ArgAction;
use cvrf_writer::Config;

/// The configuration file picked up from the working directory.
const CONFIG_FILE: &str = ".cvrf.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to `.cvrf.toml` when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the rendered XML
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the explicit config file, or `.cvrf.toml` if it exists, or the
/// defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(CONFIG_FILE).is_file() => Path::new(CONFIG_FILE),
        None => return Ok(Config::default()),
    };

    tracing::debug!("Loading config from {}", path.display());
    Config::load(path).map_err(anyhow::Error::msg)
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Render an advisory description as CVRF XML
    Render(render::Command),

    /// Check that an advisory has every field a complete document needs
    Check(check::Command),

    /// Write a default configuration file
    Init(init::Command),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Render(command) => command.run(config)?,
            Self::Check(command) => command.run()?,
            Self::Init(command) => command.run()?,
        }
        Ok(())
    }
}

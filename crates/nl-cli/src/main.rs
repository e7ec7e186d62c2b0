mod screen;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nl_client::{Backend, HttpBackend};
use nl_runner::{Config, Overrides, RequestOrchestrator, SolveOutcome, SAMPLE_PUZZLE};
use screen::{Format, TerminalScreen};

#[derive(Parser)]
#[command(name = "neurologic", version, about = "Seating puzzles: LLM guess vs. proved solution")]
struct Cli {
    /// Config file (default ~/.config/neurologic/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL; overrides env and config
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Use the local backend preset
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a puzzle to the baseline and neuro-symbolic solvers
    Solve {
        /// Puzzle text
        #[arg(long, conflicts_with_all = ["file", "example"])]
        puzzle: Option<String>,

        /// Read the puzzle from a file
        #[arg(long, conflicts_with = "example")]
        file: Option<PathBuf>,

        /// Use the bundled sample puzzle
        #[arg(long)]
        example: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Check the backend is up (also wakes a sleeping deployment)
    Ping,

    /// Print the bundled sample puzzle
    Example,

    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => Config::expand_path(path),
            None => Config::default_path(),
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides::from_env(self.base_url.clone(), self.local)
    }
}

fn read_puzzle(puzzle: Option<String>, file: Option<PathBuf>, example: bool) -> anyhow::Result<String> {
    if let Some(text) = puzzle {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()));
    }
    if example {
        return Ok(SAMPLE_PUZZLE.to_string());
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("read puzzle from stdin")?;
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config_path();
    let overrides = cli.overrides();

    match cli.cmd {
        Command::Solve {
            puzzle,
            file,
            example,
            format,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let (base_url, source) = config.resolve_base_url(&overrides);
            info!(%base_url, %source, "using backend");

            let text = read_puzzle(puzzle, file, example)?;
            let backend = HttpBackend::new(&base_url)?;
            let orch = RequestOrchestrator::new(backend, TerminalScreen::new(format));
            let outcome = orch.solve(&text).await;

            if format == Format::Json {
                println!("{}", serde_json::to_string_pretty(&orch.display())?);
            }
            match outcome {
                SolveOutcome::Succeeded => {}
                SolveOutcome::Failed(err) => bail!("solve failed ({})", err.kind()),
                SolveOutcome::Rejected => bail!("a solve is already running"),
            }
        }
        Command::Ping => {
            let config = Config::load_or_default(&config_path)?;
            let (base_url, _) = config.resolve_base_url(&overrides);
            let backend = HttpBackend::new(&base_url)?;
            let message = backend
                .health()
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("{}: {message}", backend.base_url());
        }
        Command::Example => {
            println!("{SAMPLE_PUZZLE}");
        }
        Command::Config { cmd } => match cmd {
            ConfigCommand::Show => {
                let config = Config::load_or_default(&config_path)?;
                let (base_url, source) = config.resolve_base_url(&overrides);
                println!("# file: {}", config_path.display());
                println!("# base_url: {base_url} (from {source})");
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigCommand::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    );
                }
                Config::default().save_to(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}

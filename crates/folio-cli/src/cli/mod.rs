//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::config::{self, Config};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Interactive terminal portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of $FOLIO_HOME/config.toml
    #[arg(long, global = true, value_name = "PATH", env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Types the output of one command to stdout and exits
    Show {
        /// Command to run (e.g. about, projects, help)
        command: String,

        /// Print the whole output at once, without typing delays
        #[arg(long)]
        instant: bool,

        /// Echo the prompt and command before the output
        #[arg(long)]
        echo: bool,
    },
    /// Lists the available commands
    Commands {
        /// Include hidden commands
        #[arg(long)]
        all: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
    /// Print a default config generated from current defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(config::paths::config_path);

    match cli.command {
        None => {
            let config = Config::load_from(&config_path).context("load config")?;
            commands::interactive::run(&config)
        }
        Some(Commands::Show {
            command,
            instant,
            echo,
        }) => {
            folio_core::logging::init_stderr_logging()?;
            let config = Config::load_from(&config_path).context("load config")?;
            commands::show::run(&config, command, instant, echo).await
        }
        Some(Commands::Commands { all }) => {
            folio_core::logging::init_stderr_logging()?;
            let config = Config::load_from(&config_path).context("load config")?;
            commands::list::run(&config, all);
            Ok(())
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path(&config_path);
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(&config_path),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}

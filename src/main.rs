use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use curconv::cli::convert::ConvertArgs;
use curconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; empty or below 1 becomes 1
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,

        /// Source currency code
        #[arg(short, long)]
        from: Option<String>,

        /// Target currency code
        #[arg(short, long)]
        to: Option<String>,
    },
    /// List available currencies
    Currencies,
    /// Interactive converter
    Shell,
}

impl From<Commands> for curconv::AppCommand {
    fn from(cmd: Commands) -> curconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                curconv::AppCommand::Convert(ConvertArgs { amount, from, to })
            }
            Commands::Currencies => curconv::AppCommand::Currencies,
            Commands::Shell => curconv::AppCommand::Shell,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => curconv::cli::setup::setup(),
        Some(cmd) => curconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

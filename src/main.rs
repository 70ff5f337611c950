use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xrate::core::currency::Currency;
use xrate::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Show the fixed sample state instead of fetching quotes
    #[arg(long, global = true)]
    preview: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xrate::AppCommand {
    fn from(cmd: Commands) -> xrate::AppCommand {
        match cmd {
            Commands::Convert { to, amount } => xrate::AppCommand::Convert { to, amount },
            Commands::Interactive => xrate::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert a sending amount in USD into a receiving currency
    Convert {
        /// Receiving currency (KRW, JPY or PHP)
        #[arg(short, long, default_value = "KRW")]
        to: Currency,
        /// Sending amount in USD, passed through as typed
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
    /// Enter amounts and currencies line by line
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => xrate::cli::setup::setup_at_path(path),
            None => xrate::cli::setup::setup(),
        },
        Some(cmd) => {
            xrate::run_command(cmd.into(), cli.config_path.as_deref(), cli.preview).await
        }
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

pub mod cli;
pub mod core;
pub mod engine;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::engine::{ExchangeEngine, ExchangeView, PreviewView};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        to: Currency,
        amount: Option<String>,
    },
    Interactive,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    preview: bool,
) -> Result<()> {
    info!("Exchange rate calculator starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    config.preview |= preview;
    debug!("Loaded config: {config:#?}");

    let view = build_view(&config)?;

    match command {
        AppCommand::Convert { to, amount } => {
            cli::convert::run(view.as_ref(), to, amount, config.settle_timeout()).await
        }
        AppCommand::Interactive => cli::interactive::run(view.as_ref()).await,
    }
}

/// The fixed preview when `config.preview` is set, otherwise a live engine
/// over the configured quote source. Must be called inside a tokio runtime.
pub fn build_view(config: &AppConfig) -> Result<Box<dyn ExchangeView>> {
    if config.preview {
        debug!("Serving preview state");
        return Ok(Box::new(PreviewView::new()));
    }
    let source = providers::build_quote_source(config)?;
    Ok(Box::new(ExchangeEngine::spawn(source)))
}

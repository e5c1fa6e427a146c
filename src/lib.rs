pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConvertArgs;
use crate::core::config::AppConfig;
use crate::core::{ConverterWidget, CurrencyTable};
use crate::providers::CurrencyApiProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert(ConvertArgs),
    Currencies,
    Shell,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let currencies = Arc::new(CurrencyTable::builtin());
    let mut widget = ConverterWidget::new(
        currencies,
        &config.widget,
        &config.providers.flags.base_url,
    )?;

    let api = &config.providers.currency_api;
    let provider = CurrencyApiProvider::new(&api.base_url, api.timeout())?;

    match command {
        AppCommand::Convert(args) => cli::convert::run(&mut widget, &provider, &args).await,
        AppCommand::Currencies => cli::currencies::run(&widget),
        AppCommand::Shell => cli::shell::run(&mut widget, &provider).await,
    }
}

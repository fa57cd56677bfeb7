//! paywall-preview - Loads a paywall definition, resolves its prices from a
//! price table and prints what each option would display.
//!
//! ```text
//! paywall-preview [PAYWALL_DEFINITION] [PRICE_TABLE]
//! ```
//!
//! Paths missing from the command line fall back to
//! `PAYWALL__PRICING__PAYWALL_DEFINITION` and `PAYWALL__PRICING__PRICE_TABLE`.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use paywall_engine::adapters::{load_paywall_definition, StaticPriceLookup};
use paywall_engine::application::{LoadPricesCommand, LoadPricesHandler};
use paywall_engine::config::{AppConfig, ConfigError, LoggingConfig, ValidationError};
use paywall_engine::domain::paywall::{ConfigurationError, PaywallError, PaywallSession};

#[derive(Debug, Error)]
enum PreviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    #[error(transparent)]
    Paywall(#[from] PaywallError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("No {0} given (pass it as an argument or set {1})")]
    MissingPath(&'static str, &'static str),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

fn init_logging(config: &LoggingConfig) -> Result<(), PreviewError> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| PreviewError::Logging(e.to_string()))
}

async fn run() -> Result<(), PreviewError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_logging(&config.logging)?;

    let mut args = std::env::args().skip(1);
    let definition_path = args
        .next()
        .or_else(|| config.pricing.paywall_definition.clone())
        .ok_or(PreviewError::MissingPath(
            "paywall definition",
            "PAYWALL__PRICING__PAYWALL_DEFINITION",
        ))?;
    let price_table_path = args
        .next()
        .or_else(|| config.pricing.price_table.clone())
        .ok_or(PreviewError::MissingPath(
            "price table",
            "PAYWALL__PRICING__PRICE_TABLE",
        ))?;

    let definition = load_paywall_definition(&definition_path)?;
    let lookup = StaticPriceLookup::load(&price_table_path)?;

    let mut session = PaywallSession::new(definition)?;
    session.appear();
    let session = Arc::new(Mutex::new(session));

    let mut handler = LoadPricesHandler::new(Arc::new(lookup));
    if let Some(timeout) = config.pricing.lookup_timeout() {
        handler = handler.with_lookup_timeout(timeout);
    }
    let outcome = handler
        .handle(LoadPricesCommand {
            session: Arc::clone(&session),
        })
        .await;

    let session = session.lock().await;
    let texts = &session.configuration().texts;
    println!("{}", texts.title);
    println!("{}", texts.subtitle);
    println!();

    for (index, option) in session.options().iter().enumerate() {
        let marker = if session.selected_index() == Some(index) {
            "*"
        } else {
            " "
        };
        let price = option
            .price()
            .map(|p| p.localized_string().to_string())
            .unwrap_or_else(|| "price unavailable".to_string());
        println!("{} [{}] {} ({}) {}", marker, index, option.product_id, option.period, price);
        if let Some(detail) = session.detail_text(index) {
            println!("      {}", detail);
        }
        if let Some(footer) = session.footer_text(index) {
            println!("      {}", footer);
        }
    }

    println!();
    println!("{} | {}", texts.purchase_button, texts.restore_button);
    for (product_id, failure) in &outcome.failed {
        println!("! {}: {}", product_id, failure);
    }
    for (product_id, error) in &outcome.rejected {
        println!("! {}: {}", product_id, error);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("paywall-preview: {}", error);
            ExitCode::FAILURE
        }
    }
}

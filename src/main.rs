use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use wedding_rsvp::adapters::http::{serve, shutdown_signal};
use wedding_rsvp::domain::ports::StoreConfigProvider;
use wedding_rsvp::utils::error::ErrorSeverity;
use wedding_rsvp::utils::{logger, validation::Validate};
use wedding_rsvp::{CliConfig, LocalStorage, RsvpService, SpreadsheetStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_server_logger(&config.logging.level, &config.logging.format);
    tracing::info!("Starting wedding-rsvp");
    if !Path::new(&cli.config).exists() {
        tracing::info!("{} not found, using defaults", cli.config);
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_dir());
    tracing::info!("📁 Workbook directory: {}", storage.base_path().display());
    let store = Arc::new(SpreadsheetStore::from_config(storage, &config));
    let service = RsvpService::from_store(store);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;

    if let Err(e) = serve(listener, service, shutdown_signal()).await {
        tracing::error!(
            "❌ Server stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

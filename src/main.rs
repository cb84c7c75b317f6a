use std::env;
use wimbly::{
    logger::{self, LogLevel, LoggerConfig},
    server::{self, AppState},
    CredentialResolver, EnvSecretStore, HuggingFaceClient, Studio, StudioConfig,
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first so HF_TOKEN can come from it
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let logger_config = match env::var("RUST_LOG").ok().as_deref().and_then(LogLevel::parse) {
        Some(level) => LoggerConfig::development().with_level(level),
        None => LoggerConfig::default(),
    };
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = StudioConfig::from_env();
    logger::log_startup_info("Wimbly Studio", env!("CARGO_PKG_VERSION"), &config);

    let resolver = CredentialResolver::new(EnvSecretStore, config.secret_key.clone());
    if resolver.has_secret() {
        log::info!("🔑 {} found, manual token field hidden", config.secret_key);
    } else {
        log::warn!("⚠️  Chiave segreta non trovata. Inseriscila manualmente nella sidebar.");
    }

    let studio = Studio::new(HuggingFaceClient::new());
    let state = AppState::new(studio, resolver)?;

    server::run(config, state).await?;
    Ok(())
}

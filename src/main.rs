//! pdf-translate-api – entry point.
//!
//! Startup order:
//! 1. Load `.env` (if present) and read configuration from the environment.
//! 2. Initialise structured tracing (JSON or human-readable).
//! 3. Pick the translator, build the task manager and serve the API until
//!    SIGINT/SIGTERM.

use pdf_translate_api::{Config, run_with_shutdown};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match config.log.level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: PDF_API_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    config.log.level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "pdf-translate-api starting");
    match dotenv {
        Ok(path) => info!(path = ?path, "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to load .env file"),
    }
    if config.translator.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; translations will run without a credential");
    }

    // ── 3. Translator, task manager and HTTP server ────────────────────────────
    run_with_shutdown(config).await?;

    info!("pdf-translate-api stopped");
    Ok(())
}

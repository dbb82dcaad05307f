//! Sales pricing API server

use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::{router, AppState};
use clap::Parser;
use common::error::{ErrorExt, IntoError, Result as PricingResult};
use dotenv::dotenv;
use pricing_engine::TaxRateCatalog;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Sales pricing API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to 0.0.0.0 on $PORT)
    #[clap(short, long)]
    addr: Option<String>,

    /// JSON file with the IVA and withholding lists (overrides $TAX_RATES_FILE)
    #[clap(short, long)]
    tax_rates: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    debug!("Debug logging enabled");

    // Load reference data
    let mut config = AppConfig::new();
    if let Some(path) = args.tax_rates {
        config.tax_rates_file = Some(path);
    }

    let catalog = load_catalog(&config).map_err(|e| {
        error!("Failed to load tax rates: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let state = Arc::new(AppState::new(catalog));

    let app = router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(log_level))
            .on_request(DefaultOnRequest::new().level(log_level))
            .on_response(DefaultOnResponse::new().level(log_level)),
    );

    // Start the server
    let addr = args.addr.unwrap_or_else(|| format!("0.0.0.0:{}", config.port));
    let addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid address {}: {}", addr, e)))?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Catalog from the configured file, or the built-in defaults
fn load_catalog(config: &AppConfig) -> PricingResult<TaxRateCatalog> {
    match &config.tax_rates_file {
        Some(path) => {
            info!("Loading tax rates from {}", path.display());
            let json = std::fs::read_to_string(path)
                .map_err(|e| e.into_error(&format!("Reading {}", path.display())))?;
            TaxRateCatalog::from_json(&json).with_context(|| path.display().to_string())
        }
        None => {
            info!("No tax rate file configured, using built-in rates");
            Ok(TaxRateCatalog::with_defaults())
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

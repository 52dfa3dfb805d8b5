//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, TurnstileConfig};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Merge file, environment, and flag settings. Flags win.
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<TurnstileConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        TurnstileConfig::load(Some(&args.config))?
    } else {
        tracing::debug!(path = %args.config.display(), "No config file, starting from defaults");
        TurnstileConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_probe {
        config.health_backend = None;
    }

    Ok(config)
}

/// Install the global tracing subscriber. RUST_LOG takes precedence
/// over the configured levels when set.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Cancel the token once SIGINT or SIGTERM arrives.
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("SIGINT received, draining connections");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Validation errors must reach stderr before any subscriber is installed
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting Turnstile server");
    tracing::debug!(?config, "Loaded configuration");

    match &config.health_backend {
        Some(backend) => tracing::info!(
            base_url = %backend.base_url,
            metric = %format!("{}/{}/{}", backend.metric_type, backend.metric_name, backend.attribute),
            "Health probing enabled, quotas scale with backend load"
        ),
        None => tracing::info!("No health backend configured, serving unscaled quotas"),
    }

    let state = Arc::new(AppState::new(Arc::new(config.clone())));
    let app = create_router(Arc::clone(&state));

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "Turnstile API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await?;

    tracing::info!("Turnstile server stopped");
    Ok(())
}

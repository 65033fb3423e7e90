mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use parkmap_feedback::{FeedbackCache, FeedbackClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, PageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(parkmap_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(env = %config.env, "starting parkmap-server");

    let client = FeedbackClient::from_config(&config)?;
    let cache = Arc::new(FeedbackCache::new(
        client,
        config.feedback_schema,
        Duration::from_secs(config.feedback_revalidate_secs),
    ));

    let catalog =
        parkmap_facilities::load_catalog(&config.park_csv_path, &config.toilet_csv_path).await;
    tracing::info!(
        parks = catalog.parks().len(),
        toilets = catalog.toilets().len(),
        "facilities loaded"
    );

    // The first feed fetch runs in the background; facilities are served
    // without feedback until it lands.
    let orphan_catalog = catalog.clone();
    cache.spawn_refresh_then(move |index| {
        tracing::info!(feedback = index.len(), "initial feedback loaded");
        index.report_orphans(&orphan_catalog);
    });

    let app = build_app(AppState {
        catalog,
        feedback: cache,
        settings: Arc::new(PageSettings::from_config(&config)),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

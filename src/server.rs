//! HTTP server initialization and runtime setup.
//!
//! Builds the redirect pipeline from configuration, spawns the decision worker,
//! and drives the Axum server lifecycle.

use crate::application::services::{RedirectService, ShortlinkExpander};
use crate::config::Config;
use crate::domain::affiliate::AffiliateLinkBuilder;
use crate::domain::decision_worker::run_decision_worker;
use crate::domain::registry::PartnerRegistry;
use crate::infrastructure::dispatch::{DecisionSink, NullSink, WebhookSink};
use crate::infrastructure::http::ReqwestHopFetcher;
use crate::routes::app_router;
use crate::state::{AppState, DeploymentInfo};
use crate::utils::query_sanitizer::QuerySanitizer;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Loads the partner registry from `PARTNERS_FILE`, or the built-in table.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains an invalid registry.
pub fn load_registry(config: &Config) -> Result<PartnerRegistry> {
    match &config.partners_file {
        Some(path) => {
            let registry = PartnerRegistry::from_json_file(path)
                .with_context(|| format!("Failed to load PARTNERS_FILE '{}'", path))?;
            tracing::info!(
                "Loaded {} partners and {} shortlink rules from {}",
                registry.partners().len(),
                registry.shortlinks().len(),
                path
            );
            Ok(registry)
        }
        None => Ok(PartnerRegistry::builtin()),
    }
}

/// Assembles the redirect pipeline described by `config`.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or the hop fetcher's
/// HTTP client cannot be built.
pub fn build_redirect_service(config: &Config) -> Result<RedirectService> {
    let registry = Arc::new(load_registry(config)?);

    let fetcher = ReqwestHopFetcher::new(config.expansion_hop_timeout())
        .context("Failed to build shortlink HTTP client")?;
    let expander = ShortlinkExpander::new(
        Arc::new(fetcher),
        registry.clone(),
        config.expansion_hop_timeout(),
        config.expansion_budget(),
    );

    Ok(RedirectService::new(
        registry,
        QuerySanitizer::new(&config.attribution_source, &config.attribution_medium),
        expander,
        AffiliateLinkBuilder::new(config.credentials()),
        config.unmapped_domain_policy,
    ))
}

/// Picks the decision sink: webhook when configured, no-op otherwise.
fn build_decision_sink(config: &Config) -> Result<Arc<dyn DecisionSink>> {
    match &config.decision_webhook_url {
        Some(url) => {
            let sink = WebhookSink::new(url.as_str(), config.webhook_timeout())
                .context("Failed to build decision webhook client")?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(NullSink::new())),
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Partner registry and redirect pipeline
/// - Background decision worker (unless disabled)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The registry or an HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let redirect_service = Arc::new(build_redirect_service(&config)?);

    let decision_sender = if config.decision_log_enabled {
        let sink = build_decision_sink(&config)?;
        let (tx, rx) = mpsc::channel(config.decision_queue_capacity);
        tokio::spawn(run_decision_worker(rx, sink));
        tracing::info!("Decision worker started");
        Some(tx)
    } else {
        tracing::info!("Decision records disabled");
        None
    };

    let deployment = DeploymentInfo {
        env: config.deploy_env.clone(),
        commit: config.git_commit.clone(),
    };
    let state = AppState::new(redirect_service, decision_sender, deployment);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/*
 * Responsibility
 * - Config load → service construction → Router assembly
 * - Tracing / panic-hook initialization
 * - axum::serve() startup
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::auth::BasicAuthenticator;
use crate::services::signup::SignUpValidator;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,signup_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched).
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice
        // immediately. In production, keep the default behavior and let the
        // server keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting sign-up gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    if config.basic_auth_username.is_none() {
        tracing::warn!("BASIC_AUTH_USERNAME is not set; the endpoint is unauthenticated");
    }

    let state = build_state(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    let auth = Arc::new(BasicAuthenticator::new(
        config.basic_auth_username.clone(),
        config.basic_auth_password.clone(),
    ));
    let validator = Arc::new(SignUpValidator::new(
        config.allowed_domains.clone(),
        config.title_policy,
        config.title_min_length,
    ));

    AppState::new(auth, validator, &config.decision_version)
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router)
}

/*
 * Responsibility
 * - v1 URL structure
 * - Decide which routes sit behind the Basic-Auth gate
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{health::health, signup::sign_up};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // Only the webhook itself is gated; the health probe stays open.
    let signup = middleware::auth::basic::apply(
        Router::new().route("/signup", post(sign_up)),
        state,
    );

    Router::new().route("/health", get(health)).merge(signup)
}

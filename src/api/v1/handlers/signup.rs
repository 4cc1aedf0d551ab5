use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::v1::dto::decision::DecisionResponse;
use crate::services::signup::Decision;
use crate::state::AppState;

/// The sign-up webhook.
///
/// Takes the raw body bytes rather than `Json<T>`: a body that does not
/// parse is a business outcome (block page), not a transport-level 400.
pub async fn sign_up(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let decision = state.validator.validate(&body);

    // Correctable field errors are the one outcome reported as 400; block
    // pages and continues ride on 200.
    let status = match &decision {
        Decision::ValidationError { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };

    let response = DecisionResponse::new(&state.decision_version, status.as_u16(), decision);
    tracing::info!(action = response.action, code = ?response.code, "sign-up decision");

    (status, Json(response))
}

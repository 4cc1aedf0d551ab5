//! Basic-Auth gate for the sign-up webhook.
//!
//! The credential check itself lives in `services::auth`; this module only
//! wires it into the router and turns a failed check into a bodyless 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Put a route group behind the Basic-Auth gate.
///
/// Ex:
/// ```ignore
/// let signup = Router::new().route("/signup", post(sign_up));
/// let signup = middleware::auth::basic::apply(signup, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor by itself, so the
    // state is passed explicitly via from_fn_with_state.
    router.layer(middleware::from_fn_with_state(state, basic_auth_middleware))
}

async fn basic_auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if !state.auth.authorize(authorization) {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}

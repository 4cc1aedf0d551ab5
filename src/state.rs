use std::sync::Arc;

use crate::services::auth::BasicAuthenticator;
use crate::services::signup::SignUpValidator;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<BasicAuthenticator>,
    pub validator: Arc<SignUpValidator>,
    pub decision_version: Arc<str>,
}

impl AppState {
    pub fn new(
        auth: Arc<BasicAuthenticator>,
        validator: Arc<SignUpValidator>,
        decision_version: &str,
    ) -> Self {
        Self {
            auth,
            validator,
            decision_version: Arc::from(decision_version),
        }
    }
}

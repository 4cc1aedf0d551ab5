use serde::Serialize;

use crate::services::signup::Decision;

/// Wire shape of a validation decision.
///
/// The identity provider reads `action` to choose its next step and renders
/// `userMessage` to the user. `code` and `userMessage` are absent on
/// `Continue`. `status` mirrors the HTTP status of the response carrying
/// this body.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub version: String,
    pub status: u16,
    pub action: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,

    #[serde(rename = "userMessage", skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

impl DecisionResponse {
    pub fn new(version: &str, status: u16, decision: Decision) -> Self {
        let (action, code, user_message) = match decision {
            Decision::Allow => ("Continue", None, None),
            Decision::BlockPage { code, user_message } => {
                ("ShowBlockPage", Some(code), Some(user_message))
            }
            Decision::ValidationError { code, user_message } => {
                ("ValidationError", Some(code), Some(user_message))
            }
        };

        Self {
            version: version.to_string(),
            status,
            action,
            code,
            user_message,
        }
    }
}

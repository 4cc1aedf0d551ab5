use serde::Deserialize;

/// Profile the identity provider posts to the webhook during sign-up.
///
/// Every field is optional at the schema level; presence and shape are the
/// validator's business. Unknown fields are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    /// Submitted email address. Expected to contain `@`.
    #[serde(default)]
    pub email: Option<String>,

    /// Display-name-like field (the upstream claim is called `jobTitle`).
    #[serde(default, rename = "jobTitle")]
    pub job_title: Option<String>,

    /// UI locale hint. Logged, never used for decisions.
    #[serde(default)]
    pub ui_locales: Option<String>,
}

use base64::{Engine as _, engine::general_purpose::STANDARD};

const SCHEME_PREFIX: &str = "Basic ";

/// Checks inbound `Authorization: Basic <base64(user:pass)>` headers against
/// configured credentials.
///
/// With no configured username the gate is disabled and every request passes
/// (fail-open). That is inherited tenant behavior: deployments that want the
/// gate enforced must always set a username.
#[derive(Debug, Clone)]
pub struct BasicAuthenticator {
    username: Option<String>,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: Option<String>, password: String) -> Self {
        // Unset and empty behave the same: disabled.
        let username = username.filter(|u| !u.is_empty());
        Self { username, password }
    }

    /// Returns whether the request may proceed.
    ///
    /// Anything malformed about the header (wrong scheme, undecodable
    /// base64, non-UTF-8 payload, missing `:`) counts as unauthorized; it
    /// never propagates as an error.
    pub fn authorize(&self, header: Option<&str>) -> bool {
        let Some(expected_username) = self.username.as_deref() else {
            tracing::info!("basic auth not configured, allowing request");
            return true;
        };

        let authorized = match decode(header) {
            Some((username, password)) => {
                username == expected_username && password == self.password
            }
            None => false,
        };

        tracing::info!(authorized, "basic auth check");
        authorized
    }
}

/// Split a `Basic` header into its username and password, or `None` for
/// anything that doesn't decode to `user:pass`.
fn decode(header: Option<&str>) -> Option<(String, String)> {
    let encoded = header?.strip_prefix(SCHEME_PREFIX)?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let text = String::from_utf8(decoded).ok()?;

    // The password may itself contain ':'; only the first one separates.
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

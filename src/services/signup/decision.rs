/// Outcome of validating one sign-up request.
///
/// Exactly one of these is produced per request. `BlockPage` is terminal for
/// the user; `ValidationError` tells the caller to re-render the form so the
/// offending field can be corrected and resubmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    BlockPage {
        code: &'static str,
        user_message: String,
    },
    ValidationError {
        code: &'static str,
        user_message: String,
    },
}

use std::borrow::Cow;

use crate::api::v1::dto::signup::SignUpRequest;
use crate::config::TitlePolicy;
use crate::services::signup::Decision;

const CODE_MALFORMED_BODY: &str = "SignUp-Validation-01";
const CODE_MANDATORY_FIELD: &str = "SignUp-Validation-02";
const CODE_DISPLAY_NAME_TOO_SHORT: &str = "SignUp-Validation-03";
const CODE_JOB_TITLE_TOO_SHORT: &str = "SignUp-Validation-04";

/// Field-by-field validation of a sign-up request.
///
/// The rules run in a fixed order and the first hit wins; that order is part
/// of the contract because it decides which single message a user sees when
/// several fields are bad at once. No rule after the first hit is evaluated.
#[derive(Debug, Clone)]
pub struct SignUpValidator {
    allowed_domains: Vec<String>,
    title_policy: TitlePolicy,
    title_min_length: usize,
}

impl SignUpValidator {
    pub fn new(
        allowed_domains: Vec<String>,
        title_policy: TitlePolicy,
        title_min_length: usize,
    ) -> Self {
        Self {
            allowed_domains,
            title_policy,
            title_min_length,
        }
    }

    /// Decide on a raw request body. Parsing happens here so that a body
    /// that is not JSON at all still yields a decision, never an error.
    pub fn validate(&self, body: &[u8]) -> Decision {
        let request: SignUpRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "sign-up body did not parse");
                return Decision::BlockPage {
                    code: CODE_MALFORMED_BODY,
                    user_message: "There was a problem with your request.".to_string(),
                };
            }
        };

        // Locale is informational only; it never changes the outcome.
        let locale = request
            .ui_locales
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("default");
        tracing::info!(locale, "validating sign-up request");

        // Missing, empty and '@'-less addresses all fail the same rule;
        // everything after the first '@' counts as the domain.
        let Some((_, domain)) = request
            .email
            .as_deref()
            .and_then(|email| email.split_once('@'))
        else {
            return Decision::BlockPage {
                code: CODE_MANDATORY_FIELD,
                user_message: "Email is mandatory.".to_string(),
            };
        };

        if !self
            .allowed_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain))
        {
            return Decision::BlockPage {
                code: CODE_MANDATORY_FIELD,
                user_message: format!(
                    "You must have an account from '{}' to register as an external user.",
                    self.allowed_domains.join(", ")
                ),
            };
        }

        let title = request.job_title.as_deref().filter(|t| !t.is_empty());

        match self.title_policy {
            TitlePolicy::Mandatory => {
                let Some(title) = title else {
                    return Decision::BlockPage {
                        code: CODE_MANDATORY_FIELD,
                        user_message: "Display name is mandatory.".to_string(),
                    };
                };

                if title.chars().count() < self.title_min_length {
                    return Decision::BlockPage {
                        code: CODE_DISPLAY_NAME_TOO_SHORT,
                        user_message: format!(
                            "Display name must contain at least {} characters.",
                            spelled_out(self.title_min_length)
                        ),
                    };
                }
            }
            TitlePolicy::Optional => {
                // Absent titles are fine under this policy; a present but
                // short one is a correctable field error, not a block page.
                if let Some(title) = title
                    && title.chars().count() < self.title_min_length
                {
                    return Decision::ValidationError {
                        code: CODE_JOB_TITLE_TOO_SHORT,
                        user_message: format!(
                            "Job Title must contain at least {} characters.",
                            spelled_out(self.title_min_length)
                        ),
                    };
                }
            }
        }

        Decision::Allow
    }
}

/// Small minimums are spelled out so the stock messages read like prose
/// ("at least four characters"); unusual configured values fall back to
/// digits.
fn spelled_out(n: usize) -> Cow<'static, str> {
    let word = match n {
        1 => "one",
        2 => "two",
        3 => "three",
        4 => "four",
        5 => "five",
        6 => "six",
        7 => "seven",
        8 => "eight",
        9 => "nine",
        10 => "ten",
        _ => return Cow::Owned(n.to_string()),
    };
    Cow::Borrowed(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandatory() -> SignUpValidator {
        SignUpValidator::new(
            vec!["fabrikam.com".to_string(), "contoso.com".to_string()],
            TitlePolicy::Mandatory,
            4,
        )
    }

    fn optional() -> SignUpValidator {
        SignUpValidator::new(
            vec!["fabrikam.com".to_string(), "contoso.com".to_string()],
            TitlePolicy::Optional,
            5,
        )
    }

    #[test]
    fn malformed_body_is_blocked() {
        assert_eq!(
            mandatory().validate(b"{not json"),
            Decision::BlockPage {
                code: "SignUp-Validation-01",
                user_message: "There was a problem with your request.".to_string(),
            }
        );
    }

    #[test]
    fn non_object_body_is_blocked() {
        assert_eq!(
            mandatory().validate(b"[1, 2, 3]"),
            Decision::BlockPage {
                code: "SignUp-Validation-01",
                user_message: "There was a problem with your request.".to_string(),
            }
        );
    }

    #[test]
    fn missing_email_is_blocked() {
        assert_eq!(
            mandatory().validate(br#"{"jobTitle": "Director"}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "Email is mandatory.".to_string(),
            }
        );
    }

    #[test]
    fn empty_email_is_blocked() {
        assert_eq!(
            mandatory().validate(br#"{"email": ""}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "Email is mandatory.".to_string(),
            }
        );
    }

    #[test]
    fn email_without_at_sign_is_blocked() {
        assert_eq!(
            mandatory().validate(br#"{"email": "not-an-address"}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "Email is mandatory.".to_string(),
            }
        );
    }

    #[test]
    fn unlisted_domain_is_blocked_with_the_allow_list_in_the_message() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@evil.com"}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "You must have an account from 'fabrikam.com, contoso.com' \
                               to register as an external user."
                    .to_string(),
            }
        );
    }

    #[test]
    fn domain_comparison_is_case_insensitive() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@CONTOSO.com", "jobTitle": "Director"}"#),
            Decision::Allow
        );
    }

    #[test]
    fn domain_starts_after_the_first_at_sign() {
        // "b@contoso.com" is the domain here, and it is not on the list.
        let decision = mandatory().validate(br#"{"email": "a@b@contoso.com"}"#);
        assert!(matches!(
            decision,
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                ..
            }
        ));
    }

    #[test]
    fn mandatory_policy_blocks_missing_title() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@contoso.com"}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "Display name is mandatory.".to_string(),
            }
        );
    }

    #[test]
    fn mandatory_policy_treats_empty_title_as_missing() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@contoso.com", "jobTitle": ""}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-02",
                user_message: "Display name is mandatory.".to_string(),
            }
        );
    }

    #[test]
    fn mandatory_policy_blocks_short_title() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@contoso.com", "jobTitle": "CEO"}"#),
            Decision::BlockPage {
                code: "SignUp-Validation-03",
                user_message: "Display name must contain at least four characters.".to_string(),
            }
        );
    }

    #[test]
    fn mandatory_policy_allows_a_full_profile() {
        assert_eq!(
            mandatory().validate(br#"{"email": "a@contoso.com", "jobTitle": "Director"}"#),
            Decision::Allow
        );
    }

    #[test]
    fn title_length_is_counted_in_characters_not_bytes() {
        // Four characters, more than four bytes.
        assert_eq!(
            mandatory().validate(r#"{"email": "a@contoso.com", "jobTitle": "étés"}"#.as_bytes()),
            Decision::Allow
        );
    }

    #[test]
    fn optional_policy_allows_missing_title() {
        assert_eq!(
            optional().validate(br#"{"email": "a@contoso.com"}"#),
            Decision::Allow
        );
    }

    #[test]
    fn optional_policy_flags_short_title_as_field_error() {
        assert_eq!(
            optional().validate(br#"{"email": "a@contoso.com", "jobTitle": "CEO"}"#),
            Decision::ValidationError {
                code: "SignUp-Validation-04",
                user_message: "Job Title must contain at least five characters.".to_string(),
            }
        );
    }

    #[test]
    fn optional_policy_allows_long_enough_title() {
        assert_eq!(
            optional().validate(br#"{"email": "a@contoso.com", "jobTitle": "Director"}"#),
            Decision::Allow
        );
    }

    #[test]
    fn first_violated_rule_wins() {
        // Both the email and the title are bad; the email rule fires first.
        assert_eq!(
            mandatory().validate(br#"{"email": "a@evil.com", "jobTitle": "x"}"#),
            mandatory().validate(br#"{"email": "a@evil.com"}"#)
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert_eq!(
            mandatory().validate(
                br#"{"email": "a@contoso.com", "jobTitle": "Director", "objectId": "x", "step": 2}"#
            ),
            Decision::Allow
        );
    }

    #[test]
    fn locale_never_changes_the_outcome() {
        let with_locale =
            br#"{"email": "a@contoso.com", "jobTitle": "Director", "ui_locales": "fr-FR"}"#;
        let empty_locale =
            br#"{"email": "a@contoso.com", "jobTitle": "Director", "ui_locales": ""}"#;
        assert_eq!(mandatory().validate(with_locale), Decision::Allow);
        assert_eq!(mandatory().validate(empty_locale), Decision::Allow);
    }

    #[test]
    fn validation_is_idempotent() {
        let validator = mandatory();
        let body = br#"{"email": "a@evil.com"}"#;
        assert_eq!(validator.validate(body), validator.validate(body));
    }
}

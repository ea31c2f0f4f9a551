use serde::{Deserialize, Serialize};

use super::domain::{SubmissionForm, QUESTION_COUNT};

/// Public consumer-email domains rejected by the organization-email check.
const PUBLIC_EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Accept only organization emails: the segment after the first `@` must be
/// non-empty and must not match a public consumer domain.
///
/// The match is exact string equality on the domain with no subdomain
/// normalization; `mail.gmail.com` passes. Known weakness, kept. The deployed
/// form matched case-sensitively, so `a@GMAIL.com` slipped through; the
/// comparison here is deliberately case-insensitive instead.
pub fn is_organization_email(email: &str) -> bool {
    match email.split('@').nth(1) {
        None | Some("") => false,
        Some(domain) => !PUBLIC_EMAIL_DOMAINS
            .iter()
            .any(|blocked| blocked.eq_ignore_ascii_case(domain)),
    }
}

/// The individual checks a submission must pass, in configurable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    RequiredFields,
    EmailDomain,
    ResponseCount,
}

/// Validation behavior knobs. The source material diverged on whether the
/// contact number is required and on check ordering; both are explicit here
/// instead of forked code paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub require_contact: bool,
    pub check_order: Vec<CheckKind>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_contact: true,
            check_order: vec![
                CheckKind::RequiredFields,
                CheckKind::EmailDomain,
                CheckKind::ResponseCount,
            ],
        }
    }
}

/// First failing check for a submission. Exactly one is reported per attempt;
/// the user corrects the input and retries the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in all required contact fields")]
    MissingFields,
    #[error("please use an organization email, not a public provider such as Gmail or Yahoo")]
    InvalidEmailDomain,
    #[error("please answer all {QUESTION_COUNT} questions before submitting")]
    IncompleteResponses,
}

/// Run the policy's checks in order and stop at the first failure.
pub fn validate_submission(
    form: &SubmissionForm,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    for check in &policy.check_order {
        match check {
            CheckKind::RequiredFields => {
                let contact_ok = !policy.require_contact
                    || form
                        .contact
                        .contact
                        .as_deref()
                        .is_some_and(|value| !value.trim().is_empty());
                if form.contact.name.trim().is_empty()
                    || form.contact.email.trim().is_empty()
                    || form.contact.company.trim().is_empty()
                    || !contact_ok
                {
                    return Err(ValidationError::MissingFields);
                }
            }
            CheckKind::EmailDomain => {
                if !is_organization_email(&form.contact.email) {
                    return Err(ValidationError::InvalidEmailDomain);
                }
            }
            CheckKind::ResponseCount => {
                if !form.responses.is_complete() {
                    return Err(ValidationError::IncompleteResponses);
                }
            }
        }
    }
    Ok(())
}

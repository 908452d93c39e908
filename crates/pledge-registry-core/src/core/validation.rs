// crates/pledge-registry-core/src/core/validation.rs
// ============================================================================
// Module: Submission Validation
// Description: Field-level validation rules for pledge submissions.
// Purpose: Collect every user-actionable problem with a submitted form.
// Dependencies: url
// ============================================================================

//! ## Overview
//! [`validate_submission`] runs every rule and returns all failures in a
//! fixed order; it never short-circuits. An empty list means the form is
//! valid. Messages are safe to return verbatim to the submitter.
//!
//! ## Rule order
//! 1. `company_name`, `contact_name`, `email` present and non-blank.
//! 2. `email` shaped like `local@domain.tld` when present.
//! 3. `website` parses as an `http`/`https` URL with a host when present.
//! 4. `agree` is truthy.
//! 5. `honeypot` is absent, empty, or exactly `"0"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use url::Url;

use crate::core::form::SubmissionForm;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum total email length (RFC 5321 path limit minus brackets).
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum email local-part length.
const MAX_LOCAL_PART_LENGTH: usize = 64;
/// Maximum DNS label length.
const MAX_LABEL_LENGTH: usize = 63;
/// Non-alphanumeric characters permitted in an unquoted local part.
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Fields that must be present and non-blank.
const REQUIRED_FIELDS: [FormField; 3] =
    [FormField::CompanyName, FormField::ContactName, FormField::Email];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Submission form fields known to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Company making the pledge.
    CompanyName,
    /// Person submitting on behalf of the company.
    ContactName,
    /// Contact email.
    Email,
    /// Optional job title.
    Title,
    /// Optional company website.
    Website,
    /// Agreement checkbox.
    Agree,
    /// Hidden anti-bot field.
    Honeypot,
}

impl FormField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::ContactName => "contact_name",
            Self::Email => "email",
            Self::Title => "title",
            Self::Website => "website",
            Self::Agree => "agree",
            Self::Honeypot => "honeypot",
        }
    }

    /// Returns the display label (`company_name` -> `Company name`).
    #[must_use]
    pub fn label(self) -> String {
        let spaced = self.name().replace('_', " ");
        let mut chars = spaced.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect::<String>()
        })
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Required field absent or blank.
    MissingField(FormField),
    /// Field present but malformed.
    InvalidFormat(FormField),
    /// Agreement checkbox not ticked.
    AgreementRequired,
    /// Honeypot field was filled in.
    SpamDetected,
}

impl ValidationIssue {
    /// Returns the taxonomy label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidFormat(_) => "invalid_format",
            Self::AgreementRequired => "agreement_required",
            Self::SpamDetected => "spam_detected",
        }
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingField(field) => format!("{} is required.", field.label()),
            Self::InvalidFormat(FormField::Email) => {
                "Please enter a valid email address.".to_string()
            }
            Self::InvalidFormat(FormField::Website) => {
                "Please enter a valid website URL.".to_string()
            }
            Self::InvalidFormat(field) => format!("Please enter a valid {}.", field.label()),
            Self::AgreementRequired => {
                "You must agree to uphold these interviewing practices.".to_string()
            }
            Self::SpamDetected => "Spam detected.".to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a submitted form and returns every failure in rule order.
#[must_use]
pub fn validate_submission(form: &SubmissionForm) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for field in REQUIRED_FIELDS {
        if form.non_blank(field.name()).is_none() {
            issues.push(ValidationIssue::MissingField(field));
        }
    }
    if let Some(email) = form.non_blank(FormField::Email.name())
        && !is_valid_email(email)
    {
        issues.push(ValidationIssue::InvalidFormat(FormField::Email));
    }
    if let Some(website) = form.non_blank(FormField::Website.name())
        && !is_valid_website(website)
    {
        issues.push(ValidationIssue::InvalidFormat(FormField::Website));
    }
    if !form.is_truthy(FormField::Agree.name()) {
        issues.push(ValidationIssue::AgreementRequired);
    }
    if form.is_truthy(FormField::Honeypot.name()) {
        issues.push(ValidationIssue::SpamDetected);
    }
    issues
}

/// Joins issue messages with single spaces for display.
#[must_use]
pub fn join_messages(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ValidationIssue::message).collect::<Vec<_>>().join(" ")
}

/// Returns true when `value` has a `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

/// Returns true when `value` parses as an `http` or `https` URL with a host.
#[must_use]
pub fn is_valid_website(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

/// Validates an unquoted email local part.
fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LENGTH {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|ch| ch.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(ch))
}

/// Validates a dotted domain with at least two labels and an alphabetic TLD.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });
    let tld_ok = labels.last().is_some_and(|tld| tld.chars().all(|ch| ch.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::FormField;
    use super::ValidationIssue;
    use super::is_valid_email;
    use super::is_valid_website;
    use super::join_messages;
    use super::validate_submission;
    use crate::core::form::SubmissionForm;

    fn valid_form() -> SubmissionForm {
        SubmissionForm::new()
            .with("company_name", "Acme")
            .with("contact_name", "Jo")
            .with("email", "jo@acme.com")
            .with("agree", "1")
    }

    #[test]
    fn valid_form_has_no_issues() {
        assert!(validate_submission(&valid_form()).is_empty());
    }

    #[test]
    fn empty_form_collects_every_rule_in_order() {
        let issues = validate_submission(&SubmissionForm::new());
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingField(FormField::CompanyName),
                ValidationIssue::MissingField(FormField::ContactName),
                ValidationIssue::MissingField(FormField::Email),
                ValidationIssue::AgreementRequired,
            ]
        );
        assert_eq!(
            join_messages(&issues),
            "Company name is required. Contact name is required. Email is required. You must \
             agree to uphold these interviewing practices."
        );
    }

    #[test]
    fn blank_required_field_is_missing() {
        let form = valid_form().with("contact_name", "   ");
        assert_eq!(
            validate_submission(&form),
            vec![ValidationIssue::MissingField(FormField::ContactName)]
        );
    }

    #[test]
    fn malformed_email_and_website_are_reported() {
        let form = valid_form().with("email", "not-an-email").with("website", "acme dot com");
        assert_eq!(
            validate_submission(&form),
            vec![
                ValidationIssue::InvalidFormat(FormField::Email),
                ValidationIssue::InvalidFormat(FormField::Website),
            ]
        );
    }

    #[test]
    fn blank_website_is_ignored() {
        let form = valid_form().with("website", "  ");
        assert!(validate_submission(&form).is_empty());
    }

    #[test]
    fn honeypot_trips_even_on_valid_form() {
        let form = valid_form().with("honeypot", "http://spam.example");
        let issues = validate_submission(&form);
        assert_eq!(issues, vec![ValidationIssue::SpamDetected]);
        assert_eq!(join_messages(&issues), "Spam detected.");
    }

    #[test]
    fn padded_zero_honeypot_is_spam() {
        let form = valid_form().with("honeypot", " 0 ");
        assert_eq!(validate_submission(&form), vec![ValidationIssue::SpamDetected]);
        assert!(validate_submission(&valid_form().with("honeypot", "0")).is_empty());
        assert!(validate_submission(&valid_form().with("honeypot", "")).is_empty());
    }

    #[test]
    fn agree_zero_is_falsy() {
        let form = valid_form().with("agree", "0");
        assert_eq!(validate_submission(&form), vec![ValidationIssue::AgreementRequired]);
    }

    #[test]
    fn email_shapes() {
        for good in ["x@y.z", "jo.smith+tag@mail.acme.co", "a_b@sub-domain.example"] {
            assert!(is_valid_email(good), "{good} should be valid");
        }
        for bad in [
            "",
            "plain",
            "@acme.com",
            "jo@",
            "jo@acme",
            "jo@.acme.com",
            "jo@acme..com",
            ".jo@acme.com",
            "jo..x@acme.com",
            "jo@-acme.com",
            "jo smith@acme.com",
            "jo@acme.c0m",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn website_shapes() {
        assert!(is_valid_website("https://acme.com"));
        assert!(is_valid_website("http://acme.com/careers?x=1"));
        assert!(!is_valid_website("acme.com"));
        assert!(!is_valid_website("mailto:jo@acme.com"));
        assert!(!is_valid_website("https://"));
        assert!(!is_valid_website("javascript://acme.com/%0aalert(1)"));
        assert!(!is_valid_website("ftp://acme.com"));
        assert!(!is_valid_website("gopher://acme.com"));
    }

    #[test]
    fn non_http_website_is_rejected_on_full_form() {
        let form = valid_form().with("website", "javascript://acme.com/%0aalert(document.cookie)");
        let expected = vec![ValidationIssue::InvalidFormat(FormField::Website)];
        assert_eq!(validate_submission(&form), expected);
    }

    #[test]
    fn labels_are_humanized() {
        assert_eq!(FormField::CompanyName.label(), "Company name");
        assert_eq!(FormField::Email.label(), "Email");
    }
}

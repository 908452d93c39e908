// crates/pledge-registry-core/src/core/sanitize.rs
// ============================================================================
// Module: Submission Sanitization
// Description: Normalization of validated pledge input.
// Purpose: Produce storage-ready values that are safe to embed in HTML text.
// Dependencies: crate::core::form
// ============================================================================

//! ## Overview
//! Sanitization never fails and assumes [`crate::validate_submission`]
//! already accepted the form. Text fields are trimmed and HTML-escaped, the
//! email is trimmed and lowercased, and the website is only trimmed because
//! it is rendered as an `href` rather than as text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::form::SubmissionForm;
use crate::core::validation::FormField;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Normalized submission values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSubmission {
    /// Trimmed, escaped company name.
    pub company_name: String,
    /// Trimmed, escaped contact name.
    pub contact_name: String,
    /// Trimmed, lowercased email.
    pub email: String,
    /// Trimmed, escaped title (empty when absent).
    pub title: String,
    /// Trimmed website (empty when absent).
    pub website: String,
}

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Normalizes a validated form.
#[must_use]
pub fn sanitize_submission(form: &SubmissionForm) -> SanitizedSubmission {
    let text = |field: FormField| escape_html(form.get(field.name()).unwrap_or_default().trim());
    SanitizedSubmission {
        company_name: text(FormField::CompanyName),
        contact_name: text(FormField::ContactName),
        email: form.get(FormField::Email.name()).unwrap_or_default().trim().to_lowercase(),
        title: text(FormField::Title),
        website: form.get(FormField::Website.name()).unwrap_or_default().trim().to_string(),
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for embedding in HTML text or attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::escape_html;
    use super::sanitize_submission;
    use crate::core::form::SubmissionForm;

    #[test]
    fn sanitizes_each_field_by_its_rule() {
        let form = SubmissionForm::new()
            .with("company_name", "  <Acme & Sons>  ")
            .with("contact_name", " O'Brien ")
            .with("email", "  Jo@ACME.com ")
            .with("title", " \"Head\" of Talent ")
            .with("website", "  https://acme.com/?a=1&b=2  ");
        let clean = sanitize_submission(&form);
        assert_eq!(clean.company_name, "&lt;Acme &amp; Sons&gt;");
        assert_eq!(clean.contact_name, "O&#039;Brien");
        assert_eq!(clean.email, "jo@acme.com");
        assert_eq!(clean.title, "&quot;Head&quot; of Talent");
        assert_eq!(clean.website, "https://acme.com/?a=1&b=2");
    }

    #[test]
    fn absent_optional_fields_become_empty() {
        let form = SubmissionForm::new()
            .with("company_name", "Acme")
            .with("contact_name", "Jo")
            .with("email", "jo@acme.com");
        let clean = sanitize_submission(&form);
        assert!(clean.title.is_empty());
        assert!(clean.website.is_empty());
    }

    #[test]
    fn escape_passes_plain_text_through() {
        assert_eq!(escape_html("Plain text 123"), "Plain text 123");
    }
}

// crates/pledge-registry-core/src/core/form.rs
// ============================================================================
// Module: Submission Form
// Description: Raw field map submitted by the pledge form.
// Purpose: Give validation and sanitization a single untrusted input shape.
// Dependencies: url
// ============================================================================

//! ## Overview
//! A [`SubmissionForm`] is the untrusted name -> value map posted by the
//! browser. Repeated keys keep the last value, matching how form decoders
//! flatten scalar fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Form
// ============================================================================

/// Untrusted submitted field map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    /// Field values keyed by form field name.
    fields: BTreeMap<String, String>,
}

impl SubmissionForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form from name/value pairs; later pairs win.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self {
            fields,
        }
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(body)
                .map(|(key, value)| (key.into_owned(), value.into_owned())),
        )
    }

    /// Sets a field value, replacing any earlier one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the trimmed value for `name` when it is present and non-blank.
    #[must_use]
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|value| !value.is_empty())
    }

    /// Returns true when the field holds a form-truthy value.
    ///
    /// Absent, blank, and `"0"` are falsy, mirroring checkbox semantics.
    #[must_use]
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty() && value != "0")
    }

    /// Returns the number of submitted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no fields were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

//! Error types for model parsing.
//!
//! Every error is fatal to the enclosing parse call: there is no local
//! recovery, no partial model, and no skip-and-continue for structural
//! violations. Callers should treat any error as "this document is
//! unparseable" and re-parse after correcting the input.

use thiserror::Error;

/// Errors that can occur while parsing an ACM or UML document.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Input text or JSON cannot be tokenized at all.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// An id referenced in a content or relationship field is absent from
    /// the relevant map.
    #[error("Dangling reference in {context}: unknown id `{id}`")]
    DanglingReference { context: &'static str, id: String },

    /// A type tag outside the recognized set.
    #[error("Unexpected type `{found}` for {context}")]
    UnexpectedType { context: &'static str, found: String },

    /// A leaf record lacks a required key.
    #[error("Missing required attribute `{name}` for {context}")]
    MissingAttribute {
        context: &'static str,
        name: &'static str,
    },

    /// A leaf record has more attributes than its shape allows.
    #[error("Unexpected number of attributes for {context}: {count} (at most {max})")]
    AttributeCount {
        context: &'static str,
        count: usize,
        max: usize,
    },

    /// A structural element is not of an allowed shape, e.g. a package
    /// content entry that is neither package nor compilation unit.
    #[error("Structural mismatch in {context}: {message}")]
    Structural {
        context: &'static str,
        message: String,
    },

    /// A relationship endpoint did not resolve at link time.
    #[error("Could not resolve {context}: {source_id} -> {target_id}")]
    UnresolvedEndpoint {
        context: &'static str,
        source_id: String,
        target_id: String,
    },
}

impl ModelError {
    /// Create a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a dangling-reference error.
    pub fn dangling(context: &'static str, id: impl Into<String>) -> Self {
        Self::DanglingReference {
            context,
            id: id.into(),
        }
    }

    /// Create an unexpected-type error.
    pub fn unexpected_type(context: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedType {
            context,
            found: found.into(),
        }
    }

    /// Create a missing-attribute error.
    pub fn missing_attribute(context: &'static str, name: &'static str) -> Self {
        Self::MissingAttribute { context, name }
    }

    /// Create a structural-mismatch error.
    pub fn structural(context: &'static str, message: impl Into<String>) -> Self {
        Self::Structural {
            context,
            message: message.into(),
        }
    }
}

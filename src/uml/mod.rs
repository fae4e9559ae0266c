//! UML pipeline: quasi-XML interchange fragment → [`UmlModel`].
//!
//! The input dialect is a flattened, whitespace-tokenizable subset of an
//! XML interchange format. Parsing runs in three stages:
//!
//! ```text
//! Raw fragment (trimmed to the first `<p` … last `</`)
//!     ↓
//! Lexer (logos) → OPEN / CLOSE / ATTRIBUTE tokens
//!     ↓
//! Entity parser → interface/component maps + relationship records
//!     ↓
//! Linker → realization/usage adjacency → UmlModel
//! ```
//!
//! The pipeline is fail-fast: an unknown `xmi:type`, a malformed leaf
//! record, or an unresolved relationship endpoint aborts the whole parse.

pub mod lexer;
pub mod model;

mod linker;
mod parser;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use model::{UmlComponent, UmlInterface, UmlModel, UmlOperation};

use crate::error::ModelError;

/// Options for the UML entity parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct UmlParseOptions {
    /// Reject tokens outside the recognized top-level shapes instead of
    /// logging and skipping them.
    pub strict: bool,
}

/// Parse a UML model from a string, with default (permissive) options.
pub fn parse_uml(content: &str) -> Result<UmlModel, ModelError> {
    parse_uml_with(content, &UmlParseOptions::default())
}

/// Parse a UML model from a string.
///
/// The fragment is trimmed to start at the first `<p` and end at the last
/// `</`; input without both markers is malformed.
pub fn parse_uml_with(content: &str, options: &UmlParseOptions) -> Result<UmlModel, ModelError> {
    let start = content
        .find("<p")
        .ok_or_else(|| ModelError::malformed("UML fragment contains no `<p` element"))?;
    let end = content
        .rfind("</")
        .ok_or_else(|| ModelError::malformed("UML fragment contains no closing tag"))?;
    if end < start {
        return Err(ModelError::malformed(
            "UML fragment closing tag precedes the first element",
        ));
    }

    let tokens = tokenize(&content[start..end]);
    tracing::debug!(tokens = tokens.len(), "lexed UML fragment");

    let mut parsed = parser::parse_entities(&tokens, options)?;
    linker::link(
        &mut parsed.components,
        &mut parsed.interfaces,
        &parsed.realizations,
        &parsed.usages,
    )?;

    Ok(UmlModel::new(
        parsed.components.into_values().collect(),
        parsed.interfaces.into_values().collect(),
    ))
}

//! Cursor-based entity parser for the UML token stream.
//!
//! Only four top-level tag shapes are recognized: `packagedElement`
//! (interfaces and components), `ownedOperation`, `interfaceRealization`,
//! and `usage`. The parser does not model general XML nesting; structure
//! is reconstructed purely from scanning order. Everything else is
//! skipped with a diagnostic in permissive mode, or rejected in strict
//! mode.

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::uml::UmlParseOptions;
use crate::uml::lexer::{Token, TokenKind};
use crate::uml::model::{UmlComponent, UmlInterface, UmlOperation};

/// Transient parse product: a component realizing an interface.
///
/// Never retained in the final model; exists only to drive the linker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InterfaceRealization {
    pub id: String,
    pub child_component_id: String,
    pub parent_interface_id: String,
}

/// Transient parse product: a component depending on an interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Usage {
    pub id: String,
    pub source_component_id: String,
    pub target_interface_id: String,
}

/// Interim maps and relationship records produced by the entity parser.
#[derive(Debug, Default)]
pub(crate) struct ParseOutput {
    pub interfaces: IndexMap<String, UmlInterface>,
    pub components: IndexMap<String, UmlComponent>,
    pub realizations: Vec<InterfaceRealization>,
    pub usages: Vec<Usage>,
}

/// Scan the token stream and produce entities plus relationship records.
pub(crate) fn parse_entities(
    tokens: &[Token<'_>],
    options: &UmlParseOptions,
) -> Result<ParseOutput, ModelError> {
    let mut parser = Parser::new(tokens, options.strict);
    parser.parse_top_level()?;
    Ok(parser.out)
}

/// The parser state: a cursor over the token slice.
struct Parser<'a, 't> {
    tokens: &'t [Token<'a>],
    pos: usize,
    strict: bool,
    out: ParseOutput,
    /// Id of the most recently opened interface `packagedElement`, the
    /// owner for any `ownedOperation` encountered before its close tag.
    current_interface: Option<String>,
}

impl<'a, 't> Parser<'a, 't> {
    fn new(tokens: &'t [Token<'a>], strict: bool) -> Self {
        Self {
            tokens,
            pos: 0,
            strict,
            out: ParseOutput::default(),
            current_interface: None,
        }
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn parse_top_level(&mut self) -> Result<(), ModelError> {
        while let Some(token) = self.current().copied() {
            match token.kind {
                TokenKind::Open if token.text.starts_with("<packagedElement") => {
                    self.parse_packaged_element()?;
                }
                TokenKind::Open if token.text.starts_with("<ownedOperation") => {
                    let operation = self.parse_owned_operation()?;
                    self.attach_operation(operation)?;
                }
                TokenKind::Open if token.text.starts_with("<interfaceRealization") => {
                    let realization = self.parse_interface_realization()?;
                    self.out.realizations.push(realization);
                }
                TokenKind::Open if token.text.starts_with("<usage") => {
                    let usage = self.parse_usage()?;
                    self.out.usages.push(usage);
                }
                TokenKind::Close if token.text.starts_with("</packagedElement") => {
                    self.current_interface = None;
                    self.bump();
                }
                _ => self.skip_unexpected(token)?,
            }
        }
        tracing::debug!(
            interfaces = self.out.interfaces.len(),
            components = self.out.components.len(),
            realizations = self.out.realizations.len(),
            usages = self.out.usages.len(),
            "parsed UML entities"
        );
        Ok(())
    }

    /// Construct an interface or component from a `packagedElement` tag.
    ///
    /// A tag missing `xmi:id` or `name` is skipped silently; a recognized
    /// shape with an unknown `xmi:type` is fatal.
    fn parse_packaged_element(&mut self) -> Result<(), ModelError> {
        self.bump();
        let attributes = self.collect_attributes();

        let id = attributes.get("xmi:id").copied();
        let name = attributes.get("name").copied();
        let (Some(id), Some(name)) = (id, name) else {
            tracing::debug!(at = self.pos, "skipping packagedElement without id or name");
            return Ok(());
        };

        match attributes.get("xmi:type").copied() {
            Some("uml:Interface") => {
                self.out
                    .interfaces
                    .insert(id.to_string(), UmlInterface::new(id, name));
                self.current_interface = Some(id.to_string());
            }
            Some("uml:Component") => {
                self.out
                    .components
                    .insert(id.to_string(), UmlComponent::new(id, name));
                self.current_interface = None;
            }
            other => {
                return Err(ModelError::unexpected_type(
                    "packagedElement",
                    other.unwrap_or("<missing>"),
                ));
            }
        }
        Ok(())
    }

    /// Parse an owned operation leaf: at most 2 attributes, `xmi:id` and
    /// `name` required.
    fn parse_owned_operation(&mut self) -> Result<UmlOperation, ModelError> {
        const CONTEXT: &str = "owned operation";
        self.bump();
        let attributes = self.collect_attributes();
        check_attribute_count(CONTEXT, &attributes, 2)?;
        let id = require(CONTEXT, &attributes, "xmi:id")?;
        let name = require(CONTEXT, &attributes, "name")?;
        Ok(UmlOperation::new(id, name))
    }

    /// Parse an interface realization leaf: at most 4 attributes,
    /// `xmi:id`/`client`/`supplier`/`contract` all required.
    fn parse_interface_realization(&mut self) -> Result<InterfaceRealization, ModelError> {
        const CONTEXT: &str = "interface realization";
        self.bump();
        let attributes = self.collect_attributes();
        check_attribute_count(CONTEXT, &attributes, 4)?;
        let id = require(CONTEXT, &attributes, "xmi:id")?;
        let client = require(CONTEXT, &attributes, "client")?;
        let supplier = require(CONTEXT, &attributes, "supplier")?;
        require(CONTEXT, &attributes, "contract")?;
        Ok(InterfaceRealization {
            id: id.to_string(),
            child_component_id: client.to_string(),
            parent_interface_id: supplier.to_string(),
        })
    }

    /// Parse a usage leaf: at most 4 attributes,
    /// `xmi:id`/`client`/`supplier` required.
    fn parse_usage(&mut self) -> Result<Usage, ModelError> {
        const CONTEXT: &str = "usage";
        self.bump();
        let attributes = self.collect_attributes();
        check_attribute_count(CONTEXT, &attributes, 4)?;
        let id = require(CONTEXT, &attributes, "xmi:id")?;
        let client = require(CONTEXT, &attributes, "client")?;
        let supplier = require(CONTEXT, &attributes, "supplier")?;
        Ok(Usage {
            id: id.to_string(),
            source_component_id: client.to_string(),
            target_interface_id: supplier.to_string(),
        })
    }

    /// Greedily consume ATTRIBUTE tokens into a key → value mapping.
    ///
    /// Each token is split on its first `=`; surrounding quotes are
    /// stripped from the value. Stops at the first non-attribute token.
    fn collect_attributes(&mut self) -> IndexMap<&'a str, &'a str> {
        let mut attributes = IndexMap::new();
        while let Some(token) = self.current() {
            if token.kind != TokenKind::Attribute {
                break;
            }
            if let Some((key, value)) = token.text.split_once('=') {
                attributes.insert(key, strip_quotes(value));
            }
            self.bump();
        }
        attributes
    }

    fn attach_operation(&mut self, operation: UmlOperation) -> Result<(), ModelError> {
        match &self.current_interface {
            Some(interface_id) => {
                // The interface is always present: current_interface is set
                // only when one is registered.
                if let Some(interface) = self.out.interfaces.get_mut(interface_id) {
                    interface.operations.push(operation);
                }
                Ok(())
            }
            None if self.strict => Err(ModelError::structural(
                "owned operation",
                format!("operation `{}` outside an interface", operation.id),
            )),
            None => {
                tracing::debug!(id = %operation.id, "skipping operation outside an interface");
                Ok(())
            }
        }
    }

    /// Tokens outside the recognized top-level shapes are logged and
    /// skipped in permissive mode, rejected in strict mode.
    fn skip_unexpected(&mut self, token: Token<'a>) -> Result<(), ModelError> {
        if self.strict {
            return Err(ModelError::structural(
                "top-level scan",
                format!("unexpected token `{}` at index {}", token.text, self.pos),
            ));
        }
        tracing::debug!(
            kind = ?token.kind,
            text = token.text,
            at = self.pos,
            "skipping unexpected top-level token"
        );
        self.bump();
        Ok(())
    }
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn check_attribute_count(
    context: &'static str,
    attributes: &IndexMap<&str, &str>,
    max: usize,
) -> Result<(), ModelError> {
    if attributes.len() > max {
        return Err(ModelError::AttributeCount {
            context,
            count: attributes.len(),
            max,
        });
    }
    Ok(())
}

fn require<'a>(
    context: &'static str,
    attributes: &IndexMap<&str, &'a str>,
    name: &'static str,
) -> Result<&'a str, ModelError> {
    attributes
        .get(name)
        .copied()
        .ok_or_else(|| ModelError::missing_attribute(context, name))
}

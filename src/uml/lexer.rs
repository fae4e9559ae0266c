//! Logos-based lexer for the quasi-XML UML dialect.
//!
//! The dialect is whitespace-tokenizable: the input fragment is split on
//! whitespace and each piece is classified on its own, in priority order:
//!
//! 1. starts with `</` → CLOSE (full piece retained),
//! 2. starts with `<`  → OPEN (full piece retained),
//! 3. contains `=` past the first character → ATTRIBUTE, with a trailing
//!    `/>` or `>` suffix stripped,
//! 4. anything else is dropped — a bare `>` closing an open tag emits no
//!    token.
//!
//! No nesting is modeled here; the parser reconstructs structure purely
//! from scanning order. Because whitespace is the sole delimiter, an
//! attribute value containing a space breaks tokenization. That is an
//! accepted limitation of the format, not of this lexer.

use logos::Logos;

/// The types a token can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An opening tag piece, e.g. `<packagedElement`.
    Open,
    /// A closing tag piece, e.g. `</packagedElement>`.
    Close,
    /// A `key=value` piece with any trailing `/>` or `>` stripped.
    Attribute,
}

/// A token holding a substring of the original fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Raw whitespace-delimited pieces. Classification into the public
/// [`TokenKind`] happens in the [`Lexer`] wrapper.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum LogosToken {
    // `</...` must win over the general `<...` pattern.
    #[regex(r"</[^ \t\r\n]*", priority = 3)]
    Close,

    #[regex(r"<[^ \t\r\n]*")]
    Open,

    #[regex(r"[^< \t\r\n][^ \t\r\n]*")]
    Piece,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.inner.next()?;
            let text = self.inner.slice();
            match raw {
                Ok(LogosToken::Close) => {
                    return Some(Token {
                        kind: TokenKind::Close,
                        text,
                    });
                }
                Ok(LogosToken::Open) => {
                    return Some(Token {
                        kind: TokenKind::Open,
                        text,
                    });
                }
                Ok(LogosToken::Piece) => {
                    // `=` at position 0 does not make an attribute.
                    if text.find('=').is_some_and(|at| at > 0) {
                        let text = text
                            .strip_suffix("/>")
                            .or_else(|| text.strip_suffix('>'))
                            .unwrap_or(text);
                        return Some(Token {
                            kind: TokenKind::Attribute,
                            text,
                        });
                    }
                    // Bare `>` or other stray piece: no token.
                }
                // The three patterns cover all non-whitespace input.
                Err(()) => {}
            }
        }
    }
}

/// Tokenize an entire fragment into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_packaged_element_classification() {
        let tokens = tokenize(r#"<packagedElement xmi:type="uml:Interface" xmi:id="I1" name="Foo">"#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Open,
                TokenKind::Attribute,
                TokenKind::Attribute,
                TokenKind::Attribute
            ]
        );
        assert_eq!(tokens[0].text, "<packagedElement");
        assert_eq!(tokens[1].text, r#"xmi:type="uml:Interface""#);
        assert_eq!(tokens[2].text, r#"xmi:id="I1""#);
        assert_eq!(tokens[3].text, r#"name="Foo""#);
    }

    #[test]
    fn test_close_token_keeps_full_piece() {
        let tokens = tokenize("</packagedElement>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Close);
        assert_eq!(tokens[0].text, "</packagedElement>");
    }

    #[rstest]
    #[case(r#"name="Foo"/>"#, r#"name="Foo""#)]
    #[case(r#"name="Foo">"#, r#"name="Foo""#)]
    #[case(r#"name="Foo""#, r#"name="Foo""#)]
    fn test_attribute_suffix_stripping(#[case] input: &str, #[case] expected: &str) {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Attribute);
        assert_eq!(tokens[0].text, expected);
    }

    #[rstest]
    #[case(">")]
    #[case("stray")]
    #[case("=leading")]
    fn test_non_attribute_pieces_are_dropped(#[case] input: &str) {
        assert!(tokenize(input).is_empty());
    }

    #[test]
    fn test_newlines_act_as_delimiters() {
        let tokens = tokenize("<usage\nxmi:id=\"u1\"\n/>");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Open);
        assert_eq!(tokens[1].text, r#"xmi:id="u1""#);
    }
}

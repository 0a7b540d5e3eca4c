//! Scanner and compilers for hegex expressions and templates.
//!
//! Expressions and templates share one scanner. The expression compiler
//! accepts `{name[a|b]}` alternatives and rejects repeated capture names; the
//! template compiler rejects alternatives and allows repeated references.

use std::collections::HashSet;
use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::{TemplateToken, Token, WILDCARD};
use super::delimiter::is_delimiter;

/// Errors that can occur while compiling an expression or template.
///
/// Every offset is a byte offset into the source string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unterminated capture starting at offset {offset}")]
    UnterminatedCapture { offset: usize },
    #[error("nested capture at offset {offset}")]
    NestedCapture { offset: usize },
    #[error("duplicate capture name {name:?} at offset {offset}")]
    DuplicateCaptureName { name: String, offset: usize },
    #[error("invalid alternative syntax at offset {offset}")]
    InvalidAlternativeSyntax { offset: usize },
    #[error("alternatives are not allowed in a template capture (offset {offset})")]
    InvalidTemplateCapture { offset: usize },
}

/// A scanned piece of source, before expression/template rules apply.
#[derive(Debug, PartialEq)]
enum Piece {
    Literal(String),
    Capture {
        name: String,
        alternatives: Option<Vec<String>>,
        offset: usize,
    },
    Wildcard(usize),
}

/// Compile an expression into its token sequence.
pub fn compile(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    for piece in scan(source)? {
        tokens.push(match piece {
            Piece::Literal(text) => Token::Literal(text),
            Piece::Wildcard(arity) => Token::Wildcard(arity),
            Piece::Capture {
                name,
                alternatives,
                offset,
            } => {
                if !seen.insert(name.clone()) {
                    return Err(CompileError::DuplicateCaptureName { name, offset });
                }
                Token::Capture { name, alternatives }
            }
        });
    }
    Ok(tokens)
}

/// Compile a template into its token sequence.
pub fn compile_template(source: &str) -> Result<Vec<TemplateToken>, CompileError> {
    scan(source)?
        .into_iter()
        .map(|piece| match piece {
            Piece::Literal(text) => Ok(TemplateToken::Literal(text)),
            Piece::Wildcard(arity) => Ok(TemplateToken::WildcardRef(arity)),
            Piece::Capture {
                alternatives: Some(_),
                offset,
                ..
            } => Err(CompileError::InvalidTemplateCapture { offset }),
            Piece::Capture { name, .. } => Ok(TemplateToken::NamedRef(name)),
        })
        .collect()
}

fn scan(source: &str) -> Result<Vec<Piece>, CompileError> {
    Scanner {
        chars: source.char_indices().peekable(),
    }
    .scan()
}

struct Scanner<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Scanner<'_> {
    fn scan(&mut self) -> Result<Vec<Piece>, CompileError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();

        while let Some((offset, c)) = self.chars.next() {
            match c {
                '{' => {
                    flush_literal(&mut pieces, &mut literal);
                    pieces.push(self.scan_capture(offset)?);
                }
                WILDCARD => {
                    flush_literal(&mut pieces, &mut literal);
                    let mut arity = 1;
                    while self.chars.next_if(|&(_, c)| c == WILDCARD).is_some() {
                        arity += 1;
                    }
                    pieces.push(Piece::Wildcard(arity));
                }
                _ => literal.push(c),
            }
        }
        flush_literal(&mut pieces, &mut literal);
        Ok(pieces)
    }

    /// Scan a capture body (the opening `{` at `open` has been consumed).
    fn scan_capture(&mut self, open: usize) -> Result<Piece, CompileError> {
        let mut name = String::new();
        loop {
            match self.chars.next() {
                None => return Err(CompileError::UnterminatedCapture { offset: open }),
                Some((_, '}')) => {
                    return Ok(Piece::Capture {
                        name,
                        alternatives: None,
                        offset: open,
                    });
                }
                Some((_, '[')) => {
                    let alternatives = self.scan_alternatives(open)?;
                    // `]` must close the capture immediately
                    return match self.chars.next() {
                        Some((_, '}')) => Ok(Piece::Capture {
                            name,
                            alternatives: Some(alternatives),
                            offset: open,
                        }),
                        Some((at, _)) => Err(CompileError::InvalidAlternativeSyntax { offset: at }),
                        None => Err(CompileError::UnterminatedCapture { offset: open }),
                    };
                }
                Some((at, '{')) => return Err(CompileError::NestedCapture { offset: at }),
                Some((at, ']' | '|')) => {
                    return Err(CompileError::InvalidAlternativeSyntax { offset: at });
                }
                Some((_, c)) => name.push(c),
            }
        }
    }

    /// Scan `a|b|c]` (the opening `[` has been consumed).
    fn scan_alternatives(&mut self, open: usize) -> Result<Vec<String>, CompileError> {
        let mut alternatives = Vec::new();
        let mut current = String::new();
        loop {
            match self.chars.next() {
                None => return Err(CompileError::UnterminatedCapture { offset: open }),
                Some((at, '|')) => {
                    push_alternative(&mut alternatives, std::mem::take(&mut current), at)?;
                }
                Some((at, ']')) => {
                    push_alternative(&mut alternatives, current, at)?;
                    return Ok(alternatives);
                }
                Some((at, '{')) => return Err(CompileError::NestedCapture { offset: at }),
                Some((at, c)) if c == '}' || c == '[' || is_delimiter(c) => {
                    return Err(CompileError::InvalidAlternativeSyntax { offset: at });
                }
                Some((_, c)) => current.push(c),
            }
        }
    }
}

fn flush_literal(pieces: &mut Vec<Piece>, literal: &mut String) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

fn push_alternative(
    alternatives: &mut Vec<String>,
    alternative: String,
    offset: usize,
) -> Result<(), CompileError> {
    if alternative.is_empty() {
        return Err(CompileError::InvalidAlternativeSyntax { offset });
    }
    alternatives.push(alternative);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_ok(s: &str) -> Vec<Token> {
        compile(s).expect("compile should succeed")
    }
    fn compile_err(s: &str) -> CompileError {
        compile(s).expect_err("compile should fail")
    }
    fn lit(s: &str) -> Token {
        Token::Literal(s.to_string())
    }
    fn cap(name: &str) -> Token {
        Token::Capture {
            name: name.to_string(),
            alternatives: None,
        }
    }

    // --- Literals ---

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(
            compile_ok("/home/assets//.yml"),
            vec![lit("/home/assets//.yml")]
        );
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert!(compile_ok("").is_empty());
    }

    #[test]
    fn stray_closing_brackets_are_literal() {
        assert_eq!(compile_ok("a}b]c|d["), vec![lit("a}b]c|d[")]);
    }

    // --- Captures ---

    #[test]
    fn named_capture_between_literals() {
        assert_eq!(
            compile_ok("/{media}/size"),
            vec![lit("/"), cap("media"), lit("/size")]
        );
    }

    #[test]
    fn anonymous_capture() {
        assert_eq!(
            compile_ok("{}.example.com"),
            vec![cap(""), lit(".example.com")]
        );
    }

    #[test]
    fn enumerated_capture() {
        assert_eq!(
            compile_ok("{site[xxa|yya|abc]}"),
            vec![Token::Capture {
                name: "site".into(),
                alternatives: Some(vec!["xxa".into(), "yya".into(), "abc".into()]),
            }]
        );
    }

    #[test]
    fn anonymous_enumerated_capture() {
        assert_eq!(
            compile_ok("{[a]}"),
            vec![Token::Capture {
                name: String::new(),
                alternatives: Some(vec!["a".into()]),
            }]
        );
    }

    // --- Wildcards ---

    #[test]
    fn wildcard_runs_carry_arity() {
        assert_eq!(
            compile_ok("/***/abc/*/**def"),
            vec![
                lit("/"),
                Token::Wildcard(3),
                lit("/abc/"),
                Token::Wildcard(1),
                lit("/"),
                Token::Wildcard(2),
                lit("def"),
            ]
        );
    }

    #[test]
    fn separated_markers_are_separate_tokens() {
        assert_eq!(
            compile_ok("*.*"),
            vec![Token::Wildcard(1), lit("."), Token::Wildcard(1)]
        );
    }

    #[test]
    fn wildcard_marker_inside_capture_is_part_of_name() {
        assert_eq!(compile_ok("{a*}"), vec![cap("a*")]);
    }

    // --- Errors ---

    #[test]
    fn unterminated_capture() {
        assert_eq!(
            compile_err("ab{site"),
            CompileError::UnterminatedCapture { offset: 2 }
        );
        assert_eq!(
            compile_err("{site[a|b"),
            CompileError::UnterminatedCapture { offset: 0 }
        );
        assert_eq!(
            compile_err("{site[a|b]"),
            CompileError::UnterminatedCapture { offset: 0 }
        );
    }

    #[test]
    fn nested_capture() {
        assert_eq!(
            compile_err("{a{b}}"),
            CompileError::NestedCapture { offset: 2 }
        );
        assert_eq!(
            compile_err("{a[x{]}"),
            CompileError::NestedCapture { offset: 4 }
        );
    }

    #[test]
    fn duplicate_names() {
        assert_eq!(
            compile_err("{a}.{a}"),
            CompileError::DuplicateCaptureName {
                name: "a".into(),
                offset: 4,
            }
        );
    }

    #[test]
    fn duplicate_anonymous_captures() {
        assert!(matches!(
            compile_err("{}-{}"),
            CompileError::DuplicateCaptureName { .. }
        ));
    }

    #[test]
    fn bad_alternatives() {
        for (source, offset) in [
            ("{a[]}", 3),
            ("{a[x||y]}", 5),
            ("{a[x|]}", 5),
            ("{a[x]y}", 5),
            ("{a[x}", 4),
            ("{a[x[y]}", 4),
            ("{a[x.y]}", 4),
            ("{a[x/y]}", 4),
            ("{a]}", 2),
            ("{a|b}", 2),
        ] {
            assert_eq!(
                compile_err(source),
                CompileError::InvalidAlternativeSyntax { offset },
                "source {source:?}"
            );
        }
    }

    // --- Templates ---

    #[test]
    fn template_tokens() {
        assert_eq!(
            compile_template("/*/to/**/{}{site}").unwrap(),
            vec![
                TemplateToken::Literal("/".into()),
                TemplateToken::WildcardRef(1),
                TemplateToken::Literal("/to/".into()),
                TemplateToken::WildcardRef(2),
                TemplateToken::Literal("/".into()),
                TemplateToken::NamedRef(String::new()),
                TemplateToken::NamedRef("site".into()),
            ]
        );
    }

    #[test]
    fn template_allows_repeated_references() {
        assert_eq!(compile_template("{a}-{a}-*-*").unwrap().len(), 7);
    }

    #[test]
    fn template_rejects_alternatives() {
        assert_eq!(
            compile_template("/x/{site[a|b]}"),
            Err(CompileError::InvalidTemplateCapture { offset: 3 })
        );
    }

    #[test]
    fn template_reports_scanner_errors() {
        assert_eq!(
            compile_template("/{site"),
            Err(CompileError::UnterminatedCapture { offset: 1 })
        );
    }
}

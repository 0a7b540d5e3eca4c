//! Template rendering from match bindings.

use std::collections::HashSet;

use super::ast::{TemplateToken, Token};
use super::matcher::Bindings;

/// A template referenced a key the bindings do not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstituteError {
    #[error("template references unbound capture {{{0}}}")]
    UnboundName(String),
    #[error("template references unbound wildcard of arity {0}")]
    UnboundWildcard(usize),
}

/// Render `tokens`, replacing each reference with its bound value.
///
/// A key referenced more than once renders the same value at every occurrence.
pub fn render(
    tokens: &[TemplateToken],
    bindings: &Bindings<'_>,
) -> Result<String, SubstituteError> {
    let mut out = String::new();
    for token in tokens {
        match token {
            TemplateToken::Literal(text) => out.push_str(text),
            TemplateToken::NamedRef(name) => out.push_str(
                bindings
                    .name(name)
                    .ok_or_else(|| SubstituteError::UnboundName(name.clone()))?,
            ),
            TemplateToken::WildcardRef(arity) => out.push_str(
                bindings
                    .wildcard(*arity)
                    .ok_or(SubstituteError::UnboundWildcard(*arity))?,
            ),
        }
    }
    Ok(out)
}

/// Check that every reference in `template` is bound by some token of `pattern`.
///
/// Every capture and wildcard of a pattern binds on each successful match, so
/// a template that passes this check always renders.
pub fn check_references(
    template: &[TemplateToken],
    pattern: &[Token],
) -> Result<(), SubstituteError> {
    let mut names = HashSet::new();
    let mut arities = HashSet::new();
    for token in pattern {
        match token {
            Token::Capture { name, .. } => {
                names.insert(name.as_str());
            }
            Token::Wildcard(arity) => {
                arities.insert(*arity);
            }
            Token::Literal(_) => {}
        }
    }

    for token in template {
        match token {
            TemplateToken::NamedRef(name) if !names.contains(name.as_str()) => {
                return Err(SubstituteError::UnboundName(name.clone()));
            }
            TemplateToken::WildcardRef(arity) if !arities.contains(arity) => {
                return Err(SubstituteError::UnboundWildcard(*arity));
            }
            _ => {}
        }
    }
    Ok(())
}

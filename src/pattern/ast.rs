//! Token types for compiled hegex expressions and templates.

use std::fmt;

use itertools::Itertools;

/// The wildcard marker character. A run of `n` markers is one wildcard of arity `n`.
pub const WILDCARD: char = '*';

/// One element of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Exact text.
    Literal(String),
    /// `{name}`, `{}` or `{name[a|b]}`.
    ///
    /// An empty `name` is the anonymous capture. With `alternatives` present
    /// the capture must equal one of them, tried in declaration order.
    Capture {
        name: String,
        alternatives: Option<Vec<String>>,
    },
    /// A run of wildcard markers; the arity is its binding key.
    Wildcard(usize),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Capture {
                name,
                alternatives: None,
            } => write!(f, "{{{name}}}"),
            Self::Capture {
                name,
                alternatives: Some(alts),
            } => write!(f, "{{{name}[{}]}}", alts.iter().join("|")),
            Self::Wildcard(arity) => write_markers(f, *arity),
        }
    }
}

/// One element of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    /// `{name}`; the empty name refers to the anonymous capture.
    NamedRef(String),
    WildcardRef(usize),
}

impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::NamedRef(name) => write!(f, "{{{name}}}"),
            Self::WildcardRef(arity) => write_markers(f, *arity),
        }
    }
}

fn write_markers(f: &mut fmt::Formatter<'_>, arity: usize) -> fmt::Result {
    for _ in 0..arity {
        write!(f, "{WILDCARD}")?;
    }
    Ok(())
}

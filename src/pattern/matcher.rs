//! Backtracking matcher: test a subject against a compiled token sequence.
//!
//! All positions are **byte** offsets into the subject, always on a char
//! boundary. Captures and wildcards are tried longest-first; enumerated
//! alternatives in declaration order.

use std::collections::{HashMap, HashSet};

use super::ast::Token;
use super::delimiter::leading_run;

/// Suggested search budget for patterns or subjects from untrusted input.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Substrings bound by a successful match, keyed by capture name or wildcard arity.
///
/// Values borrow from the matched subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings<'s> {
    names: HashMap<String, &'s str>,
    wildcards: HashMap<usize, &'s str>,
}

impl<'s> Bindings<'s> {
    /// The value bound by `{name}`; the empty name is the anonymous capture.
    pub fn name(&self, name: &str) -> Option<&'s str> {
        self.names.get(name).copied()
    }

    /// The value bound by the wildcard of the given arity.
    pub fn wildcard(&self, arity: usize) -> Option<&'s str> {
        self.wildcards.get(&arity).copied()
    }

    /// Named captures, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &'s str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Wildcard captures, in no particular order.
    pub fn wildcards(&self) -> impl Iterator<Item = (usize, &'s str)> {
        self.wildcards.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of distinct keys bound.
    pub fn len(&self) -> usize {
        self.names.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Match `subject` in full against `tokens`.
///
/// Returns the bindings of the first successful walk, or `None` when no walk
/// reaches the end of both sequences or the step budget runs out.
pub fn match_tokens<'s>(
    tokens: &[Token],
    subject: &'s str,
    step_limit: Option<usize>,
) -> Option<Bindings<'s>> {
    let mut search = Search {
        tokens,
        subject,
        bound: Vec::new(),
        failed: (!has_repeated_arity(tokens)).then(HashSet::new),
        steps: 0,
        step_limit,
    };
    if search.walk(0, 0) {
        return Some(search.into_bindings());
    }
    if search.exhausted() {
        tracing::debug!(
            steps = search.steps,
            subject_len = subject.len(),
            "match abandoned: step limit reached"
        );
    }
    None
}

struct Search<'p, 's> {
    tokens: &'p [Token],
    subject: &'s str,
    /// Choice stack: (token index, bound substring) for every capture and
    /// wildcard on the current walk, in token order.
    bound: Vec<(usize, &'s str)>,
    /// (token index, cursor) pairs known to fail. Only kept when no wildcard
    /// arity repeats, since otherwise a walk depends on earlier bindings.
    failed: Option<HashSet<(usize, usize)>>,
    steps: usize,
    step_limit: Option<usize>,
}

impl<'s> Search<'_, 's> {
    fn exhausted(&self) -> bool {
        self.step_limit.is_some_and(|limit| self.steps > limit)
    }

    /// Try to match `tokens[index..]` against `subject[cursor..]`.
    fn walk(&mut self, index: usize, cursor: usize) -> bool {
        if self
            .failed
            .as_ref()
            .is_some_and(|failed| failed.contains(&(index, cursor)))
        {
            return false;
        }
        self.steps += 1;
        if self.exhausted() {
            return false;
        }
        let matched = self.walk_token(index, cursor);
        // An exhausted walk proves nothing about this position.
        if !matched
            && !self.exhausted()
            && let Some(failed) = self.failed.as_mut()
        {
            failed.insert((index, cursor));
        }
        matched
    }

    fn walk_token(&mut self, index: usize, cursor: usize) -> bool {
        let tokens = self.tokens;
        let Some(token) = tokens.get(index) else {
            return cursor == self.subject.len();
        };
        let subject = self.subject;
        let rest = &subject[cursor..];

        match token {
            Token::Literal(text) => {
                rest.starts_with(text.as_str()) && self.walk(index + 1, cursor + text.len())
            }
            Token::Capture { alternatives: None, .. } => {
                // Longest first, never empty.
                let run = &rest[..leading_run(rest)];
                let lengths = run.char_indices().rev().map(|(i, c)| i + c.len_utf8());
                self.try_lengths(index, cursor, lengths)
            }
            Token::Capture { alternatives: Some(alternatives), .. } => {
                alternatives.iter().any(|alt| {
                    rest.starts_with(alt.as_str()) && self.bind_and_walk(index, cursor, alt.len())
                })
            }
            Token::Wildcard(arity) => {
                if let Some(previous) = self.earlier_wildcard(*arity) {
                    // A repeated arity must bind the same text again.
                    return rest.starts_with(previous)
                        && self.bind_and_walk(index, cursor, previous.len());
                }
                let lengths =
                    std::iter::once(rest.len()).chain(rest.char_indices().rev().map(|(i, _)| i));
                self.try_lengths(index, cursor, lengths)
            }
        }
    }

    fn try_lengths(
        &mut self,
        index: usize,
        cursor: usize,
        lengths: impl IntoIterator<Item = usize>,
    ) -> bool {
        lengths
            .into_iter()
            .any(|len| self.bind_and_walk(index, cursor, len))
    }

    /// Bind `subject[cursor..cursor + len]` to `tokens[index]` and continue.
    /// The binding is popped again if the rest of the walk fails.
    fn bind_and_walk(&mut self, index: usize, cursor: usize, len: usize) -> bool {
        let subject = self.subject;
        let end = cursor + len;
        self.bound.push((index, &subject[cursor..end]));
        if self.walk(index + 1, end) {
            return true;
        }
        self.bound.pop();
        false
    }

    fn earlier_wildcard(&self, arity: usize) -> Option<&'s str> {
        self.bound
            .iter()
            .find(|(i, _)| matches!(self.tokens[*i], Token::Wildcard(a) if a == arity))
            .map(|(_, text)| *text)
    }

    fn into_bindings(self) -> Bindings<'s> {
        let mut bindings = Bindings::default();
        for (index, text) in self.bound {
            match &self.tokens[index] {
                Token::Capture { name, .. } => {
                    bindings.names.insert(name.clone(), text);
                }
                Token::Wildcard(arity) => {
                    bindings.wildcards.insert(*arity, text);
                }
                Token::Literal(_) => {}
            }
        }
        bindings
    }
}

fn has_repeated_arity(tokens: &[Token]) -> bool {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .any(|token| matches!(token, Token::Wildcard(arity) if !seen.insert(*arity)))
}

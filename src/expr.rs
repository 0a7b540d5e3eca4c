//! Compiled expressions and templates.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::pattern::{
    Bindings, CompileError, SubstituteError, TemplateToken, Token, check_references, compile,
    compile_template, match_tokens, render,
};

/// A compiled expression.
///
/// Immutable once built; share it freely between threads and match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
    step_limit: Option<usize>,
}

impl Pattern {
    /// Compile `expr`.
    pub fn compile(expr: &str) -> Result<Self, CompileError> {
        let tokens = compile(expr)?;
        tracing::trace!(
            expr,
            tokens = %tokens.iter().map(|t| format!("<{t}>")).join(""),
            "compiled pattern"
        );
        Ok(Self {
            source: expr.to_string(),
            tokens,
            step_limit: None,
        })
    }

    /// Compile an expression known to be valid, such as a string constant.
    ///
    /// # Panics
    ///
    /// Panics if `expr` does not compile. Never use it on user input.
    pub fn must_compile(expr: &str) -> Self {
        Self::compile(expr)
            .unwrap_or_else(|err| panic!("invalid hegex expression {expr:?}: {err}"))
    }

    /// Set the search step budget; `None`, the default, searches exhaustively.
    ///
    /// A match attempt that runs out of steps reports no match. Bound the
    /// search (for example with [`crate::DEFAULT_STEP_LIMIT`]) when the
    /// pattern or subjects come from untrusted input.
    pub fn with_step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    /// The search step budget, if any.
    pub fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled token sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Test whether `subject` matches in full.
    pub fn match_string(&self, subject: &str) -> bool {
        self.captures(subject).is_some()
    }

    /// Match `subject` and return what each capture and wildcard bound.
    pub fn captures<'s>(&self, subject: &'s str) -> Option<Bindings<'s>> {
        match_tokens(&self.tokens, subject, self.step_limit)
    }

    /// Check that every reference in `template` is bound by this pattern.
    pub fn check_template(&self, template: &Template) -> Result<(), SubstituteError> {
        check_references(&template.tokens, &self.tokens)
    }

    /// Match `subject` and render `template` from the bindings.
    ///
    /// Returns `Ok(None)` when `subject` does not match. A template that does
    /// not compile, or that references keys this pattern never binds, is an
    /// error whatever the subject.
    pub fn match_and_substitute(
        &self,
        subject: &str,
        template: &str,
    ) -> crate::Result<Option<String>> {
        let template = Template::compile(template)?;
        Ok(self.substitute(subject, &template)?)
    }

    /// [`Pattern::match_and_substitute`] with a precompiled template.
    pub fn substitute(
        &self,
        subject: &str,
        template: &Template,
    ) -> Result<Option<String>, SubstituteError> {
        self.check_template(template)?;
        self.captures(subject)
            .map(|bindings| template.render(&bindings))
            .transpose()
    }
}

impl FromStr for Pattern {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A compiled substitution template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    tokens: Vec<TemplateToken>,
}

impl Template {
    /// Compile `template`; alternatives inside `{}` are rejected.
    pub fn compile(template: &str) -> Result<Self, CompileError> {
        let tokens = compile_template(template)?;
        tracing::trace!(template, count = tokens.len(), "compiled template");
        Ok(Self {
            source: template.to_string(),
            tokens,
        })
    }

    /// # Panics
    ///
    /// Panics if `template` does not compile.
    pub fn must_compile(template: &str) -> Self {
        Self::compile(template)
            .unwrap_or_else(|err| panic!("invalid hegex template {template:?}: {err}"))
    }

    /// The source template.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled token sequence.
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Render against `bindings`; fails on the first unbound reference.
    pub fn render(&self, bindings: &Bindings<'_>) -> Result<String, SubstituteError> {
        render(&self.tokens, bindings)
    }
}

impl FromStr for Template {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

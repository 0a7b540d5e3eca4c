//! Caller-owned cache of compiled expressions and templates.

use std::collections::HashMap;

use crate::expr::{Pattern, Template};
use crate::pattern::CompileError;

/// Compiled patterns and templates keyed by source string.
///
/// Nothing is evicted implicitly; the owner decides when entries go.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Pattern>,
    templates: HashMap<String, Template>,
}

impl PatternCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled form of `expr`, compiling it on first use.
    ///
    /// Compile errors are returned every time and never cached.
    pub fn pattern(&mut self, expr: &str) -> Result<&Pattern, CompileError> {
        cached(&mut self.patterns, expr, Pattern::compile)
    }

    /// The compiled form of `template`, compiling it on first use.
    pub fn template(&mut self, template: &str) -> Result<&Template, CompileError> {
        cached(&mut self.templates, template, Template::compile)
    }

    /// [`Pattern::match_and_substitute`] through the cache.
    pub fn match_and_substitute(
        &mut self,
        expr: &str,
        subject: &str,
        template: &str,
    ) -> crate::Result<Option<String>> {
        let pattern = cached(&mut self.patterns, expr, Pattern::compile)?;
        let template = cached(&mut self.templates, template, Template::compile)?;
        Ok(pattern.substitute(subject, template)?)
    }

    /// Remove a compiled pattern, returning it if present
    pub fn remove_pattern(&mut self, expr: &str) -> Option<Pattern> {
        self.patterns.remove(expr)
    }

    /// Remove a compiled template, returning it if present
    pub fn remove_template(&mut self, template: &str) -> Option<Template> {
        self.templates.remove(template)
    }

    /// Drop every cached pattern and template.
    pub fn clear(&mut self) {
        self.patterns.clear();
        self.templates.clear();
    }

    /// Number of cached patterns and templates together
    pub fn len(&self) -> usize {
        self.patterns.len() + self.templates.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cached<'c, T>(
    map: &'c mut HashMap<String, T>,
    source: &str,
    compile: impl FnOnce(&str) -> Result<T, CompileError>,
) -> Result<&'c T, CompileError> {
    if !map.contains_key(source) {
        tracing::trace!(source, "cache miss");
        map.insert(source.to_string(), compile(source)?);
    }
    Ok(&map[source])
}

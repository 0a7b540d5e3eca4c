//! Host and path patterns with named captures, wildcards and template substitution.
//!
//! # Example
//!
//! ```rust
//! use hegex::Pattern;
//!
//! let pattern = Pattern::must_compile("/***/abc/*/**def");
//!
//! assert!(pattern.match_string("/s03/abc/s01/s02def"));
//!
//! // Each run of `*` is keyed by its length; templates refer to it the same way.
//! let out = pattern
//!     .match_and_substitute("/s03/abc/s01/s02def", "/*/to/**/***")
//!     .unwrap();
//! assert_eq!(out.as_deref(), Some("/s01/to/s02/s03"));
//!
//! let site = Pattern::must_compile("{site[book|blog]}.example.com");
//! let bindings = site.captures("blog.example.com").unwrap();
//! assert_eq!(bindings.name("site"), Some("blog"));
//! ```

mod cache;
pub mod error;
mod expr;
pub mod pattern;

pub use cache::PatternCache;
pub use error::{Error, Result};
pub use expr::{Pattern, Template};
pub use pattern::{Bindings, CompileError, DEFAULT_STEP_LIMIT, SubstituteError};

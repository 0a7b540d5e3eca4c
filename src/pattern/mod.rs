//! hegex pattern engine.
//!
//! An expression is compiled into [`Token`]s, matched against a subject by a
//! backtracking search, and the resulting [`Bindings`] are rendered into a
//! template compiled from the same syntax.
//!
//! # Expression syntax
//!
//! | Token            | Meaning                                                   |
//! |------------------|-----------------------------------------------------------|
//! | `text`           | Literal text                                              |
//! | `{name}`         | One or more characters, never `.` or `/`                  |
//! | `{}`             | Anonymous capture, bound under the empty name             |
//! | `{name[a\|b]}`   | Exactly one of the listed alternatives                    |
//! | `*`, `**`, ...   | Any characters, including none; the run length is the key |
//!
//! Templates use the same syntax without the `[a|b]` suffix. `{name}` and
//! wildcard runs there are references to values bound by the match.

pub mod ast;
pub mod delimiter;
pub mod matcher;
pub mod parser;
pub mod substitute;

pub use ast::{TemplateToken, Token};
pub use matcher::{Bindings, DEFAULT_STEP_LIMIT, match_tokens};
pub use parser::{CompileError, compile, compile_template};
pub use substitute::{SubstituteError, check_references, render};

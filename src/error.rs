use crate::pattern::{CompileError, SubstituteError};

/// hegex error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed expression or template
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Template references a key the pattern never binds
    #[error(transparent)]
    Substitute(#[from] SubstituteError),
}

/// Result type using hegex Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_pass_through() {
        let err = Error::from(CompileError::UnterminatedCapture { offset: 3 });
        assert_eq!(err.to_string(), "unterminated capture starting at offset 3");

        let err = Error::from(SubstituteError::UnboundName("site".into()));
        assert_eq!(
            err.to_string(),
            "template references unbound capture {site}"
        );
    }
}

//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A string could not be parsed as an element identifier
    #[error("Invalid element id: {0:?}")]
    InvalidId(Box<str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidId("nope".into());
        assert_eq!(err.to_string(), "Invalid element id: \"nope\"");
    }
}

use thiserror::Error;

/// Error types for formatting calls
#[derive(Debug, Error)]
pub enum PrinterError {
    /// A plural rule points at an argument that does not exist.
    ///
    /// Positions are 1-indexed into the arguments preceding the rule set.
    #[error("plural rule references argument {position}, but only {available} positional arguments were given")]
    RulePosition { position: usize, available: usize },

    /// A plural rule points at an argument that is not an integer.
    #[error("plural rule references argument {position}, which is {found}, not an integer")]
    RuleArgument { position: usize, found: &'static str },

    /// The printer was released and has no engine bound to it.
    #[error("printer has no formatting engine bound; acquire it again before use")]
    Unbound,

    /// Writing the rendered output failed.
    #[error("failed to write formatted output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for formatting operations
pub type PrinterResult<T> = Result<T, PrinterError>;

#[cfg(test)]
mod tests {
    use super::PrinterError;

    #[test]
    fn display_rule_position() {
        let err = PrinterError::RulePosition {
            position: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "plural rule references argument 3, but only 1 positional arguments were given"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = PrinterError::from(io);
        match err {
            PrinterError::Io(inner) => {
                assert_eq!(inner.kind(), std::io::ErrorKind::BrokenPipe);
                assert_eq!(inner.to_string(), "pipe closed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

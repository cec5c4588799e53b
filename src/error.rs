use std::fmt;

/// The kind of unterminated construct the parser recovered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Input ended inside `'...`.
    UnterminatedSingleQuote,
    /// Input ended inside `"...`.
    UnterminatedDoubleQuote,
    /// Input ended right after a backslash inside double quotes.
    UnterminatedEscape,
    /// Input ended inside `${...`.
    UnterminatedSubstitution,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::UnterminatedSingleQuote => "unterminated single-quoted string",
            DiagnosticKind::UnterminatedDoubleQuote => "unterminated double-quoted string",
            DiagnosticKind::UnterminatedEscape => "unterminated escape sequence",
            DiagnosticKind::UnterminatedSubstitution => "unterminated variable substitution",
        };
        f.write_str(s)
    }
}

/// A non-fatal problem found while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset of the opening quote, backslash or `$`.
    pub offset: usize,
    /// Zero-based index of the argument being built.
    pub argument: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {} (argument {})",
            self.kind, self.offset, self.argument
        )
    }
}

/// A failure that discards every argument of the command.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("argument {argument} exceeds the maximum length of {limit} characters")]
    ArgumentTooLong { argument: usize, limit: usize },

    /// Only produced under `UnterminatedPolicy::Reject`.
    #[error("{0}")]
    Unterminated(Diagnostic),
}

/// Errors from running a parsed command.
#[derive(thiserror::Error, Debug)]
pub enum LaunchError {
    #[error("empty command")]
    EmptyCommand,

    #[error("{0}: command not found")]
    NotFound(String),

    #[error("{program}: error executing command: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

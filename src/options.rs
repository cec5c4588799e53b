/// The historical per-argument limit, in characters: the old 8192 byte buffer
/// minus its terminating NUL.
///
/// The limit counts `char`s, so multibyte arguments the byte buffer would
/// have rejected still fit.
pub const LEGACY_MAX_ARG_LEN: usize = 8191;

/// What to do when the input ends inside a quote, escape or `${`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnterminatedPolicy {
    /// Keep the partial content and report a diagnostic.
    #[default]
    Recover,
    /// Fail the whole command.
    Reject,
}

/// Configuration for a single parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of characters in one argument. `None` is unbounded.
    pub max_arg_len: Option<usize>,
    pub unterminated: UnterminatedPolicy,
}

impl ParseOptions {
    /// Options matching the old fixed-size buffer.
    pub fn legacy() -> Self {
        ParseOptions {
            max_arg_len: Some(LEGACY_MAX_ARG_LEN),
            ..ParseOptions::default()
        }
    }

    pub fn with_max_arg_len(mut self, max_arg_len: Option<usize>) -> Self {
        self.max_arg_len = max_arg_len;
        self
    }

    pub fn with_unterminated(mut self, policy: UnterminatedPolicy) -> Self {
        self.unterminated = policy;
        self
    }

    pub fn strict(self) -> Self {
        self.with_unterminated(UnterminatedPolicy::Reject)
    }
}

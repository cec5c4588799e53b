use crate::buffer::TokenBuffer;
use crate::cursor::{Cursor, is_space};
use crate::env::Environment;
use crate::error::{Diagnostic, DiagnosticKind, ParseError};
use crate::expand::expand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ArgBody,
    /// Inside `"..."`; `open` is the byte offset of the opening quote.
    DoubleQuoted { open: usize },
    /// Inside `'...'`.
    SingleQuoted { open: usize },
}

/// Maps the character after a backslash to the control character it names.
fn control_escape(c: char) -> Option<char> {
    match c {
        't' => Some('\t'),
        'v' => Some('\x0b'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        _ => None,
    }
}

/// Splits a command string one argument at a time.
///
/// Each call to [`Tokenizer::next_arg`] runs the quoting state machine over a
/// single argument. Diagnostics for unterminated constructs are pushed to the
/// caller's list and never stop the tokenizer.
pub struct Tokenizer<'a, 'e> {
    cursor: Cursor<'a>,
    env: &'e dyn Environment,
    buf: TokenBuffer,
}

impl<'a, 'e> Tokenizer<'a, 'e> {
    pub fn new(input: &'a str, env: &'e dyn Environment, max_arg_len: Option<usize>) -> Self {
        Tokenizer {
            cursor: Cursor::new(input),
            env,
            buf: TokenBuffer::new(max_arg_len),
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.cursor.skip_whitespace();
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Parses the next argument, including the whitespace around it.
    ///
    /// `argument` is the index of the argument being parsed and only labels
    /// diagnostics and errors.
    pub fn next_arg(
        &mut self,
        argument: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<String, ParseError> {
        self.buf.reset();
        self.cursor.skip_whitespace();

        let mut report = |kind: DiagnosticKind, offset: usize| {
            let diagnostic = Diagnostic {
                kind,
                offset,
                argument,
            };
            tracing::debug!(%diagnostic, "recovered from unterminated construct");
            diagnostics.push(diagnostic);
        };

        let mut state = State::ArgBody;
        loop {
            let la = self.cursor.peek();
            match state {
                State::ArgBody => match la {
                    None => break,
                    Some(c) if is_space(c) => break,
                    Some('"') => {
                        state = State::DoubleQuoted {
                            open: self.cursor.offset(),
                        };
                        self.cursor.advance();
                    }
                    Some('\'') => {
                        state = State::SingleQuoted {
                            open: self.cursor.offset(),
                        };
                        self.cursor.advance();
                    }
                    Some('$') => {
                        let at = self.cursor.offset();
                        if let Err(kind) = expand(&mut self.cursor, self.env, &mut self.buf) {
                            report(kind, at);
                        }
                    }
                    Some(c) => {
                        self.buf.append(c);
                        self.cursor.advance();
                    }
                },
                State::DoubleQuoted { open } => match la {
                    Some('"') => {
                        self.cursor.advance();
                        state = State::ArgBody;
                    }
                    None => {
                        report(DiagnosticKind::UnterminatedDoubleQuote, open);
                        state = State::ArgBody;
                    }
                    Some('$') => {
                        let at = self.cursor.offset();
                        if let Err(kind) = expand(&mut self.cursor, self.env, &mut self.buf) {
                            report(kind, at);
                        }
                    }
                    Some('\\') => {
                        let at = self.cursor.offset();
                        match self.cursor.advance() {
                            None => {
                                report(DiagnosticKind::UnterminatedEscape, at);
                                state = State::ArgBody;
                            }
                            Some(c) => {
                                match control_escape(c) {
                                    Some(ctrl) => self.buf.append(ctrl),
                                    None => {
                                        // Unknown escapes pass through untouched.
                                        self.buf.append('\\');
                                        self.buf.append(c);
                                    }
                                }
                                self.cursor.advance();
                            }
                        }
                    }
                    Some(c) => {
                        self.buf.append(c);
                        self.cursor.advance();
                    }
                },
                State::SingleQuoted { open } => match la {
                    Some('\'') => {
                        self.cursor.advance();
                        state = State::ArgBody;
                    }
                    None => {
                        report(DiagnosticKind::UnterminatedSingleQuote, open);
                        state = State::ArgBody;
                    }
                    Some(c) => {
                        self.buf.append(c);
                        self.cursor.advance();
                    }
                },
            }
        }

        self.cursor.skip_whitespace();

        if self.buf.failed() {
            return Err(ParseError::ArgumentTooLong {
                argument,
                limit: self.buf.limit().unwrap_or(usize::MAX),
            });
        }
        Ok(self.buf.finish())
    }
}

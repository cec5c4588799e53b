use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

pub mod buffer;
pub mod cursor;
pub mod env;
pub mod error;
pub mod expand;
pub mod options;
pub mod tokenizer;

pub use crate::env::{Environment, ProcessEnv, from_fn};
pub use error::{Diagnostic, DiagnosticKind, LaunchError, ParseError};
pub use options::{LEGACY_MAX_ARG_LEN, ParseOptions, UnterminatedPolicy};
pub use tokenizer::Tokenizer;

/// The arguments of a successfully parsed command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The arguments, in input order.
    pub args: Vec<String>,
    /// Unterminated constructs the parser recovered from.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedCommand {
    /// Returns true if nothing had to be recovered.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Splits `command` into arguments with the default options.
///
/// Whitespace separates arguments, `'...'` is literal, `"..."` understands
/// `\t \v \a \b \n \r` and variable references, and `$NAME` / `${NAME}` are
/// replaced by their value in `env`.
///
/// # Example
/// ```
/// let args = argsplit::parse_command("echo 'hello world'", &()).unwrap();
/// assert_eq!(args, vec!["echo", "hello world"]);
/// ```
pub fn parse_command(command: &str, env: &dyn Environment) -> Result<Vec<String>, ParseError> {
    parse_command_with(command, env, &ParseOptions::default()).map(|parsed| parsed.args)
}

/// Splits `command` into arguments.
///
/// Either every argument is returned or none is: an argument over
/// `options.max_arg_len`, or an unterminated construct under
/// [`UnterminatedPolicy::Reject`], fails the whole command.
pub fn parse_command_with(
    command: &str,
    env: &dyn Environment,
    options: &ParseOptions,
) -> Result<ParsedCommand, ParseError> {
    let mut tokenizer = Tokenizer::new(command, env, options.max_arg_len);
    let mut parsed = ParsedCommand::default();

    tokenizer.skip_whitespace();
    while !tokenizer.is_at_end() {
        let index = parsed.args.len();
        let arg = tokenizer.next_arg(index, &mut parsed.diagnostics)?;
        if options.unterminated == UnterminatedPolicy::Reject
            && let Some(diagnostic) = parsed.diagnostics.first()
        {
            return Err(ParseError::Unterminated(*diagnostic));
        }
        tracing::trace!(index, arg = %arg, "parsed argument");
        parsed.args.push(arg);
    }

    tracing::debug!(
        args = parsed.args.len(),
        diagnostics = parsed.diagnostics.len(),
        "parsed command"
    );
    Ok(parsed)
}

fn is_executable(candidate: &Path) -> bool {
    candidate
        .metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Resolves a program name the way `execvp` would: the first `PATH` entry
/// holding an executable regular file of that name wins.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

/// Runs `argv[0]` with the remaining arguments and waits for it.
///
/// A program name without a `/` is looked up in `PATH`; anything else is
/// used as a path. The child inherits stdin, stdout and stderr.
pub fn launch(argv: &[String]) -> Result<ExitStatus, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

    let path = if program.contains('/') {
        PathBuf::from(program)
    } else {
        find_executable(program).ok_or_else(|| LaunchError::NotFound(program.clone()))?
    };

    tracing::debug!(program = %path.display(), args = args.len(), "launching");
    Command::new(&path)
        .args(args)
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn all_whitespace_is_empty() {
        assert!(parse_command("", &()).unwrap().is_empty());
        assert!(parse_command(" \t\n ", &()).unwrap().is_empty());
    }

    #[test]
    fn strict_policy_rejects_unterminated() {
        let opts = ParseOptions::default().strict();
        let err = parse_command_with("ok 'open", &(), &opts).unwrap_err();
        assert_eq!(
            err,
            ParseError::Unterminated(Diagnostic {
                kind: DiagnosticKind::UnterminatedSingleQuote,
                offset: 3,
                argument: 1,
            })
        );
    }

    #[test]
    fn lenient_policy_keeps_diagnostics() {
        let parsed = parse_command_with("ok 'open", &(), &ParseOptions::default()).unwrap();
        assert_eq!(parsed.args, vec!["ok", "open"]);
        assert!(!parsed.is_clean());
    }

    #[test]
    fn overflow_discards_earlier_arguments() {
        let opts = ParseOptions::default().with_max_arg_len(Some(4));
        assert_eq!(
            parse_command_with("one two three", &(), &opts),
            Err(ParseError::ArgumentTooLong {
                argument: 2,
                limit: 4
            })
        );
    }

    #[test]
    fn limit_applies_to_expanded_values() {
        let env = HashMap::from([("LONG", "abcdef")]);
        let opts = ParseOptions::default().with_max_arg_len(Some(5));
        assert!(parse_command_with("$LONG", &env, &opts).is_err());
        let opts = opts.with_max_arg_len(Some(6));
        assert_eq!(
            parse_command_with("$LONG", &env, &opts).unwrap().args,
            vec!["abcdef"]
        );
    }

    #[test]
    fn launch_rejects_empty_argv() {
        assert!(matches!(launch(&[]), Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn launch_reports_missing_program() {
        let argv = vec!["argsplit-no-such-program".to_string()];
        assert!(matches!(launch(&argv), Err(LaunchError::NotFound(_))));
    }

    #[test]
    fn launch_runs_true() {
        let status = launch(&["true".to_string()]).unwrap();
        assert!(status.success());
    }

    #[test]
    fn find_executable_finds_sh() {
        let path = find_executable("sh").unwrap();
        assert!(path.ends_with("sh"));
        assert!(is_executable(&path));
    }

    #[test]
    fn find_executable_skips_directories_and_missing_names() {
        assert_eq!(find_executable("argsplit-no-such-program"), None);
        assert!(!is_executable(Path::new("/")));
    }
}

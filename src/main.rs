use anyhow::Context;
use argsplit::{LaunchError, ParseOptions, ProcessEnv, UnterminatedPolicy};
use clap::Parser;
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::process::{self, ExitStatus};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use tracing_subscriber::EnvFilter;

const EXIT_PARSE_FAILED: i32 = 2;
const EXIT_CANNOT_EXECUTE: i32 = 126;
const EXIT_NOT_FOUND: i32 = 127;

/// Split a command string into arguments and run it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Print the arguments instead of running them.
    #[arg(short, long)]
    print: bool,

    /// Fail on unterminated quotes, escapes and substitutions.
    #[arg(long)]
    strict: bool,

    /// Maximum number of characters in one argument. Ignored with `--legacy-limit`.
    #[arg(long, env = "ARGSPLIT_MAX_ARG_LEN")]
    max_arg_len: Option<usize>,

    /// Use the historical 8191 character argument limit.
    #[arg(long)]
    legacy_limit: bool,

    /// The command to split. Reads commands interactively if omitted.
    command: Option<String>,
}

impl Args {
    fn options(&self) -> ParseOptions {
        let base = if self.legacy_limit {
            ParseOptions::legacy()
        } else {
            ParseOptions::default().with_max_arg_len(self.max_arg_len)
        };
        if self.strict {
            base.with_unterminated(UnterminatedPolicy::Reject)
        } else {
            base
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("ARGSPLIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Maps a child's status to our own exit code, shell style.
fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

/// Parses and prints or runs one command line. Returns the exit code.
fn run_line(line: &str, options: &ParseOptions, print: bool) -> anyhow::Result<i32> {
    let parsed = match argsplit::parse_command_with(line, &ProcessEnv, options) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("argsplit: {}", e);
            return Ok(EXIT_PARSE_FAILED);
        }
    };
    for diagnostic in &parsed.diagnostics {
        tracing::warn!(%diagnostic, "recovered from parse problem");
    }

    if print {
        let mut stdout = io::stdout().lock();
        for arg in &parsed.args {
            writeln!(stdout, "ARG: '{}'", arg).context("writing arguments")?;
        }
        return Ok(0);
    }

    if parsed.args.is_empty() {
        return Ok(0);
    }
    match argsplit::launch(&parsed.args) {
        Ok(status) => Ok(exit_code(status)),
        Err(e @ LaunchError::NotFound(_)) => {
            eprintln!("{}", e);
            Ok(EXIT_NOT_FOUND)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(EXIT_CANNOT_EXECUTE)
        }
    }
}

/// Reads one line in raw mode. Returns `None` on Ctrl-D at an empty prompt.
fn read_line() -> anyhow::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;

    // Keys arrive one at a time until we restore the terminal on drop.
    let mut stdout = io::stdout()
        .into_raw_mode()
        .context("switching terminal to raw mode")?;
    let mut buffer = String::new();

    for key in io::stdin().keys() {
        match key.context("reading input")? {
            Key::Ctrl('c') => {
                buffer.clear();
                write!(stdout, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Ctrl('d') => {
                if buffer.is_empty() {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
            }
            Key::Char('\n') | Key::Char('\r') => {
                write!(stdout, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Backspace => {
                if buffer.pop().is_some() {
                    // Blank out the echoed character.
                    write!(stdout, "\x08 \x08")?;
                    stdout.flush()?;
                }
            }
            Key::Char(c) => {
                buffer.push(c);
                write!(stdout, "{}", c)?;
                stdout.flush()?;
            }
            _ => {}
        }
    }

    // Input closed.
    Ok((!buffer.is_empty()).then_some(buffer))
}

fn interactive(options: &ParseOptions, print: bool) -> anyhow::Result<()> {
    while let Some(line) = read_line()? {
        if line.trim().is_empty() {
            continue;
        }
        let code = run_line(&line, options, print)?;
        tracing::debug!(code, "command finished");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();
    let options = args.options();
    tracing::debug!(?options, "starting");

    match &args.command {
        Some(command) => {
            let code = run_line(command, &options, args.print)?;
            process::exit(code);
        }
        None => interactive(&options, args.print),
    }
}

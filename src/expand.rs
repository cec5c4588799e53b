use crate::buffer::TokenBuffer;
use crate::cursor::Cursor;
use crate::env::Environment;
use crate::error::DiagnosticKind;

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expands the `$NAME` or `${NAME}` reference under the cursor into `buf`.
///
/// The cursor must be on the `$`. On return it sits on the first character
/// after the reference. Undefined names expand to nothing. The value is
/// copied verbatim: quotes, backslashes and `$` inside it are not special.
///
/// Running out of input before the closing `}` appends nothing and yields
/// `UnterminatedSubstitution`, with the cursor left at the end.
pub fn expand(
    cursor: &mut Cursor<'_>,
    env: &dyn Environment,
    buf: &mut TokenBuffer,
) -> Result<(), DiagnosticKind> {
    let mut name = String::new();
    let mut la = cursor.advance();

    if la == Some('{') {
        la = cursor.advance();
        loop {
            match la {
                Some('}') => {
                    cursor.advance();
                    break;
                }
                Some(c) => name.push(c),
                None => return Err(DiagnosticKind::UnterminatedSubstitution),
            }
            la = cursor.advance();
        }
    } else {
        while let Some(c) = la.filter(|&c| is_ident(c)) {
            name.push(c);
            la = cursor.advance();
        }
    }

    match env.lookup(&name) {
        Some(value) => {
            tracing::trace!(name = %name, value = %value, "expanded variable");
            buf.append_str(&value);
        }
        None => tracing::trace!(name = %name, "undefined variable"),
    }
    Ok(())
}

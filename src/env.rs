use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::hash::Hash;

/// Read-only variable lookup used by `$NAME` and `${NAME}` substitution.
///
/// Implementations return the raw value; the parser never expands it further.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// The empty environment: every variable is undefined.
impl Environment for () {
    fn lookup(&self, _: &str) -> Option<Cow<'_, str>> {
        None
    }
}

impl<K: Borrow<str> + Eq + Hash, V: AsRef<str>> Environment for HashMap<K, V> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

/// The environment of the running process.
///
/// Values that are not valid UTF-8 are converted lossily.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        // The platform rejects these names; don't hand them to it.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(name).map(|v| Cow::Owned(v.to_string_lossy().into_owned()))
    }
}

/// An environment backed by a closure.
pub struct FromFn<F>(F);

/// Wraps `f` so it can be used wherever an [`Environment`] is expected.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    FromFn(f)
}

impl<F> Environment for FromFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        (self.0)(name).map(Cow::Owned)
    }
}

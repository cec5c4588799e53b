/// Accumulates the characters of the argument currently being parsed.
///
/// With a limit set, the buffer refuses to grow past `limit` characters. The
/// first refused append marks the buffer as failed and every later append is
/// ignored until the next `reset`.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    text: String,
    len: usize,
    limit: Option<usize>,
    failed: bool,
}

impl TokenBuffer {
    pub fn new(limit: Option<usize>) -> Self {
        TokenBuffer {
            limit,
            ..TokenBuffer::default()
        }
    }

    pub fn append(&mut self, c: char) {
        if self.failed {
            return;
        }
        if self.limit.is_some_and(|limit| self.len >= limit) {
            tracing::debug!(limit = self.limit, "argument exceeds length limit");
            self.failed = true;
            return;
        }
        self.text.push(c);
        self.len += 1;
    }

    pub fn append_str(&mut self, s: &str) {
        for c in s.chars() {
            self.append(c);
        }
    }

    /// Clears the content and the failure flag, keeping the limit.
    pub fn reset(&mut self) {
        self.text.clear();
        self.len = 0;
        self.failed = false;
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Hands out the accumulated argument, leaving the buffer empty.
    pub fn finish(&mut self) -> String {
        self.len = 0;
        std::mem::take(&mut self.text)
    }
}

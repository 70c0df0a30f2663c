use std::fmt;
use std::ops::Range;

#[derive(Clone, Debug, Default)]
pub(crate) struct CommandSpec {
    pub(crate) prefix: String,
    pub(crate) binary: String,
    pub(crate) args: Vec<String>,
    pub(crate) env: Vec<String>,
}

impl CommandSpec {
    pub(crate) fn new(prefix: String) -> Self {
        Self {
            prefix,
            ..Self::default()
        }
    }

    /// argv as handed to the dispatcher: the binary followed by the arguments.
    pub(crate) fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.binary.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.binary)?;
        for arg in &self.args {
            write!(f, " {}", quote_token(arg))?;
        }
        Ok(())
    }
}

/// Normalizes a possibly negative `[start, end)` window over `len` items.
///
/// Negative bounds count back from the end, an inverted window is swapped,
/// and `end` is clamped to `len`. Returns `None` when `len` is zero or the
/// window falls outside the list.
pub(crate) fn select_range(start: i64, end: i64, len: usize) -> Option<Range<usize>> {
    let len = i64::try_from(len).ok()?;
    if len == 0 {
        return None;
    }
    let mut start = if start < 0 { len + start } else { start };
    let mut end = if end < 0 { len + end } else { end };
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if start < 0 || start > len || end < 0 {
        return None;
    }
    let end = end.min(len);
    Some(start as usize..end as usize)
}

/// Display quoting for a single token. Not a shell escaper: only tokens
/// containing a space are touched, a spaced key gets quoted and the value
/// after the first `=` is always quoted.
pub(crate) fn quote_token(token: &str) -> String {
    if !token.contains(' ') {
        return token.to_string();
    }
    let (key, value) = match token.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (token, None),
    };
    let key = if key.contains(' ') {
        format!("\"{}\"", key.replace('"', "\\\""))
    } else {
        key.to_string()
    };
    match value {
        Some(value) => format!("{key}=\"{}\"", value.replace('"', "\\\"")),
        None => key,
    }
}

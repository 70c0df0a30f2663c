use crate::error::LaunchError;
use crate::RhaiResult;
use rhai::{Dynamic, EvalAltResult, ImmutableString, Position};
use std::fmt::Write as _;

pub(crate) fn runtime_error(msg: impl Into<String>) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(Dynamic::from(msg.into()), Position::NONE).into()
}

pub(crate) fn map_launch_err(err: LaunchError) -> Box<EvalAltResult> {
    runtime_error(err.to_string())
}

pub(crate) fn dynamic_to_string(value: Dynamic, label: &str) -> RhaiResult<String> {
    value
        .try_cast::<ImmutableString>()
        .map(|s| s.into())
        .ok_or_else(|| runtime_error(format!("{label} must be a string")))
}

/// Strings pass through untouched; anything else is rendered with its
/// display form and escaped down to printable ASCII. Floats keep their
/// fractional part (`5.0`, not `5`).
pub(crate) fn env_value_to_string(value: &Dynamic) -> String {
    if value.is_string() {
        value.to_string()
    } else {
        escape_ascii(&value.to_string())
    }
}

pub(crate) fn escape_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            ' '..='~' => out.push(ch),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out
}

/// Splits `KEY=VALUE` entries for process builders. Entries without `=`
/// become a key with an empty value; entries with an empty key are dropped.
pub(crate) fn env_pairs(env: &[String]) -> Vec<(&str, &str)> {
    env.iter()
        .filter_map(|entry| {
            let (key, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
            if key.is_empty() {
                log::warn!("skipping environment entry without a name: {entry:?}");
                None
            } else {
                Some((key, value))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_ascii_matches_quoted_form() {
        assert_eq!(escape_ascii("5"), "5");
        assert_eq!(escape_ascii("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape_ascii("tab\there\n"), "tab\\there\\n");
        assert_eq!(escape_ascii("\u{1}\u{7f}"), "\\x01\\x7f");
        assert_eq!(escape_ascii("café"), "caf\\u00e9");
        assert_eq!(escape_ascii("🦀"), "\\U0001f980");
    }

    #[test]
    fn env_value_strings_pass_through() {
        assert_eq!(env_value_to_string(&Dynamic::from("z é\"")), "z é\"");
        assert_eq!(env_value_to_string(&Dynamic::from_int(5)), "5");
        assert_eq!(env_value_to_string(&Dynamic::from_bool(true)), "true");
    }

    #[test]
    fn env_value_floats_keep_fraction() {
        assert_eq!(env_value_to_string(&Dynamic::from_float(5.0)), "5.0");
        assert_eq!(env_value_to_string(&Dynamic::from_float(2.5)), "2.5");
    }

    #[test]
    fn env_pairs_split_at_first_equals() {
        let env = vec![
            "A=1".to_string(),
            "B=x=y".to_string(),
            "FLAG".to_string(),
            "=hidden".to_string(),
        ];
        assert_eq!(env_pairs(&env), vec![("A", "1"), ("B", "x=y"), ("FLAG", "")]);
    }
}

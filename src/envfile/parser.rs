//! Env file parsing
//!
//! Turns `NAME=VALUE` text into an [`EnvMap`]. Supported syntax:
//!
//! - blank lines and lines starting with `#` are skipped
//! - an optional leading `export ` is ignored
//! - the line is split on the first `=`, so values may contain `=`
//! - a value wrapped in matching single or double quotes is unwrapped
//! - an unquoted value ends at a `#` preceded by whitespace
//!
//! A name that appears twice keeps its first position and takes the last value.

use crate::error::{EnvcryptError, EnvcryptResult};

use super::EnvMap;

/// Parse env file contents into an ordered mapping
pub fn parse(text: &str) -> EnvcryptResult<EnvMap> {
    let mut map = EnvMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);

        let (name, value) = line.split_once('=').ok_or_else(|| EnvcryptError::Parse {
            line: idx + 1,
            message: "expected NAME=VALUE".to_string(),
        })?;

        let name = name.trim();
        if !is_valid_name(name) {
            return Err(EnvcryptError::Parse {
                line: idx + 1,
                message: format!("invalid variable name '{}'", name),
            });
        }

        map.insert(name, parse_value(value));
    }

    Ok(map)
}

/// Check a variable name against `[A-Za-z_][A-Za-z0-9_.]*`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn parse_value(raw: &str) -> String {
    let raw = raw.trim();

    if let Some(quote) = raw.chars().next().filter(|c| *c == '"' || *c == '\'') {
        // Unterminated quotes are kept verbatim
        return match raw[1..].find(quote) {
            Some(end) => raw[1..1 + end].to_string(),
            None => raw.to_string(),
        };
    }

    let mut prev_ws = false;
    for (pos, c) in raw.char_indices() {
        if c == '#' && prev_ws {
            return raw[..pos].trim_end().to_string();
        }
        prev_ws = c.is_whitespace();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pairs() {
        let map = parse("DB_HOST=localhost\nDB_PORT=3306").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("DB_HOST"), Some("localhost"));
        assert_eq!(map.get("DB_PORT"), Some("3306"));
    }

    #[test]
    fn test_split_on_first_equals() {
        let map = parse("URL=postgres://u:p@h/db?a=b").unwrap();
        assert_eq!(map.get("URL"), Some("postgres://u:p@h/db?a=b"));
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "# header\n\nA=1\n   # indented comment\nB=2\n";
        let map = parse(text).unwrap();
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_export_prefix() {
        let map = parse("export API_KEY=abc").unwrap();
        assert_eq!(map.get("API_KEY"), Some("abc"));
    }

    #[test]
    fn test_quoted_values() {
        let map = parse("A=\"hello world\"\nB='single # not comment'\nC=\"open").unwrap();
        assert_eq!(map.get("A"), Some("hello world"));
        assert_eq!(map.get("B"), Some("single # not comment"));
        assert_eq!(map.get("C"), Some("\"open"));
    }

    #[test]
    fn test_inline_comment() {
        let map = parse("A=value # trailing\nB=pass#word").unwrap();
        assert_eq!(map.get("A"), Some("value"));
        assert_eq!(map.get("B"), Some("pass#word"));
    }

    #[test]
    fn test_empty_value() {
        let map = parse("EMPTY=").unwrap();
        assert_eq!(map.get("EMPTY"), Some(""));
    }

    #[test]
    fn test_crlf_line_endings() {
        let map = parse("A=1\r\nB=2\r\n").unwrap();
        assert_eq!(map.get("A"), Some("1"));
        assert_eq!(map.get("B"), Some("2"));
    }

    #[test]
    fn test_duplicate_name_last_value_wins() {
        let map = parse("A=1\nB=2\nA=3").unwrap();
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_missing_equals_reports_line() {
        let err = parse("A=1\nGARBAGE").unwrap_err();
        assert!(matches!(err, EnvcryptError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_invalid_name() {
        let err = parse("1ABC=x").unwrap_err();
        assert!(matches!(err, EnvcryptError::Parse { line: 1, .. }));
        assert!(!is_valid_name(""));
        assert!(is_valid_name("_private.key"));
    }
}

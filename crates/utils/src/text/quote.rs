//! Plan 9 rc-style quoting.

/// Quote `s` so it survives as a single rc word.
///
/// Strings containing a control character, a space, or a single quote are
/// wrapped in single quotes with embedded quotes doubled. The empty string
/// becomes `''`. Anything else is returned as-is.
pub fn plan9_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().any(|c| c <= ' ' || c == '\'') {
        return format!("'{}'", s.replace('\'', "''"));
    }
    s.to_string()
}

//! Line-level parsing and validation of env file declarations.
//!
//! A declaration is `NAME=value`. Names match `^[A-Za-z_][A-Za-z0-9_]+$`.
//! Values are trimmed and may be empty; raw control characters are rejected
//! unless they directly follow a backslash. No unquoting or unescaping is done.

use std::sync::LazyLock;

use regex::Regex;

use super::vars::VariableSet;
use super::SyntaxError;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]+$").expect("valid name pattern"));

// BEL..CR and ESC are the escapable raw controls. NUL is never accepted raw;
// `\0` stays two printable characters.
static VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^\x00-\x1F\x7F]|\\[\x07-\x0D\x1B])*$").expect("valid value pattern")
});

/// Returns true if `name` is a legal variable name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Returns true if `value` is a legal (already trimmed) variable value.
pub fn is_valid_value(value: &str) -> bool {
    value.is_empty() || VALUE_PATTERN.is_match(value)
}

/// Parses one raw line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<(String, String)>, SyntaxError> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (name, value) = line
        .split_once('=')
        .ok_or_else(|| SyntaxError::MissingSeparator(line.to_string()))?;

    let name = name.trim();
    if !is_valid_name(name) {
        return Err(SyntaxError::InvalidName(name.to_string()));
    }

    let value = value.trim();
    if !is_valid_value(value) {
        return Err(SyntaxError::InvalidValue(value.to_string()));
    }

    Ok(Some((name.to_string(), value.to_string())))
}

/// Parses env file text that is already in memory.
///
/// Fails on the first invalid line; a repeated name keeps its last value.
pub fn parse_str(text: &str) -> Result<VariableSet, SyntaxError> {
    parse_numbered(text).map_err(|(_, err)| err)
}

/// Shared by [`parse_str`] and file parsing; the error carries the 1-based line number.
pub(super) fn parse_numbered(text: &str) -> Result<VariableSet, (usize, SyntaxError)> {
    let mut vars = VariableSet::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some((name, value)) = parse_line(line).map_err(|err| (idx + 1, err))? {
            vars.insert(name, value);
        }
    }
    Ok(vars)
}

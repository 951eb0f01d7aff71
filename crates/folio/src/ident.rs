//! SQL identifier rendering for column names.
//!
//! Postgres cannot parameterize identifiers, so column names that end up in a
//! statement are either validated as plain identifiers or emitted quoted.
//!
//! - Plain names must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted names allow any characters except NUL and escape `"` as `""`

use crate::error::{FolioError, FolioResult};

/// Render `name` as a quoted identifier (`"name"`).
pub fn quoted(name: &str) -> FolioResult<String> {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(name, &mut out)?;
    Ok(out)
}

pub(crate) fn write_quoted(name: &str, out: &mut String) -> FolioResult<()> {
    if name.is_empty() {
        return Err(FolioError::invalid_argument("Empty column name"));
    }
    if name.contains('\0') {
        return Err(FolioError::invalid_argument(
            "Column name cannot contain NUL character",
        ));
    }

    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    Ok(())
}

/// Validate `name` as an unquoted identifier and return it unchanged.
pub fn plain(name: &str) -> FolioResult<&str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(FolioError::invalid_argument("Empty column name"));
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(FolioError::invalid_argument(format!(
            "Invalid column name start character: '{first}'"
        )));
    }
    if let Some(c) = chars.find(|&c| !(c == '_' || c == '$' || c.is_ascii_alphanumeric())) {
        return Err(FolioError::invalid_argument(format!(
            "Invalid character in column name: '{c}'"
        )));
    }
    Ok(name)
}

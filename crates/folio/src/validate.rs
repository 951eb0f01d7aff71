//! Validation helpers used by request schemas.

use std::sync::OnceLock;

/// Best-effort email validation.
///
/// This is intentionally not fully RFC-compliant.
pub fn is_email(s: &str) -> bool {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid built-in email regex")
        })
        .is_match(s)
}

/// Returns `true` for an absolute URL (`https://...`).
pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email() {
        assert!(is_email("me@email.com"));
        assert!(!is_email("me@email"));
        assert!(!is_email("not an email@x.y"));
    }

    #[test]
    fn url() {
        assert!(is_url("https://jacobandes.dev"));
        assert!(!is_url("github.com/booshja"));
    }
}

//! Field transform helpers
//!
//! Pure value normalizers applied by the record decoders. Each decoder
//! documents which helpers run on which field and in what order; the order
//! matters when a field is both boolean-coerced and blank-nulled, since
//! coercion first turns `""` into `false` while nulling first keeps it null.

/// Tokens treated as `true` by [`loose_boolean`] unless a decoder supplies its own
pub const DEFAULT_TRUTHY: &[&str] = &["y", "t"];

/// Placeholder the source files use for "unknown"
pub const SENTINEL: &str = "?";

/// Empty string becomes null. Idempotent.
pub fn blank_to_null(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `true` iff the lowercased value is one of `truthy`; anything else,
/// including the empty string, is `false`.
pub fn loose_boolean(value: &str, truthy: &[&str]) -> bool {
    let lowered = value.to_lowercase();
    truthy.iter().any(|token| *token == lowered)
}

/// The literal [`SENTINEL`] becomes null.
pub fn sentinel_to_null(value: Option<String>) -> Option<String> {
    value.filter(|v| v != SENTINEL)
}

/// First character is alphabetic (Unicode-aware). Empty strings are not.
pub(crate) fn starts_alphabetic(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_to_null() {
        assert_eq!(blank_to_null(Some(String::new())), None);
        assert_eq!(blank_to_null(Some("Poaceae".into())), Some("Poaceae".into()));
        assert_eq!(blank_to_null(Some(" ".into())), Some(" ".into()));
        assert_eq!(blank_to_null(None), None);
    }

    #[test]
    fn test_blank_to_null_is_idempotent() {
        for value in [None, Some(String::new()), Some("x".to_string()), Some("?".to_string())] {
            let once = blank_to_null(value.clone());
            assert_eq!(blank_to_null(once.clone()), once);
        }
    }

    #[test]
    fn test_loose_boolean_default_tokens() {
        assert!(loose_boolean("y", DEFAULT_TRUTHY));
        assert!(loose_boolean("T", DEFAULT_TRUTHY));
        assert!(!loose_boolean("yes", DEFAULT_TRUTHY));
        assert!(!loose_boolean("n", DEFAULT_TRUTHY));
        assert!(!loose_boolean("", DEFAULT_TRUTHY));
    }

    #[test]
    fn test_loose_boolean_custom_tokens() {
        let truthy = ["yes", "1"];
        assert!(loose_boolean("YES", &truthy));
        assert!(loose_boolean("1", &truthy));
        assert!(!loose_boolean("y", &truthy));
    }

    #[test]
    fn test_sentinel_to_null() {
        assert_eq!(sentinel_to_null(Some("?".into())), None);
        assert_eq!(sentinel_to_null(Some("??".into())), Some("??".into()));
        assert_eq!(sentinel_to_null(Some(String::new())), Some(String::new()));
    }

    #[test]
    fn test_order_matters_for_blank_booleans() {
        // coercion first: blank is false, never null
        assert!(!loose_boolean("", DEFAULT_TRUTHY));
        // nulling first: blank stays null and never reaches coercion
        assert_eq!(blank_to_null(Some(String::new())).map(|v| loose_boolean(&v, DEFAULT_TRUTHY)), None);
    }

    #[test]
    fn test_starts_alphabetic() {
        assert!(starts_alphabetic("Asteraceae"));
        assert!(starts_alphabetic("Élie"));
        assert!(!starts_alphabetic("42"));
        assert!(!starts_alphabetic("?"));
        assert!(!starts_alphabetic(""));
    }
}

//! Field name validation.

/// `PostgreSQL` truncates identifiers beyond 63 bytes.
const MAX_FIELD_NAME_LENGTH: usize = 63;

/// Whether `s` can be declared as a field name.
///
/// Field names are referenced by clients in filters and sorts, so they must be
/// matchable by those grammars and safe to place in SQL unquoted: an ASCII letter
/// or `_` followed by ASCII letters, digits or `_`, at most 63 bytes.
///
/// ```
/// use rest_query::is_valid_field_name;
///
/// assert!(is_valid_field_name("company_id"));
/// assert!(is_valid_field_name("_rank"));
///
/// assert!(!is_valid_field_name(""));
/// assert!(!is_valid_field_name("2fa"));
/// assert!(!is_valid_field_name("user.id"));
/// assert!(!is_valid_field_name("name; DROP"));
/// ```
#[must_use]
pub fn is_valid_field_name(s: &str) -> bool {
    match s.as_bytes() {
        [] => false,
        bytes if bytes.len() > MAX_FIELD_NAME_LENGTH => false,
        [first, rest @ ..] => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_field_names() {
        assert!(is_valid_field_name("name"));
        assert!(is_valid_field_name("company_id"));
        assert!(is_valid_field_name("_"));
        assert!(is_valid_field_name("Table123"));
        assert!(is_valid_field_name("mixedCase"));
    }

    #[test]
    fn test_invalid_field_names() {
        assert!(!is_valid_field_name(""));
        assert!(!is_valid_field_name("1"));
        assert!(!is_valid_field_name("user-name"));
        assert!(!is_valid_field_name("user name"));
        assert!(!is_valid_field_name("table'"));
        assert!(!is_valid_field_name("users--"));
        assert!(!is_valid_field_name("(SELECT 1)"));
        // Order grammar accepts these letters, but a declared name must stay ASCII
        assert!(!is_valid_field_name("größe"));
        assert!(!is_valid_field_name("ｕｓｅｒｓ"));
    }

    #[test]
    fn test_field_name_length_limit() {
        assert!(is_valid_field_name(&"a".repeat(63)));
        assert!(!is_valid_field_name(&"a".repeat(64)));
    }
}

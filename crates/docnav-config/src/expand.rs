//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key and is only used in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        assert_eq!(
            expand_env("https://docs.example.com/", "site.origin").unwrap(),
            "https://docs.example.com/"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env(
            "${DOCNAV_EXPAND_TEST_UNSET_A:-http://fallback/}",
            "site.origin",
        )
        .unwrap();
        assert_eq!(value, "http://fallback/");
    }

    #[test]
    fn test_missing_var_reports_field() {
        let err = expand_env("${DOCNAV_EXPAND_TEST_UNSET_B}", "site.origin").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("site.origin"), "{message}");
        assert!(message.contains("DOCNAV_EXPAND_TEST_UNSET_B"), "{message}");
    }
}

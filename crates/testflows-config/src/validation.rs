//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` so the user sees
//! them all at once.

use crate::schema::TestflowsConfig;
use testflows_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TestflowsConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_webhook(&mut errors, config);
    validate_messages(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_webhook(errors: &mut Vec<String>, config: &TestflowsConfig) {
    let header = &config.webhook.session_header;
    if reqwest::header::HeaderName::from_bytes(header.as_bytes()).is_err() {
        errors.push(format!(
            "webhook.session_header = {header:?} is not a valid header name"
        ));
    }
    require_non_empty(errors, "webhook.init_message", &config.webhook.init_message);
}

fn validate_messages(errors: &mut Vec<String>, config: &TestflowsConfig) {
    require_non_empty(errors, "messages.error_text", &config.messages.error_text);
    require_non_empty(errors, "messages.fallback_text", &config.messages.fallback_text);
}

fn require_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate(&TestflowsConfig::default()).is_ok());
    }

    #[test]
    fn catches_invalid_header_name() {
        let mut config = TestflowsConfig::default();
        config.webhook.session_header = "X Session".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("webhook.session_header"));
    }

    #[test]
    fn catches_empty_header_name() {
        let mut config = TestflowsConfig::default();
        config.webhook.session_header = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn catches_blank_sentinel() {
        let mut config = TestflowsConfig::default();
        config.webhook.init_message = "   ".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("webhook.init_message"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = TestflowsConfig::default();
        config.messages.error_text = String::new();
        config.messages.fallback_text = String::new();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("messages.error_text"));
        assert!(err.contains("messages.fallback_text"));
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn empty_url_is_allowed() {
        let mut config = TestflowsConfig::default();
        config.webhook.url = String::new();
        assert!(validate(&config).is_ok());
    }
}

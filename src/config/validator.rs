use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{Result, ReviewIqError, ValidationError};

/// Providers the analysis client can talk to
const VALID_PROVIDERS: [&str; 1] = ["gemini"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, collecting every problem found
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_storage(config, &mut errors);
        Self::validate_llm(config, &mut errors);
        Self::validate_input(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReviewIqError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory cannot be empty",
            ));
        }

        if config.storage.history_key.trim().is_empty() {
            errors.push(ValidationError::new(
                "storage.history_key",
                "History key cannot be empty",
            ));
        }
    }

    fn validate_llm(config: &Config, errors: &mut Vec<ValidationError>) {
        let llm = &config.llm;

        if !VALID_PROVIDERS.contains(&llm.provider.as_str()) {
            errors.push(ValidationError::new(
                "llm.provider",
                format!(
                    "Provider must be one of {:?}, got '{}'",
                    VALID_PROVIDERS, llm.provider
                ),
            ));
        }

        if llm.api_key_env.is_empty() {
            errors.push(ValidationError::new(
                "llm.api_key_env",
                "API key environment variable name cannot be empty",
            ));
        }

        if !(llm.base_url.starts_with("http://") || llm.base_url.starts_with("https://")) {
            errors.push(ValidationError::new(
                "llm.base_url",
                format!("Base URL must be http(s), got '{}'", llm.base_url),
            ));
        }

        if llm.model.is_empty() {
            errors.push(ValidationError::new("llm.model", "Model name cannot be empty"));
        }

        if !(0.0..=2.0).contains(&llm.temperature) {
            errors.push(ValidationError::new(
                "llm.temperature",
                format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    llm.temperature
                ),
            ));
        }

        if llm.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "llm.timeout_secs",
                "Timeout must be greater than 0",
            ));
        }
    }

    fn validate_input(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.input.default_category.trim().is_empty() {
            errors.push(ValidationError::new(
                "input.default_category",
                "Default category cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.5;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_and_bad_provider_collected() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        config.llm.provider = "carrier-pigeon".to_string();
        config.storage.data_dir = PathBuf::new();

        match ConfigValidator::validate(&config) {
            Err(ReviewIqError::ConfigValidation { errors }) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.path == "llm.timeout_secs"));
                assert!(errors.iter().any(|e| e.path == "llm.provider"));
                assert!(errors.iter().any(|e| e.path == "storage.data_dir"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }
}

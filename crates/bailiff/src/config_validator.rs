//! Validation utilities.

use bailiff_config::Config;
use bailiff_core::TriggerPattern;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on configuration:{}", errors)]
    ConfigurationError { errors: String },
}

fn _missing(error: &mut String, name: &str) {
    error.push_str(&format!("\n  - Missing value: {}", name));
}

fn _invalid(error: &mut String, name: &str, reason: &str) {
    error.push_str(&format!("\n  - Invalid value: {} ({})", name, reason));
}

/// Validate configuration, listing every problem at once.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    let mut error = String::new();

    if config.repository.admin_teams.is_empty() {
        _missing(&mut error, "admin_teams");
    }
    if config.repository.org.is_empty() {
        _missing(&mut error, "org");
    }
    if config.repository.repo.is_empty() {
        _missing(&mut error, "repo");
    }
    if let Err(e) = TriggerPattern::new(&config.repository.trigger_pattern) {
        _invalid(&mut error, "trigger_pattern", &e.to_string());
    }

    if config.membership.refresh_interval == 0 {
        _invalid(
            &mut error,
            "BAILIFF_MEMBERSHIP_REFRESH_INTERVAL",
            "must be greater than zero",
        );
    }

    if config.server.webhook_secret.is_empty() && !config.server.disable_webhook_signature {
        _missing(&mut error, "--webhook-secret / BAILIFF_WEBHOOK_SECRET");
    }
    if config.api.token.is_empty() {
        _missing(&mut error, "--github-token / BAILIFF_GITHUB_TOKEN");
    }
    if config.mirror.private_key_file.is_empty() {
        _missing(&mut error, "--private-key-file / BAILIFF_PRIVATE_KEY_FILE");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::ConfigurationError { errors: error })
    }
}

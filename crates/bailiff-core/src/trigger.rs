use regex::Regex;

use crate::{DomainError, Result};

const SHA_GROUP: &str = "sha";

/// Compiled trigger pattern, holding a named `sha` capture group.
#[derive(Debug, Clone)]
pub struct TriggerPattern {
    regex: Regex,
}

impl TriggerPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        if !regex.capture_names().flatten().any(|name| name == SHA_GROUP) {
            return Err(DomainError::MissingShaGroup {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self { regex })
    }

    /// Extract the SHA of the first matching trigger, lowercased.
    pub fn find_sha(&self, body: &str) -> Option<String> {
        self.regex
            .captures_iter(body)
            .find_map(|captures| captures.name(SHA_GROUP))
            .map(|m| m.as_str().to_lowercase())
    }
}

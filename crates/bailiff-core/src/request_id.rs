use std::fmt;

const REQUEST_ID_BYTES: usize = 16;

/// Per-request correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(bailiff_crypto::random_hex(REQUEST_ID_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let id = RequestId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert_ne!(id, RequestId::generate());
    }
}

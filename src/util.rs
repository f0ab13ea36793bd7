//! Small shared helpers.

use std::fmt;

/// API credential wrapper that masks its contents in Debug/Display output,
/// so a stray `{:?}` on a client or config never leaks the key into logs.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[allow(dead_code)]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Intentionally access the raw secret value (for Authorization headers).
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[redacted]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[redacted]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_mask_the_value() {
        let secret = SecretString::new("hf_abc123");
        assert_eq!(format!("{:?}", secret), "[redacted]");
        assert_eq!(format!("{}", secret), "[redacted]");
    }

    #[test]
    fn expose_returns_the_value() {
        let secret: SecretString = "hf_abc123".into();
        assert_eq!(secret.expose(), "hf_abc123");
        assert!(!secret.is_empty());
    }

    #[test]
    fn empty_secret_is_empty() {
        let secret = SecretString::new(String::new());
        assert!(secret.is_empty());
    }
}

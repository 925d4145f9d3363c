use std::fmt::{self, Debug, Formatter};

/// A bearer credential for the completion endpoint.
///
/// The secret never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates an `ApiKey`, returns `None` if the key is empty or only
    /// consists of whitespace.
    pub fn new<S: Into<String>>(key: S) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return None;
        }
        Some(Self(key))
    }

    /// Returns the secret.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_absent() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("  \t").is_none());
        assert_eq!(ApiKey::new("sk-1").unwrap().expose(), "sk-1");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = ApiKey::new("sk-very-secret").unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("sk-very-secret"));
    }
}

//! Harness configuration.
//!
//! Configuration is resolved once at process start and passed by reference
//! into the bootstrap and page objects. Components never read ambient
//! environment state themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::result::{CribarError, CribarResult};

/// Key for the application endpoint
pub const KEY_BASE_URL: &str = "BASE_URL";

/// Key for the login username
pub const KEY_USERNAME: &str = "USERNAME";

/// Key for the login password
pub const KEY_PASSWORD: &str = "PASSWORD";

/// Every required key, in reporting order
pub const REQUIRED_KEYS: [&str; 3] = [KEY_BASE_URL, KEY_USERNAME, KEY_PASSWORD];

/// Login credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Resolved harness configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application endpoint, no trailing slash expected
    pub base_url: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    /// Build a configuration directly
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolve configuration through a key lookup.
    ///
    /// Absent and blank values both count as missing; every missing key is
    /// collected before failing, so one error names them all.
    pub fn from_lookup<F>(lookup: F) -> CribarResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut resolve = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let base_url = resolve(KEY_BASE_URL);
        let username = resolve(KEY_USERNAME);
        let password = resolve(KEY_PASSWORD);

        if missing.is_empty() {
            Ok(Self {
                base_url,
                username,
                password,
            })
        } else {
            Err(CribarError::Configuration { missing })
        }
    }

    /// Resolve configuration from process environment variables
    pub fn from_env() -> CribarResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Login credentials carried by this configuration
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Join a path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn complete_lookup_resolves() {
            let config = Config::from_lookup(lookup_from(&[
                (KEY_BASE_URL, "https://app.test"),
                (KEY_USERNAME, "alex"),
                (KEY_PASSWORD, "s3cret"),
            ]))
            .unwrap();
            assert_eq!(config.base_url, "https://app.test");
            assert_eq!(config.credentials().username, "alex");
        }

        #[test]
        fn single_missing_key_is_named() {
            let err = Config::from_lookup(lookup_from(&[
                (KEY_BASE_URL, "https://app.test"),
                (KEY_PASSWORD, "s3cret"),
            ]))
            .unwrap_err();
            match err {
                CribarError::Configuration { missing } => {
                    assert_eq!(missing, vec![KEY_USERNAME.to_string()]);
                }
                other => panic!("expected configuration error, got {other:?}"),
            }
        }

        #[test]
        fn all_missing_keys_are_aggregated_in_order() {
            let err = Config::from_lookup(|_| None).unwrap_err();
            match err {
                CribarError::Configuration { missing } => {
                    assert_eq!(missing, REQUIRED_KEYS.map(String::from).to_vec());
                }
                other => panic!("expected configuration error, got {other:?}"),
            }
        }

        #[test]
        fn blank_values_count_as_missing() {
            let err = Config::from_lookup(lookup_from(&[
                (KEY_BASE_URL, "https://app.test"),
                (KEY_USERNAME, "   "),
                (KEY_PASSWORD, ""),
            ]))
            .unwrap_err();
            match err {
                CribarError::Configuration { missing } => {
                    assert_eq!(
                        missing,
                        vec![KEY_USERNAME.to_string(), KEY_PASSWORD.to_string()]
                    );
                }
                other => panic!("expected configuration error, got {other:?}"),
            }
        }

        #[test]
        fn error_message_names_every_missing_key() {
            let message = Config::from_lookup(|_| None).unwrap_err().to_string();
            for key in REQUIRED_KEYS {
                assert!(message.contains(key), "message should name {key}");
            }
        }
    }

    mod url_tests {
        use super::*;

        #[test]
        fn url_joins_without_doubled_slash() {
            let config = Config::new("https://app.test/", "u", "p");
            assert_eq!(config.url("/login"), "https://app.test/login");
            assert_eq!(config.url("issues"), "https://app.test/issues");
        }
    }

    mod debug_tests {
        use super::*;

        #[test]
        fn debug_redacts_password() {
            let config = Config::new("https://app.test", "alex", "s3cret");
            let rendered = format!("{config:?}");
            assert!(!rendered.contains("s3cret"));
            assert!(rendered.contains("alex"));
        }
    }
}

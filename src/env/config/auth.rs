// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// API
// Authentication Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

/// Configuration settings for authenticating API requests
#[derive(Deserialize, Default, Clone, Debug)]
pub struct AuthConfig {
    /// The API key. If there is no key, every request is authorized.
    #[serde(default)]
    pub key: Option<String>
}

impl AuthConfig {
    pub fn is_valid(&self) -> bool {
        // An empty key could never be sent in the header
        self.key.as_ref().map(|key| !key.is_empty()).unwrap_or(true)
    }
}

#[cfg(test)]
mod test {
    use super::AuthConfig;

    /// The default config is valid and does not require a key
    #[test]
    fn valid_auth() {
        let auth_config = AuthConfig::default();

        assert!(auth_config.is_valid());
        assert_eq!(auth_config.key, None);
    }

    /// An empty key makes the config invalid
    #[test]
    fn invalid_empty_key() {
        let auth_config = AuthConfig {
            key: Some(String::new())
        };

        assert!(!auth_config.is_valid());
    }
}

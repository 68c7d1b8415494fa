//! Admin API connection settings
//!
//! Built once and passed by reference into the client; never a process-wide
//! singleton. Environment variables override unset fields so CI and local
//! setups can share declared configuration.

use url::Url;

use crate::api::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

const ENV_BASE_URL: &str = "SMILECDR_BASE_URL";
const ENV_USERNAME: &str = "SMILECDR_USERNAME";
const ENV_PASSWORD: &str = "SMILECDR_PASSWORD";

/// Connection settings for the Smile CDR admin API.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
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

    /// Build settings from the environment, falling back to the default
    /// endpoint when `SMILECDR_BASE_URL` is unset.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let username = std::env::var(ENV_USERNAME).map_err(|_| {
            ApiError::InvalidConfig(format!("{} is required", ENV_USERNAME))
        })?;
        let password = std::env::var(ENV_PASSWORD).map_err(|_| {
            ApiError::InvalidConfig(format!("{} is required", ENV_PASSWORD))
        })?;

        let config = Self::new(base_url, username, password);
        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint parses and credentials are present.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("invalid base URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidConfig(format!(
                "unsupported URL scheme '{}'",
                url.scheme()
            )));
        }
        if self.username.is_empty() {
            return Err(ApiError::InvalidConfig("username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(ApiError::InvalidConfig("password is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_reads_all_variables() {
        std::env::set_var(ENV_BASE_URL, "https://cdr.example.com:9000");
        std::env::set_var(ENV_USERNAME, "admin");
        std::env::set_var(ENV_PASSWORD, "password");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "https://cdr.example.com:9000");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "password");

        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);
    }

    #[test]
    #[serial]
    fn from_env_defaults_base_url() {
        std::env::remove_var(ENV_BASE_URL);
        std::env::set_var(ENV_USERNAME, "admin");
        std::env::set_var(ENV_PASSWORD, "password");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);
    }

    #[test]
    #[serial]
    fn from_env_requires_credentials() {
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SMILECDR_USERNAME"));
    }

    #[test]
    fn validate_rejects_malformed_url() {
        let config = Config::new("not a url", "admin", "password");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config::new("ftp://cdr.example.com", "admin", "password");
        assert!(config.validate().is_err());
    }
}

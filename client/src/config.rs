//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The API base URL does not parse.
    #[error("invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The URL cannot carry path segments (for example `mailto:`).
    #[error("API base URL {value:?} cannot be a base")]
    NotABase {
        /// Configured value.
        value: String,
    },
}

/// Settings for the placeholder API client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOCIAL_FEED")]
pub struct ClientSettings {
    /// Base URL of the placeholder REST API.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl ClientSettings {
    /// Configured base URL with a trailing slash, falling back to the public
    /// JSONPlaceholder instance.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the value is not a usable base URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let mut url = Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError::NotABase {
                value: raw.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Configured request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("social-feed")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SOCIAL_FEED_API_BASE_URL", None::<String>),
            ("SOCIAL_FEED_REQUEST_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default url").as_str(),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "SOCIAL_FEED_API_BASE_URL",
                Some("http://localhost:3000/api".to_owned()),
            ),
            ("SOCIAL_FEED_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("override url").as_str(),
            "http://localhost:3000/api/"
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:someone@example.com")]
    fn unusable_base_urls_are_rejected(#[case] raw: &str) {
        let settings = ClientSettings {
            api_base_url: Some(raw.to_owned()),
            request_timeout_secs: 10,
        };
        assert!(settings.api_base_url().is_err());
    }
}

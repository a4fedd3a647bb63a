//! Client configuration.
//!
//! [`ComgateConfig`] holds the merchant credentials and the environment the
//! client talks to. It is built once, validated, and never mutated afterwards.
//!
//! # Examples
//!
//! ```
//! use comgate_client::ComgateConfig;
//!
//! let config = ComgateConfig::from_toml(
//!     r#"
//!     merchant_id = 123456
//!     secret = "x7Y2bR9kLm"
//!     test = false
//!
//!     [http]
//!     timeout_secs = 20
//!     "#,
//! )?;
//! assert_eq!(config.country, "CZ");
//! assert!(!config.test);
//! # Ok::<(), comgate_client::ComgateError>(())
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{ComgateError, Result},
    response::Endpoint,
    transport::HttpConfig,
};

/// Production API host.
pub const DEFAULT_API_BASE_URL: &str = "https://payments.comgate.cz";

/// API version segment used in request paths.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// Merchant credentials and gateway environment.
///
/// `Debug` output never contains the secret.
#[derive(Debug, Deserialize)]
pub struct ComgateConfig {
    /// Merchant identifier ("Identifikátor propojení obchodu" in the Comgate portal).
    pub merchant_id: u64,

    /// Shared secret ("Heslo" in the Comgate portal).
    pub secret: SecretString,

    /// Send requests as test payments.
    #[serde(default = "default_test")]
    pub test: bool,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(default = "default_country")]
    pub country: String,

    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Payment page language.
    #[serde(default = "default_language")]
    pub language: String,

    /// Gateway base URL without version suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API version, rendered as `/v{api_version}/`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// HTTP transport tuning.
    #[serde(default)]
    pub http: HttpConfig,
}

impl ComgateConfig {
    /// Creates a test-mode configuration for the Czech market with default endpoints.
    #[must_use]
    pub fn new(merchant_id: u64, secret: impl Into<String>) -> Self {
        Self {
            merchant_id,
            secret: SecretString::from(secret.into()),
            test: default_test(),
            country: default_country(),
            currency: default_currency(),
            language: default_language(),
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            http: HttpConfig::default(),
        }
    }

    /// Switches between test and live payments.
    #[must_use]
    pub const fn with_test_mode(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Points the client at a different gateway host.
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Replaces the HTTP transport settings.
    #[must_use]
    pub const fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] if the TOML is malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml).map_err(|e| ComgateError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks credentials, locale codes, the base URL and HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id == 0 {
            return Err(ComgateError::ConfigError("merchant_id must not be zero".to_owned()));
        }
        if self.secret.expose_secret().trim().is_empty() {
            return Err(ComgateError::ConfigError("secret must not be empty".to_owned()));
        }
        validate_code("country", &self.country, 2, |c| c.is_ascii_uppercase())?;
        validate_code("currency", &self.currency, 3, |c| c.is_ascii_uppercase())?;
        validate_code("language", &self.language, 2, |c| c.is_ascii_lowercase())?;
        if self.api_version.is_empty() || self.api_version.contains('/') {
            return Err(ComgateError::ConfigError(format!(
                "invalid api_version '{}'",
                self.api_version
            )));
        }
        self.base_url()?;
        self.http.validate()
    }

    /// Full URL for an endpoint: `{api_base_url}/v{api_version}/{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] if the base URL is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use comgate_client::{ComgateConfig, Endpoint};
    ///
    /// let config = ComgateConfig::new(1, "secret");
    /// let url = config.endpoint_url(Endpoint::Refund)?;
    /// assert_eq!(url.as_str(), "https://payments.comgate.cz/v1.0/refund");
    /// # Ok::<(), comgate_client::ComgateError>(())
    /// ```
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let base = self.base_url()?;
        let url = format!(
            "{}/v{}/{}",
            base.as_str().trim_end_matches('/'),
            self.api_version,
            endpoint.path()
        );
        Url::parse(&url)
            .map_err(|e| ComgateError::ConfigError(format!("invalid endpoint URL '{url}': {e}")))
    }

    fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ComgateError::ConfigError(format!("invalid api_base_url '{}': {e}", self.api_base_url))
        })?;

        if !matches!(url.scheme(), "https" | "http") {
            return Err(ComgateError::ConfigError(format!(
                "api_base_url must use HTTP(S), got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(ComgateError::ConfigError(format!(
                "api_base_url has no host: {}",
                self.api_base_url
            )));
        }
        Ok(url)
    }
}

fn validate_code(field: &str, value: &str, len: usize, valid: impl Fn(char) -> bool) -> Result<()> {
    if value.len() != len || !value.chars().all(valid) {
        return Err(ComgateError::ConfigError(format!("invalid {field} code '{value}'")));
    }
    Ok(())
}

const fn default_test() -> bool {
    true
}

fn default_country() -> String {
    "CZ".to_owned()
}

fn default_currency() -> String {
    "CZK".to_owned()
}

fn default_language() -> String {
    "cs".to_owned()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

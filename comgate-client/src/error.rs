//! Error types for the Comgate client.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Gateway Errors** ([`ComgateError::UnknownResponseFormat`],
//!   [`ComgateError::NonNumericCode`], [`ComgateError::Rejected`],
//!   [`ComgateError::MalformedResponse`]): the gateway answered, but not with a success
//! - **Network Errors** ([`ComgateError::HttpError`]): transport failures and non-2xx statuses
//! - **Local Errors** ([`ComgateError::ConfigError`], [`ComgateError::EncodingError`],
//!   [`ComgateError::NotImplemented`]): nothing was sent
//!
//! # Examples
//!
//! ```
//! use comgate_client::{ComgateError, Endpoint};
//!
//! let err = ComgateError::Rejected {
//!     endpoint: Endpoint::Create,
//!     code: "1400".to_owned(),
//!     message: "Invalid merchant".to_owned(),
//! };
//! assert!(err.is_gateway_error());
//! assert_eq!(err.code(), Some("1400"));
//! assert_eq!(err.to_string(), "Comgate create failed: Invalid merchant (code: 1400)");
//! ```

use thiserror::Error;

use crate::response::Endpoint;

/// Result type alias for client operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, ComgateError>;

/// Errors that can occur while talking to the Comgate gateway.
///
/// # Error Recovery
///
/// - **Transient errors** ([`HttpError`](Self::HttpError)): safe to retry for `status`;
///   for `create`, `cancel` and `refund` check the payment state first
/// - **Rejections** ([`Rejected`](Self::Rejected)): inspect [`code`](Self::code), the
///   gateway documents each value
/// - **Format errors** ([`UnknownResponseFormat`](Self::UnknownResponseFormat),
///   [`NonNumericCode`](Self::NonNumericCode)): usually a gateway outage page or an API change
/// - **Configuration errors** ([`ConfigError`](Self::ConfigError)): fix the configuration
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ComgateError {
    /// The response carried a content type that is not accepted for the endpoint.
    ///
    /// Only `application/x-www-form-urlencoded` is accepted, plus `text/html` for
    /// [`Endpoint::Cancel`]. A missing header is reported with an empty content type.
    #[error("Comgate {endpoint} response is unknown format '{content_type}'")]
    UnknownResponseFormat {
        /// Endpoint that produced the response.
        endpoint: Endpoint,
        /// Raw `Content-Type` header value.
        content_type: String,
    },

    /// The response `code` field is missing, repeated or not an integer.
    #[error("Comgate {endpoint} response code is not a number (body: {body})")]
    NonNumericCode {
        /// Endpoint that produced the response.
        endpoint: Endpoint,
        /// Raw response body.
        body: String,
    },

    /// The gateway reported a non-zero result code.
    ///
    /// `message` is the response `message` field, or the raw body when the gateway
    /// did not send one.
    ///
    /// # Examples
    ///
    /// ```
    /// use comgate_client::{ComgateError, Endpoint};
    ///
    /// let err = ComgateError::Rejected {
    ///     endpoint: Endpoint::Refund,
    ///     code: "1400".to_owned(),
    ///     message: "Invalid merchant".to_owned(),
    /// };
    /// let text = err.to_string();
    /// assert!(text.contains("Invalid merchant"));
    /// assert!(text.contains("1400"));
    /// ```
    #[error("Comgate {endpoint} failed: {message} (code: {code})")]
    Rejected {
        /// Endpoint that produced the response.
        endpoint: Endpoint,
        /// Raw result code as sent by the gateway.
        code: String,
        /// Gateway message or raw body.
        message: String,
    },

    /// A successful response is missing a field the operation needs.
    #[error("Comgate {endpoint} response is malformed: {detail}")]
    MalformedResponse {
        /// Endpoint that produced the response.
        endpoint: Endpoint,
        /// What was missing.
        detail: String,
    },

    /// The operation is not supported by this client.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// HTTP request failed.
    ///
    /// This wraps [`reqwest::Error`]: connection failures, timeouts, TLS errors and
    /// non-2xx HTTP statuses all end up here unchanged.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request parameters could not be form-encoded.
    #[error("Form encoding failed: {0}")]
    EncodingError(String),

    /// Client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ComgateError {
    /// Returns `true` when the gateway answered but the answer was not a success.
    #[must_use]
    pub const fn is_gateway_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownResponseFormat { .. }
                | Self::NonNumericCode { .. }
                | Self::Rejected { .. }
                | Self::MalformedResponse { .. }
        )
    }

    /// Raw gateway result code, for [`Rejected`](Self::Rejected) errors.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Endpoint the error originated from, for gateway errors.
    #[must_use]
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::UnknownResponseFormat { endpoint, .. }
            | Self::NonNumericCode { endpoint, .. }
            | Self::Rejected { endpoint, .. }
            | Self::MalformedResponse { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}

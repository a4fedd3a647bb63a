//! Gateway endpoints and response normalisation.
//!
//! Every Comgate call answers with a form-encoded body carrying a `code` field.
//! [`parse_response`] turns the raw content type and body into a
//! [`GatewayResponse`] or a gateway error.

use std::{collections::BTreeMap, fmt};

use crate::error::{ComgateError, Result};

/// Media type of every well-formed Comgate response.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Result code the gateway sends on success.
pub const SUCCESS_CODE: &str = "0";

/// Endpoints whose responses arrive labeled `text/html` while the body is still
/// form-encoded. Comgate does this for `cancel` only; do not extend it by guessing.
const HTML_LABELED_FORM_ENDPOINTS: &[Endpoint] = &[Endpoint::Cancel];

/// Comgate API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Create a payment (`create`).
    Create,
    /// Query payment status (`status`).
    Status,
    /// Cancel a pending payment (`cancel`).
    Cancel,
    /// Refund a paid payment (`refund`).
    Refund,
    /// List payment methods (`methods`). Answers in XML; never called.
    Methods,
}

impl Endpoint {
    /// Path segment under `/v{version}/`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Status => "status",
            Self::Cancel => "cancel",
            Self::Refund => "refund",
            Self::Methods => "methods",
        }
    }

    /// Checks whether a response `Content-Type` is acceptable for this endpoint.
    ///
    /// Parameters such as `; charset=UTF-8` are ignored and the media type is
    /// compared case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use comgate_client::Endpoint;
    ///
    /// assert!(Endpoint::Status.accepts_content_type("application/x-www-form-urlencoded"));
    /// assert!(Endpoint::Cancel.accepts_content_type("text/html; charset=UTF-8"));
    /// assert!(!Endpoint::Status.accepts_content_type("text/html"));
    /// ```
    #[must_use]
    pub fn accepts_content_type(self, content_type: &str) -> bool {
        let media_type = media_type(content_type);
        if media_type == FORM_URLENCODED {
            return true;
        }
        media_type == "text/html" && HTML_LABELED_FORM_ENDPOINTS.contains(&self)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn media_type(content_type: &str) -> String {
    content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Parsed key-value mapping of a successful gateway response.
///
/// Always contains `code = "0"`; the remaining fields depend on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    fields: BTreeMap<String, String>,
}

impl GatewayResponse {
    /// Result code (always `"0"` for a value returned by this crate).
    #[must_use]
    pub fn code(&self) -> &str {
        self.get("code").unwrap_or(SUCCESS_CODE)
    }

    /// Gateway transaction identifier, when echoed back.
    #[must_use]
    pub fn trans_id(&self) -> Option<&str> {
        self.get("transId")
    }

    /// Human-readable gateway message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.get("message")
    }

    /// Looks up an arbitrary response field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Iterates over all fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields in the response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the response has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the response, returning the underlying mapping.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}

/// Validates and parses a raw gateway response.
///
/// Checks, in order: the content type is accepted for `endpoint`, the `code`
/// field parses as an integer, and the code equals `"0"`.
///
/// # Errors
///
/// - [`ComgateError::UnknownResponseFormat`] for an unaccepted content type
/// - [`ComgateError::MalformedResponse`] if the body is not form-encoded
/// - [`ComgateError::NonNumericCode`] if `code` is absent, repeated or not an integer
/// - [`ComgateError::Rejected`] if `code` is anything but `"0"`
///
/// # Examples
///
/// ```
/// use comgate_client::{Endpoint, parse_response};
///
/// let response = parse_response(
///     Endpoint::Status,
///     "application/x-www-form-urlencoded",
///     "code=0&transId=AB12-CD34-EF56&status=PAID",
/// )?;
/// assert_eq!(response.trans_id(), Some("AB12-CD34-EF56"));
/// assert_eq!(response.get("status"), Some("PAID"));
/// # Ok::<(), comgate_client::ComgateError>(())
/// ```
pub fn parse_response(
    endpoint: Endpoint,
    content_type: &str,
    body: &str,
) -> Result<GatewayResponse> {
    if !endpoint.accepts_content_type(content_type) {
        return Err(ComgateError::UnknownResponseFormat {
            endpoint,
            content_type: content_type.to_owned(),
        });
    }

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).map_err(|e| {
        ComgateError::MalformedResponse {
            endpoint,
            detail: format!("body is not form-encoded: {e}"),
        }
    })?;

    // A repeated `code` is a list, not a number.
    let mut codes = pairs.iter().filter(|(key, _)| key == "code").map(|(_, value)| value);
    let code = match (codes.next(), codes.next()) {
        (Some(code), None) if code.parse::<i64>().is_ok() => code.clone(),
        _ => return Err(ComgateError::NonNumericCode { endpoint, body: body.to_owned() }),
    };
    let fields: BTreeMap<String, String> = pairs.into_iter().collect();

    if code != SUCCESS_CODE {
        let message = fields
            .get("message")
            .filter(|message| !message.is_empty())
            .cloned()
            .unwrap_or_else(|| body.to_owned());
        return Err(ComgateError::Rejected { endpoint, code, message });
    }

    Ok(GatewayResponse { fields })
}

//! Request and result types for gateway operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment method selector sent when the caller does not choose one.
pub const DEFAULT_METHOD: &str = "ALL";

/// Merchant-side payment reference (`refId`), either textual or numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceId {
    /// Numeric reference, e.g. an order number.
    Number(i64),
    /// Free-form reference.
    Text(String),
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ReferenceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ReferenceId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for ReferenceId {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u64> for ReferenceId {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for ReferenceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ReferenceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parameters for [`ComgateClient::create_payment`](crate::ComgateClient::create_payment).
///
/// # Examples
///
/// ```
/// use comgate_client::CreatePaymentParams;
///
/// let params = CreatePaymentParams::new(12345, 100, "FooBar").with_method("CARD_CZ_CSOB_2");
/// assert_eq!(params.method(), "CARD_CZ_CSOB_2");
/// assert_eq!(CreatePaymentParams::new("order-7", 2500, "Tea").method(), "ALL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentParams {
    /// Merchant-side reference, sent as `refId`.
    pub reference_id: ReferenceId,
    /// Payment method code; `ALL` lets the payer choose.
    #[serde(default)]
    pub method: Option<String>,
    /// Price in the smallest currency unit (hellers for CZK).
    pub price: u64,
    /// Short product description shown to the payer.
    pub label: String,
}

impl CreatePaymentParams {
    /// Creates parameters with the default method.
    #[must_use]
    pub fn new(reference_id: impl Into<ReferenceId>, price: u64, label: impl Into<String>) -> Self {
        Self { reference_id: reference_id.into(), method: None, price, label: label.into() }
    }

    /// Restricts the payment to one method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Effective method code.
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.as_deref().filter(|m| !m.is_empty()).unwrap_or(DEFAULT_METHOD)
    }
}

/// Payment created by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPayment {
    /// Gateway transaction identifier.
    pub trans_id: String,
    /// URL the payer is sent to.
    pub redirect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_id_display() {
        assert_eq!(ReferenceId::from(12345_i64).to_string(), "12345");
        assert_eq!(ReferenceId::from("order-1").to_string(), "order-1");
        assert_eq!(ReferenceId::from(String::from("x")).to_string(), "x");
        assert_eq!(ReferenceId::from(7_u32), ReferenceId::Number(7));
        assert_eq!(ReferenceId::from(12345), ReferenceId::Number(12345));
    }

    #[test]
    fn test_reference_id_large_u64_falls_back_to_text() {
        assert_eq!(ReferenceId::from(42_u64), ReferenceId::Number(42));
        assert_eq!(ReferenceId::from(u64::MAX), ReferenceId::Text(u64::MAX.to_string()));
    }

    #[test]
    fn test_method_defaults_to_all() {
        let params = CreatePaymentParams::new(1_i64, 100, "FooBar");
        assert_eq!(params.method(), DEFAULT_METHOD);

        let empty = CreatePaymentParams { method: Some(String::new()), ..params.clone() };
        assert_eq!(empty.method(), DEFAULT_METHOD);

        let card = params.with_method("CARD_CZ_CSOB_2");
        assert_eq!(card.method(), "CARD_CZ_CSOB_2");
    }

    #[test]
    fn test_params_deserialize_untagged_reference() {
        let numeric: CreatePaymentParams =
            toml::from_str("reference_id = 12345\nprice = 100\nlabel = \"FooBar\"").unwrap();
        assert_eq!(numeric.reference_id, ReferenceId::Number(12345));
        assert!(numeric.method.is_none());

        let textual: CreatePaymentParams =
            toml::from_str("reference_id = \"A-1\"\nprice = 1\nlabel = \"x\"").unwrap();
        assert_eq!(textual.reference_id, ReferenceId::Text("A-1".to_owned()));
    }
}

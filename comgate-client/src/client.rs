//! Comgate gateway client.
//!
//! [`ComgateClient`] owns the immutable configuration and a pooled HTTP
//! transport. Every operation merges the global parameters into its own, POSTs
//! one form-encoded request and normalises the answer through
//! [`parse_response`].

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ComgateConfig,
    error::{ComgateError, Result},
    form::FormParams,
    models::{CreatePaymentParams, CreatedPayment},
    response::{Endpoint, GatewayResponse, parse_response},
    transport::HttpTransport,
};

/// Client for the Comgate payment gateway.
///
/// The client is immutable after construction and cheap to clone; concurrent
/// calls share no mutable state.
///
/// # Examples
///
/// ```rust,no_run
/// use comgate_client::{ComgateClient, ComgateConfig, CreatePaymentParams};
///
/// # async fn example() -> comgate_client::Result<()> {
/// let client = ComgateClient::new(ComgateConfig::new(123_456, "x7Y2bR9kLm"))?;
///
/// let payment = client.create_payment(&CreatePaymentParams::new(12345, 100, "FooBar")).await?;
/// println!("send payer to {}", payment.redirect);
///
/// let status = client.payment_status(&payment.trans_id).await?;
/// println!("status: {:?}", status.get("status"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ComgateClient {
    config: Arc<ComgateConfig>,
    transport: HttpTransport,
}

impl ComgateClient {
    /// Validates `config` and builds a client with its own HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] for invalid configuration, or
    /// [`ComgateError::HttpError`] if the HTTP client cannot be built.
    pub fn new(config: ComgateConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Ok(Self { config: Arc::new(config), transport })
    }

    /// Builds a client on top of an existing transport.
    ///
    /// The `http` section of `config` is ignored; the transport's own settings apply.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::ConfigError`] for invalid configuration.
    pub fn with_transport(config: ComgateConfig, transport: HttpTransport) -> Result<Self> {
        config.validate()?;
        Ok(Self { config: Arc::new(config), transport })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ComgateConfig {
        &self.config
    }

    /// Parameters sent with every request.
    #[must_use]
    pub fn global_params(&self) -> FormParams {
        let config = &self.config;
        FormParams::new()
            .with("secret", config.secret.expose_secret())
            .with("test", config.test)
            .with("merchant", config.merchant_id)
            .with("country", &config.country)
            .with("lang", &config.language)
            .with("curr", &config.currency)
    }

    /// Global parameters overlaid with `params`; `params` wins on collision.
    #[must_use]
    pub fn merge_global_params(&self, params: FormParams) -> FormParams {
        self.global_params().merge(params)
    }

    /// Creates a payment and returns where to send the payer.
    ///
    /// Sends `prepareOnly=true`, `refId`, `method`, `price` and `label`.
    ///
    /// # Errors
    ///
    /// Any gateway error from [`parse_response`], [`ComgateError::MalformedResponse`]
    /// if the success response lacks `transId` or `redirect`, or a transport error.
    #[instrument(skip(self, params), fields(ref_id = %params.reference_id, price = params.price))]
    pub async fn create_payment(&self, params: &CreatePaymentParams) -> Result<CreatedPayment> {
        let request = FormParams::new()
            .with("prepareOnly", true)
            .with("refId", &params.reference_id)
            .with("method", params.method())
            .with("price", params.price)
            .with("label", &params.label);

        let response = self.call_api(Endpoint::Create, request).await?;

        let trans_id = required_field(&response, Endpoint::Create, "transId")?;
        let redirect = required_field(&response, Endpoint::Create, "redirect")?;

        info!(trans_id = %trans_id, "payment created");
        Ok(CreatedPayment { trans_id, redirect })
    }

    /// Queries the state of a payment.
    ///
    /// # Errors
    ///
    /// Any gateway error from [`parse_response`] or a transport error.
    #[instrument(skip(self))]
    pub async fn payment_status(&self, trans_id: &str) -> Result<GatewayResponse> {
        self.call_api(Endpoint::Status, FormParams::new().with("transId", trans_id)).await
    }

    /// Cancels a pending payment.
    ///
    /// The gateway labels this response `text/html`; it is accepted here and
    /// nowhere else.
    ///
    /// # Errors
    ///
    /// Any gateway error from [`parse_response`] or a transport error.
    #[instrument(skip(self))]
    pub async fn cancel_payment(&self, trans_id: &str) -> Result<GatewayResponse> {
        self.call_api(Endpoint::Cancel, FormParams::new().with("transId", trans_id)).await
    }

    /// Refunds `amount` (smallest currency unit) of a paid payment.
    ///
    /// # Errors
    ///
    /// Any gateway error from [`parse_response`] or a transport error.
    #[instrument(skip(self))]
    pub async fn refund(&self, trans_id: &str, amount: u64) -> Result<GatewayResponse> {
        let request = FormParams::new().with("transId", trans_id).with("amount", amount);
        self.call_api(Endpoint::Refund, request).await
    }

    /// Lists available payment methods.
    ///
    /// Always fails: the `methods` endpoint answers in XML, which this client does
    /// not parse. No request is sent.
    ///
    /// # Errors
    ///
    /// Always returns [`ComgateError::NotImplemented`].
    pub fn available_payment_methods(&self) -> Result<GatewayResponse> {
        Err(ComgateError::NotImplemented(
            "payment methods listing, the gateway answers in XML",
        ))
    }

    /// Sends one request and normalises the response.
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn call_api(&self, endpoint: Endpoint, params: FormParams) -> Result<GatewayResponse> {
        let url = self.config.endpoint_url(endpoint)?;
        let body = self.merge_global_params(params).encode()?;

        debug!(test = self.config.test, "sending gateway request");
        let response = self.transport.post_form(&url, body).await?;
        debug!(status = response.status, body_len = response.body.len(), "gateway answered");

        parse_response(endpoint, &response.content_type, &response.body).inspect_err(|e| {
            warn!(error = %e, code = e.code(), "gateway request failed");
        })
    }
}

fn required_field(response: &GatewayResponse, endpoint: Endpoint, key: &str) -> Result<String> {
    response.get(key).filter(|value| !value.is_empty()).map(str::to_owned).ok_or_else(|| {
        ComgateError::MalformedResponse { endpoint, detail: format!("missing '{key}'") }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ComgateClient {
        ComgateClient::new(ComgateConfig::new(123_456, "s3cret")).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = ComgateClient::new(ComgateConfig::new(0, "s3cret"));
        assert!(matches!(result, Err(ComgateError::ConfigError(_))));
    }

    #[test]
    fn test_global_params() {
        let params = client().global_params();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, [
            ("secret", "s3cret"),
            ("test", "true"),
            ("merchant", "123456"),
            ("country", "CZ"),
            ("lang", "cs"),
            ("curr", "CZK"),
        ]);
    }

    #[test]
    fn test_live_mode_sends_false() {
        let client =
            ComgateClient::new(ComgateConfig::new(1, "s").with_test_mode(false)).unwrap();
        assert_eq!(client.global_params().get("test"), Some("false"));
    }

    #[test]
    fn test_merge_call_params_win() {
        let merged = client().merge_global_params(
            FormParams::new().with("transId", "T1").with("test", "false").with("curr", "EUR"),
        );
        assert_eq!(merged.get("transId"), Some("T1"));
        assert_eq!(merged.get("test"), Some("false"));
        assert_eq!(merged.get("curr"), Some("EUR"));
        assert_eq!(merged.get("secret"), Some("s3cret"));
        assert_eq!(merged.len(), 7);
    }

    #[test]
    fn test_available_payment_methods_not_implemented() {
        let result = client().available_payment_methods();
        assert!(matches!(result, Err(ComgateError::NotImplemented(_))));
    }

    #[test]
    fn test_client_debug_hides_secret() {
        let debug_str = format!("{:?}", client());
        assert!(debug_str.contains("ComgateClient"));
        assert!(!debug_str.contains("s3cret"));
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<ComgateClient>();
    }

    #[test]
    fn test_required_field() {
        let response = parse_response(
            Endpoint::Create,
            crate::response::FORM_URLENCODED,
            "code=0&transId=T1&redirect=",
        )
        .unwrap();
        assert_eq!(required_field(&response, Endpoint::Create, "transId").unwrap(), "T1");
        assert!(matches!(
            required_field(&response, Endpoint::Create, "redirect"),
            Err(ComgateError::MalformedResponse { .. })
        ));
    }
}

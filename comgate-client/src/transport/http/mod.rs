//! reqwest-backed transport.

use std::sync::LazyLock;

use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{Span, debug, field, instrument};
use url::Url;

use super::{TransportResponse, config::HttpConfig};
use crate::{
    error::{ComgateError, Result},
    response::FORM_URLENCODED,
};

/// Client shared by every default transport, so they reuse one connection pool.
#[allow(clippy::expect_used, reason = "client builder only fails on TLS backend init")]
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = HttpConfig::default();
    Client::builder()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .expect("Failed to create default HTTP client")
});

/// Form-POST transport over a pooled reqwest client.
///
/// Cloning is cheap: clones share the same connection pool.
///
/// # Examples
///
/// ```
/// use comgate_client::transport::{HttpConfig, HttpTransport};
///
/// let config = HttpConfig { timeout_secs: 15, ..Default::default() };
/// let _transport = HttpTransport::with_config(&config)?;
/// # Ok::<(), comgate_client::ComgateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Creates a transport backed by the shared client with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates a transport with its own client using the timeouts in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::HttpError`] if the client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ComgateError::HttpError)?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// POSTs a form-encoded body and returns the raw response.
    ///
    /// The HTTP status is recorded on the span.
    ///
    /// # Errors
    ///
    /// Returns [`ComgateError::HttpError`] on connection failure, timeout, a non-2xx
    /// status, or a body that cannot be read as text.
    #[instrument(
        skip(self, url, body),
        fields(path = %url.path(), body_len = body.len(), status = field::Empty)
    )]
    pub async fn post_form(&self, url: &Url, body: String) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        Span::current().record("status", status);
        let response = response.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let body = response.text().await?;

        debug!(content_type = %content_type, "transport response received");

        Ok(TransportResponse { status, content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, header, method, path},
    };

    use super::*;

    #[test]
    fn test_with_config_builds_client() {
        let config = HttpConfig { timeout_secs: 5, connect_timeout_secs: 2 };
        assert!(HttpTransport::with_config(&config).is_ok());
    }

    #[test]
    fn test_from_client() {
        let transport = HttpTransport::from_client(Client::new());
        assert!(format!("{transport:?}").contains("HttpTransport"));
    }

    #[tokio::test]
    async fn test_post_form_sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1.0/status"))
            .and(header("content-type", FORM_URLENCODED))
            .and(body_string("transId=T1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("code=0&transId=T1", FORM_URLENCODED),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/v1.0/status", server.uri())).unwrap();
        let response =
            HttpTransport::new().post_form(&url, "transId=T1".to_owned()).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, FORM_URLENCODED);
        assert_eq!(response.body, "code=0&transId=T1");
    }

    #[tokio::test]
    async fn test_post_form_missing_content_type_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let response = HttpTransport::new().post_form(&url, String::new()).await.unwrap();
        assert_eq!(response.content_type, "");
        assert_eq!(response.body, "");
    }

    #[tokio::test]
    async fn test_post_form_non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let result = HttpTransport::new().post_form(&url, String::new()).await;
        match result {
            Err(ComgateError::HttpError(e)) => {
                assert_eq!(e.status().map(|s| s.as_u16()), Some(503));
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }
}

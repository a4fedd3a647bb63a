//! HTTP transport layer.
//!
//! The transport knows nothing about Comgate semantics: it POSTs a form body and
//! hands back the status, content type and body text. Response validation lives
//! in [`crate::response`].

pub mod config;
pub mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Raw response from a transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header value, empty when the header was absent.
    pub content_type: String,
    /// Response body decoded as text.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_response_creation() {
        let response = TransportResponse {
            status: 200,
            content_type: "text/html".to_owned(),
            body: "code=0".to_owned(),
        };

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "text/html");
        assert_eq!(response.body, "code=0");
    }

    #[test]
    fn test_transport_response_debug() {
        let response =
            TransportResponse { status: 200, content_type: String::new(), body: String::new() };
        let debug_str = format!("{response:?}");
        assert!(debug_str.contains("TransportResponse"));
        assert!(debug_str.contains("200"));
    }
}

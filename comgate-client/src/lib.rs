//! Comgate Client: async bindings for the Comgate payment gateway
//!
//! A small client for the [Comgate](https://www.comgate.cz) HTTP API: create a
//! payment, query its status, cancel it, or refund it.
//!
//! # Protocol
//!
//! ```text
//! ┌──────────────────┐  POST /v1.0/{create|status|cancel|refund}
//! │  ComgateClient   │  application/x-www-form-urlencoded
//! │  (global params  │─────────────────────────────────────────┐
//! │   + call params) │                                         │
//! └────────▲─────────┘                                ┌────────▼────────┐
//!          │ GatewayResponse / ComgateError           │ Comgate gateway │
//!          └──────────────────────────────────────────│                 │
//!             code=0&transId=...&redirect=...         └─────────────────┘
//! ```
//!
//! Every request carries the merchant credentials and locale (`secret`, `test`,
//! `merchant`, `country`, `lang`, `curr`); call-specific parameters override them
//! on collision. Responses are form-encoded with a `code` field, where `0` means
//! success and anything else is returned as [`ComgateError::Rejected`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use comgate_client::{ComgateClient, ComgateConfig, CreatePaymentParams};
//!
//! # async fn example() -> comgate_client::Result<()> {
//! let config = ComgateConfig::new(123_456, "x7Y2bR9kLm");
//! let client = ComgateClient::new(config)?;
//!
//! let payment = client.create_payment(&CreatePaymentParams::new(12345, 100, "FooBar")).await?;
//! let status = client.payment_status(&payment.trans_id).await?;
//! assert_eq!(status.code(), "0");
//!
//! client.cancel_payment(&payment.trans_id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use comgate_client::{ComgateClient, ComgateError};
//!
//! # async fn example(client: ComgateClient) {
//! match client.refund("AB12-CD34-EF56", 100).await {
//!     Ok(response) => println!("refunded: {:?}", response.message()),
//!     Err(ComgateError::Rejected { code, message, .. }) => {
//!         eprintln!("gateway said no ({code}): {message}");
//!     }
//!     Err(ComgateError::HttpError(e)) => eprintln!("network error: {e}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the gateway client and its operations
//! - [`config`]: credentials and environment
//! - [`response`]: endpoints, content-type rules and response parsing
//! - [`form`]: form-encoded parameter sets
//! - [`models`]: request and result types
//! - [`transport`]: reqwest-based HTTP transport
//! - [`error`]: error types
//!
//! # Logging
//!
//! Operations emit [`tracing`] spans and events. The merchant secret is never
//! recorded.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod response;
pub mod transport;

pub use client::ComgateClient;
pub use config::ComgateConfig;
pub use error::{ComgateError, Result};
pub use form::FormParams;
pub use models::{CreatePaymentParams, CreatedPayment, ReferenceId};
pub use response::{Endpoint, GatewayResponse, parse_response};

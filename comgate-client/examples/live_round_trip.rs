//! Creates a test payment, checks its status and cancels it.
//!
//! # Running this example
//!
//! ```bash
//! export COMGATE_MERCHANT_ID=123456
//! export COMGATE_SECRET=...
//! RUST_LOG=comgate_client=debug cargo run --example live_round_trip
//! ```
//!
//! Set `LOG_FORMAT=json` for JSON logs on stderr.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::{env, io};

use comgate_client::{ComgateClient, ComgateConfig, ComgateError, CreatePaymentParams};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var("LOG_FORMAT").unwrap_or_default().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

fn load_config() -> Result<ComgateConfig, Box<dyn std::error::Error>> {
    let merchant_id: u64 = env::var("COMGATE_MERCHANT_ID")
        .map_err(|_| "COMGATE_MERCHANT_ID not set")?
        .parse()
        .map_err(|e| format!("COMGATE_MERCHANT_ID is not a number: {e}"))?;
    let secret = env::var("COMGATE_SECRET").map_err(|_| "COMGATE_SECRET not set")?;

    Ok(ComgateConfig::new(merchant_id, secret).with_test_mode(true))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(LogFormat::from_env());

    let client = ComgateClient::new(load_config()?)?;

    let payment = client.create_payment(&CreatePaymentParams::new(12345, 100, "FooBar")).await?;
    println!("Created payment {}", payment.trans_id);
    println!("  Redirect payer to: {}", payment.redirect);

    let status = client.payment_status(&payment.trans_id).await?;
    println!("Status response:");
    for (key, value) in status.iter() {
        println!("  {key} = {value}");
    }

    match client.refund(&payment.trans_id, 100).await {
        Ok(response) => println!("Refund accepted: {:?}", response.message()),
        Err(ComgateError::Rejected { code, message, .. }) => {
            println!("Refund rejected as expected for an unpaid payment ({code}): {message}");
        }
        Err(e) => return Err(e.into()),
    }

    let cancelled = client.cancel_payment(&payment.trans_id).await?;
    println!("Cancelled: code {}", cancelled.code());

    match client.available_payment_methods() {
        Ok(methods) => println!("Methods: {:?}", methods),
        Err(e) => eprintln!("Payment methods unavailable: {e}"),
    }

    Ok(())
}

//! Carrier-agnostic SMS drivers.
//!
//! A caller builds an [`OutgoingMessage`] and hands it to any [`Driver`]; the
//! driver adapts it to its carrier's wire format, makes one HTTP call through
//! an injectable [`HttpTransport`], and translates the carrier's status codes
//! into a [`NormalizedError`] with a closed [`ErrorKind`].
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks, and a driver layer orchestrating requests.
//!
//! ```rust,no_run
//! use smsgate::{Credentials, Driver, OutgoingMessage, RawPhoneNumber, Sms77Driver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = Sms77Driver::builder(Credentials::new("user", "...")?).build()?;
//!     let message = OutgoingMessage::new("hello").to(RawPhoneNumber::new("+491701234567")?);
//!     let _resp = driver.send(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod domain;
pub mod driver;
mod transport;

pub use domain::{
    ComposedMessage, ErrorKind, IncomingMessage, ListOptions, MessageId, MessageType,
    NormalizedError, OutgoingMessage, Password, PhoneNumber, RawPhoneNumber, SenderId, Username,
    ValidationError, addresses_to_wire_format,
};
pub use driver::{
    BoxError, Credentials, Driver, DriverError, HttpRequest, HttpResponse, HttpTransport,
    LogDriver, Method, ReqwestTransport, Sms77Driver, Sms77DriverBuilder,
};

//! Driver layer: the carrier-agnostic contract and its implementations.

mod http;
mod log;
mod sms77;

use std::future::Future;
use std::pin::Pin;

use crate::domain::{
    IncomingMessage, ListOptions, MessageId, NormalizedError, OutgoingMessage, ValidationError,
};

pub use http::{BoxError, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use log::LogDriver;
pub use sms77::{Credentials, DEFAULT_BASE_URL, Sms77Driver, Sms77DriverBuilder};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
/// Errors returned by a [`Driver`].
///
/// Carrier-reported failures always arrive as a [`NormalizedError`]; the raw
/// carrier code is kept inside it.
pub enum DriverError {
    /// The message failed composition; nothing was sent.
    #[error("invalid message: {0}")]
    InvalidMessage(#[from] ValidationError),

    /// The carrier refused the message.
    #[error("message not sent: {0}")]
    NotSent(NormalizedError),

    /// The carrier answered a receive-path request with a status code.
    #[error("carrier rejected request: {0}")]
    Carrier(NormalizedError),

    #[error("message not found: {id}")]
    NotFound { id: String },

    /// The driver lacks this capability.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Network-layer failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code on a receive-path request.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl DriverError {
    /// The normalized carrier failure, when the carrier reported one.
    pub fn normalized(&self) -> Option<&NormalizedError> {
        match self {
            Self::NotSent(err) | Self::Carrier(err) => Some(err),
            _ => None,
        }
    }
}

/// Sends and receives messages through one carrier.
///
/// Drivers hold only immutable configuration, so one instance can serve
/// concurrent callers. Each operation makes at most one transport call and is
/// never retried.
pub trait Driver: Send + Sync {
    /// Short carrier name used in logs.
    fn name(&self) -> &'static str;

    /// Compose and submit `message`, returning the carrier's raw reply.
    ///
    /// Composition errors are returned before any network call. If the returned
    /// future is dropped while the request is in flight, delivery is
    /// indeterminate: the carrier may or may not have accepted the message.
    /// Calling `send` again submits a new message.
    fn send<'a>(
        &'a self,
        message: &'a OutgoingMessage,
    ) -> BoxFuture<'a, Result<HttpResponse, DriverError>>;

    /// Fetch the carrier's inbox, in the order the carrier returns it.
    fn list_messages<'a>(
        &'a self,
        options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<IncomingMessage>, DriverError>>;

    /// Fetch one message, failing with [`DriverError::NotFound`] if the carrier has no such record.
    fn get_message<'a>(
        &'a self,
        id: &'a MessageId,
    ) -> BoxFuture<'a, Result<IncomingMessage, DriverError>>;

    /// Parse a message pushed by the carrier to a caller endpoint.
    fn receive(&self, raw: &str) -> Result<IncomingMessage, DriverError>;
}

pub(crate) fn ensure_http_success(response: HttpResponse) -> Result<HttpResponse, DriverError> {
    if (200..=299).contains(&response.status) {
        return Ok(response);
    }
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    Err(DriverError::HttpStatus {
        status: response.status,
        body,
    })
}

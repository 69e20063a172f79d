use crate::domain::{IncomingMessage, ListOptions, MessageId, OutgoingMessage};
use crate::driver::http::HttpResponse;
use crate::driver::{BoxFuture, Driver, DriverError};

const NAME: &str = "log";

#[derive(Debug, Clone, Copy, Default)]
/// Driver that records outgoing messages through `tracing` instead of sending them.
///
/// Messages are still composed and validated, so it catches the same caller
/// errors a real driver would. It has no inbox.
pub struct LogDriver;

impl LogDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for LogDriver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn send<'a>(
        &'a self,
        message: &'a OutgoingMessage,
    ) -> BoxFuture<'a, Result<HttpResponse, DriverError>> {
        Box::pin(async move {
            let composed = message.compose()?;
            tracing::info!(
                driver = NAME,
                recipients = message.recipients().len(),
                chars = composed.text.chars().count(),
                "message logged, not sent"
            );
            tracing::debug!(
                driver = NAME,
                to = %composed.to,
                from = composed.from.as_ref().map(|from| from.as_str()),
                text = %composed.text,
                "logged message content"
            );
            Ok(HttpResponse {
                status: 200,
                body: String::new(),
            })
        })
    }

    fn list_messages<'a>(
        &'a self,
        _options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<IncomingMessage>, DriverError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_message<'a>(
        &'a self,
        id: &'a MessageId,
    ) -> BoxFuture<'a, Result<IncomingMessage, DriverError>> {
        Box::pin(async move {
            Err(DriverError::NotFound {
                id: id.as_str().to_owned(),
            })
        })
    }

    fn receive(&self, _raw: &str) -> Result<IncomingMessage, DriverError> {
        Err(DriverError::UnsupportedOperation(
            "log driver does not receive messages",
        ))
    }
}

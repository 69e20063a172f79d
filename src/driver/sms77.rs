use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    IncomingMessage, ListOptions, MessageId, MessageType, OutgoingMessage, Password, Username,
    ValidationError,
};
use crate::driver::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::driver::{BoxFuture, Driver, DriverError, ensure_http_success};
use crate::transport::{self, SMS77_STATUS_TABLE};

/// Gateway base URL used unless overridden.
pub const DEFAULT_BASE_URL: &str = "http://gateway.sms77.de/";

const NAME: &str = "sms77";
const HTTP_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone)]
/// sms77 account credentials, sent as the `u`/`p` form fields.
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((Username::FIELD.to_owned(), self.username.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Clone)]
/// Builder for [`Sms77Driver`].
pub struct Sms77DriverBuilder {
    credentials: Credentials,
    base_url: String,
    debug: bool,
    message_type: MessageType,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl Sms77DriverBuilder {
    /// Create a builder with the default gateway URL, `direct` routing and debug off.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            debug: false,
            message_type: MessageType::default(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the gateway base URL. A trailing `/` is added if missing.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Ask the gateway to accept messages without delivering them.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use `transport` instead of the built-in `reqwest` client.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`Sms77Driver`].
    pub fn build(self) -> Result<Sms77Driver, DriverError> {
        let mut base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(DriverError::InvalidEndpoint(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let texts_url = base_url.join(transport::TEXTS_PATH)?;

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| DriverError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(Sms77Driver {
            credentials: self.credentials,
            send_url: base_url,
            texts_url,
            debug: self.debug,
            message_type: self.message_type,
            http,
        })
    }
}

#[derive(Clone)]
/// Driver for the sms77 HTTP gateway.
///
/// Sending posts a form to the gateway root and succeeds only when the reply
/// body is `100`; every other reply is normalized through the sms77 status
/// table. Incoming messages are polled from the XML inbox under `text`.
/// Push delivery is not supported.
pub struct Sms77Driver {
    credentials: Credentials,
    send_url: Url,
    texts_url: Url,
    debug: bool,
    message_type: MessageType,
    http: Arc<dyn HttpTransport>,
}

impl Sms77Driver {
    /// Start building a driver with custom settings.
    pub fn builder(credentials: Credentials) -> Sms77DriverBuilder {
        Sms77DriverBuilder::new(credentials)
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    fn auth_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.credentials.push_form_params(&mut params);
        params
    }

    fn message_url(&self, id: &MessageId) -> Result<Url, DriverError> {
        let mut url = self.texts_url.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.push(id.as_str());
            }
            Err(()) => {
                return Err(DriverError::InvalidEndpoint(
                    url::ParseError::RelativeUrlWithCannotBeABaseBase,
                ));
            }
        }
        Ok(url)
    }

    async fn fetch(
        &self,
        url: &Url,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse, DriverError> {
        tracing::debug!(driver = NAME, endpoint = %url, "fetching inbox");
        self.http
            .execute(HttpRequest::get(url.as_str(), params))
            .await
            .map_err(DriverError::Transport)
    }
}

fn decode_inbox(body: &str) -> Result<Vec<IncomingMessage>, DriverError> {
    if transport::is_status_code(body) {
        SMS77_STATUS_TABLE
            .classify(body)
            .map_err(DriverError::Carrier)?;
        return Ok(Vec::new());
    }
    transport::decode_texts_xml(body).map_err(|err| DriverError::Parse(Box::new(err)))
}

impl Driver for Sms77Driver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn send<'a>(
        &'a self,
        message: &'a OutgoingMessage,
    ) -> BoxFuture<'a, Result<HttpResponse, DriverError>> {
        Box::pin(async move {
            let composed = message.compose()?;

            let mut params = self.auth_params();
            params.extend(transport::encode_send_form(
                &composed,
                self.message_type,
                self.debug,
            ));

            tracing::debug!(
                driver = NAME,
                endpoint = %self.send_url,
                recipients = message.recipients().len(),
                debug = self.debug,
                "dispatching message"
            );
            let response = self
                .http
                .execute(HttpRequest::post(self.send_url.as_str(), params))
                .await
                .map_err(DriverError::Transport)?;

            if let Err(err) = SMS77_STATUS_TABLE.classify(&response.body) {
                tracing::debug!(
                    driver = NAME,
                    kind = %err.kind,
                    carrier_code = %err.carrier_code,
                    "message rejected by carrier"
                );
                return Err(DriverError::NotSent(err));
            }
            Ok(response)
        })
    }

    fn list_messages<'a>(
        &'a self,
        options: &'a ListOptions,
    ) -> BoxFuture<'a, Result<Vec<IncomingMessage>, DriverError>> {
        Box::pin(async move {
            let mut params = self.auth_params();
            params.extend(options.params.iter().cloned());

            let response = self.fetch(&self.texts_url, params).await?;
            let response = ensure_http_success(response)?;
            decode_inbox(&response.body)
        })
    }

    fn get_message<'a>(
        &'a self,
        id: &'a MessageId,
    ) -> BoxFuture<'a, Result<IncomingMessage, DriverError>> {
        Box::pin(async move {
            let url = self.message_url(id)?;
            let response = self.fetch(&url, self.auth_params()).await?;
            if response.status == HTTP_NOT_FOUND {
                return Err(DriverError::NotFound {
                    id: id.as_str().to_owned(),
                });
            }
            let response = ensure_http_success(response)?;

            decode_inbox(&response.body)?
                .into_iter()
                .next()
                .ok_or_else(|| DriverError::NotFound {
                    id: id.as_str().to_owned(),
                })
        })
    }

    fn receive(&self, _raw: &str) -> Result<IncomingMessage, DriverError> {
        Err(DriverError::UnsupportedOperation(
            "sms77 push messages are not supported",
        ))
    }
}

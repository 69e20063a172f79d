//! The HTTP capability drivers are built on.

use std::error::Error as StdError;

use crate::driver::BoxFuture;

/// Error produced by an [`HttpTransport`], passed through to callers untouched.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound call. `params` become the form body for `POST` and the
/// query string for `GET`.
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            params,
        }
    }

    pub fn post(url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status and body exactly as the carrier returned them.
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs network calls on behalf of a driver.
///
/// Implementations own connection handling, TLS and timeouts. Drivers make
/// exactly one `execute` call per operation and never retry.
pub trait HttpTransport: Send + Sync {
    fn execute<'a>(&'a self, request: HttpRequest)
    -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone, Default)]
/// [`HttpTransport`] backed by a `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let builder = match request.method {
                Method::Get => self.client.get(&request.url).query(&request.params),
                Method::Post => self.client.post(&request.url).form(&request.params),
            };
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

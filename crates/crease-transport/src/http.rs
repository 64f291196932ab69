//! HTTP transport implementation using `reqwest`.

use reqwest::{Client, Url};

use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// A [`Transport`] that sends requests to one API base URL with `reqwest`.
///
/// The client is built without a request timeout; a hung server is only
/// noticed when the platform's TCP stack gives up.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for the API at `base_url` (e.g.
    /// `http://localhost:8080`). A trailing slash is ignored.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidUrl`] if `base_url` doesn't parse
    /// and [`TransportError::Setup`] if the client can't be built.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        tracing::debug!(base_url = trimmed, "http transport ready");
        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let joined = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&joined).map_err(|e| TransportError::InvalidUrl(format!("{joined}: {e}")))
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                error = %e,
                "request failed before a response arrived"
            );
            TransportError::Unreachable(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status,
            "http exchange complete"
        );

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

//! The API gateway: one place where requests are built, sent, and their
//! failures classified.
//!
//! Every call goes through [`ApiGateway::exchange`]:
//!   1. Attach `Content-Type` and, for authenticated routes with a token,
//!      `Authorization: Bearer <token>`
//!   2. Send through the [`Transport`]
//!   3. On a non-2xx status, pull a message out of the body and fail

use crease_protocol::{Codec, Endpoint, ErrorBody, JsonCodec, ProtocolError};
use crease_transport::{HttpRequest, Method, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// Sends requests to the academy API.
pub struct ApiGateway<T: Transport, C: Codec = JsonCodec> {
    transport: T,
    codec: C,
}

impl<T: Transport> ApiGateway<T, JsonCodec> {
    /// Creates a gateway that speaks JSON.
    pub fn new(transport: T) -> Self {
        Self::with_codec(transport, JsonCodec)
    }
}

impl<T: Transport, C: Codec> ApiGateway<T, C> {
    /// Creates a gateway with a custom codec.
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self { transport, codec }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request with an untyped JSON body.
    ///
    /// Returns the decoded response, or `None` when the body is empty or
    /// not JSON (the health route answers in plain text).
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
        requires_auth: bool,
        token: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let body = body.map(|b| self.codec.encode(b)).transpose()?;
        let bytes = self
            .exchange(path, method, body, requires_auth, token)
            .await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(self.codec.decode(&bytes).ok())
    }

    /// Calls an endpoint and decodes its response into `R`.
    ///
    /// An empty body or one of the wrong shape is a protocol error.
    pub async fn call<B, R>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = body.map(|b| self.codec.encode(b)).transpose()?;
        let bytes = self
            .exchange(
                &endpoint.path(),
                endpoint.method(),
                body,
                endpoint.requires_auth(),
                token,
            )
            .await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            let detail = format!("{endpoint} returned an empty body");
            return Err(ProtocolError::InvalidMessage(detail).into());
        }
        Ok(self.codec.decode(&bytes)?)
    }

    /// Calls an endpoint without a body.
    pub async fn get<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        token: Option<&str>,
    ) -> Result<R, ApiError> {
        self.call(endpoint, None::<&()>, token).await
    }

    /// Performs one exchange and returns the body of a 2xx response.
    pub async fn exchange(
        &self,
        path: &str,
        method: Method,
        body: Option<Vec<u8>>,
        requires_auth: bool,
        token: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut request = HttpRequest::new(method, path)
            .header("Content-Type", self.codec.content_type());
        if requires_auth {
            match token {
                Some(token) => {
                    request = request.header("Authorization", format!("Bearer {token}"));
                }
                None => {
                    tracing::debug!(%method, path, "authenticated route called without a token");
                }
            }
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!(%method, path, error = %e, "request failed");
        })?;

        if response.is_success() {
            tracing::debug!(%method, path, status = response.status, "request succeeded");
            return Ok(response.body);
        }

        let message = self.error_message(response.status, &response.body);
        tracing::info!(%method, path, status = response.status, %message, "request rejected");
        Err(ApiError::from_status(response.status, message))
    }

    /// `error`, then `message`, then a generic line naming the status.
    fn error_message(&self, status: u16, body: &[u8]) -> String {
        self.codec
            .decode::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| format!("Request failed with status {status}"))
    }
}

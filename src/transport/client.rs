use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::{ApiConfig, SecretString};
use crate::transport::error::TransportError;

/// Supplies the bearer token current at call time.
///
/// The session store implements this so the transport reads the token the
/// moment a request is built, never a cached copy.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<SecretString>;
}

/// A fixed token, or none. Used by hosts that hold a token outside a session.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    pub fn new(token: Option<SecretString>) -> Self {
        Self(token)
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.0.clone()
    }
}

/// Request body variants.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Form),
}

/// One outgoing call: method, endpoint relative to the base URL, and extras.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, TransportError> {
        let value = serde_json::to_value(body)
            .map_err(|e| TransportError::request_build(format!("Failed to encode request body: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// HTTP client bound to one API base URL.
///
/// Cheap to clone; clones share the connection pool and token source.
#[derive(Clone)]
pub struct TransportClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    tokens: Arc<dyn TokenSource>,
}

impl TransportClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Perform one call with an optional JSON body and extra headers.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let mut req = ApiRequest::new(method, endpoint);
        if let Some(body) = body {
            req.body = RequestBody::Json(body);
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req).await
    }

    /// Perform one call and decode the success payload into `T`.
    ///
    /// An empty success body decodes as JSON `null`, so `()` and `Option<_>`
    /// work for endpoints that return nothing.
    pub async fn send<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, TransportError> {
        let request_id = Uuid::new_v4();
        let ApiRequest {
            method,
            endpoint,
            query,
            headers,
            body,
        } = req;

        let mut builder = self.client.request(method.clone(), self.url(&endpoint));

        if let Some(token) = self.tokens.bearer_token().filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token.expose());
        }

        for (name, value) in &headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::request_build(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::request_build(format!("Invalid value for header '{}': {}", name, e))
            })?;
            builder = builder.header(header_name, header_value);
        }

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%request_id, %method, endpoint = %endpoint, "Sending request");

        let (status, bytes) = match timeout(self.timeout, execute(builder)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_builder() => {
                tracing::error!(%request_id, %method, endpoint = %endpoint, error = %e, "Failed to build request");
                return Err(TransportError::request_build(format!("Failed to build request: {}", e)));
            }
            Ok(Err(e)) => {
                let err = TransportError::network();
                tracing::error!(
                    %request_id,
                    %method,
                    endpoint = %endpoint,
                    error = %e,
                    "API request failed: no response"
                );
                return Err(err);
            }
            Err(_) => {
                let err = TransportError::network();
                tracing::error!(
                    %request_id,
                    %method,
                    endpoint = %endpoint,
                    timeout_secs = self.timeout.as_secs(),
                    "API request timed out"
                );
                return Err(err);
            }
        };

        if !status.is_success() {
            let err = TransportError::from_response(status.as_u16(), &bytes);
            if status.is_client_error() {
                tracing::warn!(
                    %request_id,
                    %method,
                    endpoint = %endpoint,
                    status = err.status(),
                    message = err.message(),
                    "API request rejected"
                );
            } else {
                tracing::error!(
                    %request_id,
                    %method,
                    endpoint = %endpoint,
                    status = err.status(),
                    message = err.message(),
                    "API request failed"
                );
            }
            return Err(err);
        }

        tracing::debug!(%request_id, status = status.as_u16(), bytes = bytes.len(), "Response received");

        decode(status, &bytes).inspect_err(|err| {
            tracing::error!(
                %request_id,
                %method,
                endpoint = %endpoint,
                status = err.status(),
                "Failed to decode response body"
            );
        })
    }
}

async fn execute(builder: reqwest::RequestBuilder) -> reqwest::Result<(StatusCode, Vec<u8>)> {
    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    Ok((status, bytes.to_vec()))
}

fn decode<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, TransportError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|_| TransportError::invalid_response(status.as_u16()))
}

//! HTTP transport for the HloPG backend
//!
//! [`HttpClient`] is the single seam every request goes through. [`Backend`]
//! sits on top of it: it joins paths onto the configured base URL, retries
//! idempotent GETs once, and unwraps the backend's `{success, ...}` envelope.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{HttpError, HttpResult};

/// HTTP method used by the backend contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// A file attached to a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart form body: plain text fields followed by file parts
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        });
        self
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// Fully described outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a request and return the raw status and body
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            query,
            body,
            bearer,
        } = request;

        debug!("{} {}", method.as_str(), url);

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
        };

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(multipart) => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in multipart.fields {
                    form = form.text(name, value);
                }
                for file in multipart.files {
                    let part =
                        reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
                    form = form.part(file.field, part);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(url.clone())
            } else {
                HttpError::Transport(format!("{} {} failed: {}", method.as_str(), url, e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Transport(format!("Reading response body: {}", e)))?;

        debug!("{} {} -> {} ({} bytes)", method.as_str(), url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

/// Check the status code and parse the body as JSON
pub fn decode_json(response: &HttpResponse) -> HttpResult<Value> {
    let parsed = serde_json::from_str::<Value>(&response.body);

    if !response.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(envelope_message)
            .unwrap_or_else(|| match response.body.trim() {
                "" => format!("HTTP {}", response.status),
                text => text.chars().take(200).collect(),
            });
        return Err(HttpError::Status {
            status: response.status,
            message,
        });
    }

    parsed.map_err(|e| HttpError::Decode(e.to_string()))
}

/// Decode a `{success, ...}` envelope; `success: false` becomes an error
///
/// Responses without a `success` field are accepted as-is.
pub fn decode_envelope(response: &HttpResponse) -> HttpResult<Value> {
    let value = decode_json(response)?;

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = envelope_message(&value).unwrap_or_else(|| "Request failed".to_string());
        return Err(HttpError::Rejected(message));
    }

    Ok(value)
}

fn envelope_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

/// REST backend handle shared by every repository
#[derive(Clone)]
pub struct Backend {
    http: Arc<dyn HttpClient>,
    base_url: String,
    retry_delay: Duration,
}

impl Backend {
    /// Create a backend over an arbitrary HTTP client
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str, retry_delay: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_delay,
        }
    }

    /// Create a reqwest-backed backend from configuration
    pub fn from_config(config: &ClientConfig) -> HttpResult<Self> {
        let http = ReqwestHttpClient::new(config.request_timeout())?;
        Ok(Self::new(
            Arc::new(http),
            &config.api_base_url,
            config.retry_delay(),
        ))
    }

    /// The underlying HTTP client, for requests outside the REST base URL
    pub fn http(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.http)
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a backend path and unwrap the envelope
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> HttpResult<Value> {
        let mut request = HttpRequest::get(self.url(path)).bearer(token);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        self.execute(request).await
    }

    /// POST a JSON body
    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> HttpResult<Value> {
        let request = HttpRequest::new(Method::Post, self.url(path))
            .body(RequestBody::Json(body))
            .bearer(token);
        self.execute(request).await
    }

    /// PUT a JSON body
    pub async fn put_json(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> HttpResult<Value> {
        let request = HttpRequest::new(Method::Put, self.url(path))
            .body(RequestBody::Json(body))
            .bearer(token);
        self.execute(request).await
    }

    /// POST a multipart form
    pub async fn post_multipart(
        &self,
        path: &str,
        body: MultipartBody,
        token: Option<&str>,
    ) -> HttpResult<Value> {
        let request = HttpRequest::new(Method::Post, self.url(path))
            .body(RequestBody::Multipart(body))
            .bearer(token);
        self.execute(request).await
    }

    /// Send a request; GETs get exactly one retry on a retryable failure
    async fn execute(&self, request: HttpRequest) -> HttpResult<Value> {
        let retry = (request.method == Method::Get).then(|| request.clone());

        match (self.send_once(request).await, retry) {
            (Err(err), Some(request)) if err.is_retryable() => {
                warn!("GET {} failed ({}), retrying once", request.url, err);
                tokio::time::sleep(self.retry_delay).await;
                self.send_once(request).await
            }
            (result, _) => result,
        }
    }

    async fn send_once(&self, request: HttpRequest) -> HttpResult<Value> {
        let response = self.http.send(request).await?;
        decode_envelope(&response)
    }
}

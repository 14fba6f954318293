use atelier_core::RequestError;
use atelier_model::ApiResponse;
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query pairs as produced by [`atelier_model::ListParams::to_query_pairs`].
pub type Query = [(&'static str, String)];

/// REST client for the contest platform API.
///
/// Every response is wrapped in the `{ status, data, error, message }`
/// envelope; helpers unwrap it and turn failures into [`RequestError`]s that
/// carry the server's own message when it sent one.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

/// Add `http://` when no scheme was given and drop trailing slashes, so
/// `localhost:8080/` and `http://localhost:8080` resolve the same.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let normalized = normalize_base_url(base_url);
        if normalized != base_url {
            debug!(from = base_url, to = %normalized, "normalized base URL");
        }
        let parsed = Url::parse(&normalized).map_err(|err| {
            RequestError::new(format!("Invalid server URL '{base_url}': {err}"))
        })?;
        if parsed.host_str().is_none() {
            return Err(RequestError::new(format!(
                "Invalid server URL '{base_url}': missing host"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                RequestError::new(format!("Failed to create HTTP client: {err}"))
            })?;

        info!(base_url = %normalized, "created API client");

        Ok(Self {
            client,
            base_url: normalized,
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token_store.read().await.clone()
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token_store.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map any non-2xx answer to a [`RequestError`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, RequestError> {
        let request = self.authorize(request).await;
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("session rejected by server, clearing token");
            self.set_token(None).await;
        }
        let body = response.text().await.unwrap_or_default();
        let err = error_from_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<R, RequestError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let envelope: ApiResponse<R> = response.json().await.map_err(|err| {
            warn!(error = %err, "undecodable response body");
            RequestError::with_status(status, "Unexpected response from server")
        })?;
        unwrap_envelope(status, envelope)
    }

    /// For endpoints whose payload the console does not need.
    async fn execute_empty(&self, request: RequestBuilder) -> Result<(), RequestError> {
        self.send(request).await.map(|_| ())
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<R, RequestError> {
        let url = self.build_url(path);
        debug!(%url, "GET");
        self.execute(self.client.get(&url).query(query)).await
    }

    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, RequestError> {
        let url = self.build_url(path);
        debug!(%url, "POST");
        self.execute(self.client.post(&url).json(body)).await
    }

    pub async fn post_no_content<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), RequestError> {
        let url = self.build_url(path);
        debug!(%url, "POST");
        self.execute_empty(self.client.post(&url).json(body)).await
    }

    pub async fn put<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, RequestError> {
        let url = self.build_url(path);
        debug!(%url, "PUT");
        self.execute(self.client.put(&url).json(body)).await
    }

    pub async fn patch_no_content<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), RequestError> {
        let url = self.build_url(path);
        debug!(%url, "PATCH");
        self.execute_empty(self.client.patch(&url).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), RequestError> {
        let url = self.build_url(path);
        debug!(%url, "DELETE");
        self.execute_empty(self.client.delete(&url)).await
    }

    pub async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<R, RequestError> {
        let url = self.build_url(path);
        debug!(%url, "POST multipart");
        self.execute(self.client.post(&url).multipart(form)).await
    }
}

fn transport_error(err: reqwest::Error) -> RequestError {
    warn!(error = %err, "request did not complete");
    if err.is_timeout() {
        RequestError::new("The server took too long to respond")
    } else if err.is_connect() {
        RequestError::new("Could not reach the server")
    } else {
        RequestError::new(format!("Request failed: {err}"))
    }
}

/// Pull the human-readable reason out of an error body. Bodies that are not
/// an envelope yield an error without message, which renders as the generic
/// fallback.
pub fn error_from_body(status: u16, body: &str) -> RequestError {
    let reason = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.reason().map(str::to_string));
    RequestError::with_status(status, reason.unwrap_or_default())
}

/// A 2xx envelope can still report `"status": "error"`.
pub fn unwrap_envelope<R>(
    status: u16,
    envelope: ApiResponse<R>,
) -> Result<R, RequestError> {
    let reason = envelope.reason().map(str::to_string);
    if envelope.status.eq_ignore_ascii_case("error") {
        return Err(RequestError::with_status(status, reason.unwrap_or_default()));
    }
    envelope.data.ok_or_else(|| {
        RequestError::with_status(
            status,
            reason.unwrap_or_else(|| "Empty response from server".to_string()),
        )
    })
}

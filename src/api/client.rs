//! HTTP client with auth header injection and envelope-aware error handling.
//!
//! Every backend call funnels through [`ApiClient::request`]: the bearer
//! token is read from the injected credential store right before sending,
//! JSON payloads are encoded here, and non-2xx responses become
//! [`ApiError::Http`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::error::{extract_message, ApiError};
use crate::config::ClientConfig;
use crate::store::CredentialStore;

/// Body passed to the transport without JSON encoding.
#[derive(Debug)]
pub enum RawBody {
    /// Pre-built multipart form; reqwest sets the boundary content type.
    Multipart(Form),
    Bytes(Vec<u8>),
}

/// Describes one request. Built per call and consumed by `request`.
///
/// `json` and `body` are exclusive in effect: when both are set the JSON
/// payload is sent and the raw body is dropped.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub json: Option<Value>,
    pub body: Option<RawBody>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn patch() -> Self {
        Self::method(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::method(Method::DELETE)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        self.json = Some(serde_json::to_value(payload).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RawBody::Multipart(form));
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(RawBody::Bytes(bytes));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client wrapper for EduLearn API communication.
///
/// Cheap to clone: the connection pool and the credential store are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Create a client for `config.base_url` that reads and writes
    /// credentials through `credentials`.
    pub fn new(config: &ClientConfig, credentials: Arc<CredentialStore>) -> Self {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            cancel: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session object this client reads its token from.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// A handle whose requests are aborted once `token` is cancelled.
    ///
    /// Cancelling drops the in-flight request (connection included) and the
    /// call returns [`ApiError::Cancelled`].
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Send a request to `<base_url><path>` and return the parsed body.
    ///
    /// - 204: `Value::Null`, body not read.
    /// - Body that is not valid JSON (or empty): an empty JSON object.
    /// - Non-2xx: `ApiError::Http` with the body's `message`/`error`.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        log::debug!("Request to {} cancelled", path);
                        Err(ApiError::Cancelled)
                    }
                    result = self.send(path, options) => result,
                }
            }
            None => self.send(path, options).await,
        }
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let RequestOptions {
            method,
            json,
            body,
            mut headers,
        } = options;
        let url = format!("{}{}", self.base_url, path);

        if json.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = self.credentials.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => log::warn!("Stored token is not a valid header value, sending without it"),
            }
        }

        log::debug!("{} {}", method, path);
        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        builder = match (json, body) {
            (Some(payload), _) => {
                builder.body(serde_json::to_vec(&payload).map_err(ApiError::Encode)?)
            }
            (None, Some(RawBody::Multipart(form))) => builder.multipart(form),
            (None, Some(RawBody::Bytes(bytes))) => builder.body(bytes),
            (None, None) => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = resp.text().await?;
        let body = parse_body(&text);

        if !status.is_success() {
            let message = extract_message(&body);
            log::debug!("{} {} failed ({}): {}", method, path, status.as_u16(), message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

/// Parse a response body, degrading to `{}` on anything that is not JSON.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

/// Percent-encode one caller-supplied path segment.
pub(crate) fn segment(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockServer, Reply};
    use serde_json::json;

    #[test]
    fn test_parse_body_degrades_to_empty_object() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("<html>oops</html>"), json!({}));
        assert_eq!(parse_body("{\"a\":1}"), json!({"a": 1}));
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("abc123"), "abc123");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[tokio::test]
    async fn test_no_token_means_no_authorization_header() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::json(200, json!({"data": {"lessons": []}})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        api.request("/lessons", RequestOptions::get()).await.unwrap();

        let received = server.received();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_stored_token_is_sent_as_bearer() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::json(200, json!({"data": {"lessons": []}})));
        let store = Arc::new(CredentialStore::in_memory());
        store.set_token(Some("abc")).unwrap();
        let api = server.client(store);

        api.request("/lessons", RequestOptions::get()).await.unwrap();

        let received = server.received();
        let values: Vec<_> = received[0].headers.get_all("authorization").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer abc");
    }

    #[tokio::test]
    async fn test_token_is_read_on_every_request() {
        let server = MockServer::start().await;
        server.on("GET", "/auth/me", Reply::json(200, json!({})));
        let store = Arc::new(CredentialStore::in_memory());
        let api = server.client(store.clone());

        api.request("/auth/me", RequestOptions::get()).await.unwrap();
        store.set_token(Some("later")).unwrap();
        api.request("/auth/me", RequestOptions::get()).await.unwrap();

        let received = server.received();
        assert!(received[0].headers.get("authorization").is_none());
        assert_eq!(received[1].headers["authorization"], "Bearer later");
    }

    #[tokio::test]
    async fn test_json_payload_sets_content_type() {
        let server = MockServer::start().await;
        server.on("POST", "/quizzes", Reply::json(201, json!({"data": {"quiz": {}}})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let options = RequestOptions::post().json(&json!({"title": "T"})).unwrap();
        api.request("/quizzes", options).await.unwrap();

        let received = server.received();
        assert_eq!(received[0].method, "POST");
        assert_eq!(received[0].headers["content-type"], "application/json");
        assert_eq!(received[0].json(), json!({"title": "T"}));
    }

    #[tokio::test]
    async fn test_json_wins_over_raw_body() {
        let server = MockServer::start().await;
        server.on("POST", "/echo", Reply::json(200, json!({})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let options = RequestOptions::post()
            .bytes(b"raw".to_vec())
            .json(&json!({"kept": true}))
            .unwrap();
        api.request("/echo", options).await.unwrap();

        assert_eq!(server.received()[0].json(), json!({"kept": true}));
    }

    #[tokio::test]
    async fn test_raw_body_passes_through_untouched() {
        let server = MockServer::start().await;
        server.on("POST", "/upload", Reply::json(200, json!({})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let options = RequestOptions::post()
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .bytes(b"hello".to_vec());
        api.request("/upload", options).await.unwrap();

        let received = server.received();
        assert_eq!(received[0].body, b"hello");
        assert_eq!(received[0].headers["content-type"], "text/plain");
    }

    #[tokio::test]
    async fn test_no_content_yields_null_without_parsing() {
        let server = MockServer::start().await;
        server.on("DELETE", "/admin/users/u-1", Reply::raw(204, "{{{ not json"));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let value = api
            .request("/admin/users/u-1", RequestOptions::delete())
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_unparsable_success_body_is_empty_object() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::raw(200, "definitely not json"));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let value = api.request("/lessons", RequestOptions::get()).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_error_message_field() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::json(403, json!({"message": "X"})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let err = api.request("/lessons", RequestOptions::get()).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), "X");
    }

    #[tokio::test]
    async fn test_error_field_when_no_message() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::json(500, json!({"error": "Y"})));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let err = api.request("/lessons", RequestOptions::get()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "Y");
    }

    #[tokio::test]
    async fn test_error_generic_fallback() {
        let server = MockServer::start().await;
        server.on("GET", "/lessons", Reply::raw(502, "Bad Gateway"));
        let api = server.client(Arc::new(CredentialStore::in_memory()));

        let err = api.request("/lessons", RequestOptions::get()).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.message(), crate::api::error::GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_transport_failure_is_opaque() {
        // Nothing listens on port 9 of localhost in the test environment.
        let config = ClientConfig::new("http://127.0.0.1:9");
        let api = ApiClient::new(&config, Arc::new(CredentialStore::in_memory()));

        let err = api.request("/lessons", RequestOptions::get()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_in_flight_request() {
        let server = MockServer::start().await;
        server.on(
            "GET",
            "/quizzes/analytics",
            Reply::json(200, json!({})).delayed(std::time::Duration::from_secs(30)),
        );
        let token = CancellationToken::new();
        let api = server
            .client(Arc::new(CredentialStore::in_memory()))
            .scoped(token.clone());

        let call = tokio::spawn(async move {
            api.request("/quizzes/analytics", RequestOptions::get()).await
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        token.cancel();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), call)
            .await
            .expect("cancelled request should return promptly")
            .unwrap();
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }

    #[tokio::test]
    async fn test_already_cancelled_token_sends_nothing() {
        let server = MockServer::start().await;
        let token = CancellationToken::new();
        token.cancel();
        let api = server
            .client(Arc::new(CredentialStore::in_memory()))
            .scoped(token);

        let result = api.request("/lessons", RequestOptions::get()).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
        assert!(server.received().is_empty());
    }
}

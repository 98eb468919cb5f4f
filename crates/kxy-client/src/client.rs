//! HTTP client wrapper shared by every API call.
//!
//! Outgoing requests get `Authorization: Bearer <token>` when the session
//! holds a token. Responses are unwrapped from the backend envelope:
//! `code == 0` hands the whole envelope back, anything else becomes an
//! [`ApiError::Application`]. Transport failures are reported to the user,
//! and an HTTP 401 additionally clears the session and forces a full page
//! load of the login route. Every failure still reaches the caller after
//! those side effects have run.

use std::rc::Rc;

use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, StatusCode};
use kxy_types::{Envelope, SUCCESS_CODE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{
    ApiError, TransportError, DEFAULT_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE,
};
use crate::navigate::Navigator;
use crate::notify::Notifier;
use crate::routes::LOGIN_PATH;
use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    session: Session,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        session: Session,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            notifier,
            navigator,
        }
    }

    /// Client over `reqwest` with the configured timeout.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_reqwest(
        config: ClientConfig,
        session: Session,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = crate::transport::ReqwestTransport::new(config.timeout())?;
        Ok(Self::new(
            config,
            Rc::new(transport),
            session,
            notifier,
            navigator,
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Builds the request descriptor for `path` relative to the base url.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let mut builder = http::Request::builder()
            .method(method)
            .uri(self.config.url(path));

        let payload = match body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?
            }
            None => Vec::new(),
        };

        builder
            .body(payload)
            .map_err(|e| ApiError::Request(e.to_string()))
    }

    /// Request phase: attach the bearer token when one is stored.
    pub fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest, ApiError> {
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Request(format!("authorization header: {e}")))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(request)
    }

    /// Sends a prepared request and unwraps the envelope.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let request = self.authorize(request)?;
        debug!(method = %request.method(), uri = %request.uri(), "api request");

        match self.transport.send(request).await {
            Ok(response) if response.status().is_success() => self.on_response(&response),
            Ok(response) => Err(self.on_failure(TransportError::from_status(
                response.status().as_u16(),
            ))),
            Err(error) => Err(self.on_failure(error)),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let request = self.build_request::<()>(Method::GET, path, None)?;
        self.execute(request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, path, body)?;
        self.execute(request).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::PUT, path, Some(body))?;
        self.execute(request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let request = self.build_request::<()>(Method::DELETE, path, None)?;
        self.execute(request).await
    }

    fn on_response<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<Envelope<T>, ApiError> {
        // A body that is not JSON has no code, which is not success.
        let mut body: Value = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
        let code = body.get("code").and_then(envelope_code);

        if code != Some(SUCCESS_CODE) {
            let msg = body
                .get("msg")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                .to_string();
            warn!(?code, "request rejected: {msg}");
            self.notifier.error(&msg);
            return Err(ApiError::Application { code, msg });
        }

        // `0.0` counts as success but would not decode into the i64 field.
        body["code"] = Value::from(SUCCESS_CODE);
        serde_json::from_value::<Envelope<T>>(body).map_err(|e| {
            let error = ApiError::Decode(e.to_string());
            warn!("{error}");
            self.notifier.error(&error.message());
            error
        })
    }

    fn on_failure(&self, error: TransportError) -> ApiError {
        if error.status == Some(StatusCode::UNAUTHORIZED.as_u16()) {
            warn!("session rejected by server, signing out");
            self.notifier.error(UNAUTHORIZED_MESSAGE);
            self.session.clear();
            self.navigator.force_full_reload(LOGIN_PATH);
        } else {
            let message = if error.message.is_empty() {
                NETWORK_ERROR_MESSAGE
            } else {
                error.message.as_str()
            };
            warn!(status = ?error.status, "request failed: {message}");
            self.notifier.error(message);
        }
        ApiError::Transport(error)
    }
}

/// Integral value of a numeric `code`; `0.0` and `0` compare equal.
fn envelope_code(code: &Value) -> Option<i64> {
    code.as_i64().or_else(|| {
        code.as_f64()
            .filter(|c| c.fract() == 0.0 && c.abs() < i64::MAX as f64)
            .map(|c| c as i64)
    })
}

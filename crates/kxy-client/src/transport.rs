use async_trait::async_trait;

use crate::error::TransportError;

pub type HttpRequest = http::Request<Vec<u8>>;
pub type HttpResponse = http::Response<Vec<u8>>;

/// Moves one request over the wire.
///
/// A response with any status is `Ok`; `Err` is reserved for failures where
/// no response arrived (connection refused, timeout).
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::error::TransportError;

    pub struct ReqwestTransport {
        client: reqwest::Client,
        timeout_ms: u64,
    }

    impl ReqwestTransport {
        pub fn new(timeout: Duration) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| TransportError::network(e.to_string()))?;
            Ok(Self {
                client,
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        }

        fn map_error(&self, error: reqwest::Error) -> TransportError {
            if error.is_timeout() {
                TransportError::timeout(self.timeout_ms)
            } else {
                TransportError::network(error.to_string())
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let (parts, body) = request.into_parts();

            let mut builder = self
                .client
                .request(parts.method, parts.uri.to_string())
                .headers(parts.headers);
            if !body.is_empty() {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| self.map_error(e))?;
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;

            let mut out = http::Response::new(bytes.to_vec());
            *out.status_mut() = status;
            *out.headers_mut() = headers;
            Ok(out)
        }
    }
}

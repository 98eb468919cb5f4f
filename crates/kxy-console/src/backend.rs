use std::rc::Rc;

use kxy_client::{ApiClient, ApiError, ClientConfig, LogNavigator, LogNotifier, Session};
use kxy_types::HealthInfo;

/// One `/health` call against the configured backend, so a wrong
/// `api.base_url` shows up in the server log at startup. Failures are
/// already logged by [`LogNotifier`].
pub async fn check(config: &ClientConfig) -> Result<HealthInfo, ApiError> {
    let client = ApiClient::with_reqwest(
        config.clone(),
        Session::in_memory(),
        Rc::new(LogNotifier),
        Rc::new(LogNavigator),
    )?;
    client
        .health()
        .await?
        .into_data()
        .ok_or_else(|| ApiError::Decode("health response carries no data".into()))
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn healthy_backend_reports_version() {
        async fn health() -> Json<Value> {
            Json(json!({
                "code": 0,
                "msg": "KXY ID Generator Service is running",
                "data": { "version": "1.0.0", "status": "healthy" }
            }))
        }
        let baseUrl = serve(Router::new().route("/health", get(health))).await;

        let info = check(&ClientConfig::with_base_url(baseUrl)).await.unwrap();
        assert_eq!(
            info,
            HealthInfo {
                version: "1.0.0".into(),
                status: "healthy".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_health_payload_is_a_decode_error() {
        async fn health() -> Json<Value> {
            Json(json!({ "code": 0 }))
        }
        let baseUrl = serve(Router::new().route("/health", get(health))).await;

        let err = check(&ClientConfig::with_base_url(baseUrl)).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = check(&ClientConfig::with_base_url(format!("http://{addr}")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use kxy_client::{ApiClient, ApiError, ClientConfig, Navigator, Notifier, Session};
use kxy_types::LoginRequest;
use serde_json::{json, Value};

#[derive(Default)]
struct Recorder {
    messages: RefCell<Vec<String>>,
    reloads: RefCell<Vec<String>>,
}

impl Notifier for Recorder {
    fn error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, _path: &str) {}

    fn force_full_reload(&self, path: &str) {
        self.reloads.borrow_mut().push(path.to_string());
    }
}

async fn list_databases(headers: HeaderMap) -> impl IntoResponse {
    let authHeader = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if authHeader != "Bearer abc123" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        );
    }
    (StatusCode::OK, Json(json!({ "code": 0, "msg": "", "data": [] })))
}

async fn login(Json(body): Json<LoginRequest>) -> Json<Value> {
    if body.password == "secret1" {
        Json(json!({
            "code": 0,
            "msg": "Login successful",
            "data": { "token": "abc123", "username": body.username }
        }))
    } else {
        Json(json!({ "code": 401, "msg": "Invalid username or password", "data": null }))
    }
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!({ "code": 0 }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/database/list", get(list_databases))
        .route("/api/auth/login", post(login))
        .route("/slow", get(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(baseUrl: String, timeoutMs: u64) -> (ApiClient, Session, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::default());
    let session = Session::in_memory();
    let config = ClientConfig {
        base_url: baseUrl,
        timeout_ms: timeoutMs,
    };
    let client =
        ApiClient::with_reqwest(config, session.clone(), recorder.clone(), recorder.clone())
            .unwrap();
    (client, session, recorder)
}

#[tokio::test]
async fn login_then_list_with_bearer_token() {
    let (client, session, recorder) = client(spawn_backend().await, 5_000);

    let token = client
        .login(&LoginRequest {
            username: "admin".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap()
        .into_data()
        .unwrap();
    session.sign_in(&token.token, &token.username);

    let list = client.list_databases().await.unwrap();
    assert_eq!(list.data, Some(vec![]));
    assert!(recorder.messages.borrow().is_empty());
}

#[tokio::test]
async fn rejected_login_is_an_application_error() {
    let (client, session, recorder) = client(spawn_backend().await, 5_000);

    let err = client
        .login(&LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid username or password");
    assert!(!session.has_token());
    assert_eq!(
        *recorder.messages.borrow(),
        vec!["Invalid username or password"]
    );
    assert!(recorder.reloads.borrow().is_empty());
}

#[tokio::test]
async fn unauthorized_status_signs_out() {
    let (client, session, recorder) = client(spawn_backend().await, 5_000);
    session.sign_in("stale", "admin");

    let err = client.list_databases().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!session.has_token());
    assert_eq!(session.username(), None);
    assert_eq!(*recorder.reloads.borrow(), vec!["/login"]);
    assert_eq!(
        *recorder.messages.borrow(),
        vec!["Unauthorized. Please login again."]
    );
}

#[tokio::test]
async fn exceeding_the_timeout_is_a_transport_failure() {
    let (client, _session, recorder) = client(spawn_backend().await, 100);

    let err = client.get::<Value>("/slow").await.unwrap_err();
    match err {
        ApiError::Transport(e) => {
            assert_eq!(e.status, None);
            assert_eq!(e.message, "timeout of 100ms exceeded");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(recorder.messages.borrow().len(), 1);
}

#[tokio::test]
async fn refused_connection_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (client, _session, recorder) = client(format!("http://{addr}"), 1_000);
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(recorder.messages.borrow().len(), 1);
}

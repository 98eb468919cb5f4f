#![allow(non_snake_case)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod navigate;
pub mod notify;
pub mod routes;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, RouteError, TransportError};
pub use guard::{decide, GuardDecision, Resolution, RouteGuard};
pub use navigate::{LogNavigator, Navigator};
pub use notify::{LogNotifier, Notifier};
pub use routes::{Page, RouteDescriptor, RouteMeta, RouteTarget, LANDING_PATH, LOGIN_PATH, ROUTES};
pub use session::{KeyValueStore, MemoryStore, Session, TOKEN_KEY, USERNAME_KEY};
pub use transport::{HttpRequest, HttpResponse, Transport};

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;

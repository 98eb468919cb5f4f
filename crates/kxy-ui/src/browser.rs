//! Browser side collaborators of the API client: local storage, router and
//! `window.location` navigation, and a fetch based transport.

use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use kxy_client::{
    ApiClient, ClientConfig, HttpRequest, HttpResponse, KeyValueStore, Navigator, Notifier,
    Session, Transport, TransportError,
};
use leptos::prelude::expect_context;
use leptos_router::{hooks::use_navigate, NavigateOptions};
use tracing::warn;

use crate::app::API_BASE_META;
use crate::components::toast::ToastContext;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            warn!("localStorage unavailable, dropping {key}");
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            warn!("failed to store {key}: {e:?}");
        }
    }

    fn delete(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                warn!("failed to remove {key}: {e:?}");
            }
        }
    }
}

pub fn session() -> Session {
    Session::new(Rc::new(BrowserStore))
}

pub struct BrowserNavigator {
    navigate: Rc<dyn Fn(&str)>,
}

impl BrowserNavigator {
    pub fn new(navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            navigate: Rc::new(navigate),
        }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        (self.navigate)(path);
    }

    fn force_full_reload(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            warn!("failed to load {path}: {e:?}");
        }
    }
}

/// Fetch transport; the timeout races the request against a timer.
pub struct GlooTransport {
    timeout_ms: u64,
}

impl GlooTransport {
    pub fn new(timeoutMs: u64) -> Self {
        Self {
            timeout_ms: timeoutMs,
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (parts, body) = request.into_parts();

        let url = parts.uri.to_string();
        let mut builder = gloo_net::http::RequestBuilder::new(&url).method(parts.method);
        for (name, value) in parts.headers.iter() {
            if let Ok(value) = value.to_str() {
                builder = builder.header(name.as_str(), value);
            }
        }

        let request = if body.is_empty() {
            builder.build()
        } else {
            let text =
                String::from_utf8(body).map_err(|e| TransportError::network(e.to_string()))?;
            builder.body(text)
        }
        .map_err(|e| TransportError::network(e.to_string()))?;

        let timer = TimeoutFuture::new(u32::try_from(self.timeout_ms).unwrap_or(u32::MAX));
        let response = match select(Box::pin(request.send()), Box::pin(timer)).await {
            Either::Left((result, _)) => {
                result.map_err(|e| TransportError::network(e.to_string()))?
            }
            Either::Right(_) => return Err(TransportError::timeout(self.timeout_ms)),
        };

        let status = http::StatusCode::from_u16(response.status())
            .map_err(|e| TransportError::network(e.to_string()))?;
        let bytes = response
            .binary()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let mut out = http::Response::new(bytes);
        *out.status_mut() = status;
        Ok(out)
    }
}

/// Backend base url as announced by the server-rendered shell.
pub fn api_base() -> String {
    let selector = format!("meta[name=\"{API_BASE_META}\"]");
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&selector).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| ClientConfig::default().base_url)
}

pub fn api_client(notifier: Rc<dyn Notifier>, navigate: impl Fn(&str) + 'static) -> ApiClient {
    let config = ClientConfig::with_base_url(api_base());
    let transport = GlooTransport::new(config.timeout_ms);
    ApiClient::new(
        config,
        Rc::new(transport),
        session(),
        notifier,
        Rc::new(BrowserNavigator::new(navigate)),
    )
}

/// Returns a factory for API clients bound to the toast sink and router of
/// the calling component. Must be called while the component is built.
pub fn use_api_client() -> impl Fn() -> ApiClient + Clone + 'static {
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();
    move || {
        let navigate = navigate.clone();
        api_client(Rc::new(toasts), move |path| {
            navigate(path, NavigateOptions::default())
        })
    }
}

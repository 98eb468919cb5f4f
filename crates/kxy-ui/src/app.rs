use kxy_client::config::DEFAULT_BASE_URL;
use kxy_client::routes::{LANDING_PATH, LOGIN_PATH, ROOT_PATH};
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::nav::Nav;
use crate::components::route_gate::RouteGate;
use crate::components::toast::ToastProvider;
use crate::pages::databases::DatabaseListPage;
use crate::pages::login::LoginPage;

/// Name of the `<meta>` tag that carries the backend base url to the browser.
pub const API_BASE_META: &str = "kxy-api-base";

/// Backend base url, provided as context while rendering the shell.
#[derive(Clone, Debug)]
pub struct ApiEndpoint(pub String);

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let apiBase = use_context::<ApiEndpoint>()
        .map(|endpoint| endpoint.0)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name=API_BASE_META content=apiBase />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

/// Router segment for a table path.
fn segment(path: &'static str) -> StaticSegment<&'static str> {
    StaticSegment(path.trim_start_matches('/'))
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/kxy-console.css" />
        <Title text="KXY ID Generator" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <p>"Page not found."</p> }.into_any()>
                    <Route path=segment(ROOT_PATH) view=RootView />
                    <Route path=segment(LOGIN_PATH) view=LoginView />
                    <Route path=segment(LANDING_PATH) view=DatabaseListView />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

// `/` is a table redirect; the gate follows it and the guard chain after it.
#[component]
fn RootView() -> impl IntoView {
    view! { <RouteGate path=ROOT_PATH /> }
}

#[component]
fn LoginView() -> impl IntoView {
    view! {
        <RouteGate path=LOGIN_PATH>
            <LoginPage />
        </RouteGate>
    }
}

#[component]
fn DatabaseListView() -> impl IntoView {
    view! {
        <RouteGate path=LANDING_PATH>
            <div class="app-layout">
                <Nav />
                <main class="main-content">
                    <DatabaseListPage />
                </main>
            </div>
        </RouteGate>
    }
}

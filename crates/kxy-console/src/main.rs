#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod backend;
#[cfg(feature = "ssr")]
mod config;

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use kxy_ui::{shell, ApiEndpoint, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configPath = config::path_from_args(std::env::args());
    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} api={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.api.base_url
    );

    if let Ok(health) = backend::check(&appConfig.api).await {
        tracing::info!(
            "backend {} is {} (version {})",
            appConfig.api.base_url,
            health.status,
            health.version
        );
    }

    let endpoint = ApiEndpoint(appConfig.api.base_url.clone());

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = appConfig.server.socket_addr().unwrap_or_else(|| {
        tracing::warn!("invalid bind address, using {}", leptosOptions.site_addr);
        leptosOptions.site_addr
    });

    let routes = generate_route_list(App);

    // Pages are public; the guard runs in the browser and the backend
    // enforces auth on its own API.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let endpoint = endpoint.clone();
                move || provide_context(endpoint.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}

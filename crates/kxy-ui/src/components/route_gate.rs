use leptos::prelude::*;

/// Resolves `path` through the route table and the guard before showing
/// `children`.
///
/// The stored token only exists in the browser, so server-rendered output
/// is a spinner and the decision happens once the page has hydrated. A
/// redirect replaces the history entry, like a rejected navigation would.
/// Table redirects (such as `/`) never show their children.
#[component]
pub fn RouteGate(
    path: &'static str,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    #[allow(unused_variables)]
    let (allowed, setAllowed) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        use kxy_client::RouteGuard;
        use leptos_router::{hooks::use_navigate, NavigateOptions};

        let navigate = use_navigate();
        Effect::new(move |_| {
            let guard = RouteGuard::new(crate::browser::session());
            match guard.redirect_for(path) {
                Ok(None) => setAllowed.set(true),
                Ok(Some(to)) => {
                    setAllowed.set(false);
                    navigate(
                        to,
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Err(e) => tracing::warn!("{e}"),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = path;

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                    </div>
                }
            }
        >
            {children.as_ref().map(|children| children())}
        </Show>
    }
}

use leptos::prelude::*;

#[component]
pub fn Nav() -> impl IntoView {
    #[allow(unused_variables)]
    let (username, setUsername) = signal(String::new());

    #[cfg(feature = "hydrate")]
    let makeClient = crate::browser::use_api_client();

    // Read after hydration so server and client markup agree.
    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        setUsername.set(crate::browser::session().username().unwrap_or_default());
    });

    let handleLogout = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        makeClient().logout();
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"K"</div>
                <span class="brand-text">"KXY ID Generator"</span>
            </div>
            <ul class="nav-links">
                <li class="nav-item active">
                    <a href="/databases">
                        <span class="nav-icon">"\u{26C1}"</span>
                        <span>"Databases"</span>
                    </a>
                </li>
            </ul>
            <div class="nav-footer">
                <span class="nav-user">{move || username.get()}</span>
                <button class="btn btn-ghost btn-sm" on:click=handleLogout>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}

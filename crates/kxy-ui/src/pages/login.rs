use leptos::prelude::*;

/// Heading and button text for the two modes of the page.
fn form_labels(initialized: bool) -> (&'static str, &'static str) {
    if initialized {
        ("Sign in to manage ID segments", "Sign In")
    } else {
        ("Create the administrator account", "Initialize")
    }
}

/// Mirrors the backend limits so obvious mistakes never leave the browser.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn validate_setup(username: &str, password: &str) -> Result<(), String> {
    if !(3..=50).contains(&username.chars().count()) {
        return Err("Username must be 3 to 50 characters".into());
    }
    if !(6..=100).contains(&password.chars().count()) {
        return Err("Password must be 6 to 100 characters".into());
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, setUsername) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    #[allow(unused_variables)]
    let (initialized, setInitialized) = signal(true);
    #[allow(unused_variables)]
    let (submitting, setSubmitting) = signal(false);
    #[allow(unused_variables)]
    let (errorMessage, setErrorMessage) = signal(Option::<String>::None);

    #[cfg(feature = "hydrate")]
    let makeClient = crate::browser::use_api_client();
    #[cfg(feature = "hydrate")]
    let toasts = expect_context::<crate::components::toast::ToastContext>();

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        let makeClient = makeClient.clone();
        Effect::new(move |_| {
            let client = makeClient();
            spawn_local(async move {
                if let Ok(envelope) = client.check_init().await {
                    let isInitialized = envelope.data.map(|d| d.initialized).unwrap_or(true);
                    setInitialized.set(isInitialized);
                }
            });
        });
    }

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            use kxy_client::routes::LANDING_PATH;
            use kxy_types::{InitUserRequest, LoginRequest};
            use wasm_bindgen_futures::spawn_local;

            let name = username.get_untracked().trim().to_string();
            let secret = password.get_untracked();
            let firstRun = !initialized.get_untracked();

            if firstRun {
                if let Err(e) = validate_setup(&name, &secret) {
                    setErrorMessage.set(Some(e));
                    return;
                }
            }

            setErrorMessage.set(None);
            setSubmitting.set(true);
            let client = makeClient();

            spawn_local(async move {
                if firstRun {
                    let request = InitUserRequest {
                        username: name,
                        password: secret,
                    };
                    match client.init_user(&request).await {
                        Ok(_) => {
                            toasts.success("System initialized, please sign in");
                            setPassword.set(String::new());
                            setInitialized.set(true);
                        }
                        Err(e) => setErrorMessage.set(Some(e.message())),
                    }
                } else {
                    let request = LoginRequest {
                        username: name,
                        password: secret,
                    };
                    match client.login(&request).await {
                        Ok(envelope) => match envelope.into_data() {
                            Some(token) => {
                                client.session().sign_in(&token.token, &token.username);
                                client.navigator().navigate(LANDING_PATH);
                            }
                            None => setErrorMessage.set(Some("Login response had no token".into())),
                        },
                        Err(e) => setErrorMessage.set(Some(e.message())),
                    }
                }
                setSubmitting.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"K"</div>
                    <h1>"KXY ID Generator"</h1>
                    <p>{move || form_labels(initialized.get()).0}</p>
                </div>

                {move || {
                    errorMessage
                        .get()
                        .map(|message| view! { <div class="login-error">{message}</div> })
                }}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            required
                            prop:value=move || username.get()
                            on:input=move |ev| setUsername.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || {
                            if submitting.get() { "Please wait..." } else { form_labels(initialized.get()).1 }
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

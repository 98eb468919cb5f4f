use kxy_types::DatabaseConfig;
use leptos::prelude::*;

fn display_db_name(config: &DatabaseConfig) -> String {
    config
        .db_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn count_label(count: usize) -> String {
    format!("{count} Database{}", if count == 1 { "" } else { "s" })
}

#[component]
pub fn DatabaseListPage() -> impl IntoView {
    #[allow(unused_variables)]
    let (databases, setDatabases) =
        signal(Option::<Result<Vec<DatabaseConfig>, String>>::None);
    #[allow(unused_variables)]
    let (busyGuid, setBusyGuid) = signal(Option::<String>::None);

    #[cfg(feature = "hydrate")]
    let makeClient = crate::browser::use_api_client();
    #[cfg(feature = "hydrate")]
    let toasts = expect_context::<crate::components::toast::ToastContext>();

    #[cfg(feature = "hydrate")]
    let refresh = {
        use wasm_bindgen_futures::spawn_local;

        let makeClient = makeClient.clone();
        move || {
            let client = makeClient();
            spawn_local(async move {
                let result = client
                    .list_databases()
                    .await
                    .map(|envelope| envelope.into_data().unwrap_or_default())
                    .map_err(|e| e.message());
                setDatabases.set(Some(result));
            });
        }
    };

    #[cfg(feature = "hydrate")]
    {
        let refresh = refresh.clone();
        Effect::new(move |_| refresh());
    }

    let handleInitialize = move |guid: String| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            setBusyGuid.set(Some(guid.clone()));
            let client = makeClient();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Ok(envelope) = client.initialize_database(&guid).await {
                    let message = if envelope.msg.is_empty() {
                        "Database initialized".to_string()
                    } else {
                        envelope.msg
                    };
                    toasts.success(message);
                }
                setBusyGuid.set(None);
                refresh();
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = guid;
        }
    };

    view! {
        <div class="dashboard-header">
            <h1>"Databases"</h1>
            <p class="subtitle">"Registered databases and their ID segments"</p>
        </div>
        {move || {
            let handleInitialize = handleInitialize.clone();
            match databases.get() {
                None => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading databases..."
                        </div>
                    }
                        .into_any()
                }
                Some(Ok(list)) if list.is_empty() => {
                    view! {
                        <div class="card">
                            <p>"No databases registered yet"</p>
                        </div>
                    }
                        .into_any()
                }
                Some(Ok(list)) => {
                    let currentBusy = busyGuid.get();
                    view! {
                        <div class="card">
                            <div class="card-title">{count_label(list.len())}</div>
                            <table>
                                <thead>
                                    <tr>
                                        <th>"System"</th>
                                        <th>"Type"</th>
                                        <th>"Address"</th>
                                        <th>"User"</th>
                                        <th>"Database"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|config| {
                                            let handleInitialize = handleInitialize.clone();
                                            let isBusy = currentBusy.as_deref() == Some(config.guid.as_str());
                                            let guid = config.guid.clone();
                                            view! {
                                                <tr>
                                                    <td>{config.system_code.clone()}</td>
                                                    <td>{config.db_type.label()}</td>
                                                    <td>{config.db_address.clone()}</td>
                                                    <td>{config.db_user.clone()}</td>
                                                    <td>{display_db_name(&config)}</td>
                                                    <td>
                                                        <button
                                                            class="btn btn-ghost btn-sm"
                                                            disabled=isBusy
                                                            on:click=move |_| handleInitialize(guid.clone())
                                                        >
                                                            {if isBusy { "Initializing..." } else { "Initialize" }}
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }
                        .into_any()
                }
                Some(Err(e)) => {
                    view! {
                        <div class="card">
                            <p class="login-error">"Failed to load databases: " {e}</p>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}

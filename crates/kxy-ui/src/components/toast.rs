use kxy_client::Notifier;
use leptos::prelude::*;

const TOAST_LIFETIME_SECS: u64 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

/// Handle for raising toasts; also the notification sink of the API client.
#[derive(Clone, Copy)]
pub struct ToastContext {
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.set_toasts.update(|toasts| {
            toasts.push(Toast { id, message, level });
        });

        let setToasts = self.set_toasts;
        set_timeout(
            move || setToasts.update(|toasts| toasts.retain(|t| t.id != id)),
            std::time::Duration::from_secs(TOAST_LIFETIME_SECS),
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Success);
    }

    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Notifier for ToastContext {
    fn error(&self, message: &str) {
        self.push(message.to_string(), ToastLevel::Error);
    }
}

/// Provides toast context and renders the toast container.
/// Place this once near the root of your app.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let (toasts, setToasts) = signal(Vec::<Toast>::new());
    let ctx = ToastContext {
        set_toasts: setToasts,
        next_id: StoredValue::new(0),
    };

    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let levelClass = match toast.level {
                        ToastLevel::Success => "toast toast-success",
                        ToastLevel::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=levelClass on:click=move |_| ctx.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

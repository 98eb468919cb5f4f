use tracing::warn;

/// Fire-and-forget sink for user visible error messages (toasts).
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Notifier for headless use; messages only reach the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        warn!(target: "kxy::notify", "{message}");
    }
}

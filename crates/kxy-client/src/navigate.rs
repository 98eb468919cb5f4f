use tracing::info;

pub trait Navigator {
    /// Client-side navigation through the router (guard applies).
    fn navigate(&self, path: &str);
    /// Full page load of `path`, discarding all in-memory application state.
    fn force_full_reload(&self, path: &str);
}

/// Navigator for headless use where there is no page to move.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!("navigate to {path}");
    }

    fn force_full_reload(&self, path: &str) {
        info!("full reload of {path}");
    }
}

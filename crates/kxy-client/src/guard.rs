use tracing::debug;

use crate::error::RouteError;
use crate::routes::{self, RouteDescriptor, RouteTarget, LANDING_PATH, LOGIN_PATH};
use crate::session::Session;

const MAX_REDIRECTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

impl GuardDecision {
    /// Path the navigation is replaced with, if any.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToLanding => Some(LANDING_PATH),
        }
    }
}

/// Pre-navigation check. Rule order matters: the auth requirement is tested
/// before the logged-in bounce away from the login page.
pub fn decide(target: &RouteDescriptor, tokenPresent: bool) -> GuardDecision {
    if target.meta.requires_auth && !tokenPresent {
        GuardDecision::RedirectToLogin
    } else if target.path == LOGIN_PATH && tokenPresent {
        GuardDecision::RedirectToLanding
    } else {
        GuardDecision::Allow
    }
}

/// Outcome of resolving a path through the table and the guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub route: &'static RouteDescriptor,
    /// Every path the navigation was redirected to, in order.
    pub redirects: Vec<String>,
}

#[derive(Clone)]
pub struct RouteGuard {
    session: Session,
}

impl RouteGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// `current` is the route being left; it does not affect the decision.
    pub fn check(
        &self,
        target: &RouteDescriptor,
        current: Option<&RouteDescriptor>,
    ) -> GuardDecision {
        let decision = decide(target, self.session.has_token());
        debug!(
            to = target.path,
            from = current.map(|r| r.path).unwrap_or("-"),
            ?decision,
            "route guard"
        );
        decision
    }

    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        let mut redirects: Vec<String> = Vec::new();
        let mut current: Option<&'static RouteDescriptor> = None;
        let mut nextPath = routes::normalize(path).to_string();

        loop {
            let route =
                routes::find(&nextPath).ok_or_else(|| RouteError::NotFound(nextPath.clone()))?;

            let redirect = match route.target {
                RouteTarget::Redirect(to) => to,
                RouteTarget::Page(_) => match self.check(route, current).redirect_path() {
                    None => return Ok(Resolution { route, redirects }),
                    Some(to) => to,
                },
            };

            if redirects.len() >= MAX_REDIRECTS {
                return Err(RouteError::RedirectLoop(path.to_string()));
            }
            redirects.push(redirect.to_string());
            current = Some(route);
            nextPath = redirect.to_string();
        }
    }

    /// Final destination of a navigation to `path`, when it is not `path`
    /// itself.
    pub fn redirect_for(&self, path: &str) -> Result<Option<&'static str>, RouteError> {
        let resolution = self.resolve(path)?;
        Ok((!resolution.redirects.is_empty()).then_some(resolution.route.path))
    }
}

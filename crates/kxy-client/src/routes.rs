//! Static route table of the console.

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
/// Where an authenticated user lands.
pub const LANDING_PATH: &str = "/databases";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    DatabaseList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: ROOT_PATH,
        name: None,
        target: RouteTarget::Redirect(LOGIN_PATH),
        meta: RouteMeta {
            requires_auth: false,
        },
    },
    RouteDescriptor {
        path: LOGIN_PATH,
        name: Some("Login"),
        target: RouteTarget::Page(Page::Login),
        meta: RouteMeta {
            requires_auth: false,
        },
    },
    RouteDescriptor {
        path: LANDING_PATH,
        name: Some("DatabaseList"),
        target: RouteTarget::Page(Page::DatabaseList),
        meta: RouteMeta {
            requires_auth: true,
        },
    },
];

/// Strips query, fragment and a trailing slash.
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => ROOT_PATH,
        trimmed => trimmed,
    }
}

pub fn find(path: &str) -> Option<&'static RouteDescriptor> {
    let path = normalize(path);
    ROUTES.iter().find(|route| route.path == path)
}

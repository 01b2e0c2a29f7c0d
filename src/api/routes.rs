//! Route table for the public HTTP surface.
//!
//! The table is the single description of which path reaches which
//! endpoint. [`crate::routes::app_router`] builds the axum router from it, and
//! [`RouteTable::resolve`] answers the same question without HTTP.
//!
//! # Precedence
//!
//! 1. Exact paths (`/shorten`, `/healthz`, `/healthz/ready`)
//! 2. Prefix paths, longest prefix first (`/analytics/{code}`)
//! 3. The catch-all redirect (`/{code}`)
//!
//! A captured code is always exactly one non-empty path segment.

/// What a matched request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Shorten,
    Health,
    Readiness,
    Analytics,
    Redirect,
}

/// How a route matches a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// The whole path equals this string.
    Exact(&'static str),
    /// The path starts with this prefix (ending in `/`), followed by one code segment.
    Prefix(&'static str),
    /// `/` followed by one code segment.
    CatchAll,
}

impl PathPattern {
    fn rank(&self) -> (u8, std::cmp::Reverse<usize>) {
        match self {
            PathPattern::Exact(_) => (0, std::cmp::Reverse(0)),
            PathPattern::Prefix(prefix) => (1, std::cmp::Reverse(prefix.len())),
            PathPattern::CatchAll => (2, std::cmp::Reverse(0)),
        }
    }

    /// The equivalent axum path, with the code captured as `{code}`.
    pub fn axum_path(&self) -> String {
        match self {
            PathPattern::Exact(path) => (*path).to_string(),
            PathPattern::Prefix(prefix) => format!("{prefix}{{code}}"),
            PathPattern::CatchAll => "/{code}".to_string(),
        }
    }

    fn capture<'a>(&self, path: &'a str) -> Option<Option<&'a str>> {
        match self {
            PathPattern::Exact(exact) => (path == *exact).then_some(None),
            PathPattern::Prefix(prefix) => path
                .strip_prefix(prefix)
                .filter(|rest| is_segment(rest))
                .map(Some),
            PathPattern::CatchAll => path
                .strip_prefix('/')
                .filter(|rest| is_segment(rest))
                .map(Some),
        }
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains('/')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: PathPattern,
    pub endpoint: Endpoint,
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub endpoint: Endpoint,
    pub code: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The service's routes.
    ///
    /// - `POST /shorten`          - Create a short link
    /// - `GET  /healthz`          - Liveness
    /// - `GET  /healthz/ready`    - Readiness (store + click queue)
    /// - `GET  /analytics/{code}` - Click count for a code
    /// - `GET  /{code}`           - Redirect to the original URL
    pub fn standard() -> Self {
        Self::new()
            .exact("/shorten", Endpoint::Shorten)
            .exact("/healthz", Endpoint::Health)
            .exact("/healthz/ready", Endpoint::Readiness)
            .prefix("/analytics/", Endpoint::Analytics)
            .catch_all(Endpoint::Redirect)
    }

    pub fn exact(mut self, path: &'static str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            pattern: PathPattern::Exact(path),
            endpoint,
        });
        self
    }

    /// Adds a prefix route. `prefix` must start and end with `/`.
    pub fn prefix(mut self, prefix: &'static str, endpoint: Endpoint) -> Self {
        debug_assert!(prefix.starts_with('/') && prefix.ends_with('/'));
        self.routes.push(Route {
            pattern: PathPattern::Prefix(prefix),
            endpoint,
        });
        self
    }

    pub fn catch_all(mut self, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            pattern: PathPattern::CatchAll,
            endpoint,
        });
        self
    }

    /// Routes in match order, independent of insertion order.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = self.routes.clone();
        routes.sort_by_key(|route| route.pattern.rank());
        routes
    }

    /// Finds the endpoint for `path`, or `None` if no route matches.
    pub fn resolve<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes().into_iter().find_map(|route| {
            route.pattern.capture(path).map(|code| RouteMatch {
                endpoint: route.endpoint,
                code,
            })
        })
    }
}

//! Page routes and the collaborators that move between them

use std::sync::Mutex;
use tracing::{debug, warn};

/// Receives navigation requests issued by table cells.
pub trait Navigator {
    fn navigate_to(&self, path: &str);
}

/// Warms up data for a page the user is likely to open next.
///
/// Implementations must not block; the result is never awaited.
pub trait Preloader {
    fn preload(&self, slug: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Projects,
    Project(String),
}

pub fn project_path(coinmarketcap_id: &str) -> String {
    format!("/projects/{coinmarketcap_id}")
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/projects" => Some(Route::Projects),
            _ => trimmed
                .strip_prefix("/projects/")
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Route::Project(slug.to_string())),
        }
    }

    /// Like [`Route::parse`], but sends paths no page handles to the project list.
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or_else(|| {
            warn!(path, "No page for path, showing projects");
            Route::Projects
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Projects => "/".to_string(),
            Route::Project(slug) => project_path(slug),
        }
    }
}

/// Records the most recent navigation request until the route loop picks it up.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    next: Mutex<Option<String>>,
}

impl PendingNavigation {
    pub fn take(&self) -> Option<String> {
        match self.next.lock() {
            Ok(mut next) => next.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Navigator for PendingNavigation {
    fn navigate_to(&self, path: &str) {
        debug!(path, "Navigation requested");
        match self.next.lock() {
            Ok(mut next) => *next = Some(path.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(path.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Some(Route::Projects));
        assert_eq!(Route::parse("/projects"), Some(Route::Projects));
        assert_eq!(Route::parse("/projects/"), Some(Route::Projects));
        assert_eq!(
            Route::parse("/projects/ethereum"),
            Some(Route::Project("ethereum".to_string()))
        );
        assert_eq!(Route::parse("/projects/a/b"), None);
        assert_eq!(Route::parse("/login"), None);
    }

    #[test]
    fn test_route_resolve_falls_back_to_projects() {
        assert_eq!(
            Route::resolve(&project_path("santiment")),
            Route::Project("santiment".to_string())
        );
        assert_eq!(Route::resolve(&project_path("a/b")), Route::Projects);
        assert_eq!(Route::resolve("/login"), Route::Projects);
    }

    #[test]
    fn test_route_path_round_trips() {
        let route = Route::Project("santiment".to_string());
        assert_eq!(route.path(), "/projects/santiment");
        assert_eq!(Route::parse(&route.path()), Some(route));
        assert_eq!(Route::parse(&Route::Projects.path()), Some(Route::Projects));
    }

    #[test]
    fn test_pending_navigation_keeps_latest_request() {
        let navigation = PendingNavigation::default();
        assert!(navigation.take().is_none());

        navigation.navigate_to("/projects/aragon");
        navigation.navigate_to("/projects/augur");
        assert_eq!(navigation.take().as_deref(), Some("/projects/augur"));
        assert!(navigation.take().is_none());
    }
}

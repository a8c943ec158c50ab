// Route table mapping URL paths to pages
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Sensor,
    SensorDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "home",
        page: Page::Home,
    },
    Route {
        path: "/sensor",
        name: "sensor",
        page: Page::Sensor,
    },
    Route {
        path: "/sensor-dashboard",
        name: "sensor-dashboard",
        page: Page::SensorDashboard,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Router {
    routes: &'static [Route],
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: ROUTES }
    }
}

impl Router {
    /// Find the route for `path`. Query strings and a trailing slash are ignored.
    pub fn resolve(&self, path: &str) -> Option<&'static Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        self.routes.iter().find(|route| route.path == normalized)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<18} {}", self.path, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_paths() {
        let router = Router::default();
        assert_eq!(router.resolve("/").unwrap().page, Page::Home);
        assert_eq!(router.resolve("").unwrap().page, Page::Home);
        assert_eq!(router.resolve("/sensor").unwrap().page, Page::Sensor);
        assert_eq!(router.resolve("/sensor/").unwrap().page, Page::Sensor);
        assert_eq!(
            router.resolve("/sensor-dashboard?window=1d").unwrap().page,
            Page::SensorDashboard
        );
    }

    #[test]
    fn test_unknown_path() {
        let router = Router::default();
        assert!(router.resolve("/sensors").is_none());
        assert!(router.resolve("/sensor/upload").is_none());
    }

    #[test]
    fn test_by_name() {
        let router = Router::default();
        assert_eq!(router.by_name("sensor-dashboard").unwrap().path, "/sensor-dashboard");
        assert!(router.by_name("settings").is_none());
    }
}

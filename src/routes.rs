//! Client-side route table: static path to page bindings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

/// Pages the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Login,
    Overview,
    Clusters,
    Hosts,
    Vms,
    Datastores,
    Networks,
    Capacity,
}

impl Page {
    /// Human readable title used in page headers and navigation.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Overview => "Overview",
            Page::Clusters => "Clusters",
            Page::Hosts => "Hosts",
            Page::Vms => "VMs",
            Page::Datastores => "Datastores",
            Page::Networks => "Networks",
            Page::Capacity => "Capacity",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub page: Page,
}

impl RouteEntry {
    pub fn new(path: &str, name: &str, page: Page) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            page,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("No route matches path: {0}")]
    UnknownRoute(String),
}

/// The dashboard's routes in navigation order.
pub fn default_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", "login", Page::Login),
        RouteEntry::new("/overview", "overview", Page::Overview),
        RouteEntry::new("/clusters", "clusters", Page::Clusters),
        RouteEntry::new("/hosts", "hosts", Page::Hosts),
        RouteEntry::new("/vms", "vms", Page::Vms),
        RouteEntry::new("/datastores", "datastores", Page::Datastores),
        RouteEntry::new("/networks", "networks", Page::Networks),
        RouteEntry::new("/capacity", "capacity", Page::Capacity),
    ]
}

/// Immutable path lookup built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    /// Build the table, rejecting any path registered twice.
    pub fn register(routes: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let mut by_path = HashMap::with_capacity(routes.len());
        for (idx, entry) in routes.iter().enumerate() {
            if by_path.insert(entry.path.clone(), idx).is_some() {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(Self {
            entries: routes,
            by_path,
        })
    }

    pub fn default_table() -> Self {
        // default_routes() has unique paths, so registration cannot fail.
        let routes = default_routes();
        let by_path = routes
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.path.clone(), idx))
            .collect();
        Self {
            entries: routes,
            by_path,
        }
    }

    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteError> {
        self.by_path
            .get(path)
            .map(|idx| &self.entries[*idx])
            .ok_or_else(|| RouteError::UnknownRoute(path.to_string()))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

/// Tracks the active page for one view over a shared route table.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: Arc<RouteTable>,
    active: Page,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            active: Page::Login,
        }
    }

    /// Switch to the page bound to `path`. An unknown path leaves the active page as it was.
    pub fn navigate(&mut self, path: &str) -> Result<Page, RouteError> {
        let page = self.table.resolve(path)?.page;
        tracing::debug!(path, ?page, "navigate");
        self.active = page;
        Ok(page)
    }

    pub fn active(&self) -> Page {
        self.active
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

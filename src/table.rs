//! Route table and path resolution.
//!
//! The table is two-tier:
//!
//! 1. **Named routes**, keyed by path pattern in a [`matchit`] router. No two
//!    named routes may claim the same path, so declaration order never
//!    matters.
//! 2. **One catch-all handler** that answers every path the named routes do
//!    not claim. It always renders the forbidden view unless the guard lets
//!    the path through to the backend.
//!
//! Resolution is total: [`RouteTable::resolve`] returns either
//! [`Resolution::Named`] or [`Resolution::CatchAll`], never an error.
//!
//! # Path normalization
//!
//! Before matching, the query string and fragment are dropped and the path is
//! normalized:
//!
//! | Input | Matched as |
//! |-------|------------|
//! | `""`, `"/"`, `"//"` | `/` |
//! | `"panel"` | `/panel` |
//! | `"/panel/"` | `/panel` |
//! | `"//data//latest"` | `/data/latest` |
//! | `"/track?id=3#map"` | `/track` |
//!
//! The catch-all keeps the original, unnormalized path so that passthrough
//! checks see the query string.
//!
//! # Example
//!
//! ```
//! use route_gate::{Resolution, Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/", "Home", "HomePage"))
//!     .route(Route::new("/panel", "Panel", "PanelPage").restricted())
//!     .catch_all("Forbidden")
//!     .build()
//!     .unwrap();
//!
//! assert!(matches!(table.resolve("/panel/"), Resolution::Named(r) if r.name() == "Panel"));
//! assert!(table.resolve("/unknown/xyz").is_catch_all());
//! ```

use crate::error::ConfigError;
use crate::route::{Route, ViewId};
use crate::{debug_log, info_log};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// View rendered by the catch-all unless configured otherwise.
pub const DEFAULT_FORBIDDEN_VIEW: &str = "Forbidden";

/// Outcome of matching a path against the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A named route claimed the path.
    Named(Arc<Route>),
    /// No named route claimed the path.
    CatchAll {
        /// The path as requested, query string included.
        path: String,
    },
}

impl Resolution {
    /// Check if the catch-all answered
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Resolution::CatchAll { .. })
    }

    /// Get the matched route, if a named route answered
    pub fn route(&self) -> Option<&Arc<Route>> {
        match self {
            Resolution::Named(route) => Some(route),
            Resolution::CatchAll { .. } => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Named(route) => write!(f, "{}", route),
            Resolution::CatchAll { path } => write!(f, "catch-all ({})", path),
        }
    }
}

/// Immutable route table, built once at start-up.
///
/// Share it behind an [`Arc`]; it is never mutated after [`build`](RouteTableBuilder::build).
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    by_name: HashMap<String, usize>,
    matcher: matchit::Router<usize>,
    forbidden_view: ViewId,
}

impl RouteTable {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Resolve a requested path.
    pub fn resolve(&self, path: &str) -> Resolution {
        let key = normalize_path(path);
        let resolution = self
            .matcher
            .at(&key)
            .ok()
            .and_then(|matched| self.routes.get(*matched.value))
            .map_or_else(
                || Resolution::CatchAll {
                    path: path.to_string(),
                },
                |route| Resolution::Named(Arc::clone(route)),
            );
        debug_log!("Resolved '{}' → {}", path, resolution);
        resolution
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
        self.by_name.get(name).and_then(|&idx| self.routes.get(idx))
    }

    /// Path of the route named `name`.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(|route| route.path())
    }

    /// Named routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    /// Number of named routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table has no named routes
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// View the catch-all (and every rejection) renders.
    pub fn forbidden_view(&self) -> &ViewId {
        &self.forbidden_view
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("forbidden_view", &self.forbidden_view)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RouteTable`].
///
/// All validation happens in [`build`](Self::build); a table that builds can
/// resolve every path.
#[must_use]
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    forbidden_view: Option<ViewId>,
}

impl RouteTableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named route.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Add several named routes.
    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Set the view rendered by the catch-all handler.
    pub fn catch_all(mut self, view: impl Into<ViewId>) -> Self {
        self.forbidden_view = Some(view.into());
        self
    }

    /// Validate the routes and build the table.
    pub fn build(self) -> Result<RouteTable, ConfigError> {
        let mut routes = Vec::with_capacity(self.routes.len());
        let mut by_name = HashMap::new();
        let mut by_path: HashMap<String, String> = HashMap::new();
        let mut matcher = matchit::Router::new();

        for mut route in self.routes {
            if by_name.contains_key(route.name()) {
                return Err(ConfigError::DuplicateName {
                    name: route.name().to_string(),
                });
            }
            if route.path().contains("{*") {
                return Err(ConfigError::CatchAllPattern {
                    name: route.name().to_string(),
                    path: route.path().to_string(),
                });
            }

            let path = normalize_path(route.path());
            if let Some(first) = by_path.get(&path) {
                return Err(ConfigError::DuplicatePath {
                    path,
                    first: first.clone(),
                    second: route.name().to_string(),
                });
            }

            let idx = routes.len();
            matcher
                .insert(path.clone(), idx)
                .map_err(|err| ConfigError::InvalidPattern {
                    path: path.clone(),
                    message: err.to_string(),
                })?;

            info_log!("Registered route '{}' (name: '{}')", path, route.name());
            by_path.insert(path.clone(), route.name().to_string());
            by_name.insert(route.name().to_string(), idx);
            route.set_path(path);
            routes.push(Arc::new(route));
        }

        validate_local_variants(&routes, &by_name)?;

        let forbidden_view = self
            .forbidden_view
            .unwrap_or_else(|| ViewId::new(DEFAULT_FORBIDDEN_VIEW));
        info_log!(
            "Route table ready: {} routes, catch-all renders '{}'",
            routes.len(),
            forbidden_view
        );

        Ok(RouteTable {
            routes,
            by_name,
            matcher,
            forbidden_view,
        })
    }
}

/// Every `local_variant` must name another existing route that has no
/// variant of its own, so a redirect never needs more than one hop. The
/// target path must be a plain URL since the redirect has no parameters to
/// fill in.
fn validate_local_variants(
    routes: &[Arc<Route>],
    by_name: &HashMap<String, usize>,
) -> Result<(), ConfigError> {
    for route in routes {
        let Some(variant) = route.local_variant_name() else {
            continue;
        };
        let target = by_name
            .get(variant)
            .and_then(|&idx| routes.get(idx))
            .ok_or_else(|| ConfigError::UnknownLocalVariant {
                route: route.name().to_string(),
                variant: variant.to_string(),
            })?;
        if target.name() == route.name() || target.local_variant_name().is_some() {
            return Err(ConfigError::ChainedLocalVariant {
                route: route.name().to_string(),
                variant: variant.to_string(),
            });
        }
        if target.is_parameterized() {
            return Err(ConfigError::ParameterizedLocalVariant {
                route: route.name().to_string(),
                variant: variant.to_string(),
            });
        }
    }
    Ok(())
}

/// Normalize a requested path for matching.
///
/// Drops the query string and fragment, collapses repeated slashes, ensures
/// a leading slash and removes the trailing one (except for the root).
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let segments: Vec<&str> = path[..end].split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

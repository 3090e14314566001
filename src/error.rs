//! Error and outcome types.
//!
//! - [`ConfigError`] — everything that can go wrong while building the
//!   route table or the passthrough allow-list. These are start-up errors:
//!   once a [`RouteTable`](crate::RouteTable) exists, navigation cannot fail.
//! - [`NavigationResult`] — what the [`Router`](crate::Router) did with a
//!   navigation intent.
//!
//! # Examples
//!
//! ```
//! use route_gate::{ConfigError, Route, RouteTable};
//!
//! let err = RouteTable::builder()
//!     .route(Route::new("/a", "Same", "A"))
//!     .route(Route::new("/b", "Same", "B"))
//!     .build()
//!     .unwrap_err();
//!
//! assert_eq!(err, ConfigError::DuplicateName { name: "Same".into() });
//! ```

use crate::decision::RejectReason;
use crate::route::Route;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ConfigError
// ============================================================================

/// Invalid route table or allow-list configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two routes share a name.
    DuplicateName { name: String },

    /// Two routes claim the same (normalized) path.
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// The path pattern was rejected by the matcher.
    InvalidPattern { path: String, message: String },

    /// A named route tried to declare a catch-all pattern.
    CatchAllPattern { name: String, path: String },

    /// `local_variant` names a route that does not exist.
    UnknownLocalVariant { route: String, variant: String },

    /// `local_variant` points at itself or at a route with its own variant.
    ChainedLocalVariant { route: String, variant: String },

    /// `local_variant` points at a route whose path has parameters.
    ParameterizedLocalVariant { route: String, variant: String },

    /// A passthrough entry or API mount is not an absolute path.
    InvalidPassthrough { entry: String },

    /// The configuration file could not be read.
    Io { path: String, message: String },

    /// The TOML configuration could not be parsed.
    Parse { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateName { name } => {
                write!(f, "Duplicate route name: {}", name)
            }
            ConfigError::DuplicatePath {
                path,
                first,
                second,
            } => {
                write!(
                    f,
                    "Routes '{}' and '{}' both claim path {}",
                    first, second, path
                )
            }
            ConfigError::InvalidPattern { path, message } => {
                write!(f, "Invalid route pattern {}: {}", path, message)
            }
            ConfigError::CatchAllPattern { name, path } => {
                write!(
                    f,
                    "Route '{}' declares catch-all pattern {}; use the table's catch-all handler",
                    name, path
                )
            }
            ConfigError::UnknownLocalVariant { route, variant } => {
                write!(
                    f,
                    "Route '{}' names unknown local variant '{}'",
                    route, variant
                )
            }
            ConfigError::ChainedLocalVariant { route, variant } => {
                write!(
                    f,
                    "Local variant '{}' of route '{}' must be a different route without its own variant",
                    variant, route
                )
            }
            ConfigError::ParameterizedLocalVariant { route, variant } => {
                write!(
                    f,
                    "Local variant '{}' of route '{}' has path parameters and cannot be redirected to",
                    variant, route
                )
            }
            ConfigError::InvalidPassthrough { entry } => {
                write!(f, "Passthrough entry must start with '/': {:?}", entry)
            }
            ConfigError::Io { path, message } => {
                write!(f, "Cannot read configuration {}: {}", path, message)
            }
            ConfigError::Parse { message } => {
                write!(f, "Configuration parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// NavigationResult
// ============================================================================

/// What the router did with a navigation intent.
///
/// Every call to [`Router::navigate`](crate::Router::navigate) (and friends)
/// returns this enum. There is no error variant: unmatched and unauthorized
/// navigations end in [`Forbidden`](Self::Forbidden).
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// A frontend view was mounted.
    Rendered {
        path: String,
        route: Arc<Route>,
        /// The public route the user asked for, when a local-variant redirect happened.
        redirected_from: Option<Arc<Route>>,
    },
    /// The forbidden view was mounted.
    Forbidden { path: String, reason: RejectReason },
    /// The path was handed to the backend untouched.
    Passthrough { path: String, backend_path: String },
    /// A newer intent arrived before the effect could be applied.
    Superseded { path: String },
}

impl NavigationResult {
    /// Check if a view was mounted
    pub fn is_rendered(&self) -> bool {
        matches!(self, NavigationResult::Rendered { .. })
    }

    /// Check if the forbidden view was mounted
    pub fn is_forbidden(&self) -> bool {
        matches!(self, NavigationResult::Forbidden { .. })
    }

    /// Check if the path went to the backend
    pub fn is_passthrough(&self) -> bool {
        matches!(self, NavigationResult::Passthrough { .. })
    }

    /// Check if a newer intent took over
    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationResult::Superseded { .. })
    }

    /// The route that was rendered, if any.
    pub fn route(&self) -> Option<&Arc<Route>> {
        match self {
            NavigationResult::Rendered { route, .. } => Some(route),
            _ => None,
        }
    }

    /// The requested path (or the final path after a redirect).
    pub fn path(&self) -> &str {
        match self {
            NavigationResult::Rendered { path, .. }
            | NavigationResult::Forbidden { path, .. }
            | NavigationResult::Passthrough { path, .. }
            | NavigationResult::Superseded { path } => path,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

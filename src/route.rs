//! Route definitions.
//!
//! A [`Route`] binds a path pattern to a unique name and the view the front
//! end mounts for it. Two pieces of guard metadata ride along:
//!
//! - `restricted` — the route only renders for a [`Local`](crate::OriginClass::Local) origin;
//! - `local_variant` — the name of a privileged counterpart route that local
//!   users are redirected to (the public/local dual-variant pattern).
//!
//! ```
//! use route_gate::Route;
//!
//! let panel = Route::new("/panel", "Panel", "PanelPage").restricted();
//! assert!(panel.is_restricted());
//!
//! let charts = Route::new("/grafikai", "Grafikai", "GrafikaiPage").local_variant("Grafikai2");
//! assert_eq!(charts.local_variant_name(), Some("Grafikai2"));
//! ```

use std::fmt;

/// Identifier of a view the front end knows how to mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(String);

impl ViewId {
    /// Create a view id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A named frontend route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    name: String,
    view: ViewId,
    restricted: bool,
    local_variant: Option<String>,
}

impl Route {
    /// Create an unrestricted route with no local variant.
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            restricted: false,
            local_variant: None,
        }
    }

    /// Only render this route for a local origin.
    #[must_use]
    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    /// Redirect local users to the route named `name`.
    #[must_use]
    pub fn local_variant(mut self, name: impl Into<String>) -> Self {
        self.local_variant = Some(name.into());
        self
    }

    /// Get the path pattern, normalized
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the unique route name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the view mounted for this route
    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// Check if the route requires a local origin
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Name of the route local users are redirected to, if any.
    pub fn local_variant_name(&self) -> Option<&str> {
        self.local_variant.as_deref()
    }

    /// Whether the path has `{param}` segments, so it is a pattern rather than a URL.
    pub fn is_parameterized(&self) -> bool {
        self.path.contains('{')
    }

    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let route = Route::new("/track", "Track", "TrackPage");
        assert_eq!(route.path(), "/track");
        assert_eq!(route.name(), "Track");
        assert_eq!(route.view().as_str(), "TrackPage");
        assert!(!route.is_restricted());
        assert_eq!(route.local_variant_name(), None);
    }

    #[test]
    fn test_parameterized() {
        assert!(Route::new("/track/{id}", "TrackDetail", "TrackDetailPage").is_parameterized());
        assert!(!Route::new("/track", "Track", "TrackPage").is_parameterized());
    }

    #[test]
    fn test_display() {
        let route = Route::new("/panel", "Panel", "PanelPage");
        assert_eq!(route.to_string(), "Panel (/panel)");
    }
}

//! Backend passthrough allow-list.
//!
//! Some paths belong to the backend API, not to the frontend. When no named
//! route claims such a path, the router must not intercept it: it is handed
//! to the transport untouched instead of being rejected by the catch-all.
//!
//! Two kinds of entries exist:
//!
//! - [`PassthroughEntry::Exact`] — matches the literal path only;
//! - [`PassthroughEntry::QueryPrefix`] — matches the path itself or the path
//!   followed by a query string (`/data/history?from=0&to=100`).
//!
//! An optional **API mount** mirrors the development proxy, which forwards
//! `/api/<rest>` to the backend as `/<rest>`: a mounted path passes through
//! when the unmounted remainder is on the list.
//!
//! ```
//! use route_gate::PassthroughAllowList;
//!
//! let list = PassthroughAllowList::backend_default();
//! assert!(list.is_passthrough("/data/latest"));
//! assert!(list.is_passthrough("/data/history?from=0&to=100"));
//! assert!(list.is_passthrough("/api/data/clear"));
//! assert!(!list.is_passthrough("/data/historyx"));
//! assert_eq!(list.backend_path("/api/data").as_deref(), Some("/data"));
//! ```

use crate::error::ConfigError;

/// A single allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassthroughEntry {
    /// Matches the literal path only.
    Exact(String),
    /// Matches the path, with or without a query string.
    QueryPrefix(String),
}

impl PassthroughEntry {
    /// Check if `path` matches this entry
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PassthroughEntry::Exact(entry) => path == entry,
            PassthroughEntry::QueryPrefix(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('?')),
        }
    }

    fn raw(&self) -> &str {
        match self {
            PassthroughEntry::Exact(entry) | PassthroughEntry::QueryPrefix(entry) => entry,
        }
    }
}

/// Immutable set of backend paths that bypass frontend routing.
#[derive(Debug, Clone, Default)]
pub struct PassthroughAllowList {
    entries: Vec<PassthroughEntry>,
    api_mount: Option<String>,
}

impl PassthroughAllowList {
    /// Start building an allow-list.
    pub fn builder() -> PassthroughBuilder {
        PassthroughBuilder::new()
    }

    /// An allow-list that lets nothing through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The backend surface of the telemetry service, mounted under `/api`.
    pub fn backend_default() -> Self {
        Self {
            entries: vec![
                PassthroughEntry::Exact("/".into()),
                PassthroughEntry::Exact("/data".into()),
                PassthroughEntry::Exact("/data/clear".into()),
                PassthroughEntry::Exact("/data/latest".into()),
                PassthroughEntry::QueryPrefix("/data/history".into()),
            ],
            api_mount: Some("/api".into()),
        }
    }

    /// Get the entries in declaration order
    pub fn entries(&self) -> &[PassthroughEntry] {
        &self.entries
    }

    /// Get the API mount, without trailing slash
    pub fn api_mount(&self) -> Option<&str> {
        self.api_mount.as_deref()
    }

    /// Whether `path` must be handed to the backend.
    pub fn is_passthrough(&self, path: &str) -> bool {
        self.backend_path(path).is_some()
    }

    /// The path the backend receives for `path`, or `None` if `path` is not
    /// a passthrough path.
    pub fn backend_path(&self, path: &str) -> Option<String> {
        if self.matches_backend(path) {
            return Some(path.to_string());
        }
        let mount = self.api_mount.as_deref()?;
        let unmounted = strip_mount(path, mount)?;
        self.matches_backend(&unmounted).then_some(unmounted)
    }

    fn matches_backend(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(path))
    }
}

/// `/api` → `/`, `/api/data` → `/data`, `/api?x` → `/?x`, `/apix` → `None`.
fn strip_mount(path: &str, mount: &str) -> Option<String> {
    let rest = path.strip_prefix(mount)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else if rest.starts_with('?') {
        Some(format!("/{rest}"))
    } else {
        None
    }
}

/// Builder for [`PassthroughAllowList`].
#[must_use]
#[derive(Debug, Default)]
pub struct PassthroughBuilder {
    entries: Vec<PassthroughEntry>,
    api_mount: Option<String>,
}

impl PassthroughBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal path.
    pub fn exact(mut self, path: impl Into<String>) -> Self {
        self.entries.push(PassthroughEntry::Exact(path.into()));
        self
    }

    /// Add a path that may carry a query string.
    pub fn query_prefix(mut self, path: impl Into<String>) -> Self {
        self.entries.push(PassthroughEntry::QueryPrefix(path.into()));
        self
    }

    /// Add a prepared entry.
    pub fn entry(mut self, entry: PassthroughEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Also accept allow-listed paths under `mount` (e.g. `/api`).
    pub fn api_mount(mut self, mount: impl Into<String>) -> Self {
        self.api_mount = Some(mount.into());
        self
    }

    /// Validate the entries and build the allow-list.
    pub fn build(self) -> Result<PassthroughAllowList, ConfigError> {
        for entry in &self.entries {
            if !entry.raw().starts_with('/') {
                return Err(ConfigError::InvalidPassthrough {
                    entry: entry.raw().to_string(),
                });
            }
        }
        let api_mount = match self.api_mount {
            Some(mount) if !mount.starts_with('/') || mount == "/" => {
                return Err(ConfigError::InvalidPassthrough { entry: mount });
            }
            Some(mount) => Some(mount.trim_end_matches('/').to_string()),
            None => None,
        };
        Ok(PassthroughAllowList {
            entries: self.entries,
            api_mount,
        })
    }
}

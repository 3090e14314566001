//! TOML configuration for the route table and the passthrough allow-list.
//!
//! Enabled with the `config` feature. Everything is read once at start-up;
//! [`RouterConfig::build`] runs the same validation as the builders and
//! returns immutable values.
//!
//! ```toml
//! forbidden_view = "Forbidden"
//!
//! [[routes]]
//! path = "/"
//! name = "Home"
//! view = "HomePage"
//!
//! [[routes]]
//! path = "/grafikai"
//! name = "Grafikai"
//! view = "GrafikaiPage"
//! local_variant = "Grafikai2"
//!
//! [[routes]]
//! path = "/grafikai2"
//! name = "Grafikai2"
//! view = "Grafikai2Page"
//! restricted = true
//!
//! [passthrough]
//! exact = ["/data", "/data/latest"]
//! query_prefix = ["/data/history"]
//! api_mount = "/api"
//! ```
//!
//! Missing sections fall back to [`RouterConfig::default`], the telemetry
//! dashboard table.

use crate::error::ConfigError;
use crate::info_log;
use crate::passthrough::PassthroughAllowList;
use crate::route::Route;
use crate::table::{RouteTable, DEFAULT_FORBIDDEN_VIEW};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub routes: Vec<RouteConfig>,
    /// View rendered by the catch-all handler.
    pub forbidden_view: String,
    pub passthrough: PassthroughConfig,
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub name: String,
    pub view: String,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub local_variant: Option<String>,
}

/// The `[passthrough]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PassthroughConfig {
    pub exact: Vec<String>,
    pub query_prefix: Vec<String>,
    pub api_mount: Option<String>,
}

impl RouteConfig {
    fn new(path: &str, name: &str, view: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: view.to_string(),
            restricted: false,
            local_variant: None,
        }
    }

    fn to_route(&self) -> Route {
        let mut route = Route::new(self.path.as_str(), self.name.as_str(), self.view.as_str());
        if self.restricted {
            route = route.restricted();
        }
        if let Some(variant) = &self.local_variant {
            route = route.local_variant(variant.as_str());
        }
        route
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        let mut grafikai = RouteConfig::new("/grafikai", "Grafikai", "GrafikaiPage");
        grafikai.local_variant = Some("Grafikai2".to_string());
        let mut panel = RouteConfig::new("/panel", "Panel", "PanelPage");
        panel.restricted = true;
        let mut grafikai2 = RouteConfig::new("/grafikai2", "Grafikai2", "Grafikai2Page");
        grafikai2.restricted = true;

        Self {
            routes: vec![
                RouteConfig::new("/", "Home", "HomePage"),
                RouteConfig::new("/track", "Track", "TrackPage"),
                panel,
                grafikai,
                grafikai2,
            ],
            forbidden_view: DEFAULT_FORBIDDEN_VIEW.to_string(),
            passthrough: PassthroughConfig {
                exact: ["/", "/data", "/data/clear", "/data/latest"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                query_prefix: vec!["/data/history".to_string()],
                api_mount: Some("/api".to_string()),
            },
        }
    }
}

impl RouterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        info_log!(
            "Loaded {} routes from {}",
            config.routes.len(),
            path.display()
        );
        Ok(config)
    }

    /// Build and validate the route table and the allow-list.
    pub fn build(&self) -> Result<(RouteTable, PassthroughAllowList), ConfigError> {
        let table = RouteTable::builder()
            .routes(self.routes.iter().map(RouteConfig::to_route))
            .catch_all(self.forbidden_view.as_str())
            .build()?;

        let mut passthrough = PassthroughAllowList::builder();
        for path in &self.passthrough.exact {
            passthrough = passthrough.exact(path.as_str());
        }
        for path in &self.passthrough.query_prefix {
            passthrough = passthrough.query_prefix(path.as_str());
        }
        if let Some(mount) = &self.passthrough.api_mount {
            passthrough = passthrough.api_mount(mount.as_str());
        }

        Ok((table, passthrough.build()?))
    }
}

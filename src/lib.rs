//! # route-gate
//!
//! A client-side route authorization gate for single-page dashboards.
//!
//! Every navigation intent runs through the same pipeline:
//!
//! - the [`RouteTable`] resolves the path to a named [`Route`] or to the
//!   catch-all;
//! - the [`OriginSource`] classifies where the application is being served
//!   from ([`OriginClass::Local`] or [`OriginClass::Remote`]);
//! - the [`NavigationGuard`] decides: allow, redirect a local user to the
//!   route's local variant, hand backend-owned paths through untouched, or
//!   reject to the forbidden view;
//! - the [`Router`] applies the outcome through a [`ViewLayer`] and records
//!   history.
//!
//! Unknown paths are denied by default. A path reaches the backend only when
//! it is listed in the [`PassthroughAllowList`].
//!
//! **This is not a security boundary.** Origin classification is based on
//! the hostname the client reports and can be spoofed by anyone who controls
//! their own browser. Restricted routes hide views from casual remote users;
//! the backend must enforce its own authorization.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_gate::{
//!     FixedOrigin, NavigationResult, OriginClass, PassthroughAllowList, RejectReason, Route,
//!     RouteTable, Router, ViewId, ViewLayer,
//! };
//!
//! struct Log(Vec<String>);
//!
//! impl ViewLayer for Log {
//!     fn mount(&mut self, view: &ViewId, _route: &Route) {
//!         self.0.push(format!("mount {}", view));
//!     }
//!     fn forbid(&mut self, view: &ViewId, reason: &RejectReason) {
//!         self.0.push(format!("forbid {} ({})", view, reason));
//!     }
//!     fn hand_off(&mut self, path: &str, _backend_path: &str) {
//!         self.0.push(format!("backend {}", path));
//!     }
//! }
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/grafikai", "Grafikai", "GrafikaiPage").local_variant("Grafikai2"))
//!     .route(Route::new("/grafikai2", "Grafikai2", "Grafikai2Page").restricted())
//!     .build()
//!     .unwrap();
//!
//! let mut router = Router::new(
//!     Arc::new(table),
//!     Arc::new(PassthroughAllowList::backend_default()),
//!     FixedOrigin(OriginClass::Local),
//!     Log(Vec::new()),
//! );
//!
//! let result = router.navigate("/grafikai");
//! assert_eq!(result.route().map(|r| r.name()), Some("Grafikai2"));
//! assert!(router.navigate("/data/latest").is_passthrough());
//! assert!(matches!(router.navigate("/nope"), NavigationResult::Forbidden { .. }));
//! ```
//!
//! # Features
//!
//! - `log` (default): log through the [`log`](https://docs.rs/log) crate
//! - `tracing`: log through [`tracing`](https://docs.rs/tracing) instead
//! - `cache` (default): LRU cache of path resolutions in the router
//! - `config`: build the table and allow-list from TOML

#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(hidden)]
pub mod logging;

#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub mod cache;
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;
pub mod decision;
pub mod error;
pub mod guards;
pub mod origin;
pub mod passthrough;
pub mod route;
pub mod router;
pub mod state;
pub mod table;

#[cfg(feature = "config")]
pub use config::{PassthroughConfig, RouteConfig, RouterConfig};
pub use decision::{NavigationDecision, RejectReason};
pub use error::{ConfigError, NavigationResult};
pub use guards::{Evaluation, NavigationGuard, MAX_REDIRECT_HOPS};
pub use origin::{
    classify, origin_fn, FixedOrigin, FnOrigin, HostOrigin, OriginClass, OriginSource,
    LOOPBACK_HOSTS,
};
pub use passthrough::{PassthroughAllowList, PassthroughBuilder, PassthroughEntry};
pub use route::{Route, ViewId};
pub use router::{Router, RouterPhase, ViewLayer};
pub use state::{HistoryEntry, NavigationHandle, NavigationIntent, RouterState};
pub use table::{normalize_path, Resolution, RouteTable, RouteTableBuilder, DEFAULT_FORBIDDEN_VIEW};

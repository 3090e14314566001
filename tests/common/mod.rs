//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use route_gate::*;
use std::sync::Arc;

/// Enable log output for a test run (`RUST_LOG=route_gate=debug`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The telemetry dashboard table.
pub fn telemetry_table() -> RouteTable {
    RouteTable::builder()
        .route(Route::new("/", "Home", "HomePage"))
        .route(Route::new("/track", "Track", "TrackPage"))
        .route(Route::new("/panel", "Panel", "PanelPage").restricted())
        .route(Route::new("/grafikai", "Grafikai", "GrafikaiPage").local_variant("Grafikai2"))
        .route(Route::new("/grafikai2", "Grafikai2", "Grafikai2Page").restricted())
        .catch_all(DEFAULT_FORBIDDEN_VIEW)
        .build()
        .unwrap()
}

/// Every path the tests probe, named or not.
pub const PROBE_PATHS: &[&str] = &[
    "/",
    "/track",
    "/panel",
    "/panel/",
    "/grafikai",
    "/grafikai2",
    "/data",
    "/data/clear",
    "/data/latest",
    "/data/history",
    "/data/history?from=0&to=100",
    "/data/historyx",
    "/api/data/latest",
    "/unknown/xyz",
    "",
    "//",
    "/track?id=3#map",
];

/// Something the router asked the view layer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Mount(String),
    Forbid(String),
    HandOff { path: String, backend_path: String },
    Redirected { from: String, to: String },
}

/// A view layer that records every call.
///
/// With `interrupt_on_redirect` set, the first redirect issues a new intent
/// through the handle, superseding the navigation being applied.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    pub handle: Option<NavigationHandle>,
    pub interrupt_on_redirect: Option<String>,
}

impl RecordingView {
    pub fn mounted(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Mount(view) | ViewEvent::Forbid(view) => Some(view.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ViewLayer for RecordingView {
    fn mount(&mut self, view: &ViewId, _route: &Route) {
        self.events.push(ViewEvent::Mount(view.to_string()));
    }

    fn forbid(&mut self, view: &ViewId, _reason: &RejectReason) {
        self.events.push(ViewEvent::Forbid(view.to_string()));
    }

    fn hand_off(&mut self, path: &str, backend_path: &str) {
        self.events.push(ViewEvent::HandOff {
            path: path.to_string(),
            backend_path: backend_path.to_string(),
        });
    }

    fn redirected(&mut self, from: &Route, to: &Route) {
        self.events.push(ViewEvent::Redirected {
            from: from.name().to_string(),
            to: to.name().to_string(),
        });
        if let (Some(handle), Some(path)) = (&self.handle, self.interrupt_on_redirect.take()) {
            handle.navigate(path);
        }
    }
}

/// A router over the telemetry table with a fixed origin.
pub fn router(origin: OriginClass) -> Router<RecordingView> {
    init_logging();
    Router::new(
        Arc::new(telemetry_table()),
        Arc::new(PassthroughAllowList::backend_default()),
        FixedOrigin(origin),
        RecordingView::default(),
    )
}

//! Navigation orchestration.
//!
//! [`Router`] ties the pieces together. For every navigation intent it runs
//! the same pipeline:
//!
//! 1. **Resolving** — match the path against the [`RouteTable`];
//! 2. **Deciding** — ask the [`OriginSource`] for the origin class and let
//!    the [`NavigationGuard`] settle the decision (following at most one
//!    redirect);
//! 3. **Applying** — mount the view, mount the forbidden view, or hand the
//!    path off to the backend through the [`ViewLayer`];
//! 4. back to **Idle**.
//!
//! Navigations never interleave. A [`NavigationHandle`] lets the view layer
//! request another navigation while one is being applied; the in-flight
//! navigation then stops before its next effect and reports
//! [`NavigationResult::Superseded`], and the router runs the newest intent.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_gate::{
//!     HostOrigin, PassthroughAllowList, RejectReason, Route, RouteTable, Router, ViewId, ViewLayer,
//! };
//!
//! #[derive(Default)]
//! struct Screen {
//!     mounted: Vec<String>,
//! }
//!
//! impl ViewLayer for Screen {
//!     fn mount(&mut self, view: &ViewId, _route: &Route) {
//!         self.mounted.push(view.to_string());
//!     }
//!     fn forbid(&mut self, view: &ViewId, _reason: &RejectReason) {
//!         self.mounted.push(view.to_string());
//!     }
//!     fn hand_off(&mut self, _path: &str, _backend_path: &str) {}
//! }
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/panel", "Panel", "PanelPage").restricted())
//!     .build()
//!     .unwrap();
//! let mut router = Router::new(
//!     Arc::new(table),
//!     Arc::new(PassthroughAllowList::backend_default()),
//!     HostOrigin::new("canfusion.space"),
//!     Screen::default(),
//! );
//!
//! assert!(router.navigate("/panel").is_forbidden());
//! assert_eq!(router.view().mounted, ["Forbidden"]);
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ResolutionCache};
use crate::decision::{NavigationDecision, RejectReason};
use crate::error::NavigationResult;
use crate::guards::{Evaluation, NavigationGuard};
use crate::origin::OriginSource;
use crate::passthrough::PassthroughAllowList;
use crate::route::{Route, ViewId};
use crate::state::{HistoryEntry, NavigationHandle, NavigationIntent, RouterState};
use crate::table::{Resolution, RouteTable};
use crate::{debug_log, info_log, trace_log};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ViewLayer
// ============================================================================

/// The rendering side of the application.
///
/// The router calls exactly one of `mount`, `forbid` or `hand_off` per
/// applied navigation, optionally preceded by `redirected`.
pub trait ViewLayer {
    /// Mount the view of an allowed route.
    fn mount(&mut self, view: &ViewId, route: &Route);

    /// Mount the forbidden view.
    fn forbid(&mut self, view: &ViewId, reason: &RejectReason);

    /// Let the transport deliver `path` to the backend, which sees `backend_path`.
    fn hand_off(&mut self, path: &str, backend_path: &str);

    /// A local-variant redirect is about to mount `to` instead of `from`.
    fn redirected(&mut self, _from: &Route, _to: &Route) {}
}

// ============================================================================
// RouterPhase
// ============================================================================

/// Where the router is in the navigation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    /// Waiting for an intent.
    Idle,
    /// Matching the path against the route table.
    Resolving,
    /// Classifying the origin and running the guard.
    Deciding,
    /// Calling into the view layer and recording history.
    Applying,
}

impl fmt::Display for RouterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouterPhase::Idle => "idle",
            RouterPhase::Resolving => "resolving",
            RouterPhase::Deciding => "deciding",
            RouterPhase::Applying => "applying",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigateOp {
    Push,
    Replace,
    Back,
    Forward,
}

// ============================================================================
// Router
// ============================================================================

/// Resolves, guards and applies navigations.
pub struct Router<V> {
    table: Arc<RouteTable>,
    guard: NavigationGuard,
    origin: Box<dyn OriginSource>,
    view: V,
    state: RouterState,
    handle: NavigationHandle,
    phase: RouterPhase,
    #[cfg(feature = "cache")]
    cache: ResolutionCache,
}

impl<V: ViewLayer> Router<V> {
    /// Create an idle router with empty history.
    pub fn new(
        table: Arc<RouteTable>,
        passthrough: Arc<PassthroughAllowList>,
        origin: impl OriginSource,
        view: V,
    ) -> Self {
        Self {
            table,
            guard: NavigationGuard::new(passthrough),
            origin: Box::new(origin),
            view,
            state: RouterState::new(),
            handle: NavigationHandle::new(),
            phase: RouterPhase::Idle,
            #[cfg(feature = "cache")]
            cache: ResolutionCache::new(),
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `path`, pushing a history entry.
    ///
    /// Returns the result of the last navigation that ran: if the view layer
    /// requested another navigation while this one was applied, that is the
    /// result of the newest intent.
    pub fn navigate(&mut self, path: impl Into<String>) -> NavigationResult {
        self.run(NavigationIntent::Path(path.into()), NavigateOp::Push)
    }

    /// Navigate to `path`, replacing the current history entry.
    pub fn replace(&mut self, path: impl Into<String>) -> NavigationResult {
        self.run(NavigationIntent::Path(path.into()), NavigateOp::Replace)
    }

    /// Navigate to the route named `name`.
    pub fn navigate_named(&mut self, name: impl Into<String>) -> NavigationResult {
        self.run(NavigationIntent::Named(name.into()), NavigateOp::Push)
    }

    /// Go back in history, re-running the guard on the stored path.
    pub fn back(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_back_path()?.to_string();
        Some(self.run(NavigationIntent::Path(target), NavigateOp::Back))
    }

    /// Go forward in history, re-running the guard on the stored path.
    pub fn forward(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_forward_path()?.to_string();
        Some(self.run(NavigationIntent::Path(target), NavigateOp::Forward))
    }

    /// Run an intent issued through a [`NavigationHandle`] while the router was idle.
    pub fn process_pending(&mut self) -> Option<NavigationResult> {
        let intent = self.handle.take_pending()?;
        let result = self.navigate_once(intent, NavigateOp::Push);
        Some(self.drain_pending(result))
    }

    fn run(&mut self, intent: NavigationIntent, op: NavigateOp) -> NavigationResult {
        if let Some(stale) = self.handle.take_pending() {
            debug_log!("Dropping pending intent {:?} in favour of {:?}", stale, intent);
        }
        let result = self.navigate_once(intent, op);
        self.drain_pending(result)
    }

    fn drain_pending(&mut self, mut result: NavigationResult) -> NavigationResult {
        while let Some(next) = self.handle.take_pending() {
            debug_log!("Running intent issued during navigation: {:?}", next);
            result = self.navigate_once(next, NavigateOp::Push);
        }
        result
    }

    fn navigate_once(&mut self, intent: NavigationIntent, op: NavigateOp) -> NavigationResult {
        let nav_id = self.handle.start_navigation();
        info_log!("Navigation {:?} #{}: {:?}", op, nav_id, intent);

        self.enter(RouterPhase::Resolving);
        let (path, resolution) = match intent {
            NavigationIntent::Path(path) => {
                let resolution = self.resolve(&path);
                (path, Ok(resolution))
            }
            NavigationIntent::Named(name) => match self.table.get(&name) {
                // A pattern like `/track/{id}` is not a URL to show or store.
                Some(route) if route.is_parameterized() => {
                    (name.clone(), Err(RejectReason::ParameterizedRoute { name }))
                }
                Some(route) => (
                    route.path().to_string(),
                    Ok(Resolution::Named(Arc::clone(route))),
                ),
                None => (name.clone(), Err(RejectReason::UnknownRoute { name })),
            },
        };

        self.enter(RouterPhase::Deciding);
        let evaluation = match resolution {
            Ok(resolution) => {
                let origin = self.origin.origin();
                let previous = self.state.current_route().cloned();
                self.guard
                    .evaluate(&self.table, resolution, origin, previous.as_deref())
            }
            Err(reason) => Evaluation {
                target: Resolution::CatchAll { path: path.clone() },
                decision: NavigationDecision::reject(reason),
                redirected_from: None,
            },
        };

        self.enter(RouterPhase::Applying);
        let result = self.apply(nav_id, path, evaluation, op);
        self.enter(RouterPhase::Idle);

        info_log!("Navigation #{} finished: {:?}", nav_id, result);
        result
    }

    fn apply(
        &mut self,
        nav_id: usize,
        path: String,
        evaluation: Evaluation,
        op: NavigateOp,
    ) -> NavigationResult {
        let Evaluation {
            target,
            decision,
            redirected_from,
        } = evaluation;

        let reason = match decision {
            NavigationDecision::Allow { passthrough: true } => {
                if !self.handle.is_navigation_current(nav_id) {
                    return self.superseded(nav_id, path);
                }
                let backend_path = self
                    .guard
                    .passthrough()
                    .backend_path(&path)
                    .unwrap_or_else(|| path.clone());
                self.view.hand_off(&path, &backend_path);
                return NavigationResult::Passthrough { path, backend_path };
            }
            NavigationDecision::Allow { passthrough: false } => match target {
                Resolution::Named(route) => {
                    return self.apply_render(nav_id, path, route, redirected_from, op);
                }
                Resolution::CatchAll { path } => RejectReason::Unmatched { path },
            },
            NavigationDecision::Reject { reason } => reason,
            NavigationDecision::RedirectTo { name } => RejectReason::RedirectLimit { route: name },
        };

        if !self.handle.is_navigation_current(nav_id) {
            return self.superseded(nav_id, path);
        }
        let view = self.table.forbidden_view().clone();
        self.view.forbid(&view, &reason);
        if !matches!(
            reason,
            RejectReason::UnknownRoute { .. } | RejectReason::ParameterizedRoute { .. }
        ) {
            self.record(
                op,
                HistoryEntry {
                    path: path.clone(),
                    route: None,
                },
            );
        }
        NavigationResult::Forbidden { path, reason }
    }

    fn apply_render(
        &mut self,
        nav_id: usize,
        path: String,
        route: Arc<Route>,
        redirected_from: Option<Arc<Route>>,
        op: NavigateOp,
    ) -> NavigationResult {
        let path = match &redirected_from {
            Some(from) => {
                if !self.handle.is_navigation_current(nav_id) {
                    return self.superseded(nav_id, path);
                }
                self.view.redirected(from, &route);
                route.path().to_string()
            }
            None => path,
        };

        if !self.handle.is_navigation_current(nav_id) {
            return self.superseded(nav_id, path);
        }
        self.view.mount(route.view(), &route);
        self.record(
            op,
            HistoryEntry {
                path: path.clone(),
                route: Some(Arc::clone(&route)),
            },
        );
        NavigationResult::Rendered {
            path,
            route,
            redirected_from,
        }
    }

    fn superseded(&self, nav_id: usize, path: String) -> NavigationResult {
        debug_log!(
            "Navigation #{} to '{}' superseded by #{}",
            nav_id,
            path,
            self.handle.navigation_id()
        );
        NavigationResult::Superseded { path }
    }

    fn record(&mut self, op: NavigateOp, entry: HistoryEntry) {
        match op {
            NavigateOp::Push => self.state.push(entry),
            NavigateOp::Replace => self.state.replace(entry),
            NavigateOp::Back => {
                self.state.back(entry);
            }
            NavigateOp::Forward => {
                self.state.forward(entry);
            }
        }
    }

    fn resolve(&mut self, path: &str) -> Resolution {
        #[cfg(feature = "cache")]
        {
            self.cache.resolve(&self.table, path)
        }
        #[cfg(not(feature = "cache"))]
        {
            self.table.resolve(path)
        }
    }

    fn enter(&mut self, phase: RouterPhase) {
        trace_log!("Router phase: {} → {}", self.phase, phase);
        self.phase = phase;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current pipeline phase; always [`RouterPhase::Idle`] between navigations.
    pub fn phase(&self) -> RouterPhase {
        self.phase
    }

    /// A handle for requesting navigations from inside the view layer.
    pub fn handle(&self) -> NavigationHandle {
        self.handle.clone()
    }

    /// Get current path
    pub fn current_path(&self) -> Option<&str> {
        self.state.current_path()
    }

    /// The route currently rendered; `None` on the forbidden view.
    pub fn current_route(&self) -> Option<&Arc<Route>> {
        self.state.current_route()
    }

    /// Check if back navigation is possible
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Check if forward navigation is possible
    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// Get the navigation history
    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// Get the route table
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Get the navigation guard
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Get the view layer
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Get mutable access to the view layer
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Path of the route named `name`.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.table.url_for(name)
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

impl<V> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::{FixedOrigin, OriginClass};

    #[derive(Debug, Default)]
    struct Screen {
        events: Vec<String>,
    }

    impl ViewLayer for Screen {
        fn mount(&mut self, view: &ViewId, _route: &Route) {
            self.events.push(format!("mount {view}"));
        }

        fn forbid(&mut self, view: &ViewId, _reason: &RejectReason) {
            self.events.push(format!("forbid {view}"));
        }

        fn hand_off(&mut self, path: &str, backend_path: &str) {
            self.events.push(format!("hand_off {path} {backend_path}"));
        }

        fn redirected(&mut self, from: &Route, to: &Route) {
            self.events
                .push(format!("redirect {} {}", from.name(), to.name()));
        }
    }

    fn router(origin: OriginClass) -> Router<Screen> {
        let table = RouteTable::builder()
            .route(Route::new("/", "Home", "HomePage"))
            .route(Route::new("/panel", "Panel", "PanelPage").restricted())
            .route(Route::new("/grafikai", "Grafikai", "GrafikaiPage").local_variant("Grafikai2"))
            .route(Route::new("/grafikai2", "Grafikai2", "Grafikai2Page").restricted())
            .build()
            .unwrap();
        Router::new(
            Arc::new(table),
            Arc::new(PassthroughAllowList::backend_default()),
            FixedOrigin(origin),
            Screen::default(),
        )
    }

    #[test]
    fn test_render_and_phase() {
        let mut router = router(OriginClass::Local);
        assert_eq!(router.phase(), RouterPhase::Idle);

        let result = router.navigate("/panel");
        assert!(result.is_rendered());
        assert_eq!(router.phase(), RouterPhase::Idle);
        assert_eq!(router.view().events, ["mount PanelPage"]);
        assert_eq!(router.current_path(), Some("/panel"));
    }

    #[test]
    fn test_redirect_records_final_path() {
        let mut router = router(OriginClass::Local);
        let result = router.navigate("/grafikai");
        assert_eq!(result.path(), "/grafikai2");
        assert_eq!(
            router.view().events,
            ["redirect Grafikai Grafikai2", "mount Grafikai2Page"]
        );
        assert_eq!(router.current_path(), Some("/grafikai2"));
    }

    #[test]
    fn test_forbidden_is_recorded_without_route() {
        let mut router = router(OriginClass::Remote);
        router.navigate("/");
        let result = router.navigate("/panel");
        assert!(result.is_forbidden());
        assert_eq!(router.current_path(), Some("/panel"));
        assert!(router.current_route().is_none());
        assert!(router.can_go_back());
    }

    #[test]
    fn test_passthrough_is_not_recorded() {
        let mut router = router(OriginClass::Remote);
        router.navigate("/");
        let result = router.navigate("/api/data/latest");
        assert_eq!(
            result,
            NavigationResult::Passthrough {
                path: "/api/data/latest".into(),
                backend_path: "/data/latest".into(),
            }
        );
        assert_eq!(router.current_path(), Some("/"));
        assert_eq!(router.state().len(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let mut router = router(OriginClass::Local);
        let result = router.navigate_named("Missing");
        assert_eq!(
            result,
            NavigationResult::Forbidden {
                path: "Missing".into(),
                reason: RejectReason::UnknownRoute {
                    name: "Missing".into()
                },
            }
        );
        assert!(router.state().is_empty());
        assert_eq!(router.view().events, ["forbid Forbidden"]);
    }

    #[test]
    fn test_named_parameterized_route_is_refused() {
        let table = RouteTable::builder()
            .route(Route::new("/track/{id}", "TrackDetail", "TrackDetailPage"))
            .build()
            .unwrap();
        let mut router = Router::new(
            Arc::new(table),
            Arc::new(PassthroughAllowList::backend_default()),
            FixedOrigin(OriginClass::Local),
            Screen::default(),
        );

        let result = router.navigate_named("TrackDetail");
        assert_eq!(
            result,
            NavigationResult::Forbidden {
                path: "TrackDetail".into(),
                reason: RejectReason::ParameterizedRoute {
                    name: "TrackDetail".into()
                },
            }
        );
        assert!(router.state().is_empty());

        let result = router.navigate("/track/7");
        assert_eq!(result.path(), "/track/7");
        assert_eq!(router.current_path(), Some("/track/7"));
        router.navigate("/track/8");
        router.back();
        assert_eq!(router.current_path(), Some("/track/7"));
    }

    #[test]
    fn test_navigate_named() {
        let mut router = router(OriginClass::Local);
        let result = router.navigate_named("Panel");
        assert_eq!(result.route().map(|r| r.name()), Some("Panel"));
        assert_eq!(router.url_for("Panel"), Some("/panel"));
    }

    #[test]
    fn test_replace() {
        let mut router = router(OriginClass::Local);
        router.navigate("/");
        router.replace("/panel");
        assert_eq!(router.state().len(), 1);
        assert_eq!(router.current_path(), Some("/panel"));
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_resolutions_are_cached() {
        let mut router = router(OriginClass::Local);
        router.navigate("/panel");
        router.navigate("/");
        router.navigate("/panel");
        assert_eq!(router.cache_stats().hits, 1);
        assert_eq!(router.cache_stats().misses, 2);
    }
}

//! The navigation guard: origin- and allow-list-based access policy.
//!
//! [`NavigationGuard::decide`] is a pure, total function from a resolved
//! target, an [`OriginClass`] and the previous route to a
//! [`NavigationDecision`]. It never panics and never returns an error.
//!
//! # Evaluation order
//!
//! The first matching step wins:
//!
//! | Step | Condition | Decision |
//! |------|-----------|----------|
//! | 1 | catch-all and path is on the passthrough list | `Allow { passthrough: true }` |
//! | 2 | catch-all | `Reject(Unmatched)` |
//! | 3 | route is restricted and origin is not local | `Reject(Restricted)` |
//! | 4 | route has a local variant and origin is local | `RedirectTo(variant)` |
//! | 5 | otherwise | `Allow { passthrough: false }` |
//!
//! Passthrough comes before default-deny so backend calls are never blocked.
//! Restriction comes before canonicalization so a restricted route never
//! redirects a remote visitor anywhere.
//!
//! # Redirects
//!
//! [`NavigationGuard::evaluate`] follows a `RedirectTo` by running the full
//! decision again on the redirect target (a restricted target is still
//! checked). At most [`MAX_REDIRECT_HOPS`] hops are followed; a target that
//! asks to redirect again is rejected.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use route_gate::{NavigationGuard, OriginClass, PassthroughAllowList, Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("/panel", "Panel", "PanelPage").restricted())
//!     .build()
//!     .unwrap();
//! let guard = NavigationGuard::new(Arc::new(PassthroughAllowList::backend_default()));
//!
//! let target = table.resolve("/panel");
//! assert!(guard.decide(&target, OriginClass::Local, None).is_allow());
//! assert!(guard.decide(&target, OriginClass::Remote, None).is_reject());
//! assert!(guard.decide(&table.resolve("/data/latest"), OriginClass::Remote, None).is_passthrough());
//! ```

use crate::decision::{NavigationDecision, RejectReason};
use crate::origin::OriginClass;
use crate::passthrough::PassthroughAllowList;
use crate::route::Route;
use crate::table::{Resolution, RouteTable};
use crate::{debug_log, error_log, trace_log, warn_log};
use std::sync::Arc;

/// Maximum number of redirects followed for one navigation.
///
/// Table validation guarantees local variants never chain, so one hop is
/// all the policy can produce.
pub const MAX_REDIRECT_HOPS: usize = 1;

/// The decision engine.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    passthrough: Arc<PassthroughAllowList>,
}

impl NavigationGuard {
    /// Create a guard over the given allow-list.
    pub fn new(passthrough: Arc<PassthroughAllowList>) -> Self {
        Self { passthrough }
    }

    /// Get the passthrough allow-list
    pub fn passthrough(&self) -> &PassthroughAllowList {
        &self.passthrough
    }

    /// Decide what to do with one target.
    pub fn decide(
        &self,
        target: &Resolution,
        origin: OriginClass,
        previous: Option<&Route>,
    ) -> NavigationDecision {
        let decision = self.decide_inner(target, origin);
        debug_log!(
            "Guard: {} (origin {}, from {}) → {:?}",
            target,
            origin,
            previous.map_or("<none>", |r| r.name()),
            decision
        );
        decision
    }

    fn decide_inner(&self, target: &Resolution, origin: OriginClass) -> NavigationDecision {
        let route = match target {
            Resolution::CatchAll { path } if self.passthrough.is_passthrough(path) => {
                return NavigationDecision::passthrough();
            }
            Resolution::CatchAll { path } => {
                return NavigationDecision::reject(RejectReason::Unmatched { path: path.clone() });
            }
            Resolution::Named(route) => route,
        };

        if route.is_restricted() && !origin.is_local() {
            return NavigationDecision::reject(RejectReason::Restricted {
                route: route.name().to_string(),
            });
        }

        if let Some(variant) = route.local_variant_name() {
            if origin.is_local() {
                return NavigationDecision::redirect(variant);
            }
        }

        NavigationDecision::allow()
    }

    /// Decide, following redirects through the full policy.
    ///
    /// The returned [`Evaluation`] never carries a `RedirectTo` decision.
    pub fn evaluate(
        &self,
        table: &RouteTable,
        target: Resolution,
        origin: OriginClass,
        previous: Option<&Route>,
    ) -> Evaluation {
        let mut current = target;
        let mut redirected_from: Option<Arc<Route>> = None;
        let mut hops = 0;

        loop {
            let name = match self.decide(&current, origin, previous) {
                NavigationDecision::RedirectTo { name } => name,
                decision => {
                    if let Some(reason) = decision.reject_reason() {
                        warn_log!("Navigation to {} rejected: {}", current, reason);
                    }
                    return Evaluation {
                        target: current,
                        decision,
                        redirected_from,
                    };
                }
            };

            if hops == MAX_REDIRECT_HOPS {
                error_log!(
                    "Redirect limit ({}) reached at {} → '{}'",
                    MAX_REDIRECT_HOPS,
                    current,
                    name
                );
                let route = current
                    .route()
                    .map_or_else(|| name.clone(), |r| r.name().to_string());
                return Evaluation {
                    target: current,
                    decision: NavigationDecision::reject(RejectReason::RedirectLimit { route }),
                    redirected_from,
                };
            }

            let Some(next) = table.get(&name) else {
                warn_log!("Redirect from {} to unknown route '{}'", current, name);
                return Evaluation {
                    target: current,
                    decision: NavigationDecision::reject(RejectReason::UnknownRedirect { name }),
                    redirected_from,
                };
            };

            trace_log!("Following redirect {} → {}", current, next);
            if redirected_from.is_none() {
                redirected_from = current.route().cloned();
            }
            current = Resolution::Named(Arc::clone(next));
            hops += 1;
        }
    }
}

/// A settled decision: what was finally decided, and for which target.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The target the final decision applies to (the redirect target after a hop).
    pub target: Resolution,
    /// `Allow` or `Reject`; never `RedirectTo`.
    pub decision: NavigationDecision,
    /// The route originally requested, if a redirect was followed.
    pub redirected_from: Option<Arc<Route>>,
}

impl Evaluation {
    /// Whether a local-variant redirect was followed
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

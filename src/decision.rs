//! Navigation decisions.
//!
//! [`NavigationDecision`] is the closed set of answers the
//! [`NavigationGuard`](crate::NavigationGuard) can give: allow, redirect to a
//! named route, or reject with a [`RejectReason`]. Decisions are built fresh
//! for every navigation attempt and never cached.
//!
//! # Example
//!
//! ```
//! use route_gate::{NavigationDecision, RejectReason};
//!
//! let decision = NavigationDecision::redirect("Grafikai2");
//! assert_eq!(decision.redirect_name(), Some("Grafikai2"));
//!
//! let decision = NavigationDecision::reject(RejectReason::Restricted { route: "Panel".into() });
//! assert!(decision.is_reject());
//! ```

use std::fmt;

/// Result of evaluating the guard policy for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Render the target, or hand it to the backend when `passthrough` is set.
    Allow { passthrough: bool },

    /// Re-run the decision on the route with this name.
    RedirectTo { name: String },

    /// Render the forbidden view.
    Reject { reason: RejectReason },
}

/// Why a navigation ended on the forbidden view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No named route claims the path and it is not a passthrough path.
    Unmatched { path: String },

    /// The route requires a local origin.
    Restricted { route: String },

    /// The redirect target asked to redirect again.
    RedirectLimit { route: String },

    /// The redirect target is not in the route table.
    UnknownRedirect { name: String },

    /// A navigation by name used a name no route has.
    UnknownRoute { name: String },

    /// A navigation by name targeted a route whose path needs parameters.
    ParameterizedRoute { name: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Unmatched { path } => write!(f, "No route for {}", path),
            RejectReason::Restricted { route } => {
                write!(f, "Route '{}' is only available locally", route)
            }
            RejectReason::RedirectLimit { route } => {
                write!(f, "Redirect limit reached at route '{}'", route)
            }
            RejectReason::UnknownRedirect { name } => {
                write!(f, "Redirect target '{}' does not exist", name)
            }
            RejectReason::UnknownRoute { name } => write!(f, "No route named '{}'", name),
            RejectReason::ParameterizedRoute { name } => {
                write!(f, "Route '{}' has path parameters; navigate by path", name)
            }
        }
    }
}

impl NavigationDecision {
    /// Allow rendering of a frontend view.
    pub const fn allow() -> Self {
        Self::Allow { passthrough: false }
    }

    /// Allow the navigation without intercepting it.
    pub const fn passthrough() -> Self {
        Self::Allow { passthrough: true }
    }

    /// Redirect to the route named `name`.
    pub fn redirect(name: impl Into<String>) -> Self {
        Self::RedirectTo { name: name.into() }
    }

    /// Reject with `reason`.
    pub fn reject(reason: RejectReason) -> Self {
        Self::Reject { reason }
    }

    /// Check if this allows the navigation (passthrough included)
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Check if this hands the path to the backend
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Allow { passthrough: true })
    }

    /// Check if this is a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::RedirectTo { .. })
    }

    /// Check if this is a rejection
    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }

    /// Redirect target name, if this is a redirect
    pub fn redirect_name(&self) -> Option<&str> {
        match self {
            Self::RedirectTo { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Rejection reason, if this is a rejection
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Reject { reason } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_variants() {
        let allow = NavigationDecision::allow();
        assert!(allow.is_allow());
        assert!(!allow.is_passthrough());

        let passthrough = NavigationDecision::passthrough();
        assert!(passthrough.is_allow());
        assert!(passthrough.is_passthrough());
        assert_ne!(allow, passthrough);
    }

    #[test]
    fn test_redirect() {
        let decision = NavigationDecision::redirect("Grafikai2");
        assert!(decision.is_redirect());
        assert!(!decision.is_allow());
        assert_eq!(decision.redirect_name(), Some("Grafikai2"));
        assert!(decision.reject_reason().is_none());
    }

    #[test]
    fn test_reject_reason_display() {
        let decision = NavigationDecision::reject(RejectReason::Restricted {
            route: "Panel".into(),
        });
        assert!(decision.is_reject());
        assert_eq!(
            decision.reject_reason().map(ToString::to_string),
            Some("Route 'Panel' is only available locally".to_string())
        );
    }
}

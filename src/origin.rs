//! Origin classification.
//!
//! The gate distinguishes two execution contexts: the app served from the
//! same machine (`Local`) and everything else (`Remote`). The class is derived
//! from the hostname the browser reports.
//!
//! **This is not a security boundary.** The hostname is client-reported and
//! trivially spoofed; restricted routes are hidden from remote visitors as a
//! convenience, nothing more. Anything that needs protecting must be
//! protected by the backend.
//!
//! # Injecting the origin
//!
//! The [`Router`](crate::Router) never reads global state. It asks an
//! [`OriginSource`] once per navigation:
//!
//! | Source | Use |
//! |--------|-----|
//! | [`HostOrigin`] | classifies a hostname supplied at start-up |
//! | [`FixedOrigin`] | always answers the same class (tests) |
//! | [`origin_fn`] | wraps a closure |
//!
//! ```
//! use route_gate::{classify, OriginClass};
//!
//! assert_eq!(classify("localhost"), OriginClass::Local);
//! assert_eq!(classify("[::1]"), OriginClass::Local);
//! assert_eq!(classify("canfusion.space"), OriginClass::Remote);
//! assert_eq!(classify(""), OriginClass::Remote);
//! ```

use std::fmt;

/// Hostnames that count as loopback.
pub const LOOPBACK_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", "[::1]"];

/// Coarse classification of where the app is being accessed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginClass {
    /// Loopback hostname.
    Local,
    /// Anything else.
    Remote,
}

impl OriginClass {
    /// Check if this is a loopback origin
    pub fn is_local(self) -> bool {
        self == OriginClass::Local
    }
}

impl fmt::Display for OriginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginClass::Local => f.write_str("local"),
            OriginClass::Remote => f.write_str("remote"),
        }
    }
}

/// Classify a hostname.
///
/// Only exact loopback forms are local; unrecognized or malformed input
/// classifies as [`OriginClass::Remote`].
pub fn classify(hostname: &str) -> OriginClass {
    if LOOPBACK_HOSTS.contains(&hostname) {
        OriginClass::Local
    } else {
        OriginClass::Remote
    }
}

// ============================================================================
// OriginSource
// ============================================================================

/// Supplies the origin class for a navigation.
pub trait OriginSource: Send + Sync + 'static {
    fn origin(&self) -> OriginClass;
}

/// Classifies a hostname captured at start-up.
///
/// The hostname only changes on a full reload, so one value per router is enough.
#[derive(Debug, Clone)]
pub struct HostOrigin {
    hostname: String,
}

impl HostOrigin {
    /// Classify `hostname` on every call.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    /// Get the hostname
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

impl OriginSource for HostOrigin {
    fn origin(&self) -> OriginClass {
        classify(&self.hostname)
    }
}

/// Always reports the same class.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrigin(pub OriginClass);

impl OriginSource for FixedOrigin {
    fn origin(&self) -> OriginClass {
        self.0
    }
}

/// Create an origin source from a closure.
///
/// ```
/// use route_gate::{origin_fn, OriginClass, OriginSource};
///
/// let source = origin_fn(|| OriginClass::Remote);
/// assert_eq!(source.origin(), OriginClass::Remote);
/// ```
pub const fn origin_fn<F>(f: F) -> FnOrigin<F>
where
    F: Fn() -> OriginClass + Send + Sync + 'static,
{
    FnOrigin { f }
}

/// Origin source created from a closure.
pub struct FnOrigin<F> {
    f: F,
}

impl<F> OriginSource for FnOrigin<F>
where
    F: Fn() -> OriginClass + Send + Sync + 'static,
{
    fn origin(&self) -> OriginClass {
        (self.f)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_forms_are_local() {
        for host in ["localhost", "127.0.0.1", "::1", "[::1]"] {
            assert_eq!(classify(host), OriginClass::Local, "{host}");
        }
    }

    #[test]
    fn test_everything_else_is_remote() {
        for host in [
            "canfusion.space",
            "niekas7.hdun.org",
            "192.168.1.10",
            "127.0.0.2",
            "localhost.evil.com",
            " localhost",
            "LOCALHOST",
            "[::1",
            "",
        ] {
            assert_eq!(classify(host), OriginClass::Remote, "{host:?}");
        }
    }

    #[test]
    fn test_sources() {
        assert_eq!(HostOrigin::new("localhost").origin(), OriginClass::Local);
        assert_eq!(HostOrigin::new("example.org").origin(), OriginClass::Remote);
        assert_eq!(FixedOrigin(OriginClass::Local).origin(), OriginClass::Local);
        assert!(origin_fn(|| OriginClass::Local).origin().is_local());
    }

    #[test]
    fn test_display() {
        assert_eq!(OriginClass::Local.to_string(), "local");
        assert_eq!(OriginClass::Remote.to_string(), "remote");
    }
}

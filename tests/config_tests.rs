//! Building the gate from TOML configuration.

mod common;

use common::RecordingView;
use route_gate::*;
use std::sync::Arc;

const DASHBOARD: &str = r#"
forbidden_view = "NotAllowed"

[[routes]]
path = "/"
name = "Home"
view = "HomePage"

[[routes]]
path = "/panel"
name = "Panel"
view = "PanelPage"
restricted = true

[passthrough]
exact = ["/data/latest"]
query_prefix = ["/data/history"]
"#;

fn build(toml: &str) -> Result<(RouteTable, PassthroughAllowList), ConfigError> {
    RouterConfig::from_toml_str(toml)?.build()
}

#[test]
fn test_configured_router() {
    common::init_logging();
    let (table, passthrough) = build(DASHBOARD).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(passthrough.api_mount(), None);

    let mut router = Router::new(
        Arc::new(table),
        Arc::new(passthrough),
        FixedOrigin(OriginClass::Remote),
        RecordingView::default(),
    );
    assert!(router.navigate("/panel").is_forbidden());
    assert!(router.navigate("/data/history?from=0").is_passthrough());
    assert!(router.navigate("/data/clear").is_forbidden());
    assert_eq!(router.view().mounted(), ["NotAllowed", "NotAllowed"]);
}

#[test]
fn test_default_matches_builders() {
    let (table, passthrough) = RouterConfig::default().build().unwrap();
    let expected = common::telemetry_table();
    let names = |t: &RouteTable| t.routes().map(|r| r.to_string()).collect::<Vec<_>>();
    assert_eq!(names(&table), names(&expected));
    assert_eq!(
        passthrough.entries(),
        PassthroughAllowList::backend_default().entries()
    );
}

#[test]
fn test_duplicate_path_is_rejected() {
    let err = build(
        r#"
        [[routes]]
        path = "/panel"
        name = "Panel"
        view = "PanelPage"

        [[routes]]
        path = "/panel/"
        name = "Admin"
        view = "AdminPage"
        "#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicatePath {
            path: "/panel".into(),
            first: "Panel".into(),
            second: "Admin".into(),
        }
    );
}

#[test]
fn test_unknown_local_variant_is_rejected() {
    let err = build(
        r#"
        [[routes]]
        path = "/grafikai"
        name = "Grafikai"
        view = "GrafikaiPage"
        local_variant = "Grafikai3"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLocalVariant { .. }));
}

#[test]
fn test_relative_passthrough_is_rejected() {
    let err = build(
        r#"
        [passthrough]
        exact = ["data"]
        "#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidPassthrough {
            entry: "data".into()
        }
    );
}

#[test]
fn test_bad_toml_is_parse_error() {
    let err = build("routes = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Configuration parse error"));
}

use super::*;
use crate::router::{Dispatch, QueuedNavigator, RecordingRouter};
use crate::session::{ServerId, ServerRef};

fn server(address: &str) -> ServerRef {
    ServerRef { id: ServerId::new(), address: address.to_owned() }
}

fn state(servers: usize, current: bool, token: &str) -> SessionStateView {
    let servers: Vec<ServerRef> = (0..servers).map(|i| server(&format!("https://s{i}.example.test"))).collect();
    let current_server = if current { servers.first().cloned() } else { None };
    SessionStateView { servers, current_server, access_token: token.to_owned() }
}

fn at(path: &str) -> NavigationTarget {
    NavigationTarget::new(path, "")
}

const PATHS: [&str; 6] = ["", "/", "/server/add", "/server/select", "/server/login", "/board/42"];

// =============================================================
// Rule 1: no servers
// =============================================================

#[test]
fn no_servers_always_goes_to_add() {
    let routes = RouteTable::default();
    for current in [false, true] {
        for token in ["", "tok"] {
            for path in PATHS {
                let session = SessionStateView {
                    servers: Vec::new(),
                    current_server: current.then(|| server("https://stale.example.test")),
                    access_token: token.to_owned(),
                };
                assert_eq!(
                    decide(&session, &at(path), &routes),
                    Some(Destination::AddServer),
                    "current={current} token={token:?} path={path:?}"
                );
            }
        }
    }
}

// =============================================================
// Rule 2: login
// =============================================================

#[test]
fn current_server_without_token_goes_to_login() {
    let routes = RouteTable::default();
    for path in PATHS {
        assert_eq!(decide(&state(2, true, ""), &at(path), &routes), Some(Destination::Login), "path={path:?}");
    }
}

#[test]
fn single_server_on_add_page_goes_to_login() {
    let routes = RouteTable::default();
    for current in [false, true] {
        for token in ["", "tok"] {
            assert_eq!(
                decide(&state(1, current, token), &at("/server/add"), &routes),
                Some(Destination::Login),
                "current={current} token={token:?}"
            );
        }
    }
}

#[test]
fn two_servers_on_add_page_without_current_falls_through_to_select() {
    let routes = RouteTable::default();
    assert_eq!(
        decide(&state(2, false, ""), &at("/server/add"), &routes),
        Some(Destination::SelectServer)
    );
}

#[test]
fn two_servers_on_add_page_authenticated_goes_home() {
    let routes = RouteTable::default();
    assert_eq!(decide(&state(2, true, "tok"), &at("/server/add"), &routes), Some(Destination::Home));
}

// =============================================================
// Rule 3 / 5: authenticated
// =============================================================

#[test]
fn authenticated_on_pre_auth_page_goes_home() {
    let routes = RouteTable::default();
    for path in ["/server/select", "/server/login"] {
        for servers in [1, 3] {
            assert_eq!(
                decide(&state(servers, true, "tok"), &at(path), &routes),
                Some(Destination::Home),
                "servers={servers} path={path:?}"
            );
        }
    }
}

#[test]
fn authenticated_elsewhere_stays() {
    let routes = RouteTable::default();
    for path in ["", "/", "/board/42", "/server"] {
        assert_eq!(decide(&state(2, true, "tok"), &at(path), &routes), None, "path={path:?}");
    }
}

// =============================================================
// Rule 4: select
// =============================================================

#[test]
fn no_current_server_goes_to_select() {
    let routes = RouteTable::default();
    for token in ["", "tok"] {
        for path in ["", "/", "/server/select", "/server/login", "/board/42"] {
            assert_eq!(
                decide(&state(2, false, token), &at(path), &routes),
                Some(Destination::SelectServer),
                "token={token:?} path={path:?}"
            );
        }
    }
}

// =============================================================
// Custom routes
// =============================================================

#[test]
fn decision_uses_configured_routes() {
    let routes = RouteTable {
        add: "/servers/new".to_owned(),
        select: "/servers".to_owned(),
        login: "/signin".to_owned(),
        home: "/app".to_owned(),
    };
    assert_eq!(decide(&state(1, false, ""), &at("/servers/new"), &routes), Some(Destination::Login));
    assert_eq!(decide(&state(1, false, ""), &at("/server/add"), &routes), Some(Destination::SelectServer));

    let action = redirect_target(&state(1, true, "tok"), &at("/signin"), &routes).into_action().unwrap();
    assert_eq!(action, RedirectAction { destination: Destination::Home, path: "/app".to_owned() });
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_a_empty_servers_redirects_to_add() {
    let action = redirect_target(&state(0, false, ""), &at("/"), &RouteTable::default()).into_action().unwrap();
    assert_eq!(action.path, "/server/add");
}

#[test]
fn scenario_b_registered_without_token_redirects_to_login() {
    let action = redirect_target(&state(1, true, ""), &at("/server/add"), &RouteTable::default()).into_action().unwrap();
    assert_eq!(action.path, "/server/login");
}

#[test]
fn scenario_c_authenticated_on_login_redirects_home() {
    let action = redirect_target(&state(1, true, "tok"), &at("/server/login"), &RouteTable::default()).into_action().unwrap();
    assert_eq!(action.path, "/");
}

#[test]
fn scenario_d_no_current_server_redirects_to_select() {
    let action = redirect_target(&state(1, false, ""), &at("/"), &RouteTable::default()).into_action().unwrap();
    assert_eq!(action.path, "/server/select");
}

#[test]
fn scenario_e_already_on_select_issues_nothing() {
    let session = state(1, false, "");
    let nav = NavigationTarget::new("/server/select", "");
    let routes = RouteTable::default();
    assert_eq!(decide(&session, &nav, &routes), Some(Destination::SelectServer));
    assert_eq!(redirect_target(&session, &nav, &routes), Verdict::Suppressed(Destination::SelectServer));
}

// =============================================================
// Loop avoidance
// =============================================================

#[test]
fn destination_equal_to_pending_is_suppressed() {
    let nav = NavigationTarget::new("/", "/server/add");
    assert_eq!(
        redirect_target(&state(0, false, ""), &nav, &RouteTable::default()),
        Verdict::Suppressed(Destination::AddServer)
    );
}

#[test]
fn second_call_with_pending_updated_yields_nothing() {
    let routes = RouteTable::default();
    for session in [state(0, false, ""), state(1, true, ""), state(2, false, ""), state(1, true, "tok")] {
        let mut nav = at("/server/login");
        let Verdict::Redirect(first) = redirect_target(&session, &nav, &routes) else {
            continue;
        };
        nav.pending_path = first.path.clone();
        assert!(
            matches!(redirect_target(&session, &nav, &routes), Verdict::Suppressed(_)),
            "session={session:?}"
        );
    }
}

#[test]
fn authenticated_elsewhere_is_stay_not_suppressed() {
    assert_eq!(redirect_target(&state(1, true, "tok"), &at("/board/42"), &RouteTable::default()), Verdict::Stay);
}

// =============================================================
// apply
// =============================================================

#[test]
fn apply_goes_to_action_path() {
    let mut router = RecordingRouter::at("/");
    let action = RedirectAction::new(Destination::SelectServer, &RouteTable::default());
    apply(&action, &mut QueuedNavigator(&mut router));
    assert_eq!(router.last(), Some(&(Dispatch::Push, "/server/select".to_owned())));
}

#[test]
fn destination_serializes_snake_case() {
    assert_eq!(serde_json::to_value(Destination::AddServer).unwrap(), "add_server");
    assert_eq!(serde_json::to_value(Destination::Home).unwrap(), "home");
}

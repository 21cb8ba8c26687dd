use std::sync::Arc;

use chrono::{Duration, Utc};

use dossier_client::auth::{MemoryTokenStore, SessionManager};
use dossier_client::routing::{NavLink, Navigation, View, evaluate, evaluate_path, nav_links};
use dossier_client::BearerCredential;

use super::support::{fresh_token, token};

fn manager(stored: Option<String>) -> SessionManager {
    let store = stored.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_token);
    SessionManager::new(Arc::new(store), BearerCredential::new())
}

#[test]
fn nothing_renders_before_restore() {
    let session = manager(Some(fresh_token("ana@example.com", true)));
    for view in View::ALL {
        assert_eq!(evaluate(session.session(), view), Navigation::Deferred);
    }
}

#[test]
fn restored_standard_account_sees_dashboard_only() {
    let mut session = manager(Some(fresh_token("ana@example.com", false)));
    session.initialize();

    assert_eq!(
        evaluate(session.session(), View::Dashboard),
        Navigation::Allow(View::Dashboard)
    );
    assert_eq!(
        evaluate(session.session(), View::Admin),
        Navigation::Redirect(View::Dashboard)
    );
    assert_eq!(
        evaluate(session.session(), View::Login),
        Navigation::Redirect(View::Dashboard)
    );
    assert_eq!(
        nav_links(session.session()),
        vec![NavLink::Dashboard, NavLink::Logout]
    );
}

#[test]
fn expired_stored_token_sends_everything_to_login() {
    let mut session = manager(Some(token(
        "root@example.com",
        true,
        Utc::now() - Duration::seconds(1),
    )));
    session.initialize();

    assert_eq!(
        evaluate(session.session(), View::Admin),
        Navigation::Redirect(View::Login)
    );
    assert_eq!(
        evaluate_path(session.session(), "/somewhere/else"),
        Navigation::Redirect(View::Login)
    );
    assert!(nav_links(session.session()).is_empty());
}

#[test]
fn privileged_account_reaches_admin_and_unknown_paths_go_home() {
    let mut session = manager(Some(fresh_token("root@example.com", true)));
    session.initialize();

    assert_eq!(
        evaluate(session.session(), View::Admin),
        Navigation::Allow(View::Admin)
    );
    assert_eq!(
        evaluate_path(session.session(), "/nope"),
        Navigation::Redirect(View::Dashboard)
    );
    assert!(nav_links(session.session()).contains(&NavLink::Admin));
}

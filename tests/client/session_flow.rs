use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dossier_client::app::LoginForm;
use dossier_client::auth::{AccessLevel, FileTokenStore, SessionManager, TOKEN_KEY};
use dossier_client::{BearerCredential, ClientError};

use super::support::{api_for, fresh_token, token, token_with};

fn manager_at(path: &std::path::Path, bearer: BearerCredential) -> SessionManager {
    SessionManager::new(Arc::new(FileTokenStore::new(path.to_path_buf())), bearer)
}

fn read_file(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn session_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    let raw = fresh_token("ana@example.com", false);

    let mut first = manager_at(&store_path, BearerCredential::new());
    first.initialize();
    first.login(&raw).unwrap();
    let claims_before = first.claims().cloned();
    drop(first);

    let bearer = BearerCredential::new();
    let mut second = manager_at(&store_path, bearer.clone());
    second.initialize();

    assert_eq!(second.token(), Some(raw.as_str()));
    assert_eq!(second.claims().cloned(), claims_before);
    assert_eq!(second.access_level(), AccessLevel::AuthenticatedStandard);
    assert_eq!(bearer.header_value(), Some(format!("Bearer {raw}")));
}

#[test]
fn expired_persisted_token_is_dropped_and_other_keys_kept() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    let expired = token("ana@example.com", true, Utc::now() - Duration::minutes(5));
    std::fs::write(
        &store_path,
        json!({ TOKEN_KEY: expired, "theme": "dark" }).to_string(),
    )
    .unwrap();

    let bearer = BearerCredential::new();
    let mut session = manager_at(&store_path, bearer.clone());
    session.initialize();

    assert!(session.is_initialized());
    assert_eq!(session.access_level(), AccessLevel::Unauthenticated);
    assert!(!bearer.is_set());

    let persisted = read_file(&store_path);
    assert!(persisted.get(TOKEN_KEY).is_none());
    assert_eq!(persisted["theme"], "dark");
}

#[test]
fn login_with_token_lacking_expiry_is_refused() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    let mut session = manager_at(&store_path, BearerCredential::new());
    session.initialize();

    let no_exp = token_with(&json!({"sub": "ana@example.com", "is_admin": true}));
    let err = session.login(&no_exp).unwrap_err();

    assert!(matches!(err, ClientError::MalformedCredential(_)));
    assert!(!session.is_authenticated());
    assert!(
        !store_path.exists() || read_file(&store_path).get(TOKEN_KEY).is_none(),
        "refused token must not be persisted"
    );
}

#[test]
fn logout_twice_matches_logout_once() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    let bearer = BearerCredential::new();
    let mut session = manager_at(&store_path, bearer.clone());
    session.initialize();
    session.login(&fresh_token("ana@example.com", true)).unwrap();

    session.logout();
    let after_once = (session.access_level(), session.token().map(str::to_string));
    session.logout();

    assert_eq!(
        (session.access_level(), session.token().map(str::to_string)),
        after_once
    );
    assert!(!bearer.is_set());
    assert!(read_file(&store_path).get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn requests_carry_bearer_only_while_signed_in() {
    let server = MockServer::start().await;
    let raw = fresh_token("root@example.com", true);

    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .and(header("authorization", format!("Bearer {raw}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Token ausente"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let dir = TempDir::new().unwrap();
    let mut session = manager_at(&dir.path().join("session.json"), api.bearer().clone());
    session.initialize();

    let before = api.list_users().await.unwrap_err();
    assert_eq!(before.status, Some(401));

    session.login(&raw).unwrap();
    assert!(api.list_users().await.unwrap().is_empty());

    session.logout();
    let after = api.list_users().await.unwrap_err();
    assert_eq!(after.display_message(), "Token ausente");
}

#[tokio::test]
async fn login_form_persists_issued_token() {
    let server = MockServer::start().await;
    let raw = fresh_token("ana@example.com", false);
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": raw})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    let mut session = manager_at(&store_path, api.bearer().clone());
    session.initialize();

    let mut form = LoginForm::new();
    assert!(
        form.submit(&api, &mut session, " ana@example.com ", "pw")
            .await
    );
    assert_eq!(read_file(&store_path)[TOKEN_KEY], raw);
    assert_eq!(session.access_level(), AccessLevel::AuthenticatedStandard);
}

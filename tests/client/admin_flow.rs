use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dossier_client::{AdminConsole, ClientError, Notice};

use super::support::{api_for, fresh_token, signed_in};

#[tokio::test]
async fn standard_session_is_refused_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let session = signed_in(&api, Some(fresh_token("ana@example.com", false)));
    let mut console = AdminConsole::new(api.clone());

    let err = console.refresh_users(session.session()).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    assert!(matches!(
        console.clear_cache(session.session()).await,
        Err(ClientError::Forbidden(_))
    ));
    assert!(console.notice().is_none());
}

#[tokio::test]
async fn signed_out_session_is_refused() {
    let server = MockServer::start().await;
    let api = api_for(&server);
    let session = signed_in(&api, None);
    let mut console = AdminConsole::new(api.clone());

    assert!(matches!(
        console.delete_user(session.session(), 3).await,
        Err(ClientError::Forbidden(_))
    ));
}

#[tokio::test]
async fn create_user_reloads_the_listing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"message": "Utilizador criado com sucesso."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "email": "root@example.com", "is_admin": true},
            {"id": 2, "email": "novo@example.com", "is_admin": false},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let session = signed_in(&api, Some(fresh_token("root@example.com", true)));
    let mut console = AdminConsole::new(api.clone());

    let notice = console
        .create_user(session.session(), "novo@example.com", "pw", false)
        .await
        .unwrap()
        .clone();

    assert_eq!(
        notice,
        Notice::Success("Utilizador criado com sucesso.".into())
    );
    assert_eq!(console.users().len(), 2);
    assert_eq!(console.users()[1].email, "novo@example.com");
}

#[tokio::test]
async fn failed_delete_shows_service_error_and_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/admin/users/42"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Utilizador não encontrado"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let session = signed_in(&api, Some(fresh_token("root@example.com", true)));
    let mut console = AdminConsole::new(api.clone());

    let notice = console
        .delete_user(session.session(), 42)
        .await
        .unwrap()
        .clone();

    assert_eq!(notice, Notice::Error("Utilizador não encontrado".into()));
    assert!(session.is_privileged());
    assert!(api.bearer().is_set());
}

#[tokio::test]
async fn clear_cache_reports_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/clear-cache"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Cache limpo."})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let session = signed_in(&api, Some(fresh_token("root@example.com", true)));
    let mut console = AdminConsole::new(api.clone());

    let notice = console.clear_cache(session.session()).await.unwrap();
    assert_eq!(notice.message(), "Cache limpo.");
    assert!(!console.is_clearing_cache());
}

#[tokio::test]
async fn failed_reload_keeps_the_change_notice() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/admin/users/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let session = signed_in(&api, Some(fresh_token("root@example.com", true)));
    let mut console = AdminConsole::new(api.clone());

    let notice = console
        .delete_user(session.session(), 2)
        .await
        .unwrap()
        .clone();

    assert_eq!(
        notice,
        Notice::Success("Utilizador deletado com sucesso.".into())
    );
    assert_eq!(console.notice(), Some(&notice));
    assert_eq!(
        console.listing_error(),
        Some("Não foi possível carregar utilizadores.")
    );
}

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dossier_client::chat::{Origin, Phase, Rejection};
use dossier_client::{Orchestrator, SubmitOutcome};

use super::support::api_for;

#[tokio::test]
async fn structured_answer_becomes_a_dossier_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scraping/scrape"))
        .and(body_json(json!({"url": "https://vtex.com/br-pt/"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dossie_pagina_principal": {
                "url": "https://vtex.com/br-pt/",
                "title": "VTEX",
                "meta_description": "Commerce platform",
                "technologies": ["React", "Next.js"],
            },
            "analise_profunda_subpaginas": [{"url": "https://vtex.com/br-pt/sobre"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(api_for(&server));
    let outcome = orchestrator.submit("  https://vtex.com/br-pt/ ").await;

    assert_eq!(outcome, SubmitOutcome::Answered);
    assert_eq!(orchestrator.phase(), Phase::Idle);

    let transcript = orchestrator.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.entries()[0].origin, Origin::User);

    let answer = transcript.last().unwrap();
    assert!(!answer.is_error);
    let dossier = answer.dossier().unwrap();
    assert_eq!(dossier.title(), Some("VTEX"));
    assert_eq!(dossier.technologies(), vec!["React", "Next.js"]);
    assert_eq!(dossier.subpage_count(), 1);
}

#[tokio::test]
async fn service_error_becomes_a_failure_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scraping/scrape"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({"error": "Site inacessível"})),
        )
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(api_for(&server));
    let outcome = orchestrator.submit("https://offline.example").await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Site inacessível".into()
        }
    );
    let failure = orchestrator.transcript().last().cloned().unwrap();
    assert!(failure.is_error);
    assert_eq!(failure.text(), Some("Site inacessível"));
    assert_eq!(failure.url.as_deref(), Some("https://offline.example"));
    assert!(!orchestrator.is_pending());
}

#[tokio::test]
async fn plain_text_answer_is_kept_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scraping/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Nenhum dado encontrado")))
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(api_for(&server));
    orchestrator.submit("https://empty.example").await;

    let answer = orchestrator.transcript().last().cloned().unwrap();
    assert_eq!(answer.text(), Some("Nenhum dado encontrado"));
    assert!(answer.dossier().is_none());
}

#[tokio::test]
async fn second_submission_while_pending_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/scraping/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"title": "Slow"}))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(api_for(&server));
    let (first, second) = tokio::join!(
        orchestrator.submit("https://slow.example"),
        orchestrator.submit("https://other.example"),
    );

    assert_eq!(first, SubmitOutcome::Answered);
    assert_eq!(second, SubmitOutcome::Rejected(Rejection::Busy));
    assert_eq!(orchestrator.transcript_len(), 2);
}

#[tokio::test]
async fn rejected_input_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(api_for(&server));
    orchestrator.set_input("   ");
    assert_eq!(
        orchestrator.submit_input().await,
        SubmitOutcome::Rejected(Rejection::EmptyUrl)
    );
    assert_eq!(
        orchestrator.submit("ftp://files.example").await,
        SubmitOutcome::Rejected(Rejection::InvalidUrl)
    );
    assert!(orchestrator.transcript().is_empty());
}

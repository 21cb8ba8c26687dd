#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use wiremock::MockServer;

use dossier_client::auth::{MemoryTokenStore, SessionManager};
use dossier_client::{ApiClient, BearerCredential};

/// Unsigned token with the claims the service issues.
pub fn token_with(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

pub fn token(subject: &str, is_admin: bool, expires_at: DateTime<Utc>) -> String {
    token_with(&json!({
        "sub": subject,
        "is_admin": is_admin,
        "exp": expires_at.timestamp(),
        "iat": Utc::now().timestamp(),
    }))
}

pub fn fresh_token(subject: &str, is_admin: bool) -> String {
    token(subject, is_admin, Utc::now() + chrono::Duration::hours(1))
}

pub fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(
        &format!("{}/api/v1", server.uri()),
        BearerCredential::new(),
        Duration::from_secs(2),
    )
}

/// Initialized session sharing `api`'s credential slot, restored from `token`.
pub fn signed_in(api: &ApiClient, token: Option<String>) -> SessionManager {
    let store = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    };
    let mut session = SessionManager::new(Arc::new(store), api.bearer().clone());
    session.initialize();
    session
}

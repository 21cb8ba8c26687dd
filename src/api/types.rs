use crate::dossier::Dossier;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScrapeRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    /// Left empty when absent so the session reports a malformed credential.
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Account as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Account to be created by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Successful scrape answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeReply {
    Dossier(Dossier),
    Text(String),
}

impl ScrapeReply {
    /// Objects are dossiers; strings are text; anything else is shown verbatim.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Self::Dossier(Dossier::from(map)),
            Ok(Value::String(text)) => Self::Text(text),
            Ok(other) => Self::Text(other.to_string()),
            Err(_) => Self::Text(body.to_string()),
        }
    }
}

/// `error` field of a failed response, when the body carries one.
pub(crate) fn service_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

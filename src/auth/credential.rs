//! Structural decoding of the service-issued access token.
//!
//! The token is a JWS compact string (`header.payload.signature`). The client
//! holds no verification key, so only the payload is decoded; the service
//! stays the authority on signatures.

use crate::error::CredentialError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Privileged,
    Standard,
}

/// Identity claims derived once from a decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub issued_at: Option<DateTime<Utc>>,
}

impl IdentityClaims {
    pub fn is_privileged(&self) -> bool {
        self.role == Role::Privileged
    }

    /// Expiry must be strictly after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    is_admin: Option<bool>,
    #[serde(default)]
    exp: Option<Value>,
    #[serde(default)]
    iat: Option<Value>,
}

/// A token paired with the claims decoded from it.
///
/// Token and claims only ever exist together, so a session holding an
/// `Option<Credential>` cannot have one without the other.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    raw: String,
    claims: IdentityClaims,
}

impl Credential {
    /// Decode without checking expiry.
    pub fn decode(raw: &str) -> Result<Self, CredentialError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CredentialError::Malformed("token is empty".into()));
        }

        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() != 3 {
            return Err(CredentialError::Malformed(format!(
                "expected 3 token segments, found {}",
                segments.len()
            )));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1].trim_end_matches('='))
            .map_err(|e| CredentialError::Malformed(format!("payload is not base64url: {e}")))?;
        let claims: RawClaims = serde_json::from_slice(&payload)
            .map_err(|e| CredentialError::Malformed(format!("payload is not a claims object: {e}")))?;

        let subject = match claims.sub {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(CredentialError::Malformed("missing subject claim".into())),
        };

        let expires_at = claims
            .exp
            .as_ref()
            .and_then(timestamp_from_claim)
            .ok_or_else(|| CredentialError::Malformed("missing or invalid expiry claim".into()))?;
        let issued_at = claims.iat.as_ref().and_then(timestamp_from_claim);

        let role = if claims.is_admin.unwrap_or(false) {
            Role::Privileged
        } else {
            Role::Standard
        };

        Ok(Self {
            raw: raw.to_string(),
            claims: IdentityClaims {
                subject,
                role,
                expires_at,
                issued_at,
            },
        })
    }

    /// Decode and require the expiry to lie strictly after `now`.
    pub fn decode_valid_at(raw: &str, now: DateTime<Utc>) -> Result<Self, CredentialError> {
        let credential = Self::decode(raw)?;
        if credential.claims.is_expired_at(now) {
            return Err(CredentialError::Expired);
        }
        Ok(credential)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn claims(&self) -> &IdentityClaims {
        &self.claims
    }
}

// Keep the raw token out of debug output and logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("raw", &"[REDACTED]")
            .field("claims", &self.claims)
            .finish()
    }
}

fn timestamp_from_claim(value: &Value) -> Option<DateTime<Utc>> {
    let secs = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))?,
        _ => return None,
    };
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// Build an unsigned token for tests and local tooling.
#[cfg(test)]
pub(crate) fn encode_unsigned(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

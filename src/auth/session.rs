use super::credential::{Credential, IdentityClaims};
use super::store::TokenStore;
use crate::api::BearerCredential;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the current session is allowed to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Unauthenticated,
    AuthenticatedStandard,
    AuthenticatedPrivileged,
}

/// Authentication state of this client.
///
/// Token and claims are stored together as one `Option<Credential>`, so
/// claims can never be present without a token or the other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<Credential>,
    initialized: bool,
}

impl Session {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn is_privileged(&self) -> bool {
        self.claims().is_some_and(IdentityClaims::is_privileged)
    }

    pub fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(Credential::raw)
    }

    pub fn claims(&self) -> Option<&IdentityClaims> {
        self.credential.as_ref().map(Credential::claims)
    }

    pub fn access_level(&self) -> AccessLevel {
        match self.claims() {
            None => AccessLevel::Unauthenticated,
            Some(claims) if claims.is_privileged() => AccessLevel::AuthenticatedPrivileged,
            Some(_) => AccessLevel::AuthenticatedStandard,
        }
    }
}

/// Single owner of the credential, its persisted copy and the outbound
/// bearer header.
///
/// Constructed once at start-up and handed to whatever needs to read or
/// change the session; nothing else writes the token store or the bearer.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    bearer: BearerCredential,
    session: Session,
    clock: fn() -> DateTime<Utc>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>, bearer: BearerCredential) -> Self {
        Self {
            store,
            bearer,
            session: Session::default(),
            clock: Utc::now,
        }
    }

    /// Replace the time source used for expiry checks.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_initialized()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_privileged(&self) -> bool {
        self.session.is_privileged()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn claims(&self) -> Option<&IdentityClaims> {
        self.session.claims()
    }

    pub fn access_level(&self) -> AccessLevel {
        self.session.access_level()
    }

    /// Restore a persisted session. Runs once; later calls do nothing.
    pub fn initialize(&mut self) {
        if self.session.initialized {
            return;
        }

        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read persisted session, starting signed out: {e:#}");
                self.forget_persisted();
                None
            }
        };

        if let Some(raw) = stored {
            match Credential::decode_valid_at(&raw, (self.clock)()) {
                Ok(credential) => {
                    info!(subject = %credential.claims().subject, "restored persisted session");
                    self.install(credential);
                }
                Err(e) => {
                    debug!("discarding persisted token: {e}");
                    self.forget_persisted();
                }
            }
        }

        self.session.initialized = true;
    }

    /// Install a freshly issued token.
    ///
    /// A token that fails to decode (or is already expired) signs the client
    /// out and is reported back so the caller can show a message.
    pub fn login(&mut self, raw_token: &str) -> Result<&IdentityClaims> {
        let credential = match Credential::decode_valid_at(raw_token, (self.clock)()) {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Rejected issued token: {e}");
                self.logout();
                return Err(e.into());
            }
        };

        self.store
            .save(credential.raw())
            .map_err(|e| ClientError::Storage(format!("{e:#}")))?;

        info!(
            subject = %credential.claims().subject,
            privileged = credential.claims().is_privileged(),
            "signed in"
        );
        self.install(credential);

        self.claims()
            .ok_or_else(|| ClientError::Other(anyhow::anyhow!("session lost its credential")))
    }

    /// Drop every trace of the session. Safe to call when signed out.
    pub fn logout(&mut self) {
        let was_authenticated = self.session.is_authenticated();
        self.forget_persisted();
        self.bearer.clear();
        self.session.credential = None;
        if was_authenticated {
            info!("signed out");
        }
    }

    fn install(&mut self, credential: Credential) {
        self.bearer.install(credential.raw());
        self.session.credential = Some(credential);
    }

    fn forget_persisted(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to remove persisted token: {e:#}");
        }
    }
}

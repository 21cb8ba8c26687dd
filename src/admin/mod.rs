//! Privileged user and cache management.
//!
//! Outcomes are transient notices: each operation replaces the previous
//! one, and nothing here touches the session or the conversation.

use crate::api::{ApiClient, NewUser, User};
use crate::auth::Session;
use crate::error::{ClientError, RequestFailure, Result};
use tracing::{info, warn};

const LOAD_USERS_FAILED: &str = "Não foi possível carregar utilizadores.";
const CREATE_USER_FAILED: &str = "Erro ao criar utilizador.";
const DELETE_USER_FAILED: &str = "Erro ao deletar utilizador.";
const USER_DELETED: &str = "Utilizador deletado com sucesso.";
const CLEAR_CACHE_FAILED: &str = "Erro ao comunicar com o servidor.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// State of the admin view.
#[derive(Debug)]
pub struct AdminConsole {
    api: ApiClient,
    users: Vec<User>,
    notice: Option<Notice>,
    listing_error: Option<String>,
    cache_notice: Option<Notice>,
    clearing_cache: bool,
}

impl AdminConsole {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            users: Vec::new(),
            notice: None,
            listing_error: None,
            cache_notice: None,
            clearing_cache: false,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Latest user-management notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Set when the listing could not be reloaded after a change; the
    /// change's own notice stays in [`AdminConsole::notice`].
    pub fn listing_error(&self) -> Option<&str> {
        self.listing_error.as_deref()
    }

    /// Latest cache-management notice.
    pub fn cache_notice(&self) -> Option<&Notice> {
        self.cache_notice.as_ref()
    }

    pub fn is_clearing_cache(&self) -> bool {
        self.clearing_cache
    }

    fn require_privilege(session: &Session) -> Result<()> {
        if session.is_privileged() {
            Ok(())
        } else {
            Err(ClientError::Forbidden(
                "admin operations require a privileged session".into(),
            ))
        }
    }

    pub async fn refresh_users(&mut self, session: &Session) -> Result<&[User]> {
        Self::require_privilege(session)?;
        match self.api.list_users().await {
            Ok(users) => {
                self.users = users;
                self.listing_error = None;
            }
            Err(failure) => {
                warn!("Failed to list users: {failure}");
                self.notice = Some(Notice::Error(LOAD_USERS_FAILED.into()));
            }
        }
        Ok(&self.users)
    }

    pub async fn create_user(
        &mut self,
        session: &Session,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<&Notice> {
        Self::require_privilege(session)?;
        self.notice = None;
        self.listing_error = None;

        let user = NewUser {
            email: email.trim().to_string(),
            password: password.to_string(),
            is_admin,
        };
        match self.api.create_user(&user).await {
            Ok(message) => {
                info!(email = %user.email, is_admin, "user created");
                self.notice = Some(Notice::Success(message));
                self.reload_after_change().await;
            }
            Err(failure) => {
                self.notice = Some(Notice::Error(failure_text(&failure, CREATE_USER_FAILED)));
            }
        }
        self.current_notice()
    }

    pub async fn delete_user(&mut self, session: &Session, id: i64) -> Result<&Notice> {
        Self::require_privilege(session)?;
        self.notice = None;
        self.listing_error = None;

        match self.api.delete_user(id).await {
            Ok(()) => {
                info!(id, "user deleted");
                self.notice = Some(Notice::Success(USER_DELETED.into()));
                self.reload_after_change().await;
            }
            Err(failure) => {
                self.notice = Some(Notice::Error(failure_text(&failure, DELETE_USER_FAILED)));
            }
        }
        self.current_notice()
    }

    pub async fn clear_cache(&mut self, session: &Session) -> Result<&Notice> {
        Self::require_privilege(session)?;
        self.cache_notice = None;
        self.clearing_cache = true;

        let result = self.api.clear_cache().await;
        self.clearing_cache = false;

        self.cache_notice = Some(match result {
            Ok(message) => {
                info!("scrape cache cleared");
                Notice::Success(message)
            }
            Err(failure) => Notice::Error(failure_text(&failure, CLEAR_CACHE_FAILED)),
        });
        self.cache_notice
            .as_ref()
            .ok_or_else(|| ClientError::Other(anyhow::anyhow!("cache notice missing")))
    }

    /// Refresh the listing after a change. The change's own notice is
    /// kept either way.
    async fn reload_after_change(&mut self) {
        match self.api.list_users().await {
            Ok(users) => {
                self.users = users;
                self.listing_error = None;
            }
            Err(failure) => {
                warn!("Failed to reload users: {failure}");
                self.listing_error = Some(LOAD_USERS_FAILED.into());
            }
        }
    }

    fn current_notice(&self) -> Result<&Notice> {
        self.notice
            .as_ref()
            .ok_or_else(|| ClientError::Other(anyhow::anyhow!("admin notice missing")))
    }
}

/// Service error when it sent one, otherwise the operation's fixed text.
fn failure_text(failure: &RequestFailure, fallback: &str) -> String {
    failure
        .service_message
        .clone()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

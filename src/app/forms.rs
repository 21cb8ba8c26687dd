//! Sign-in and sign-up forms.
//!
//! Both forms own only their feedback text; the session itself is always
//! changed through [`SessionManager`].

use crate::api::ApiClient;
use crate::auth::SessionManager;
use crate::error::{ClientError, RequestFailure};
use std::time::Duration;
use tracing::{info, warn};

const LOGIN_FAILED: &str = "Erro ao fazer login.";
const REGISTER_FAILED: &str = "Erro ao registrar.";
const SERVICE_UNAVAILABLE: &str = "Servidor não disponível. (Verifique se o backend está rodando!)";
const INVALID_TOKEN: &str = "Token de acesso inválido recebido do servidor.";
const SESSION_NOT_SAVED: &str = "Não foi possível guardar a sessão.";
const REDIRECT_NOTICE: &str = " Você será redirecionado para o login em 3 segundos.";

/// Pause between a successful sign-up and the login view.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Text for a failed account call: the service's own error when it sent
/// one, the form's fallback when it answered without one, and the
/// availability hint when nothing answered at all.
fn account_failure_text(failure: &RequestFailure, fallback: &str) -> String {
    if let Some(message) = failure
        .service_message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
    {
        return message.to_string();
    }
    if failure.has_response() {
        fallback.to_string()
    } else {
        SERVICE_UNAVAILABLE.to_string()
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchange credentials for a token and install it.
    ///
    /// Returns whether the session is now signed in; on `false` the reason
    /// is in [`LoginForm::error`].
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &mut SessionManager,
        email: &str,
        password: &str,
    ) -> bool {
        self.error = None;

        let token = match api.login(email.trim(), password).await {
            Ok(token) => token,
            Err(failure) => {
                warn!("Login request failed: {failure}");
                self.error = Some(account_failure_text(&failure, LOGIN_FAILED));
                return false;
            }
        };

        match session.login(&token) {
            Ok(_) => true,
            Err(e) => {
                self.error = Some(
                    match e {
                        ClientError::MalformedCredential(_) | ClientError::ExpiredCredential => {
                            INVALID_TOKEN
                        }
                        _ => SESSION_NOT_SAVED,
                    }
                    .to_string(),
                );
                false
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    error: Option<String>,
    success: Option<String>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Set once an account was created; later submissions are ignored.
    pub fn is_locked(&self) -> bool {
        self.success.is_some()
    }

    /// Create an account. Returns whether this call created one.
    pub async fn submit(&mut self, api: &ApiClient, email: &str, password: &str) -> bool {
        if self.is_locked() {
            return false;
        }
        self.error = None;

        match api.register(email.trim(), password).await {
            Ok(message) => {
                info!(email = %email.trim(), "account registered");
                self.success = Some(format!("{}{REDIRECT_NOTICE}", message.trim_end()));
                true
            }
            Err(failure) => {
                warn!("Register request failed: {failure}");
                self.error = Some(account_failure_text(&failure, REGISTER_FAILED));
                false
            }
        }
    }
}

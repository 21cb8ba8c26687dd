use super::bearer::BearerCredential;
use super::http_client::build_service_client;
use super::scrub::sanitize_for_log;
use super::types::{
    Credentials, MessageResponse, NewUser, ScrapeReply, ScrapeRequest, TokenResponse, User,
    service_error_message,
};
use crate::config::ClientConfig;
use crate::error::RequestFailure;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Typed access to the analysis service.
///
/// Requests pick up the shared bearer credential automatically; none of the
/// operations below handle tokens themselves.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    bearer: BearerCredential,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, bearer: BearerCredential, connect_timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            bearer,
            client: build_service_client(connect_timeout),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            &config.api_url,
            BearerCredential::new(),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle on the shared credential slot, for the session manager.
    pub fn bearer(&self) -> &BearerCredential {
        &self.bearer
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(path));
        match self.bearer.header_value() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Send and return the body of a 2xx answer; anything else is a failure.
    async fn execute(&self, builder: RequestBuilder, op: &str) -> Result<String, RequestFailure> {
        let response = builder.send().await.map_err(|e| {
            debug!(op, error = %e, "request did not complete");
            RequestFailure::transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            debug!(op, %status, error = %e, "failed to read response body");
            RequestFailure::transport(e.to_string())
        })?;

        if status.is_success() {
            debug!(op, %status, "request succeeded");
            return Ok(body);
        }

        debug!(op, %status, body = %sanitize_for_log(&body), "service rejected request");
        Err(RequestFailure::service(
            status.as_u16(),
            service_error_message(&body),
        ))
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        op: &str,
    ) -> Result<T, RequestFailure> {
        let body = self.execute(builder, op).await?;
        serde_json::from_str(&body).map_err(|e| RequestFailure {
            status: None,
            service_message: None,
            message: format!("unexpected {op} response: {e}"),
        })
    }

    /// `POST /auth/login` → raw access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, RequestFailure> {
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&Credentials { email, password });
        let reply: TokenResponse = self.execute_json(builder, "login").await?;
        Ok(reply.access_token)
    }

    /// `POST /auth/register` → confirmation message.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, RequestFailure> {
        let builder = self
            .request(Method::POST, "/auth/register")
            .json(&Credentials { email, password });
        let reply: MessageResponse = self.execute_json(builder, "register").await?;
        Ok(reply.message.unwrap_or_default())
    }

    /// `POST /scraping/scrape`.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeReply, RequestFailure> {
        let builder = self
            .request(Method::POST, "/scraping/scrape")
            .json(&ScrapeRequest { url });
        let body = self.execute(builder, "scrape").await?;
        Ok(ScrapeReply::from_body(&body))
    }

    /// `GET /admin/users`.
    pub async fn list_users(&self) -> Result<Vec<User>, RequestFailure> {
        let builder = self.request(Method::GET, "/admin/users");
        self.execute_json(builder, "list_users").await
    }

    /// `POST /admin/users` → confirmation message.
    pub async fn create_user(&self, user: &NewUser) -> Result<String, RequestFailure> {
        let builder = self.request(Method::POST, "/admin/users").json(user);
        let reply: MessageResponse = self.execute_json(builder, "create_user").await?;
        Ok(reply.message.unwrap_or_default())
    }

    /// `DELETE /admin/users/{id}`.
    pub async fn delete_user(&self, id: i64) -> Result<(), RequestFailure> {
        let builder = self.request(Method::DELETE, &format!("/admin/users/{id}"));
        self.execute(builder, "delete_user").await.map(|_| ())
    }

    /// `POST /admin/clear-cache` → confirmation message.
    pub async fn clear_cache(&self) -> Result<String, RequestFailure> {
        let builder = self.request(Method::POST, "/admin/clear-cache");
        let body = self.execute(builder, "clear_cache").await?;
        let reply: MessageResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(reply.message.unwrap_or_default())
    }
}

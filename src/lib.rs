#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod admin;
pub mod api;
pub mod app;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod config;
pub mod dossier;
pub mod error;
pub mod routing;
pub mod ui;

pub use admin::{AdminConsole, Notice};
pub use api::{ApiClient, BearerCredential, ScrapeReply};
pub use auth::{AccessLevel, Credential, IdentityClaims, Role, Session, SessionManager};
pub use chat::{Orchestrator, Scraper, SubmitOutcome};
pub use config::ClientConfig;
pub use dossier::Dossier;
pub use error::{ClientError, RequestFailure};
pub use routing::{Navigation, View};

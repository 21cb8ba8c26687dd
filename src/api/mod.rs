pub mod bearer;
pub mod client;
pub mod http_client;
pub mod scrub;
pub mod types;

pub use bearer::BearerCredential;
pub use client::ApiClient;
pub use types::{NewUser, ScrapeReply, User};

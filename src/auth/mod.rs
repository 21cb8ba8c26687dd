pub mod credential;
pub mod session;
pub mod store;

pub use credential::{Credential, IdentityClaims, Role};
pub use session::{AccessLevel, Session, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};

mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;
mod types;

pub use types::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_GREETING,
    TOKEN_STORE_FILENAME,
};

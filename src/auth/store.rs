use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key the raw token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Durable storage for the raw credential token.
///
/// Only the session manager talks to a `TokenStore`; an absent value means
/// there is no session to restore.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON key/value file holding the token under [`TOKEN_KEY`].
///
/// Other keys in the file are left untouched.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token store: {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse token store: {}", self.path.display()))
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create token store parent directory: {}",
                parent.display()
            )
        })?;

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write token store: {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).with_context(
                || {
                    format!(
                        "Failed to set token store permissions on '{}': expected 0600",
                        self.path.display()
                    )
                },
            )?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        // A present but unusable entry is handed back as-is so decoding
        // rejects it and the session clears it.
        Ok(entries.get(TOKEN_KEY).map(|value| match value {
            Value::String(token) => token.trim().to_string(),
            other => other.to_string(),
        }))
    }

    fn save(&self, token: &str) -> Result<()> {
        // An unreadable file is replaced rather than blocking a fresh login.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        match self.read_entries() {
            Ok(mut entries) => {
                if entries.remove(TOKEN_KEY).is_none() {
                    return Ok(());
                }
                self.write_entries(&entries)
            }
            // An unreadable file may still hold a token; replace it.
            Err(_) => self.write_entries(&Map::new()),
        }
    }
}

/// In-process store, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default())
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        Ok(())
    }
}

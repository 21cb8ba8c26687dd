use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// Default `Authorization` credential shared by every outbound request.
///
/// Clones share one slot. Call sites only read it; the session manager is
/// the single writer, which is why `install`/`clear` are crate-private.
#[derive(Clone)]
pub struct BearerCredential {
    token: Arc<ArcSwapOption<String>>,
}

impl BearerCredential {
    pub fn new() -> Self {
        Self {
            token: Arc::new(ArcSwapOption::empty()),
        }
    }

    pub(crate) fn install(&self, token: &str) {
        self.token.store(Some(Arc::new(token.to_string())));
    }

    pub(crate) fn clear(&self) {
        self.token.store(None);
    }

    pub fn is_set(&self) -> bool {
        self.token.load().is_some()
    }

    /// `Bearer {token}` when a credential is installed.
    pub fn header_value(&self) -> Option<String> {
        self.token
            .load_full()
            .map(|token| format!("Bearer {token}"))
    }
}

impl Default for BearerCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredential")
            .field("set", &self.is_set())
            .finish()
    }
}

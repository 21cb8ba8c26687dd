use super::ClientConfig;
use std::path::PathBuf;

impl ClientConfig {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DOSSIER_API_URL")
            && !url.is_empty()
        {
            self.api_url = url;
        }

        if let Ok(dir) = std::env::var("DOSSIER_DATA_DIR")
            && !dir.is_empty()
        {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(level) = std::env::var("DOSSIER_LOG_LEVEL")
            && !level.is_empty()
        {
            self.log_level = level;
        }

        if let Ok(secs) = std::env::var("DOSSIER_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.connect_timeout_secs = secs;
        }
    }
}

use super::ClientConfig;
use crate::error::{ConfigError, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl ClientConfig {
    /// Load `~/.dossier/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Self::load_or_init_in(&home.join(".dossier"))
    }

    pub fn load_or_init_in(dossier_dir: &Path) -> Result<Self> {
        let config_path = dossier_dir.join("config.toml");

        if !dossier_dir.exists() {
            fs::create_dir_all(dossier_dir).map_err(ConfigError::Io)?;
        }

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
            let mut config: ClientConfig = toml::from_str(&contents).map_err(|e| {
                ConfigError::Load(format!("{}: {e}", config_path.display()))
            })?;
            config.config_path.clone_from(&config_path);
            config.data_dir = dossier_dir.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                data_dir: dossier_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("failed to serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str).map_err(ConfigError::Io)?;
        Ok(())
    }
}

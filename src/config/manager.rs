use super::{
    evolution::EvolutionConfig,
    export::ExportConfig,
    music::MusicConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::MelodyError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `MELODYGEN_EVOLUTION__MUTATION_RATE=0.3`
pub const ENV_PREFIX: &str = "MELODYGEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub music: MusicConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), MelodyError> {
        self.evolution.validate()?;
        self.music.validate()?;
        self.export.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.evolution.to_manifest(),
            self.music.to_manifest(),
            self.export.to_manifest(),
        ]
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, MelodyError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| MelodyError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, MelodyError> {
        toml::to_string_pretty(self)
            .map_err(|e| MelodyError::Configuration(format!("Failed to serialize: {}", e)))
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, then apply `MELODYGEN_*` environment overrides on top.
    /// Without a file, defaults plus environment are used.
    pub fn load<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), MelodyError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            let path = path.as_ref();
            log::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MelodyError> {
        let toml_str = self.get().to_toml_string()?;

        std::fs::write(path, toml_str)
            .map_err(|e| MelodyError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply a change; rejected changes leave the stored config untouched
    pub fn update<F>(&self, f: F) -> Result<(), MelodyError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::MelodyError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub midi_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub tempo_bpm: f64,
    pub velocity: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            midi_path: PathBuf::from("output.mid"),
            report_path: None,
            tempo_bpm: 120.0,
            velocity: 100,
        }
    }
}

impl ConfigSection for ExportConfig {
    fn section_name() -> &'static str {
        "export"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        if !self.tempo_bpm.is_finite() || self.tempo_bpm <= 0.0 {
            return Err(MelodyError::Configuration("Tempo must be positive".to_string()));
        }
        if self.velocity == 0 || self.velocity > 127 {
            return Err(MelodyError::Configuration(
                "Velocity must be between 1 and 127".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Export".to_string(),
            fields: vec![
                FieldManifest::new("midi_path", "path", json!("output.mid"), "Where the best melody is written"),
                FieldManifest::new("report_path", "path", json!(null), "Optional JSON run report"),
                FieldManifest::new("tempo_bpm", "float", json!(120.0), "Playback tempo").range(1.0, 1000.0),
                FieldManifest::new("velocity", "integer", json!(100), "Note-on velocity").range(1.0, 127.0),
            ],
        }
    }
}

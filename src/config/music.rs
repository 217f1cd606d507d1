use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::MelodyError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// C major, middle C to the octave above
pub const C_MAJOR: [f64; 8] = [60.0, 62.0, 64.0, 65.0, 67.0, 69.0, 71.0, 72.0];

/// Sixteenth, eighth and quarter note, in beats
pub const DEFAULT_DURATIONS: [f64; 3] = [0.25, 0.5, 1.0];

pub const DEFAULT_PHRASE_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub scale: Vec<f64>,
    pub durations: Vec<f64>,
    pub phrase_length: usize,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            scale: C_MAJOR.to_vec(),
            durations: DEFAULT_DURATIONS.to_vec(),
            phrase_length: DEFAULT_PHRASE_LENGTH,
        }
    }
}

impl ConfigSection for MusicConfig {
    fn section_name() -> &'static str {
        "music"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        if self.scale.is_empty() {
            return Err(MelodyError::Configuration("Scale must not be empty".to_string()));
        }
        if self.durations.is_empty() {
            return Err(MelodyError::Configuration("Durations must not be empty".to_string()));
        }
        if self.phrase_length == 0 {
            return Err(MelodyError::Configuration(
                "Phrase length must be at least 1".to_string()
            ));
        }
        if let Some(pitch) = self.scale.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 127.0) {
            return Err(MelodyError::Configuration(format!(
                "Scale pitch {} is outside the MIDI range 0..=127",
                pitch
            )));
        }
        if let Some(duration) = self.durations.iter().find(|d| !d.is_finite() || **d <= 0.0) {
            return Err(MelodyError::Configuration(format!(
                "Duration {} must be a positive number of beats",
                duration
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Music".to_string(),
            fields: vec![
                FieldManifest::new("scale", "float[]", json!(C_MAJOR), "Permitted MIDI pitches")
                    .range(0.0, 127.0),
                FieldManifest::new("durations", "float[]", json!(DEFAULT_DURATIONS), "Permitted note lengths in beats"),
                FieldManifest::new("phrase_length", "integer", json!(DEFAULT_PHRASE_LENGTH), "Notes per melody")
                    .range(1.0, 1024.0),
            ],
        }
    }
}

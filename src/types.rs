use crate::engines::generation::genome::Chromosome;
use crate::engines::melody::fitness::FitnessBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One decoded note. Pitch is a MIDI-like number, duration is in beats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: f64,
    pub duration: f64,
}

/// Decoded view of a chromosome: two aligned sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    pub pitches: Vec<f64>,
    pub durations: Vec<f64>,
}

impl Melody {
    pub fn notes(&self) -> impl Iterator<Item = Note> + '_ {
        self.pitches
            .iter()
            .zip(&self.durations)
            .map(|(&pitch, &duration)| Note { pitch, duration })
    }

    pub fn len(&self) -> usize {
        self.pitches.len().min(self.durations.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all durations, in beats
    pub fn total_beats(&self) -> f64 {
        self.durations.iter().filter(|d| d.is_finite() && **d > 0.0).sum()
    }
}

/// Summary of a finished run, written next to the MIDI file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub generations_run: usize,
    pub stop_reason: String,
    pub best_fitness: f64,
    pub best_chromosome: Chromosome,
    pub melody: Melody,
    pub breakdown: FitnessBreakdown,
    pub fitness_history: Vec<f64>,
    pub hall_of_fame: Vec<(Chromosome, f64)>,
}

impl RunReport {
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

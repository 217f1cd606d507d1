//! The closed musical universe a run searches in.
//!
//! A `MusicDomain` fixes which pitches and durations count as "on scale",
//! how many notes a phrase has, and derives everything the engine needs from
//! that: per-gene bounds for initialisation and the phrase-aligned cut points
//! used by musical crossover.

use crate::config::music::{C_MAJOR, DEFAULT_DURATIONS, DEFAULT_PHRASE_LENGTH};
use crate::engines::generation::genome::Bounds;

/// Genes per motif unit; crossover points are multiples of this
pub const MOTIF_GENES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct MusicDomain {
    scale: Vec<f64>,
    durations: Vec<f64>,
    phrase_length: usize,
}

impl Default for MusicDomain {
    fn default() -> Self {
        Self::new(C_MAJOR.to_vec(), DEFAULT_DURATIONS.to_vec(), DEFAULT_PHRASE_LENGTH)
    }
}

impl MusicDomain {
    /// Values are taken as given; `MusicConfig::validate` is where they get checked.
    pub fn new(scale: Vec<f64>, durations: Vec<f64>, phrase_length: usize) -> Self {
        Self {
            scale,
            durations,
            phrase_length,
        }
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn duration_set(&self) -> &[f64] {
        &self.durations
    }

    pub fn phrase_length(&self) -> usize {
        self.phrase_length
    }

    pub fn chromosome_length(&self) -> usize {
        self.phrase_length * 2
    }

    pub fn is_in_scale(&self, pitch: f64) -> bool {
        self.scale.iter().any(|p| *p == pitch)
    }

    pub fn is_duration(&self, duration: f64) -> bool {
        self.durations.iter().any(|d| *d == duration)
    }

    /// `(min, max)` per gene: pitch range on even indices, duration range on odd
    pub fn gene_bounds(&self) -> Bounds {
        let pitch = min_max(&self.scale);
        let duration = min_max(&self.durations);

        (0..self.chromosome_length())
            .map(|i| if i % 2 == 0 { pitch } else { duration })
            .collect()
    }

    /// Gene indices where musical crossover may cut: every multiple of
    /// `MOTIF_GENES` that leaves at least one motif on each side.
    /// Phrase length 8 gives `[4, 8, 12]`.
    pub fn crossover_points(&self) -> Vec<usize> {
        let last = self.chromosome_length().saturating_sub(MOTIF_GENES);
        (1..)
            .map(|k| k * MOTIF_GENES)
            .take_while(|point| *point <= last)
            .collect()
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

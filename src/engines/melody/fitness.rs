//! Melody fitness: rewards on-scale pitches, stepwise motion and rhythmic
//! variety, and penalises literally repeated 4-gene windows.

use crate::engines::generation::genome::gene_key;
use crate::engines::generation::policy::FitnessFunction;
use crate::engines::melody::codec::decode;
use crate::engines::melody::domain::{MusicDomain, MOTIF_GENES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SCALE_REWARD: f64 = 2.0;
pub const SMOOTH_INTERVAL_REWARD: f64 = 3.0;
pub const DISTINCT_DURATION_REWARD: f64 = 2.0;
pub const REPEATED_MOTIF_PENALTY: f64 = 3.0;

/// Largest pitch step (in semitones) still counted as smooth
pub const MAX_SMOOTH_INTERVAL: f64 = 2.0;

/// The individual fitness terms, before flooring
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub scale: f64,
    pub intervals: f64,
    pub rhythm: f64,
    pub motif_penalty: f64,
}

impl FitnessBreakdown {
    pub fn raw(&self) -> f64 {
        self.scale + self.intervals + self.rhythm - self.motif_penalty
    }

    /// Floored at zero
    pub fn total(&self) -> f64 {
        self.raw().max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct MelodyFitness {
    domain: MusicDomain,
}

impl MelodyFitness {
    pub fn new(domain: MusicDomain) -> Self {
        Self { domain }
    }

    pub fn breakdown(&self, chromosome: &[f64]) -> FitnessBreakdown {
        let melody = decode(chromosome);

        let on_scale = melody
            .pitches
            .iter()
            .filter(|p| self.domain.is_in_scale(**p))
            .count();

        let smooth = melody
            .pitches
            .windows(2)
            .filter(|w| (w[1] - w[0]).abs() <= MAX_SMOOTH_INTERVAL)
            .count();

        let distinct_durations = melody
            .durations
            .iter()
            .map(|d| gene_key(*d))
            .collect::<HashSet<_>>()
            .len();

        FitnessBreakdown {
            scale: on_scale as f64 * SCALE_REWARD,
            intervals: smooth as f64 * SMOOTH_INTERVAL_REWARD,
            rhythm: distinct_durations as f64 * DISTINCT_DURATION_REWARD,
            motif_penalty: repeated_motifs(chromosome) as f64 * REPEATED_MOTIF_PENALTY,
        }
    }
}

impl FitnessFunction for MelodyFitness {
    fn evaluate(&self, chromosome: &[f64]) -> f64 {
        self.breakdown(chromosome).total()
    }
}

/// Windows of `MOTIF_GENES` consecutive genes (the last may be shorter) that
/// duplicate an earlier window: total windows minus distinct windows.
pub fn repeated_motifs(chromosome: &[f64]) -> usize {
    let windows: Vec<Vec<u64>> = chromosome
        .chunks(MOTIF_GENES)
        .map(|w| w.iter().map(|g| gene_key(*g)).collect())
        .collect();
    let distinct: HashSet<&Vec<u64>> = windows.iter().collect();
    windows.len() - distinct.len()
}

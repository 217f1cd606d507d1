//! Melody-specific policies for the generic evolution engine.

pub mod domain;
pub mod codec;
pub mod fitness;
pub mod mutation;
pub mod crossover;

pub use domain::MusicDomain;
pub use codec::{decode, encode};
pub use fitness::{FitnessBreakdown, MelodyFitness};
pub use mutation::MusicalMutation;
pub use crossover::MusicalCrossover;

//! Evolves short melodic phrases with a genetic algorithm.
//!
//! The generic engine lives in [`engines::generation`]; the melody-specific
//! fitness, mutation and crossover policies in [`engines::melody`].

pub mod config;
pub mod engines;
pub mod error;
pub mod export;
pub mod services;
pub mod types;

pub use error::{MelodyError, Result};

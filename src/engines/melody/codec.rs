//! Flat chromosome <-> melody.
//!
//! Genes alternate by parity: even indices are pitches, odd indices are
//! durations. A trailing unpaired gene (odd-length chromosome) is tolerated
//! and dropped.

use crate::engines::generation::genome::Chromosome;
use crate::types::{Melody, Note};

pub fn decode(chromosome: &[f64]) -> Melody {
    let pairs = chromosome.chunks_exact(2);
    let mut pitches = Vec::with_capacity(pairs.len());
    let mut durations = Vec::with_capacity(pairs.len());

    for pair in pairs {
        pitches.push(pair[0]);
        durations.push(pair[1]);
    }

    Melody { pitches, durations }
}

pub fn encode(notes: &[Note]) -> Chromosome {
    notes.iter().flat_map(|n| [n.pitch, n.duration]).collect()
}

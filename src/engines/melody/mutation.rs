use crate::engines::generation::genome::Chromosome;
use crate::engines::generation::policy::MutationPolicy;
use crate::engines::melody::domain::MusicDomain;
use rand::seq::SliceRandom;
use rand::Rng;

/// Redraws genes from the domain's own vocabulary: pitch genes from the
/// scale, duration genes from the duration set. Each gene is tested
/// independently against `rate`.
#[derive(Debug, Clone)]
pub struct MusicalMutation {
    rate: f64,
    domain: MusicDomain,
}

impl MusicalMutation {
    pub fn new(rate: f64, domain: MusicDomain) -> Self {
        Self { rate, domain }
    }
}

impl MutationPolicy for MusicalMutation {
    fn mutate<R: Rng + ?Sized>(&self, chromosome: &[f64], rng: &mut R) -> Chromosome {
        let mut mutated = chromosome.to_vec();

        for (i, gene) in mutated.iter_mut().enumerate() {
            let choices = if i % 2 == 0 {
                self.domain.scale()
            } else {
                self.domain.duration_set()
            };
            if rng.gen::<f64>() < self.rate {
                if let Some(value) = choices.choose(rng) {
                    *gene = *value;
                }
            }
        }

        mutated
    }
}

use crate::engines::generation::genome::Chromosome;
use rand::Rng;

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<R: Rng + ?Sized>(
    population: &[(Chromosome, f64)],
    tournament_size: usize,
    rng: &mut R,
) -> Chromosome {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].1;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].1 > best_fitness {
            best_idx = idx;
            best_fitness = population[idx].1;
        }
    }

    population[best_idx].0.clone()
}

/// Roulette wheel selection: probability proportional to fitness
pub fn roulette_selection<R: Rng + ?Sized>(
    population: &[(Chromosome, f64)],
    rng: &mut R,
) -> Chromosome {
    let total_fitness: f64 = population.iter().map(|(_, f)| f.max(0.0)).sum();

    if total_fitness <= 0.0 {
        // Nothing scored, pick random
        return population[rng.gen_range(0..population.len())].0.clone();
    }

    let mut spin = rng.gen::<f64>() * total_fitness;

    for (chromosome, fitness) in population {
        spin -= fitness.max(0.0);
        if spin <= 0.0 {
            return chromosome.clone();
        }
    }

    // Fallback
    population[population.len() - 1].0.clone()
}

/// Single-point crossover: swap tails after a random cut in `1..len`
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let point = rng.gen_range(1..len);
    swap_tails(parent1, parent2, point)
}

/// Uniform crossover: each position comes from either parent with equal odds
pub fn uniform_crossover<R: Rng + ?Sized>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    let len = parent1.len().min(parent2.len());

    for i in 0..len {
        if rng.gen::<bool>() {
            child1[i] = parent2[i];
            child2[i] = parent1[i];
        }
    }

    (child1, child2)
}

/// Exchange everything from `point` onwards. A point past the end of a
/// parent contributes an empty slice rather than panicking.
pub fn swap_tails(parent1: &[f64], parent2: &[f64], point: usize) -> (Chromosome, Chromosome) {
    let (head1, tail1) = parent1.split_at(point.min(parent1.len()));
    let (head2, tail2) = parent2.split_at(point.min(parent2.len()));

    let child1 = head1.iter().chain(tail2).copied().collect();
    let child2 = head2.iter().chain(tail1).copied().collect();

    (child1, child2)
}

/// Draw one gene uniformly within `(min, max)`
pub fn random_gene<R: Rng + ?Sized>(bounds: (f64, f64), rng: &mut R) -> f64 {
    let (min, max) = bounds;
    if !(min < max) {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Generate random chromosome honoring per-gene bounds
pub fn random_chromosome<R: Rng + ?Sized>(bounds: &[(f64, f64)], rng: &mut R) -> Chromosome {
    bounds.iter().map(|b| random_gene(*b, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_swap_tails_past_end() {
        let (c1, c2) = swap_tails(&[1.0, 2.0], &[3.0, 4.0], 12);
        assert_eq!(c1, vec![1.0, 2.0]);
        assert_eq!(c2, vec![3.0, 4.0]);
    }

    #[test]
    fn test_single_point_preserves_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = vec![0.0; 16];
        let p2 = vec![1.0; 16];
        for _ in 0..50 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 16);
            assert_eq!(c2.len(), 16);
            // Exactly one cut: a prefix of zeros then ones
            let cut = c1.iter().position(|g| *g == 1.0).unwrap();
            assert!(cut >= 1);
            assert!(c1[cut..].iter().all(|g| *g == 1.0));
        }
    }

    #[test]
    fn test_random_chromosome_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = vec![(60.0, 72.0), (0.25, 1.0), (5.0, 5.0)];
        for _ in 0..100 {
            let c = random_chromosome(&bounds, &mut rng);
            assert_eq!(c.len(), 3);
            assert!((60.0..=72.0).contains(&c[0]));
            assert!((0.25..=1.0).contains(&c[1]));
            assert_eq!(c[2], 5.0);
        }
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = vec![(vec![1.0], 1.0), (vec![2.0], 50.0)];
        // With a large tournament the fitter one is virtually always picked
        let picked = tournament_selection(&population, 32, &mut rng);
        assert_eq!(picked, vec![2.0]);
    }

    #[test]
    fn test_roulette_all_zero_still_picks() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = vec![(vec![1.0], 0.0), (vec![2.0], 0.0)];
        let picked = roulette_selection(&population, &mut rng);
        assert!(picked == vec![1.0] || picked == vec![2.0]);
    }
}

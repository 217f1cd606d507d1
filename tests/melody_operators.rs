use melodygen::config::CrossoverMethod;
use melodygen::engines::generation::{Chromosome, CrossoverPolicy, FitnessFunction, MutationPolicy};
use melodygen::engines::melody::{decode, MelodyFitness, MusicDomain, MusicalCrossover, MusicalMutation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;

/// Stand-in for the engine's own crossover: recognisable output, counts calls
struct StubCrossover {
    calls: Cell<usize>,
}

impl CrossoverPolicy for StubCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        _rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        self.calls.set(self.calls.get() + 1);
        (parent2.to_vec(), parent1.iter().map(|g| g + 1000.0).collect())
    }
}

fn parents() -> (Vec<f64>, Vec<f64>) {
    let p1 = vec![60.0, 0.25, 62.0, 0.5, 64.0, 1.0, 65.0, 0.25, 67.0, 0.5, 69.0, 1.0, 71.0, 0.25, 72.0, 0.5];
    let p2 = vec![72.0, 1.0, 71.0, 0.5, 69.0, 0.25, 67.0, 1.0, 65.0, 0.5, 64.0, 0.25, 62.0, 1.0, 60.0, 0.5];
    (p1, p2)
}

#[test]
fn test_bounds_for_custom_domain() {
    let domain = MusicDomain::new(vec![57.0, 59.0, 60.0, 62.0, 64.0], vec![0.5, 2.0], 5);
    let bounds = domain.gene_bounds();
    assert_eq!(bounds.len(), 10);
    assert!(bounds.iter().step_by(2).all(|b| *b == (57.0, 64.0)));
    assert!(bounds.iter().skip(1).step_by(2).all(|b| *b == (0.5, 2.0)));
}

#[test]
fn test_fitness_never_negative_on_random_chromosomes() {
    let fitness = MelodyFitness::new(MusicDomain::default());
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        let len = rng.gen_range(0..24);
        let chromosome: Vec<f64> = (0..len).map(|_| rng.gen_range(-50.0..150.0)).collect();
        let score = fitness.evaluate(&chromosome);
        assert!(score >= 0.0);
        assert_eq!(score, fitness.evaluate(&chromosome));
    }
}

#[test]
fn test_musical_crossover_point_four() {
    let domain = MusicDomain::default();
    let crossover = MusicalCrossover::new(CrossoverMethod::Musical, &domain);
    let (p1, p2) = parents();
    let mut rng = StdRng::seed_from_u64(0);

    let mut seen_four = false;
    for _ in 0..200 {
        let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.len() + c2.len(), p1.len() + p2.len());
        if c1[..4] == p1[..4] && c1[4..] == p2[4..] {
            seen_four = true;
            assert_eq!(c2, [&p2[..4], &p1[4..]].concat());
        }
    }
    assert!(seen_four);
}

#[test]
fn test_parents_not_modified() {
    let domain = MusicDomain::default();
    let crossover = MusicalCrossover::new(CrossoverMethod::Musical, &domain);
    let (p1, p2) = parents();
    let (s1, s2) = (p1.clone(), p2.clone());
    let mut rng = StdRng::seed_from_u64(1);
    let _ = crossover.crossover(&p1, &p2, &mut rng);
    assert_eq!(p1, s1);
    assert_eq!(p2, s2);
}

#[test]
fn test_non_musical_method_defers_to_fallback() {
    let domain = MusicDomain::default();
    let (p1, p2) = parents();

    for method in [CrossoverMethod::SinglePoint, CrossoverMethod::Uniform] {
        let stub = StubCrossover { calls: Cell::new(0) };
        let direct = stub.crossover(&p1, &p2, &mut StdRng::seed_from_u64(5));

        let crossover = MusicalCrossover::with_fallback(method, &domain, StubCrossover { calls: Cell::new(0) });
        let via_musical = crossover.crossover(&p1, &p2, &mut StdRng::seed_from_u64(5));

        assert_eq!(via_musical, direct);
    }
}

#[test]
fn test_musical_method_ignores_fallback() {
    let domain = MusicDomain::default();
    let stub = StubCrossover { calls: Cell::new(0) };
    let crossover = MusicalCrossover::with_fallback(CrossoverMethod::Musical, &domain, stub);
    let (p1, p2) = parents();
    let (c1, _) = crossover.crossover(&p1, &p2, &mut StdRng::seed_from_u64(3));
    assert!(c1.iter().all(|g| *g < 1000.0));
}

#[test]
fn test_generic_fallback_matches_engine_crossover() {
    use melodygen::engines::generation::GenericCrossover;

    let domain = MusicDomain::default();
    let (p1, p2) = parents();
    let generic = GenericCrossover::new(CrossoverMethod::SinglePoint);
    let musical = MusicalCrossover::new(CrossoverMethod::SinglePoint, &domain);

    for seed in 0..20 {
        let expected = generic.crossover(&p1, &p2, &mut StdRng::seed_from_u64(seed));
        let actual = musical.crossover(&p1, &p2, &mut StdRng::seed_from_u64(seed));
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_mutated_genes_come_from_domain() {
    let domain = MusicDomain::default();
    let mutation = MusicalMutation::new(0.5, domain.clone());
    let mut rng = StdRng::seed_from_u64(77);
    let original: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 61.1 } else { 0.33 }).collect();

    for _ in 0..100 {
        let mutated = mutation.mutate(&original, &mut rng);
        assert_eq!(mutated.len(), original.len());
        for (i, (after, before)) in mutated.iter().zip(&original).enumerate() {
            if after != before {
                if i % 2 == 0 {
                    assert!(domain.is_in_scale(*after));
                } else {
                    assert!(domain.is_duration(*after));
                }
            }
        }
    }
}

#[test]
fn test_mutation_then_fitness_rewards_scale() {
    let domain = MusicDomain::default();
    let fitness = MelodyFitness::new(domain.clone());
    let mutation = MusicalMutation::new(1.0, domain);
    let mut rng = StdRng::seed_from_u64(12);

    let off_scale = vec![61.5; 16];
    let mutated = mutation.mutate(&off_scale, &mut rng);
    let breakdown = fitness.breakdown(&mutated);
    assert_eq!(breakdown.scale, 16.0);
    assert_eq!(decode(&mutated).len(), 8);
}

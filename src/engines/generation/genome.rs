/// Chromosome representation for the evolutionary search
///
/// A chromosome is a flat sequence of real-valued genes. The engine treats it
/// as opaque: it only ever slices, copies and scores it. Meaning is assigned by
/// the plugged-in policies (for melodies, even genes are pitches and odd genes
/// are durations, see `engines::melody::codec`).
///
/// # Why a flat vector?
///
/// Genetic operators work best on simple, linear structures:
/// - **Crossover**: Swapping segments is trivial (slice concatenation)
/// - **Mutation**: Changing individual genes is straightforward
/// - **No invalid states**: Any chromosome can be scored, off-domain genes just score lower
///
/// # Example
///
/// ```
/// let chromosome: melodygen::engines::generation::Chromosome = vec![60.0, 0.25, 62.0, 0.5];
/// // Decoded as: C4 for a sixteenth, D4 for an eighth
/// assert_eq!(chromosome.len(), 4);
/// ```
pub type Chromosome = Vec<f64>;

/// Per-gene `(min, max)` bounds, one entry per chromosome position.
pub type Bounds = Vec<(f64, f64)>;

/// Hashable identity for a gene value: equal floats give equal keys, so
/// `-0.0` and `0.0` are the same gene.
pub fn gene_key(gene: f64) -> u64 {
    if gene == 0.0 {
        0.0f64.to_bits()
    } else {
        gene.to_bits()
    }
}

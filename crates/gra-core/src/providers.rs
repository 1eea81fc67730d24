//! Pair-score providers for embedding distance and logical compatibility.
//!
//! The metric does not know where these numbers come from. A provider maps an
//! unordered hypothesis pair to a score in [0, 1]; learned, cached or sampled
//! sources all plug in through [`PairScore`].

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GraError, GraResult};

/// Score for an unordered hypothesis pair, expected in [0, 1].
pub trait PairScore: Send + Sync {
    fn score(&self, i: usize, j: usize) -> f64;
}

impl<F> PairScore for F
where
    F: Fn(usize, usize) -> f64 + Send + Sync,
{
    fn score(&self, i: usize, j: usize) -> f64 {
        self(i, j)
    }
}

/// Same score for every pair.
#[derive(Debug, Clone, Copy)]
pub struct ConstantScore(pub f64);

impl PairScore for ConstantScore {
    fn score(&self, _i: usize, _j: usize) -> f64 {
        self.0
    }
}

/// Symmetric lookup table. Pairs that were never set score NaN, which the
/// metric reports as a computation error.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    scores: HashMap<(usize, usize), f64>,
}

impl PairTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, i: usize, j: usize, score: f64) -> GraResult<()> {
        if !(0.0..=1.0).contains(&score) {
            return Err(GraError::Configuration(format!(
                "pair score for ({i}, {j}) must be in [0, 1], got {score}"
            )));
        }
        self.scores.insert(key(i, j), score);
        Ok(())
    }

    /// Uniform [0, 1) scores for every pair of `0..n`.
    pub fn sampled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut scores = HashMap::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                scores.insert((i, j), rng.gen::<f64>());
            }
        }
        Self { scores }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.scores.get(&key(i, j)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl PairScore for PairTable {
    fn score(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).unwrap_or(f64::NAN)
    }
}

/// The two providers the metric consumes.
#[derive(Clone)]
pub struct PairProviders {
    pub distance: Arc<dyn PairScore>,
    pub compatibility: Arc<dyn PairScore>,
}

impl PairProviders {
    pub fn new(distance: Arc<dyn PairScore>, compatibility: Arc<dyn PairScore>) -> Self {
        Self {
            distance,
            compatibility,
        }
    }

    pub fn constant(distance: f64, compatibility: f64) -> Self {
        Self::new(
            Arc::new(ConstantScore(distance)),
            Arc::new(ConstantScore(compatibility)),
        )
    }

    /// Independent uniform tables for distance and compatibility over `0..n`.
    pub fn sampled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let distance = PairTable::sampled(n, rng);
        let compatibility = PairTable::sampled(n, rng);
        Self::new(Arc::new(distance), Arc::new(compatibility))
    }
}

impl std::fmt::Debug for PairProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairProviders").finish_non_exhaustive()
    }
}

#[inline]
fn key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn closures_are_providers() {
        let provider = |i: usize, j: usize| (i + j) as f64 / 10.0;
        assert_eq!(provider.score(1, 2), 0.3);
    }

    #[test]
    fn table_is_symmetric() {
        let mut table = PairTable::new();
        table.set(4, 1, 0.25).unwrap();
        assert_eq!(table.score(1, 4), 0.25);
        assert_eq!(table.score(4, 1), 0.25);
        assert!(table.score(0, 1).is_nan());
    }

    #[test]
    fn table_rejects_out_of_range() {
        let mut table = PairTable::new();
        assert!(table.set(0, 1, 1.5).is_err());
        assert!(table.set(0, 1, f64::NAN).is_err());
    }

    #[test]
    fn sampled_table_covers_all_pairs_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = PairTable::sampled(5, &mut rng);
        assert_eq!(table.len(), 10);
        for i in 0..5 {
            for j in (i + 1)..5 {
                let s = table.score(j, i);
                assert!((0.0..1.0).contains(&s));
            }
        }
    }

    #[test]
    fn sampled_tables_are_reproducible() {
        let a = PairTable::sampled(4, &mut StdRng::seed_from_u64(11));
        let b = PairTable::sampled(4, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.get(0, 3), b.get(0, 3));
    }
}

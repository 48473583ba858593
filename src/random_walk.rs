//! Monte-Carlo PageRank: rank as visitation frequency of one long random-surfer walk.

use crate::error::{check_damping, Error, Result};
use crate::graph::{check, GraphRef, LinkGraph};
use crate::pagerank::RankMap;
use crate::transition::fill_transition;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleConfig {
    pub damping: f64,
    /// Number of pages visited by the walk.
    pub samples: usize,
    /// `Some` makes the walk reproducible; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self { damping: 0.85, samples: 10_000, seed: None }
    }
}

impl SampleConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)
    }
}

fn check_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(Error::InvalidParameter("sample count must be at least 1".into()));
    }
    Ok(())
}

/// Visitation frequencies of a walk of `config.samples` steps, indexed by node.
pub fn sample_scores<G: GraphRef + ?Sized>(graph: &G, config: &SampleConfig) -> Result<Vec<f64>> {
    config.validate()?;
    tracing::debug!(
        damping = config.damping,
        samples = config.samples,
        seeded = config.seed.is_some(),
        "sampling ranks"
    );
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    sample_scores_with_rng(graph, config.damping, config.samples, &mut rng)
}

/// Same as [`sample_scores`], drawing from a caller-supplied RNG.
///
/// The start page is uniform; each following page is drawn from the transition row of the
/// current one. Allocation does not depend on `samples`.
pub fn sample_scores_with_rng<G: GraphRef + ?Sized, R: Rng>(
    graph: &G,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    check(graph)?;
    check_damping(damping)?;
    check_samples(samples)?;

    let n = graph.node_count();
    let mut visits = vec![0u64; n];
    let mut row = vec![0.0; n];
    let mut curr = rng.random_range(0..n);
    for _ in 0..samples {
        visits[curr] += 1;
        fill_transition(graph, curr, damping, &mut row);
        curr = sample_cdf(rng, &row);
    }

    let total = samples as f64;
    Ok(visits.into_iter().map(|c| c as f64 / total).collect())
}

/// Draw an index with probability proportional to `weights`.
fn sample_cdf<R: Rng>(rng: &mut R, weights: &[f64]) -> usize {
    let sum: f64 = weights.iter().sum();
    let mut r = rng.random::<f64>() * sum;
    for (i, &w) in weights.iter().enumerate() {
        if r < w {
            return i;
        }
        r -= w;
    }
    // Rounding left `r` just past the last bucket.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1)
}

/// Sampled PageRank with `n` steps and no fixed seed.
pub fn sample_rank<P: Ord + Clone>(graph: &LinkGraph<P>, damping: f64, n: usize) -> Result<RankMap<P>> {
    sample_rank_with(graph, &SampleConfig { damping, samples: n, seed: None })
}

pub fn sample_rank_with<P: Ord + Clone>(graph: &LinkGraph<P>, config: &SampleConfig) -> Result<RankMap<P>> {
    let scores = sample_scores(graph, config)?;
    Ok(graph.keyed(scores))
}

pub fn sample_rank_with_rng<P: Ord + Clone, R: Rng>(
    graph: &LinkGraph<P>,
    damping: f64,
    n: usize,
    rng: &mut R,
) -> Result<RankMap<P>> {
    let scores = sample_scores_with_rng(graph, damping, n, rng)?;
    Ok(graph.keyed(scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_cdf_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            let i = sample_cdf(&mut rng, &[0.0, 0.3, 0.0, 0.7, 0.0]);
            assert!(i == 1 || i == 3, "picked zero-weight index {i}");
        }
    }

    #[test]
    fn sample_cdf_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut hits = [0usize; 2];
        for _ in 0..20_000 {
            hits[sample_cdf(&mut rng, &[0.25, 0.75])] += 1;
        }
        let frac = hits[1] as f64 / 20_000.0;
        assert!((frac - 0.75).abs() < 0.02, "frac={frac}");
    }

    #[test]
    fn single_page_gets_all_mass() {
        let g = LinkGraph::new([("only", Vec::<&str>::new())]).unwrap();
        let ranks = sample_rank_with(&g, &SampleConfig::default().with_samples(10).with_seed(1)).unwrap();
        assert_eq!(ranks[&"only"], 1.0);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let g = LinkGraph::new([(0, vec![1, 2]), (1, vec![2]), (2, vec![0]), (3, vec![])]).unwrap();
        let ranks = sample_rank_with(&g, &SampleConfig::default().with_samples(999).with_seed(3)).unwrap();
        let total: f64 = ranks.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "sum={total}");
    }

    #[test]
    fn zero_samples_is_rejected() {
        let g = LinkGraph::new([("a", vec!["a"])]).unwrap();
        assert!(matches!(sample_rank(&g, 0.85, 0), Err(Error::InvalidParameter(_))));
        assert!(matches!(sample_rank(&g, 0.0, 10), Err(Error::InvalidParameter(_))));
    }
}

//! Iterative PageRank: repeated substitution into the PageRank recurrence until every page's
//! rank stops moving.
//!
//! \[
//!   r'_p = \frac{1 - d}{N} + d \sum_{q \to p} \frac{r_q}{|out(q)|} + d \sum_{q \text{ sink}} \frac{r_q}{N}
//! \]
//!
//! Sinks are treated as linking to every page, so each step conserves total mass.

use crate::convergence::max_abs_delta;
use crate::error::{check_damping, Error, Result};
use crate::graph::{check, GraphRef, LinkGraph};
use std::collections::BTreeMap;

/// Estimated PageRank keyed by page. Sums to 1 within floating-point tolerance.
pub type RankMap<P> = BTreeMap<P, f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// Safety cap; exceeding it is reported as [`Error::NonConvergence`].
    pub max_iterations: usize,
    /// Per-page absolute tolerance between successive iterates.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, max_iterations: 10_000, tolerance: crate::convergence::DEFAULT_TOLERANCE }
    }
}

impl PageRankConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations must be at least 1".into()));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Result of an iterative PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores indexed by node.
    pub scores: Vec<f64>,
    /// Number of substitutions performed.
    pub iterations: usize,
    /// Max-norm change of the last substitution.
    pub delta: f64,
}

/// One substitution: write the successor of `scores` into `out`.
///
/// Assumes a checked graph, a valid damping factor and `scores.len() == out.len() == node_count()`.
pub fn power_step<G: GraphRef + ?Sized>(graph: &G, damping: f64, scores: &[f64], out: &mut [f64]) {
    let n = graph.node_count();
    let n_f64 = n as f64;
    let dangling_sum: f64 = (0..n).filter(|&u| graph.out_degree(u) == 0).map(|u| scores[u]).sum();
    let teleport = (1.0 - damping) / n_f64;
    out.fill(teleport + damping * dangling_sum / n_f64);

    for (u, &score) in scores.iter().enumerate() {
        let nbrs = graph.neighbors_ref(u);
        if nbrs.is_empty() {
            continue;
        }
        let share = damping * score / nbrs.len() as f64;
        for &v in nbrs {
            out[v] += share;
        }
    }
}

/// Iterate from the uniform vector until no node moves by more than `config.tolerance`.
pub fn pagerank<G: GraphRef + ?Sized>(graph: &G, config: &PageRankConfig) -> Result<PageRankResult> {
    check(graph)?;
    config.validate()?;
    tracing::debug!(
        damping = config.damping,
        max_iterations = config.max_iterations,
        tolerance = config.tolerance,
        "iterating ranks"
    );

    let n = graph.node_count();
    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0; n];
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        power_step(graph, config.damping, &scores, &mut new_scores);

        let mass: f64 = new_scores.iter().sum();
        debug_assert!((mass - 1.0).abs() < 1e-9, "rank mass drifted to {mass}");
        delta = max_abs_delta(&new_scores, &scores);
        tracing::trace!(iteration, delta, mass, "substitution");

        std::mem::swap(&mut scores, &mut new_scores);
        if delta <= config.tolerance {
            tracing::debug!(iterations = iteration, delta, "ranks converged");
            return Ok(PageRankResult { scores, iterations: iteration, delta });
        }
    }

    tracing::warn!(iterations = config.max_iterations, delta, "iteration cap reached");
    Err(Error::NonConvergence { iterations: config.max_iterations, delta })
}

/// Iterative PageRank with the default tolerance and iteration cap.
pub fn iterate_rank<P: Ord + Clone>(graph: &LinkGraph<P>, damping: f64) -> Result<RankMap<P>> {
    iterate_rank_with(graph, &PageRankConfig::default().with_damping(damping))
}

pub fn iterate_rank_with<P: Ord + Clone>(graph: &LinkGraph<P>, config: &PageRankConfig) -> Result<RankMap<P>> {
    let result = pagerank(graph, config)?;
    Ok(graph.keyed(result.scores))
}

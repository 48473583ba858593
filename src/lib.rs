//! # surfrank
//!
//! PageRank over a directed link graph, estimated two independent ways:
//!
//! - [`sample_rank`]: Monte-Carlo. One long random-surfer walk; a page's rank is the fraction
//!   of steps spent on it.
//! - [`iterate_rank`]: deterministic. Power iteration on the PageRank recurrence until every
//!   page's rank moves by at most [`convergence::DEFAULT_TOLERANCE`].
//!
//! Both consume the same immutable [`LinkGraph`] and return a [`RankMap`] that sums to 1.
//! Sinks (pages without out-links) are treated as linking to every page, so no rank mass is
//! lost.
//!
//! ```
//! use surfrank::{iterate_rank, LinkGraph};
//!
//! let graph = LinkGraph::new([("a", vec!["b"]), ("b", vec!["a", "c"]), ("c", vec![])])?;
//! let ranks = iterate_rank(&graph, 0.85)?;
//! assert!((ranks.values().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok::<(), surfrank::Error>(())
//! ```

pub mod convergence;
pub mod error;
pub mod graph;
pub mod pagerank;
pub mod random_walk;
pub mod topk;
pub mod transition;

pub use convergence::{converged, converged_within, max_abs_delta};
pub use error::{Error, Result};
pub use graph::{GraphRef, LinkGraph};
pub use pagerank::{
    iterate_rank, iterate_rank_with, pagerank, power_step, PageRankConfig, PageRankResult, RankMap,
};
pub use random_walk::{
    sample_rank, sample_rank_with, sample_rank_with_rng, sample_scores, sample_scores_with_rng,
    SampleConfig,
};
pub use topk::{normalize, top_k};
pub use transition::{fill_transition, transition, transition_row, Distribution};

//! Random-surfer transition model.
//!
//! From a page with out-links, the surfer follows one of them uniformly with probability
//! `damping` and otherwise teleports to any page uniformly:
//! \[
//!   P(u \to v) = \frac{1 - d}{N} + [v \in out(u)] \frac{d}{|out(u)|}
//! \]
//! From a sink the next page is uniform over all pages.

use crate::error::{check_damping, Error, Result};
use crate::graph::{check, GraphRef, LinkGraph};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Next-hop probabilities keyed by page.
pub type Distribution<P> = BTreeMap<P, f64>;

/// Write the transition row of `node` into `out` (length `node_count()`).
///
/// Assumes a checked graph and a valid damping factor; used on the sampler's hot path.
pub fn fill_transition<G: GraphRef + ?Sized>(graph: &G, node: usize, damping: f64, out: &mut [f64]) {
    let n = graph.node_count();
    debug_assert_eq!(out.len(), n);
    let nbrs = graph.neighbors_ref(node);
    if nbrs.is_empty() {
        out.fill(1.0 / n as f64);
        return;
    }
    out.fill((1.0 - damping) / n as f64);
    let share = damping / nbrs.len() as f64;
    for &v in nbrs {
        out[v] += share;
    }
}

/// Transition row of `node` as a fresh vector indexed by node.
pub fn transition_row<G: GraphRef + ?Sized>(graph: &G, node: usize, damping: f64) -> Result<Vec<f64>> {
    check(graph)?;
    check_damping(damping)?;
    let n = graph.node_count();
    if node >= n {
        return Err(Error::InvalidParameter(format!("node {node} outside 0..{n}")));
    }
    let mut row = vec![0.0; n];
    fill_transition(graph, node, damping, &mut row);
    Ok(row)
}

/// Probability distribution over the next page, given the surfer is on `page`.
pub fn transition<P: Ord + Clone + Debug>(
    graph: &LinkGraph<P>,
    page: &P,
    damping: f64,
) -> Result<Distribution<P>> {
    let node = graph
        .index_of(page)
        .ok_or_else(|| Error::InvalidParameter(format!("page {page:?} is not in the graph")))?;
    let row = transition_row(graph, node, damping)?;
    Ok(graph.keyed(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> LinkGraph<&'static str> {
        LinkGraph::new([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn linked_pages_get_follow_share() {
        let g = graph();
        let dist = transition(&g, &"2.html", 0.85).unwrap();
        let teleport = 0.15 / 4.0;
        assert!((dist["1.html"] - (teleport + 0.425)).abs() < 1e-12);
        assert!((dist["3.html"] - (teleport + 0.425)).abs() < 1e-12);
        assert!((dist["2.html"] - teleport).abs() < 1e-12);
        assert!((dist["4.html"] - teleport).abs() < 1e-12);
        let total: f64 = dist.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "sum={total}");
    }

    #[test]
    fn sink_is_exactly_uniform() {
        let g = graph();
        let dist = transition(&g, &"4.html", 0.85).unwrap();
        assert_eq!(dist.len(), 4);
        assert!(dist.values().all(|&p| p == 0.25), "{dist:?}");
    }

    #[test]
    fn unknown_page_is_rejected() {
        let g = graph();
        assert!(matches!(
            transition(&g, &"5.html", 0.85),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn bad_damping_is_rejected() {
        let g = graph();
        assert!(matches!(transition(&g, &"1.html", 1.0), Err(Error::InvalidParameter(_))));
        assert!(matches!(transition_row(&g, 9, 0.85), Err(Error::InvalidParameter(_))));
    }
}

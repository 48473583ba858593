//! Ranking utilities.

use crate::pagerank::RankMap;
use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest-ranked pages, best first. Ties go to the smaller page.
///
/// Non-finite and non-positive scores are skipped.
pub fn top_k<P: Ord + Clone>(ranks: &RankMap<P>, k: usize) -> Vec<(P, f64)> {
    if k == 0 || ranks.is_empty() { return Vec::new(); }
    // Min-heap on (score, Reverse(page)): the root is the entry to evict next.
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (page, &score) in ranks {
        if !score.is_finite() || score <= 0.0 { continue; }
        let Ok(s) = NotNan::new(score) else { continue };
        heap.push(Reverse((s, Reverse(page))));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut results: Vec<(NotNan<f64>, &P)> = heap.into_iter().map(|Reverse((s, Reverse(p)))| (s, p)).collect();
    results.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    results.into_iter().map(|(s, p)| (p.clone(), s.into_inner())).collect()
}

/// Rescale `scores` in place to sum to 1. All-zero input is left unchanged.
pub fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores { *s /= sum; }
    }
}

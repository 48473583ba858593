//! Fixed-point stability test shared by the iterative solver.
//!
//! Two rank mappings are converged when **every** page moved by at most the tolerance
//! (max-norm, absolute). Entries are paired by page, never by iteration position.

use crate::pagerank::RankMap;

/// Per-page absolute tolerance.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Whether `new` and `old` agree within [`DEFAULT_TOLERANCE`] on every page.
pub fn converged<P: Ord>(new: &RankMap<P>, old: &RankMap<P>) -> bool {
    converged_within(new, old, DEFAULT_TOLERANCE)
}

/// Whether `new` and `old` agree within `tolerance` on every page.
///
/// Mappings over different page sets are never converged.
pub fn converged_within<P: Ord>(new: &RankMap<P>, old: &RankMap<P>, tolerance: f64) -> bool {
    new.len() == old.len()
        && new.iter().all(|(page, &x)| match old.get(page) {
            Some(&y) => (x - y).abs() <= tolerance,
            None => false,
        })
}

/// Largest per-node change between two dense score vectors.
///
/// The index is the node identifier, so equal indices always name the same page.
pub fn max_abs_delta(new: &[f64], old: &[f64]) -> f64 {
    debug_assert_eq!(new.len(), old.len());
    new.iter().zip(old).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(entries: &[(&'static str, f64)]) -> RankMap<&'static str> {
        entries.iter().copied().collect()
    }

    #[test]
    fn tolerance_is_inclusive_and_per_entry() {
        let old = ranks(&[("a", 0.5), ("b", 0.5)]);
        let same = ranks(&[("a", 0.5), ("b", 0.5)]);
        let one_far = ranks(&[("a", 0.5), ("b", 0.502)]);
        assert!(converged(&same, &old));
        assert!(!converged(&one_far, &old));
        assert!(converged_within(&one_far, &old, 0.0025));
    }

    #[test]
    fn pairs_entries_by_page() {
        // Same values, different owners: positional pairing would call this converged.
        let old = ranks(&[("a", 0.1), ("b", 0.9)]);
        let new = ranks(&[("a", 0.9), ("b", 0.1)]);
        assert!(!converged(&new, &old));
    }

    #[test]
    fn differing_page_sets_never_converge() {
        let old = ranks(&[("a", 0.5), ("b", 0.5)]);
        let new = ranks(&[("a", 0.5), ("c", 0.5)]);
        assert!(!converged(&new, &old));
        assert!(!converged(&ranks(&[("a", 1.0)]), &old));
    }

    #[test]
    fn max_abs_delta_is_max_norm() {
        assert_eq!(max_abs_delta(&[0.5, 0.25, 0.25], &[0.25, 0.25, 0.5]), 0.25);
        assert_eq!(max_abs_delta(&[0.0, 1.0], &[0.5, 0.5]), 0.5);
        assert_eq!(max_abs_delta(&[0.25], &[0.25]), 0.0);
    }
}

//! Link graphs and the adapter trait the rank estimators run on.
//!
//! A [`LinkGraph`] is the validated, immutable input: a mapping from page to the set of pages
//! it links to. Invariants established once at construction:
//! - at least one page is present;
//! - every link target is itself a page (the graph is closed);
//! - pages are stored sorted, so each page has a stable dense index in `0..len`.
//!
//! Sinks (pages with no out-links) are allowed.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// A graph view that returns **borrowed** neighbor slices.
///
/// Nodes are dense indices `0..node_count()`. Rank estimators take this trait so they never
/// allocate per step.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Check the closure invariant on an arbitrary [`GraphRef`].
///
/// Fails on an empty graph or on any neighbor index outside `0..node_count()`.
pub fn check<G: GraphRef + ?Sized>(graph: &G) -> Result<()> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::InvalidGraph("graph has no pages".into()));
    }
    for u in 0..n {
        if let Some(&v) = graph.neighbors_ref(u).iter().find(|&&v| v >= n) {
            return Err(Error::InvalidGraph(format!(
                "node {u} links to node {v}, outside 0..{n}"
            )));
        }
    }
    Ok(())
}

/// Immutable directed link graph keyed by page identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGraph<P> {
    pages: Vec<P>,
    links: Vec<Vec<usize>>,
}

impl<P: Ord + Clone + Debug> LinkGraph<P> {
    /// Build and validate a graph from `(page, out-links)` pairs.
    ///
    /// Repeated keys have their link sets merged and repeated links collapse.
    pub fn new<I, L>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        L: IntoIterator<Item = P>,
    {
        let mut adjacency: BTreeMap<P, BTreeSet<P>> = BTreeMap::new();
        for (page, targets) in links {
            adjacency.entry(page).or_default().extend(targets);
        }
        if adjacency.is_empty() {
            return Err(Error::InvalidGraph("graph has no pages".into()));
        }

        let pages: Vec<P> = adjacency.keys().cloned().collect();
        let mut index = Vec::with_capacity(pages.len());
        for (page, targets) in &adjacency {
            let mut nbrs = Vec::with_capacity(targets.len());
            for target in targets {
                match pages.binary_search(target) {
                    Ok(i) => nbrs.push(i),
                    Err(_) => {
                        return Err(Error::InvalidGraph(format!(
                            "page {page:?} links to {target:?}, which is not a page of the graph"
                        )))
                    }
                }
            }
            index.push(nbrs);
        }

        let graph = Self { pages, links: index };
        tracing::debug!(
            pages = graph.len(),
            links = graph.links.iter().map(Vec::len).sum::<usize>(),
            sinks = graph.links.iter().filter(|l| l.is_empty()).count(),
            "built link graph"
        );
        Ok(graph)
    }

    /// Build a graph from a `petgraph` digraph, using node weights as page identifiers.
    #[cfg(feature = "petgraph")]
    pub fn from_digraph<E, Ix>(graph: &petgraph::Graph<P, E, petgraph::Directed, Ix>) -> Result<Self>
    where
        Ix: petgraph::graph::IndexType,
    {
        use petgraph::visit::EdgeRef;

        let mut seen = BTreeSet::new();
        for node in graph.node_weights() {
            if !seen.insert(node) {
                return Err(Error::InvalidGraph(format!("duplicate page {node:?}")));
            }
        }
        Self::new(graph.node_indices().map(|u| {
            let targets: Vec<P> = graph.edges(u).map(|e| graph[e.target()].clone()).collect();
            (graph[u].clone(), targets)
        }))
    }
}

impl<P: Ord> LinkGraph<P> {
    /// Number of pages. Always at least one.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in index order (sorted).
    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn index_of(&self, page: &P) -> Option<usize> {
        self.pages.binary_search(page).ok()
    }

    pub fn page(&self, index: usize) -> Option<&P> {
        self.pages.get(index)
    }

    /// Out-links of `page`, or `None` if it is not in the graph.
    pub fn links(&self, page: &P) -> Option<impl Iterator<Item = &P> + '_> {
        let i = self.index_of(page)?;
        Some(self.links[i].iter().map(move |&v| &self.pages[v]))
    }

    pub fn is_sink(&self, page: &P) -> Option<bool> {
        self.index_of(page).map(|i| self.links[i].is_empty())
    }

    /// Pages with no out-links.
    pub fn sinks(&self) -> impl Iterator<Item = &P> + '_ {
        self.pages.iter().zip(&self.links).filter(|(_, l)| l.is_empty()).map(|(p, _)| p)
    }
}

impl<P: Ord + Clone> LinkGraph<P> {
    /// Key dense per-node values by page.
    pub(crate) fn keyed(&self, values: Vec<f64>) -> BTreeMap<P, f64> {
        debug_assert_eq!(values.len(), self.pages.len());
        self.pages.iter().cloned().zip(values).collect()
    }
}

impl<P> GraphRef for LinkGraph<P> {
    fn node_count(&self) -> usize {
        self.pages.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.links.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

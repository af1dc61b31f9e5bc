//! Single-source shortest-path search (Dijkstra, lazy deletion).
//!
//! # Algorithm
//!
//! 1. `distance[source] = 0`, every other node is implicitly +∞. Push
//!    `(0, source)` and record the source's predecessor as the sentinel.
//! 2. Pop the smallest frontier entry `(d, current)`:
//!    - `current` is the target: done, the distance is `d`.
//!    - `current` is already explored: the entry is stale, skip it.
//!    - otherwise mark it explored and relax every neighbor in adjacency
//!      order. A neighbor that is not explored and whose candidate distance
//!      `distance[current] + weight(current, neighbor)` beats its current
//!      distance gets the new distance, a new predecessor, and a new
//!      frontier entry.
//! 3. Frontier exhausted without popping the target: no path.
//!
//! The frontier never decreases a key in place, it only pushes; the explored
//! check on pop is what keeps stale duplicates from being expanded twice.
//! Equal distances pop in push order, so paths are reproducible.
//!
//! Complexity: O((V + E) log V). Weights are strictly positive (the store
//! rejects anything else), which is what makes the first pop of a node final.
//!
//! # Cancellation
//!
//! [`SearchOptions`] carries an optional shared deadline, an optional
//! per-query timeout and an optional [`CancellationToken`]. The timeout is
//! turned into a deadline when each search starts. All of them are checked
//! once per frontier pop, the only loop in the engine whose length depends on
//! the input.

mod cancel;
mod frontier;

use std::time::{Duration, Instant};

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use tracing::{debug, instrument, trace};
use waypath_core::{GraphError, WeightedGraph};

pub use cancel::CancellationToken;

use crate::path::{Predecessors, build_path};
use frontier::Frontier;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Interruption settings for a search.
///
/// `timeout` is a per-query budget: each search measures it from its own
/// start, so an aggregation running thousands of searches only fails when
/// one of them runs long. `deadline` is an absolute instant shared by every
/// search that sees these options.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Abort with [`GraphError::DeadlineExceeded`] once this instant passes.
    pub deadline: Option<Instant>,
    /// Abort with [`GraphError::DeadlineExceeded`] once a single search has
    /// run this long.
    pub timeout: Option<Duration>,
    /// Abort with [`GraphError::Cancelled`] once this token is tripped.
    pub cancel: Option<CancellationToken>,
}

impl SearchOptions {
    /// Options giving every search `timeout` from its own start.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The instant a search starting now must finish by: the earlier of the
    /// shared deadline and the per-query timeout.
    pub(crate) fn query_deadline(&self) -> Option<Instant> {
        let per_query = self.timeout.and_then(|t| Instant::now().checked_add(t));
        match (self.deadline, per_query) {
            (Some(shared), Some(own)) => Some(shared.min(own)),
            (shared, own) => shared.or(own),
        }
    }

    pub(crate) fn check(&self, deadline: Option<Instant>) -> Result<(), GraphError> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(GraphError::Cancelled);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(GraphError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub source: NodeIndex,
    pub target: NodeIndex,
    /// Total weight of the shortest path.
    pub distance: f64,
    /// Predecessor chain covering at least every node on the path.
    pub previous: Predecessors,
    /// Nodes in the order their distance became final, with that distance.
    /// Ends with the target.
    pub explored_order: Vec<(NodeIndex, f64)>,
}

impl SearchResult {
    /// The path from source to target.
    ///
    /// # Errors
    ///
    /// Never fails for a result produced by the engine.
    pub fn path(&self) -> Result<Vec<NodeIndex>, GraphError> {
        build_path(&self.previous, self.target)
    }
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The target cannot be reached from the source.
    NoPathFound,
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The result, if a path exists.
    #[must_use]
    pub fn found(self) -> Option<SearchResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NoPathFound => None,
        }
    }

    /// Distance to the target, if a path exists.
    #[must_use]
    pub const fn distance(&self) -> Option<f64> {
        match self {
            Self::Found(result) => Some(result.distance),
            Self::NoPathFound => None,
        }
    }
}

/// Every distance from one source: the search run to exhaustion.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub source: NodeIndex,
    distances: Vec<f64>,
    /// Predecessor chain for every reachable node.
    pub previous: Predecessors,
    /// Reachable nodes (source first) in finalization order.
    pub order: Vec<(NodeIndex, f64)>,
}

impl ShortestPathTree {
    /// Final distance to `node`, or `None` if unreachable.
    #[must_use]
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.distances
            .get(node.index())
            .copied()
            .filter(|d| d.is_finite())
    }

    /// Number of reachable nodes, the source included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.order.len()
    }

    /// Path from the source to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DisconnectedPath`] if `node` is unreachable.
    pub fn path_to(&self, node: NodeIndex) -> Result<Vec<NodeIndex>, GraphError> {
        build_path(&self.previous, node)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Shortest path from `source` to `target`, by label.
///
/// # Errors
///
/// - [`GraphError::UnknownNode`] if either label is absent.
/// - [`GraphError::MissingEdge`] if an adjacency entry relaxed during the
///   search has no weight.
pub fn search(graph: &WeightedGraph, source: &str, target: &str) -> Result<SearchOutcome, GraphError> {
    search_with(graph, source, target, &SearchOptions::default())
}

/// [`search`] with a deadline and/or cancellation token.
///
/// # Errors
///
/// As [`search`], plus [`GraphError::Cancelled`] and
/// [`GraphError::DeadlineExceeded`].
pub fn search_with(
    graph: &WeightedGraph,
    source: &str,
    target: &str,
    options: &SearchOptions,
) -> Result<SearchOutcome, GraphError> {
    let s = graph.require(source)?;
    let t = graph.require(target)?;
    search_indices(graph, s, t, options)
}

/// [`search_with`] on node indices.
///
/// # Errors
///
/// As [`search_with`]; [`GraphError::UnknownNode`] if an index does not
/// belong to `graph`.
#[instrument(skip_all, fields(source = source.index(), target = target.index()))]
pub fn search_indices(
    graph: &WeightedGraph,
    source: NodeIndex,
    target: NodeIndex,
    options: &SearchOptions,
) -> Result<SearchOutcome, GraphError> {
    check_member(graph, source)?;
    check_member(graph, target)?;

    let mut state = SearchState::new(graph, source);
    match state.run(graph, Some(target), options)? {
        Some(distance) => Ok(SearchOutcome::Found(SearchResult {
            source,
            target,
            distance,
            previous: state.previous,
            explored_order: state.order,
        })),
        None => {
            debug!(
                source = graph.label(source),
                target = graph.label(target),
                "no path"
            );
            Ok(SearchOutcome::NoPathFound)
        }
    }
}

/// Distances from `source` to every reachable node.
///
/// # Errors
///
/// As [`search_with`].
pub fn shortest_path_tree(
    graph: &WeightedGraph,
    source: &str,
    options: &SearchOptions,
) -> Result<ShortestPathTree, GraphError> {
    let s = graph.require(source)?;
    shortest_path_tree_from(graph, s, options)
}

/// [`shortest_path_tree`] on a node index.
///
/// # Errors
///
/// As [`search_indices`].
#[instrument(skip_all, fields(source = source.index()))]
pub fn shortest_path_tree_from(
    graph: &WeightedGraph,
    source: NodeIndex,
    options: &SearchOptions,
) -> Result<ShortestPathTree, GraphError> {
    check_member(graph, source)?;

    let mut state = SearchState::new(graph, source);
    state.run(graph, None, options)?;
    Ok(ShortestPathTree {
        source,
        distances: state.distance,
        previous: state.previous,
        order: state.order,
    })
}

// ---------------------------------------------------------------------------
// Search state
// ---------------------------------------------------------------------------

fn check_member(graph: &WeightedGraph, idx: NodeIndex) -> Result<(), GraphError> {
    if graph.contains(idx) {
        Ok(())
    } else {
        Err(GraphError::unknown(format!("#{}", idx.index())))
    }
}

/// Per-query state, created fresh for each search and dropped with it.
struct SearchState {
    distance: Vec<f64>,
    explored: FixedBitSet,
    previous: Predecessors,
    frontier: Frontier,
    order: Vec<(NodeIndex, f64)>,
}

impl SearchState {
    fn new(graph: &WeightedGraph, source: NodeIndex) -> Self {
        let n = graph.node_count();
        let mut distance = vec![f64::INFINITY; n];
        distance[source.index()] = 0.0;
        let mut frontier = Frontier::default();
        frontier.push(0.0, source);
        Self {
            distance,
            explored: FixedBitSet::with_capacity(n),
            previous: Predecessors::rooted(source),
            frontier,
            order: Vec::new(),
        }
    }

    /// Run until `target` is popped (returning its distance) or the frontier
    /// is empty (returning `None`). With no target, always runs to empty.
    fn run(
        &mut self,
        graph: &WeightedGraph,
        target: Option<NodeIndex>,
        options: &SearchOptions,
    ) -> Result<Option<f64>, GraphError> {
        let deadline = options.query_deadline();
        while let Some((d, current)) = self.frontier.pop() {
            options.check(deadline).inspect_err(|e| debug!(error = %e, "search interrupted"))?;
            trace!(node = current.index(), distance = d, frontier = self.frontier.len(), "pop");

            if target == Some(current) {
                self.order.push((current, d));
                return Ok(Some(d));
            }
            if self.explored.contains(current.index()) {
                continue;
            }
            self.explored.insert(current.index());
            self.order.push((current, d));

            let base = self.distance[current.index()];
            for &neighbor in graph.neighbors_of(current) {
                if self.explored.contains(neighbor.index()) {
                    continue;
                }
                let candidate = base + graph.weight_between(current, neighbor)?;
                if candidate < self.distance[neighbor.index()] {
                    self.distance[neighbor.index()] = candidate;
                    self.previous.insert(neighbor, Some(current));
                    self.frontier.push(candidate, neighbor);
                }
            }
        }
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

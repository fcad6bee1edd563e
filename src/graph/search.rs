//! Fewest-hop path search with a same-line tie-break.
//!
//! Level-synchronous breadth-first search over the undirected incidence
//! structure. Every node is first recorded from the frontier at its true
//! BFS depth, so the reconstructed walk has the minimum number of edges.
//!
//! When an unexplored edge leads to a node that is already recorded on the
//! next level, the search may re-point that node's discovery edge to the
//! candidate if the candidate continues the line that reached the current
//! node and the recorded edge does not. This is a local, order-dependent
//! preference, not a global minimum of line changes.
//!
//! All traversal state is per call and indexed by arena slot.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::model::{Edge, Node, NodeId, Route};
use super::memory::{EdgeIdx, NodeIdx};
use super::{Graph, IdCollisionPolicy, PathResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unexplored,
    Visited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    Unexplored,
    Discovery,
    Cross,
}

impl<E: Edge> Graph<E> {
    /// Fewest-hop route from `start` to `destination`.
    ///
    /// Under `IdCollisionPolicy::Reject` an endpoint only counts as registered
    /// when the registered node with its id is value-equal to it; a node the
    /// graph would refuse is reported as missing. Under `Merge` endpoints are
    /// matched by id, as in [`Graph::find_path_by_id`].
    pub fn find_path(&self, start: &E::Node, destination: &E::Node) -> PathResult<'_, E> {
        if self.config().id_collision == IdCollisionPolicy::Reject {
            let mut missing: SmallVec<[NodeId; 2]> = SmallVec::new();
            for node in [start, destination] {
                let id = node.id();
                let registered = self.get_node(id).is_some_and(|known| known == node);
                if !registered && !missing.contains(&id) {
                    missing.push(id);
                }
            }
            if !missing.is_empty() {
                debug!(?missing, "query endpoint not registered with this value");
                return PathResult::Unreachable { missing };
            }
        }
        self.find_path_by_id(start.id(), destination.id())
    }

    /// Fewest-hop route between the nodes registered under these ids.

    #[tracing::instrument(skip(self), fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn find_path_by_id(&self, start: NodeId, destination: NodeId) -> PathResult<'_, E> {
        let (from, to) = match (self.slot_of(start), self.slot_of(destination)) {
            (Some(from), Some(to)) => (from, to),
            (from, to) => {
                let mut missing = SmallVec::new();
                if from.is_none() {
                    missing.push(start);
                }
                if to.is_none() && destination != start {
                    missing.push(destination);
                }
                debug!(?missing, "query endpoint not registered");
                return PathResult::Unreachable { missing };
            }
        };

        if from == to {
            return PathResult::Route(Route::stay(self.node_at(from)));
        }

        match Search::new(self, from).run(to) {
            Some(route) => {
                debug!(hops = route.len(), line_changes = route.line_changes(), "route found");
                PathResult::Route(route)
            }
            None => {
                debug!("no route");
                PathResult::NoRoute
            }
        }
    }
}

// ============================================================================
// Search state
// ============================================================================

struct Search<'g, E: Edge> {
    graph: &'g Graph<E>,
    start: NodeIdx,
    nodes: Vec<NodeState>,
    edges: Vec<EdgeState>,
    /// node slot → edge currently recorded as reaching it
    from: Vec<Option<EdgeIdx>>,
    depth: Vec<usize>,
}

impl<'g, E: Edge> Search<'g, E> {
    fn new(graph: &'g Graph<E>, start: NodeIdx) -> Self {
        let mut nodes = vec![NodeState::Unexplored; graph.node_count()];
        nodes[start.0] = NodeState::Visited;
        Self {
            graph,
            start,
            nodes,
            edges: vec![EdgeState::Unexplored; graph.edge_count()],
            from: vec![None; graph.node_count()],
            depth: vec![0; graph.node_count()],
        }
    }

    fn run(mut self, destination: NodeIdx) -> Option<Route<'g, E>> {
        let graph = self.graph;
        let mut frontier = vec![self.start];

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for &n in &frontier {
                for &e in graph.adjacent(n) {
                    if self.edges[e.0] != EdgeState::Unexplored {
                        continue;
                    }
                    let opposite = graph.opposite_slot(e, n);

                    if self.nodes[opposite.0] == NodeState::Unexplored {
                        self.edges[e.0] = EdgeState::Discovery;
                        self.from[opposite.0] = Some(e);
                        self.nodes[opposite.0] = NodeState::Visited;
                        self.depth[opposite.0] = self.depth[n.0] + 1;

                        if opposite == destination {
                            return Some(self.reconstruct(destination));
                        }
                        next.push(opposite);
                    } else {
                        self.revisit(n, opposite, e);
                    }
                }
            }

            frontier = next;
        }

        None
    }

    /// `e` leads from `n` to an already visited node. Keep the recorded
    /// route unless `e` continues the line that reached `n` and the
    /// recorded route to `opposite` does not.
    fn revisit(&mut self, n: NodeIdx, opposite: NodeIdx, e: EdgeIdx) {
        let graph = self.graph;
        self.edges[e.0] = EdgeState::Cross;

        if !graph.config().line_continuation || n == self.start {
            return;
        }
        // Only nodes on the next level may be re-pointed: siblings and
        // expanded nodes would lose their BFS depth.
        if self.depth[opposite.0] != self.depth[n.0] + 1 {
            return;
        }
        let (Some(via_n), Some(via_opposite)) = (self.from[n.0], self.from[opposite.0]) else {
            return;
        };

        let n_label = graph.edge_at(via_n).label();
        let opposite_label = graph.edge_at(via_opposite).label();
        let label = graph.edge_at(e).label();

        if n_label == opposite_label || n_label != label {
            return;
        }

        trace!(%label, node = %graph.node_at(opposite).id(), "re-pointing to stay on line");
        self.edges[via_opposite.0] = EdgeState::Cross;
        self.edges[e.0] = EdgeState::Discovery;
        self.from[opposite.0] = Some(e);
    }

    /// Walk `from` pointers back to the start. `from[start]` is always
    /// empty and every pointer leads one level up, so the walk terminates.
    fn reconstruct(&self, destination: NodeIdx) -> Route<'g, E> {
        let graph = self.graph;
        let mut edges = Vec::with_capacity(self.depth[destination.0]);
        let mut stops = Vec::with_capacity(self.depth[destination.0]);
        let mut current = destination;

        while let Some(e) = self.from[current.0] {
            edges.push(graph.edge_at(e));
            stops.push(graph.node_at(current));
            current = graph.opposite_slot(e, current);
        }
        debug_assert_eq!(current, self.start);

        edges.reverse();
        stops.reverse();
        Route::new(graph.node_at(current), edges, stops)
    }
}

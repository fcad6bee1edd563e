//! In-memory multigraph.
//!
//! This is the reference implementation of `MultiGraph`. Nodes and edges
//! live in arenas; every registered node gets a dense slot, and every
//! structure after registration is indexed by slot rather than by id.
//!
//! ## Limitations
//!
//! - **Append-only**: there is no removal. Slots are never reused.
//! - **Single owner**: mutation needs `&mut self`. Share through
//!   `SharedGraph` when several handles are needed.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{Edge, EdgeKey, Node, NodeId};
use crate::{Error, Result};
use super::{GraphConfig, IdCollisionPolicy, MultiGraph, NodeOf, PathResult};

/// Dense node slot, assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(pub(crate) usize);

/// Dense edge slot, assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeIdx(pub(crate) usize);

struct EdgeSlot<E> {
    edge: E,
    /// Resolved origin and destination slots.
    ends: [NodeIdx; 2],
}

// ============================================================================
// Graph
// ============================================================================

/// Arena-backed labeled multigraph.
pub struct Graph<E: Edge> {
    config: GraphConfig,
    nodes: Vec<E::Node>,
    edges: Vec<EdgeSlot<E>>,
    node_index: HashMap<NodeId, NodeIdx>,
    edge_index: HashMap<EdgeKey<E::Label>, EdgeIdx>,
    /// node slot → incident edge slots, in registration order
    adjacency: Vec<SmallVec<[EdgeIdx; 4]>>,
}

impl<E: Edge> Default for Graph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Edge> Graph<E> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register `node`. Returns `Ok(false)` when its id is already known.
    pub fn add_node(&mut self, node: E::Node) -> Result<bool> {
        let id = node.id();
        if let Some(&slot) = self.node_index.get(&id) {
            self.check_collision(slot, &node)?;
            debug!(%id, "node already registered");
            return Ok(false);
        }
        self.insert_node(node);
        debug!(%id, "node registered");
        Ok(true)
    }

    /// Register `edge`, registering either endpoint that is not yet known.
    ///
    /// Both endpoints are checked against the collision policy before
    /// anything is mutated, so a rejected edge leaves the graph untouched.
    pub fn add_edge(&mut self, edge: E) -> Result<bool> {
        let key = edge.key();
        if self.edge_index.contains_key(&key) {
            debug!(label = %key.label, origin = %key.origin, destination = %key.destination,
                "edge already registered");
            return Ok(false);
        }

        for endpoint in [edge.origin(), edge.destination()] {
            if let Some(&slot) = self.node_index.get(&endpoint.id()) {
                self.check_collision(slot, endpoint)?;
            }
        }
        if self.config.id_collision == IdCollisionPolicy::Reject
            && key.origin == key.destination
            && edge.origin() != edge.destination()
        {
            debug!(id = %key.origin, "rejecting self-loop with mismatched endpoints");
            return Err(Error::IdCollision { id: key.origin });
        }

        let origin = self.resolve_or_insert(edge.origin());
        let destination = self.resolve_or_insert(edge.destination());

        let idx = EdgeIdx(self.edges.len());
        self.adjacency[origin.0].push(idx);
        if origin != destination {
            self.adjacency[destination.0].push(idx);
        }
        self.edges.push(EdgeSlot { edge, ends: [origin, destination] });
        debug!(label = %key.label, origin = %key.origin, destination = %key.destination,
            "edge registered");
        self.edge_index.insert(key, idx);

        Ok(true)
    }

    fn check_collision(&self, slot: NodeIdx, incoming: &E::Node) -> Result<()> {
        let registered = &self.nodes[slot.0];
        if self.config.id_collision == IdCollisionPolicy::Reject && registered != incoming {
            debug!(id = %incoming.id(), "id already held by a different node");
            return Err(Error::IdCollision { id: incoming.id() });
        }
        Ok(())
    }

    fn insert_node(&mut self, node: E::Node) -> NodeIdx {
        let slot = NodeIdx(self.nodes.len());
        self.node_index.insert(node.id(), slot);
        self.nodes.push(node);
        self.adjacency.push(SmallVec::new());
        slot
    }

    fn resolve_or_insert(&mut self, node: &E::Node) -> NodeIdx {
        match self.node_index.get(&node.id()) {
            Some(&slot) => slot,
            None => {
                debug!(id = %node.id(), "endpoint registered");
                self.insert_node(node.clone())
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// The registered node with this id.
    pub fn get_node(&self, id: NodeId) -> Option<&E::Node> {
        self.slot_of(id).map(|slot| &self.nodes[slot.0])
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn contains_edge(&self, edge: &E) -> bool {
        self.edge_index.contains_key(&edge.key())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Registered nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &E::Node> {
        self.nodes.iter()
    }

    /// Registered edges in registration order.
    pub fn edges(&self) -> impl Iterator<Item = &E> {
        self.edges.iter().map(|slot| &slot.edge)
    }

    /// Edges incident to the node with this id. A self-loop is listed once.
    pub fn incident_edges(&self, id: NodeId) -> Result<impl Iterator<Item = &E>> {
        let slot = self.slot_of(id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
        Ok(self.adjacency[slot.0].iter().map(|&e| &self.edges[e.0].edge))
    }

    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.slot_of(id).map(|slot| self.adjacency[slot.0].len())
    }

    // ========================================================================
    // Slot access for search
    // ========================================================================

    pub(crate) fn slot_of(&self, id: NodeId) -> Option<NodeIdx> {
        self.node_index.get(&id).copied()
    }

    pub(crate) fn node_at(&self, slot: NodeIdx) -> &E::Node {
        &self.nodes[slot.0]
    }

    pub(crate) fn edge_at(&self, idx: EdgeIdx) -> &E {
        &self.edges[idx.0].edge
    }

    pub(crate) fn adjacent(&self, slot: NodeIdx) -> &[EdgeIdx] {
        &self.adjacency[slot.0]
    }

    /// The slot across `idx` from `slot`; `slot` itself for a self-loop.
    pub(crate) fn opposite_slot(&self, idx: EdgeIdx, slot: NodeIdx) -> NodeIdx {
        let [origin, destination] = self.edges[idx.0].ends;
        if origin == slot { destination } else { origin }
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Check that every edge's endpoints are registered and that adjacency
    /// is exactly the incidence relation of the edge set.
    pub fn debug_assert_invariants(&self) {
        debug_assert_eq!(self.nodes.len(), self.adjacency.len());
        debug_assert_eq!(self.nodes.len(), self.node_index.len());
        debug_assert_eq!(self.edges.len(), self.edge_index.len());

        for (i, slot) in self.edges.iter().enumerate() {
            for (end, node) in slot.ends.iter().zip([slot.edge.origin(), slot.edge.destination()]) {
                debug_assert!(end.0 < self.nodes.len(), "edge {i} endpoint out of range");
                debug_assert_eq!(
                    self.nodes[end.0].id(),
                    node.id(),
                    "edge {i} endpoint id mismatch"
                );
            }
        }

        for (n, incident) in self.adjacency.iter().enumerate() {
            let mut expected: Vec<usize> = self
                .edges
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.ends.contains(&NodeIdx(n)))
                .map(|(i, _)| i)
                .collect();
            let mut actual: Vec<usize> = incident.iter().map(|e| e.0).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            debug_assert_eq!(expected, actual, "adjacency of node slot {n} out of sync");
        }
    }
}

impl<E: Edge> MultiGraph for Graph<E> {
    type Edge = E;

    fn add_node(&mut self, node: NodeOf<E>) -> Result<bool> {
        Graph::add_node(self, node)
    }

    fn add_edge(&mut self, edge: E) -> Result<bool> {
        Graph::add_edge(self, edge)
    }

    fn get_node(&self, id: NodeId) -> Option<&NodeOf<E>> {
        Graph::get_node(self, id)
    }

    fn find_path(&self, start: &NodeOf<E>, destination: &NodeOf<E>) -> PathResult<'_, E> {
        Graph::find_path(self, start, destination)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Station};

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g: Graph<Line> = Graph::new();
        assert!(g.add_node(Station::new(0)).unwrap());
        assert!(!g.add_node(Station::new(0)).unwrap());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.get_node(NodeId(0)), Some(&Station::new(0)));
    }

    #[test]
    fn test_add_node_with_name() {
        let mut g: Graph<Line> = Graph::new();
        assert!(g.add_node(Station::named(0, "Station 0")).unwrap());
        assert_eq!(g.get_node(NodeId(0)).and_then(Station::name), Some("Station 0"));
    }

    #[test]
    fn test_add_edge_registers_endpoints() {
        let mut g = Graph::new();
        let line = Line::new("Line1", Station::new(2), Station::new(3));
        assert!(g.add_edge(line.clone()).unwrap());

        assert_eq!(g.get_node(NodeId(2)), Some(&Station::new(2)));
        assert_eq!(g.get_node(NodeId(3)), Some(&Station::new(3)));
        assert!(g.contains_edge(&line));
        assert_eq!(g.degree(NodeId(2)), Some(1));
        assert_eq!(g.degree(NodeId(3)), Some(1));
        g.debug_assert_invariants();
    }

    #[test]
    fn test_add_edge_between_known_nodes() {
        let mut g = Graph::new();
        g.add_node(Station::new(0)).unwrap();
        g.add_node(Station::new(1)).unwrap();
        assert!(g.add_edge(Line::new("Line1", Station::new(0), Station::new(1))).unwrap());
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        g.debug_assert_invariants();
    }

    #[test]
    fn test_add_edge_with_one_new_endpoint() {
        let mut g = Graph::new();
        g.add_node(Station::new(0)).unwrap();
        assert!(g.add_edge(Line::new("Line1", Station::new(0), Station::new(5))).unwrap());
        assert!(g.contains_node(NodeId(5)));
        assert_eq!(g.node_count(), 2);
        g.debug_assert_invariants();
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut g = Graph::new();
        let line = Line::new("Line1", Station::new(0), Station::new(1));
        assert!(g.add_edge(line.clone()).unwrap());
        assert!(!g.add_edge(line).unwrap());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(NodeId(0)), Some(1));
        assert_eq!(g.degree(NodeId(1)), Some(1));
        g.debug_assert_invariants();
    }

    #[test]
    fn test_parallel_and_reversed_edges_are_distinct() {
        let mut g = Graph::new();
        let (a, b) = (Station::new(0), Station::new(1));
        assert!(g.add_edge(Line::new("Red", a.clone(), b.clone())).unwrap());
        assert!(g.add_edge(Line::new("Blue", a.clone(), b.clone())).unwrap());
        assert!(g.add_edge(Line::new("Red", b, a)).unwrap());
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(NodeId(0)), Some(3));
        g.debug_assert_invariants();
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut g = Graph::new();
        assert!(g.add_edge(Line::new("Loop", Station::new(4), Station::new(4))).unwrap());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.degree(NodeId(4)), Some(1));
        g.debug_assert_invariants();
    }

    #[test]
    fn test_reject_collision_leaves_graph_untouched() {
        let mut g = Graph::new();
        g.add_node(Station::named(1, "Angel")).unwrap();

        let err = g.add_node(Station::named(1, "Archway")).unwrap_err();
        assert!(matches!(err, Error::IdCollision { id: NodeId(1) }));

        let err = g
            .add_edge(Line::new("Northern", Station::new(9), Station::named(1, "Archway")))
            .unwrap_err();
        assert!(matches!(err, Error::IdCollision { id: NodeId(1) }));
        assert!(!g.contains_node(NodeId(9)));
        assert_eq!(g.edge_count(), 0);
        g.debug_assert_invariants();
    }

    #[test]
    fn test_reject_mismatched_self_loop() {
        let mut g = Graph::new();
        let err = g
            .add_edge(Line::new("Loop", Station::named(2, "A"), Station::named(2, "B")))
            .unwrap_err();
        assert!(matches!(err, Error::IdCollision { id: NodeId(2) }));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_merge_keeps_first_registration() {
        let mut g = Graph::with_config(GraphConfig {
            id_collision: IdCollisionPolicy::Merge,
            ..GraphConfig::default()
        });
        g.add_node(Station::named(1, "Angel")).unwrap();
        assert!(!g.add_node(Station::named(1, "Archway")).unwrap());
        let archway = Station::named(1, "Archway");
        assert!(g.add_edge(Line::new("Northern", Station::new(9), archway)).unwrap());

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.get_node(NodeId(1)).and_then(Station::name), Some("Angel"));
        assert_eq!(g.degree(NodeId(1)), Some(1));
        g.debug_assert_invariants();
    }

    #[test]
    fn test_incident_edges() {
        let mut g = Graph::new();
        let red = Line::new("Red", Station::new(0), Station::new(1));
        let blue = Line::new("Blue", Station::new(2), Station::new(0));
        g.add_edge(red.clone()).unwrap();
        g.add_edge(blue.clone()).unwrap();

        let incident: Vec<&Line> = g.incident_edges(NodeId(0)).unwrap().collect();
        assert_eq!(incident, vec![&red, &blue]);

        assert!(matches!(g.incident_edges(NodeId(7)), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut g = Graph::new();
        g.add_edge(Line::new("Red", Station::new(3), Station::new(1))).unwrap();
        g.add_node(Station::new(2)).unwrap();
        let ids: Vec<NodeId> = g.nodes().map(Node::id).collect();
        assert_eq!(ids, vec![NodeId(3), NodeId(1), NodeId(2)]);
        assert_eq!(g.edges().count(), 1);
    }
}

//! Route — the edge sequence returned by a path query, with the stations it visits.

use serde::Serialize;

use super::Edge;

/// A walk through the graph: node -[edge]- node -[edge]- node ...
///
/// Borrows from the graph that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "E: Serialize, E::Node: Serialize"))]
pub struct Route<'g, E: Edge> {
    /// Edges in travel order.
    edges: Vec<&'g E>,
    /// Nodes along the walk, starting with `start`. Always has one more
    /// element than `edges`.
    nodes: Vec<&'g E::Node>,
    #[serde(skip)]
    start: &'g E::Node,
}

/// A maximal run of consecutive edges carrying the same label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "E::Label: Serialize, E::Node: Serialize"))]
pub struct Leg<'g, E: Edge> {
    pub label: &'g E::Label,
    pub from: &'g E::Node,
    pub to: &'g E::Node,
    pub hops: usize,
}

impl<'g, E: Edge> Route<'g, E> {
    /// The zero-hop route that stays at `node`.
    pub(crate) fn stay(node: &'g E::Node) -> Self {
        Self { edges: Vec::new(), nodes: vec![node], start: node }
    }

    /// `stops` are the nodes reached by each edge in turn.
    pub(crate) fn new(start: &'g E::Node, edges: Vec<&'g E>, stops: Vec<&'g E::Node>) -> Self {
        debug_assert_eq!(stops.len(), edges.len());
        let mut nodes = Vec::with_capacity(stops.len() + 1);
        nodes.push(start);
        nodes.extend(stops);
        Self { edges, nodes, start }
    }

    /// Number of edges (hops).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[&'g E] {
        &self.edges
    }

    pub fn nodes(&self) -> &[&'g E::Node] {
        &self.nodes
    }

    pub fn start(&self) -> &'g E::Node {
        self.start
    }

    pub fn end(&self) -> &'g E::Node {
        self.nodes.last().copied().unwrap_or(self.start)
    }

    /// How many times the label changes between consecutive edges.
    pub fn line_changes(&self) -> usize {
        self.edges
            .windows(2)
            .filter(|pair| pair[0].label() != pair[1].label())
            .count()
    }

    pub fn legs(&self) -> Vec<Leg<'g, E>> {
        let mut legs: Vec<Leg<'g, E>> = Vec::new();
        for (i, &edge) in self.edges.iter().enumerate() {
            let to = self.nodes[i + 1];
            match legs.last_mut() {
                Some(leg) if leg.label == edge.label() => {
                    leg.to = to;
                    leg.hops += 1;
                }
                _ => legs.push(Leg {
                    label: edge.label(),
                    from: self.nodes[i],
                    to,
                    hops: 1,
                }),
            }
        }
        legs
    }

    pub fn into_edges(self) -> Vec<&'g E> {
        self.edges
    }
}

//! Edge (line segment) in the transit multigraph.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::{Node, NodeId, Station};

/// Identity of an edge: label plus the ordered endpoint ids.
///
/// Origin/destination order is part of identity even though traversal
/// treats every edge as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey<L> {
    pub label: L,
    pub origin: NodeId,
    pub destination: NodeId,
}

/// Anything the graph can register as a labeled connector between two nodes.
pub trait Edge: Clone + Debug {
    type Node: Node;
    type Label: Clone + Eq + Hash + Debug + Display;

    fn label(&self) -> &Self::Label;
    fn origin(&self) -> &Self::Node;
    fn destination(&self) -> &Self::Node;

    fn key(&self) -> EdgeKey<Self::Label> {
        EdgeKey {
            label: self.label().clone(),
            origin: self.origin().id(),
            destination: self.destination().id(),
        }
    }

    /// The endpoint across from `id`. A self-loop returns the node itself.
    fn opposite(&self, id: NodeId) -> Option<&Self::Node> {
        if self.origin().id() == id {
            Some(self.destination())
        } else if self.destination().id() == id {
            Some(self.origin())
        } else {
            None
        }
    }

    fn is_incident(&self, id: NodeId) -> bool {
        self.origin().id() == id || self.destination().id() == id
    }
}

/// A labeled segment of a transit line between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    label: String,
    origin: Station,
    destination: Station,
}

impl Line {
    pub fn new(label: impl Into<String>, origin: Station, destination: Station) -> Self {
        Self { label: label.into(), origin, destination }
    }
}

impl Edge for Line {
    type Node = Station;
    type Label = String;

    fn label(&self) -> &String {
        &self.label
    }

    fn origin(&self) -> &Station {
        &self.origin
    }

    fn destination(&self) -> &Station {
        &self.destination
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.origin, self.label, self.destination)
    }
}

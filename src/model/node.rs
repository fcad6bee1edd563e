//! Node (station) in the transit multigraph.

use std::fmt;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Integer node identifier.
///
/// Identity in the graph is the id alone. Ids are supplied by the caller and
/// are not guaranteed unique across node values; see `IdCollisionPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// Anything the graph can register as a vertex: a value with a stable id.
///
/// `PartialEq` is the value equality of the implementing type. The graph keys
/// its structures by [`Node::id`] and only uses `PartialEq` to tell a repeated
/// registration apart from an id collision.
pub trait Node: Clone + PartialEq + Debug {
    fn id(&self) -> NodeId;
}

/// A station on the transit network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    id: NodeId,
    name: Option<String>,
}

impl Station {
    pub fn new(id: i64) -> Self {
        Self { id: NodeId(id), name: None }
    }

    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self { id: NodeId(id), name: Some(name.into()) }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Node for Station {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "id = {} ({name})", self.id),
            None => write!(f, "id = {}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_name_roundtrip() {
        let mut s = Station::new(7);
        assert_eq!(s.name(), None);
        s.set_name("Bank");
        assert_eq!(s.name(), Some("Bank"));
        assert_eq!(s.id(), NodeId(7));
    }

    #[test]
    fn test_value_equality_includes_name() {
        assert_eq!(Station::new(1), Station::new(1));
        assert_ne!(Station::named(1, "A"), Station::named(1, "B"));
        assert_eq!(Station::named(1, "A").id(), Station::named(1, "B").id());
    }

    #[test]
    fn test_display() {
        assert_eq!(Station::new(3).to_string(), "id = 3");
        assert_eq!(Station::named(3, "Oval").to_string(), "id = 3 (Oval)");
    }
}

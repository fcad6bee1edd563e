//! # Multigraph Contract
//!
//! `MultiGraph` is the contract between transit callers and the graph.
//! Callers build `Station`/`Line` values (or their own `Node`/`Edge`
//! types), feed them through `add_node`/`add_edge` in whatever order their
//! data source provides, and interpret the three-way `PathResult`.
//!
//! ## Implementations
//!
//! | Type | Module | Description |
//! |------|--------|-------------|
//! | `Graph` | `memory` | Arena-backed, single owner |
//! | `SharedGraph` | `shared` | `Graph` behind an `RwLock` for shared handles |

pub mod memory;
pub mod search;
pub mod shared;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{Edge, NodeId, Route};
use crate::Result;

pub use memory::Graph;
pub use shared::{OwnedPathResult, SharedGraph};

/// The node type carried by an edge type.
pub type NodeOf<E> = <E as Edge>::Node;

// ============================================================================
// Configuration
// ============================================================================

/// What to do when a node arrives whose id is already held by a
/// registered node that is not value-equal to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdCollisionPolicy {
    /// Fail with `Error::IdCollision` before touching the graph.
    #[default]
    Reject,
    /// Treat the incoming node as the registered one. First registration wins.
    Merge,
}

/// Graph construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub id_collision: IdCollisionPolicy,
    /// Prefer continuing on the same line when two edges reach a node at
    /// the same depth. When off, every revisit is recorded as a cross edge.
    pub line_continuation: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            id_collision: IdCollisionPolicy::Reject,
            line_continuation: true,
        }
    }
}

// ============================================================================
// Path result
// ============================================================================

/// Outcome of a path query.
#[derive(Debug, Clone)]
pub enum PathResult<'g, E: Edge> {
    /// The start and/or destination is not registered.
    Unreachable { missing: SmallVec<[NodeId; 2]> },
    /// Both endpoints are registered but no walk connects them.
    NoRoute,
    /// A fewest-hop route. Empty when start equals destination.
    Route(Route<'g, E>),
}

impl<'g, E: Edge> PathResult<'g, E> {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, PathResult::Unreachable { .. })
    }

    pub fn is_no_route(&self) -> bool {
        matches!(self, PathResult::NoRoute)
    }

    pub fn route(&self) -> Option<&Route<'g, E>> {
        match self {
            PathResult::Route(route) => Some(route),
            _ => None,
        }
    }

    /// Absent / empty / populated view of the result: `None` when an
    /// endpoint is unknown, an empty vector when there is no route (or
    /// start equals destination), the edges otherwise.
    pub fn edges(&self) -> Option<Vec<&'g E>> {
        match self {
            PathResult::Unreachable { .. } => None,
            PathResult::NoRoute => Some(Vec::new()),
            PathResult::Route(route) => Some(route.edges().to_vec()),
        }
    }

    /// Detach the result from the graph by cloning the route's edges.
    pub fn into_owned(self) -> OwnedPathResult<E> {
        match self {
            PathResult::Unreachable { missing } => OwnedPathResult::Unreachable { missing },
            PathResult::NoRoute => OwnedPathResult::NoRoute,
            PathResult::Route(route) => {
                OwnedPathResult::Route(route.into_edges().into_iter().cloned().collect())
            }
        }
    }
}

// ============================================================================
// MultiGraph Trait
// ============================================================================

/// The labeled multigraph contract.
pub trait MultiGraph {
    type Edge: Edge;

    /// Register a node. `Ok(false)` if a node with its id already exists.
    fn add_node(&mut self, node: NodeOf<Self::Edge>) -> Result<bool>;

    /// Register an edge and any endpoints not yet known.
    /// `Ok(false)` if an edge with the same label and endpoints exists.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool>;

    fn get_node(&self, id: NodeId) -> Option<&NodeOf<Self::Edge>>;

    fn find_path(
        &self,
        start: &NodeOf<Self::Edge>,
        destination: &NodeOf<Self::Edge>,
    ) -> PathResult<'_, Self::Edge>;
}

//! # transit-multigraph — Labeled Multigraph for Transit Networks
//!
//! Stations connected by labeled lines, where any number of parallel edges
//! (same or different labels) may join the same pair of stations. Path
//! queries return a fewest-hop route and, among equally short candidates met
//! during the search, prefer staying on the same line.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Node` and `Edge` are capability sets; `MultiGraph` is the graph contract
//! 2. **Identity is the id**: nodes are keyed by `NodeId`, edges by label + endpoint ids
//! 3. **Arena slots inside**: registered nodes and edges get dense slots; search state is per call
//! 4. **Three-way results**: unknown endpoint, no route, and route are distinct `PathResult`s
//!
//! ## Quick Start
//!
//! ```rust
//! use transit_multigraph::{Graph, Line, Station, PathResult};
//!
//! # fn example() -> transit_multigraph::Result<()> {
//! let (a, b, c) = (Station::named(0, "Angel"), Station::new(1), Station::new(2));
//!
//! let mut graph = Graph::new();
//! graph.add_edge(Line::new("Northern", a.clone(), b.clone()))?;
//! graph.add_edge(Line::new("Northern", b.clone(), c.clone()))?;
//!
//! match graph.find_path(&a, &c) {
//!     PathResult::Route(route) => assert_eq!(route.len(), 2),
//!     other => panic!("unexpected {other:?}"),
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Node, NodeId, Station,
    Edge, EdgeKey, Line,
    Route, Leg,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{
    MultiGraph, Graph, SharedGraph,
    PathResult, OwnedPathResult,
    GraphConfig, IdCollisionPolicy,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Id collision: node {id} is already registered with a different value")]
    IdCollision { id: NodeId },

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

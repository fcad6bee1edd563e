//! # Transit Graph Model
//!
//! The capability traits the graph is generic over, and the concrete
//! station/line types transit callers use.
//!
//! Design rule: this module is pure data. No adjacency, no search state.

pub mod node;
pub mod edge;
pub mod route;

pub use node::{Node, NodeId, Station};
pub use edge::{Edge, EdgeKey, Line};
pub use route::{Leg, Route};

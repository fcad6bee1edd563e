//! Shared graph handle.
//!
//! `Graph` needs `&mut self` to register and assumes nobody mutates it while
//! a query runs. `SharedGraph` gives that guarantee to cloned handles: writes
//! take the write lock, queries hold the read lock for their whole duration.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use smallvec::SmallVec;

use crate::model::{Edge, NodeId};
use crate::Result;
use super::{Graph, GraphConfig};

/// A path result detached from the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedPathResult<E> {
    Unreachable { missing: SmallVec<[NodeId; 2]> },
    NoRoute,
    Route(Vec<E>),
}

impl<E> OwnedPathResult<E> {
    /// Absent / empty / populated view, as `PathResult::edges`.
    pub fn edges(&self) -> Option<&[E]> {
        match self {
            OwnedPathResult::Unreachable { .. } => None,
            OwnedPathResult::NoRoute => Some(&[]),
            OwnedPathResult::Route(edges) => Some(edges),
        }
    }
}

/// Cloneable handle to a graph behind a `RwLock`.
pub struct SharedGraph<E: Edge> {
    inner: Arc<RwLock<Graph<E>>>,
}

impl<E: Edge> Clone for SharedGraph<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E: Edge> Default for SharedGraph<E> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl<E: Edge> From<Graph<E>> for SharedGraph<E> {
    fn from(graph: Graph<E>) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }
}

impl<E: Edge> SharedGraph<E> {
    pub fn new(config: GraphConfig) -> Self {
        Graph::with_config(config).into()
    }

    pub fn add_node(&self, node: E::Node) -> Result<bool> {
        self.inner.write().add_node(node)
    }

    pub fn add_edge(&self, edge: E) -> Result<bool> {
        self.inner.write().add_edge(edge)
    }

    pub fn get_node(&self, id: NodeId) -> Option<E::Node> {
        self.inner.read().get_node(id).cloned()
    }

    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().edge_count()
    }

    pub fn find_path_owned(&self, start: &E::Node, destination: &E::Node) -> OwnedPathResult<E> {
        self.inner.read().find_path(start, destination).into_owned()
    }

    /// Hold the read lock across several queries.
    pub fn read(&self) -> RwLockReadGuard<'_, Graph<E>> {
        self.inner.read()
    }
}

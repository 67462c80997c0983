//! Node identity and role types.

use std::hash::{Hash, Hasher};

/// Identifier of a node within a problem instance.
///
/// Ids are dense: an instance with `n` nodes uses exactly the ids `0..n`,
/// with id 0 reserved for the depot.
pub type NodeId = usize;

/// Whether a node is the depot or a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The unique start/end node of every route, id 0, zero demand.
    Depot,
    /// A delivery node with non-negative demand, visited exactly once.
    Store,
}

/// A node in a routing instance: the depot or a store with a demand.
///
/// Equality and hashing are by id alone — two `Node` values with the same id
/// are interchangeable regardless of how they were obtained.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::{Node, NodeRole};
///
/// let depot = Node::depot();
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.role(), NodeRole::Depot);
/// assert_eq!(depot.demand(), 0.0);
///
/// let store = Node::store(3, 12.5).unwrap();
/// assert_eq!(store.id(), 3);
/// assert!(store.is_store());
/// assert_eq!(store.demand(), 12.5);
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    role: NodeRole,
    demand: f64,
}

impl Node {
    /// Creates the depot node (id 0, zero demand).
    pub fn depot() -> Self {
        Self {
            id: 0,
            role: NodeRole::Depot,
            demand: 0.0,
        }
    }

    /// Creates a store node with the given id and demand.
    ///
    /// Returns `None` if `id` is 0 (reserved for the depot) or if the demand
    /// is negative or non-finite.
    pub fn store(id: NodeId, demand: f64) -> Option<Self> {
        if id == 0 || !demand.is_finite() || demand < 0.0 {
            return None;
        }
        Some(Self {
            id,
            role: NodeRole::Store,
            demand,
        })
    }

    /// Node id (0 = depot).
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Role of this node.
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// Returns `true` if this node is the depot.
    pub fn is_depot(&self) -> bool {
        self.role == NodeRole::Depot
    }

    /// Returns `true` if this node is a store.
    pub fn is_store(&self) -> bool {
        self.role == NodeRole::Store
    }

    /// Demand of this node (zero for the depot).
    pub fn demand(&self) -> f64 {
        self.demand
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//! Problem instance: nodes, distance table, vehicle capacity.

use std::error::Error;
use std::fmt;

use crate::distance::DistanceMatrix;

use super::{Node, NodeId};

/// A configuration error detected while building a [`ProblemInstance`].
///
/// Construction fails fast on malformed input; the search never has to
/// tolerate a broken instance.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// Vehicle capacity is not a positive finite number.
    InvalidCapacity(f64),
    /// No depot node (id 0) is present.
    NoDepot,
    /// The same node id appears more than once.
    DuplicateNode(NodeId),
    /// A node id falls outside the dense range `0..n`.
    IdOutOfRange {
        /// The offending id.
        id: NodeId,
        /// Number of nodes in the instance.
        count: usize,
    },
    /// The distance table does not cover exactly the instance's node pairs.
    DistanceTableSize {
        /// Required table dimension (number of nodes).
        expected: usize,
        /// Actual table dimension.
        actual: usize,
    },
    /// A distance entry is negative or non-finite.
    InvalidDistance {
        /// Source node id.
        from: NodeId,
        /// Target node id.
        to: NodeId,
        /// The offending value.
        value: f64,
    },
    /// A same-node distance is not zero.
    NonZeroDiagonal(NodeId),
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity(c) => write!(f, "vehicle capacity must be positive, got {c}"),
            Self::NoDepot => write!(f, "instance has no depot node"),
            Self::DuplicateNode(id) => write!(f, "duplicate node id {id}"),
            Self::IdOutOfRange { id, count } => {
                write!(f, "node id {id} outside dense range 0..{count}")
            }
            Self::DistanceTableSize { expected, actual } => {
                write!(f, "distance table is {actual}x{actual}, expected {expected}x{expected}")
            }
            Self::InvalidDistance { from, to, value } => {
                write!(f, "invalid distance {value} from node {from} to node {to}")
            }
            Self::NonZeroDiagonal(id) => {
                write!(f, "distance from node {id} to itself must be zero")
            }
        }
    }
}

impl Error for InstanceError {}

/// A feasibility violation found in a route.
///
/// [`ProblemInstance::check_route`] reports the first violation encountered;
/// a route with no violation is feasible.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// The route contains no nodes.
    EmptyRoute,
    /// The route does not begin at the depot.
    StartNotAtDepot,
    /// The route does not end at the depot.
    EndNotAtDepot,
    /// A store is visited more than once.
    RepeatedStore(NodeId),
    /// A trip's cumulative load exceeds the vehicle capacity.
    CapacityExceeded {
        /// Load at the point of violation.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// A store is never visited.
    MissingStore(NodeId),
}

/// An immutable single-vehicle CVRP instance.
///
/// Owns the node list (depot at id 0, stores at ids `1..n`), a dense and
/// possibly asymmetric distance table, and the vehicle capacity. Built once
/// and shared by reference across any number of solvers.
///
/// # Examples
///
/// ```
/// use cvrp_search::distance::DistanceMatrix;
/// use cvrp_search::models::{Node, ProblemInstance};
///
/// let nodes = vec![
///     Node::depot(),
///     Node::store(1, 3.0).unwrap(),
///     Node::store(2, 4.0).unwrap(),
/// ];
/// let mut dm = DistanceMatrix::new(3);
/// dm.set(0, 1, 5.0);
/// dm.set(1, 0, 5.0);
/// dm.set(0, 2, 6.0);
/// dm.set(2, 0, 6.0);
/// dm.set(1, 2, 2.0);
/// dm.set(2, 1, 2.0);
///
/// let instance = ProblemInstance::new(nodes, dm, 10.0).unwrap();
/// assert_eq!(instance.num_stores(), 2);
/// assert!(instance.is_feasible(&[0, 1, 2, 0]));
/// assert_eq!(instance.objective(&[0, 1, 2, 0]), 13.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    nodes: Vec<Node>,
    distances: DistanceMatrix,
    capacity: f64,
}

impl ProblemInstance {
    /// Builds an instance, validating every configuration invariant.
    ///
    /// Node ids must form the dense range `0..n` (node order in the list is
    /// free), exactly one depot must be present, the distance table must be
    /// n×n with finite non-negative entries and a zero diagonal, and the
    /// capacity must be positive.
    pub fn new(
        nodes: Vec<Node>,
        distances: DistanceMatrix,
        capacity: f64,
    ) -> Result<Self, InstanceError> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(InstanceError::InvalidCapacity(capacity));
        }

        let n = nodes.len();
        let depots = nodes.iter().filter(|node| node.is_depot()).count();
        if depots == 0 {
            return Err(InstanceError::NoDepot);
        }
        if depots > 1 {
            return Err(InstanceError::DuplicateNode(0));
        }

        let mut seen = vec![false; n];
        for node in &nodes {
            let id = node.id();
            if id >= n {
                return Err(InstanceError::IdOutOfRange { id, count: n });
            }
            if seen[id] {
                return Err(InstanceError::DuplicateNode(id));
            }
            seen[id] = true;
        }

        if distances.size() != n {
            return Err(InstanceError::DistanceTableSize {
                expected: n,
                actual: distances.size(),
            });
        }
        for from in 0..n {
            for to in 0..n {
                let value = distances.get(from, to);
                if !value.is_finite() || value < 0.0 {
                    return Err(InstanceError::InvalidDistance { from, to, value });
                }
                if from == to && value != 0.0 {
                    return Err(InstanceError::NonZeroDiagonal(from));
                }
            }
        }

        // Index nodes by id so lookups are O(1).
        let mut by_id: Vec<Option<Node>> = vec![None; n];
        for node in nodes {
            let id = node.id();
            by_id[id] = Some(node);
        }
        let nodes = by_id
            .into_iter()
            .map(|node| node.expect("dense ids checked above"))
            .collect();

        Ok(Self {
            nodes,
            distances,
            capacity,
        })
    }

    /// Returns the cost of travelling from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is unknown — an unknown id is a programmer error,
    /// not a runtime condition.
    pub fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        assert!(from < self.nodes.len(), "unknown node id {from}");
        assert!(to < self.nodes.len(), "unknown node id {to}");
        self.distances.get(from, to)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id is unknown.
    pub fn node(&self, id: NodeId) -> &Node {
        assert!(id < self.nodes.len(), "unknown node id {id}");
        &self.nodes[id]
    }

    /// All nodes, indexed by id (depot first).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The unique depot node.
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// The store nodes, in id order.
    pub fn stores(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_store())
    }

    /// Vehicle load capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Total number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of store nodes.
    pub fn num_stores(&self) -> usize {
        self.nodes.len() - 1
    }

    /// The full distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Checks a route against every feasibility rule, returning the first
    /// violation found.
    ///
    /// A feasible route starts and ends at the depot, visits every store
    /// exactly once, and never exceeds the capacity within a trip (the load
    /// resets to zero at each depot visit).
    ///
    /// # Panics
    ///
    /// Panics if the route references an unknown node id.
    pub fn check_route(&self, route: &[NodeId]) -> Option<Violation> {
        let first = match route.first() {
            Some(&id) => id,
            None => return Some(Violation::EmptyRoute),
        };
        if !self.node(first).is_depot() {
            return Some(Violation::StartNotAtDepot);
        }
        let last = *route.last().expect("non-empty checked above");
        if !self.node(last).is_depot() {
            return Some(Violation::EndNotAtDepot);
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut load = 0.0;
        for &id in route {
            let node = self.node(id);
            if node.is_depot() {
                load = 0.0;
                continue;
            }
            if visited[id] {
                return Some(Violation::RepeatedStore(id));
            }
            visited[id] = true;
            load += node.demand();
            if load > self.capacity {
                return Some(Violation::CapacityExceeded {
                    load,
                    capacity: self.capacity,
                });
            }
        }

        for store in self.stores() {
            if !visited[store.id()] {
                return Some(Violation::MissingStore(store.id()));
            }
        }

        None
    }

    /// Returns `true` if the route satisfies every feasibility rule.
    pub fn is_feasible(&self, route: &[NodeId]) -> bool {
        self.check_route(route).is_none()
    }

    /// Total travel distance of a route: the sum of the costs of consecutive
    /// pairs. Zero for a single-node route.
    ///
    /// # Panics
    ///
    /// Panics if the route references an unknown node id.
    pub fn objective(&self, route: &[NodeId]) -> f64 {
        route
            .windows(2)
            .map(|pair| self.distance(pair[0], pair[1]))
            .sum()
    }
}

//! Domain model types for the single-vehicle routing problem.
//!
//! Provides the core abstractions: nodes (one depot, stores with demands),
//! an immutable problem instance with a dense asymmetric distance table and
//! a vehicle capacity, and the solution type returned by solvers.

mod instance;
mod node;
mod solution;

pub use instance::{InstanceError, ProblemInstance, Violation};
pub use node::{Node, NodeId, NodeRole};
pub use solution::Solution;

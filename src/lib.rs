//! # cvrp-search
//!
//! Branch-and-bound route search for the single-vehicle capacitated routing
//! problem: one vehicle delivers to every store from a single depot,
//! returning to the depot whenever the next delivery would overflow its
//! capacity. Three interchangeable strategies — depth-first, uniform-cost,
//! and informed best-first — explore the space of partial routes with
//! pruning and memoization.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, ProblemInstance, Solution)
//! - [`distance`] — Dense asymmetric distance table
//! - [`search`] — The branch-and-bound engine, priority frontier, and
//!   lower-bound estimator
//! - [`constructive`] — Randomized constructive baseline solver
//! - [`generator`] — Reproducible random instance generation
//! - [`persistence`] — JSON save/load of problem instances

pub mod constructive;
pub mod distance;
pub mod generator;
pub mod models;
pub mod persistence;
pub mod search;

//! Branch-and-bound route search.
//!
//! - [`SearchEngine`] — the shared expansion loop behind the three
//!   strategies (depth-first, uniform-cost, best-first)
//! - [`PriorityFrontier`] — ordered work-list driving the cost-ordered
//!   strategies
//! - [`shortest_path_bound`] — remaining-cost estimate for the best-first
//!   strategy

mod bound;
mod engine;
mod frontier;
mod state;

pub use bound::shortest_path_bound;
pub use engine::{SearchConfig, SearchEngine, SearchError, SearchOutcome, Strategy};
pub use frontier::PriorityFrontier;

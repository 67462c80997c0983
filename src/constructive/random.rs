//! Randomized constructive solver.
//!
//! Builds a feasible route with no search and no pruning: repeatedly visits
//! a uniformly random unvisited store, returning to the depot first whenever
//! the pick would overflow the current trip. Solution quality is whatever
//! the dice decide — this is a baseline and a quick feasibility witness, not
//! an optimizer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{NodeId, ProblemInstance, Solution};
use crate::search::SearchError;

/// Constructs a random feasible route.
///
/// Deterministic for a fixed `seed`; seeded from the OS otherwise. Returns
/// [`SearchError::Infeasible`] if some store's demand exceeds the vehicle
/// capacity, since no route can ever deliver it.
///
/// # Examples
///
/// ```
/// use cvrp_search::constructive::random_route;
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
/// let instance = ProblemInstance::new(nodes, dm, 10.0).unwrap();
///
/// let solution = random_route(&instance, Some(42)).unwrap();
/// assert!(instance.is_feasible(solution.route()));
/// ```
pub fn random_route(
    instance: &ProblemInstance,
    seed: Option<u64>,
) -> Result<Solution, SearchError> {
    if instance.stores().any(|s| s.demand() > instance.capacity()) {
        return Err(SearchError::Infeasible);
    }

    let depot = instance.depot().id();
    if instance.num_stores() == 0 {
        return Ok(Solution::new(vec![depot], 0.0));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut candidates: Vec<NodeId> = instance.stores().map(|s| s.id()).collect();
    let mut route = vec![depot];
    let mut load = 0.0;

    while !candidates.is_empty() {
        let pick = candidates.swap_remove(rng.random_range(0..candidates.len()));
        let demand = instance.node(pick).demand();
        if load + demand > instance.capacity() {
            route.push(depot);
            load = 0.0;
        }
        route.push(pick);
        load += demand;
    }
    route.push(depot);

    debug_assert!(instance.is_feasible(&route));
    let objective = instance.objective(&route);
    Ok(Solution::new(route, objective))
}

//! Shortest-path lower-bound estimator.
//!
//! Supplies the heuristic term `h` for the informed strategy: an estimate of
//! the travel cost still required to service every unvisited store.
//!
//! The estimate sums, over every remaining store, the shortest-path distance
//! from the current node within the induced subgraph — independent
//! point-to-point distances, not one tour. Summing per-store distances can
//! exceed the cheapest completion, so this is **not** a proven admissible
//! bound for the round-trip/capacity structure: pruning against it may in
//! principle cut off the true optimum. The depth-first and uniform-cost
//! strategies never consult it and remain exact.

use crate::models::{NodeId, ProblemInstance};

use super::frontier::PriorityFrontier;

/// Lower-bound estimate of the cost to reach every node of `remaining` from
/// `from`, as the sum of single-source shortest-path distances over the
/// induced node set `remaining ∪ {from}`.
///
/// Runs a Dijkstra-style relaxation: a frontier of `(node, tentative cost)`
/// pairs, relaxing every edge into the induced set and keeping the minimum
/// tentative cost per node. O(k²) for k = `remaining.len() + 1`.
///
/// Returns 0 when `remaining` is empty.
///
/// # Panics
///
/// Panics if `from` or any id in `remaining` is unknown to the instance.
pub fn shortest_path_bound(
    instance: &ProblemInstance,
    from: NodeId,
    remaining: &[NodeId],
) -> f64 {
    if remaining.is_empty() {
        return 0.0;
    }

    let mut best = vec![f64::INFINITY; instance.num_nodes()];
    best[from] = 0.0;

    let mut frontier = PriorityFrontier::new();
    frontier.enqueue((from, 0.0), 0.0);

    while let Some((node, cost)) = frontier.dequeue() {
        if cost > best[node] {
            continue; // stale entry, already relaxed cheaper
        }
        for &next in remaining {
            if next == node {
                continue;
            }
            let relaxed = cost + instance.distance(node, next);
            if relaxed < best[next] {
                best[next] = relaxed;
                frontier.enqueue((next, relaxed), relaxed);
            }
        }
    }

    remaining.iter().map(|&id| best[id]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Node;

    fn instance_with(distances: &[(NodeId, NodeId, f64)], stores: &[(NodeId, f64)]) -> ProblemInstance {
        let mut nodes = vec![Node::depot()];
        for &(id, demand) in stores {
            nodes.push(Node::store(id, demand).expect("valid store"));
        }
        let mut dm = DistanceMatrix::new(nodes.len());
        for &(from, to, d) in distances {
            dm.set(from, to, d);
        }
        ProblemInstance::new(nodes, dm, 100.0).expect("valid instance")
    }

    #[test]
    fn test_empty_remaining() {
        let instance = instance_with(&[(0, 1, 5.0), (1, 0, 5.0)], &[(1, 1.0)]);
        assert_eq!(shortest_path_bound(&instance, 0, &[]), 0.0);
    }

    #[test]
    fn test_direct_distances() {
        let instance = instance_with(
            &[
                (0, 1, 5.0),
                (1, 0, 5.0),
                (0, 2, 6.0),
                (2, 0, 6.0),
                (1, 2, 2.0),
                (2, 1, 2.0),
            ],
            &[(1, 1.0), (2, 1.0)],
        );
        // 0→1 direct is 5; 0→2 direct is 6 (via 1 would be 7).
        assert_eq!(shortest_path_bound(&instance, 0, &[1, 2]), 11.0);
    }

    #[test]
    fn test_relaxation_through_intermediate() {
        let instance = instance_with(
            &[
                (0, 1, 1.0),
                (1, 0, 1.0),
                (0, 2, 10.0),
                (2, 0, 10.0),
                (1, 2, 1.0),
                (2, 1, 1.0),
            ],
            &[(1, 1.0), (2, 1.0)],
        );
        // 0→2 direct is 10, but 0→1→2 costs 2.
        assert_eq!(shortest_path_bound(&instance, 0, &[1, 2]), 3.0);
    }

    #[test]
    fn test_excluded_nodes_not_used_as_intermediates() {
        let instance = instance_with(
            &[
                (0, 1, 1.0),
                (1, 0, 1.0),
                (0, 2, 10.0),
                (2, 0, 10.0),
                (1, 2, 1.0),
                (2, 1, 1.0),
            ],
            &[(1, 1.0), (2, 1.0)],
        );
        // With store 1 already visited, the path 0→1→2 is not available.
        assert_eq!(shortest_path_bound(&instance, 0, &[2]), 10.0);
    }

    #[test]
    fn test_asymmetric_distances() {
        let instance = instance_with(&[(0, 1, 3.0), (1, 0, 8.0)], &[(1, 1.0)]);
        assert_eq!(shortest_path_bound(&instance, 0, &[1]), 3.0);
        assert_eq!(shortest_path_bound(&instance, 1, &[]), 0.0);
    }

    #[test]
    fn test_from_store_node() {
        let instance = instance_with(
            &[
                (0, 1, 5.0),
                (1, 0, 5.0),
                (0, 2, 6.0),
                (2, 0, 6.0),
                (1, 2, 2.0),
                (2, 1, 2.0),
            ],
            &[(1, 1.0), (2, 1.0)],
        );
        assert_eq!(shortest_path_bound(&instance, 1, &[2]), 2.0);
    }
}

//! Search state shared by all strategies.

use crate::models::NodeId;

/// Fixed-width bitset over node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeSet {
    bits: Box<[u64]>,
    len: usize,
}

impl NodeSet {
    /// Creates an empty set able to hold ids in `0..capacity`.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            bits: vec![0; capacity.div_ceil(64)].into_boxed_slice(),
            len: 0,
        }
    }

    /// Inserts an id; returns `true` if it was not already present.
    pub(crate) fn insert(&mut self, id: NodeId) -> bool {
        let (block, mask) = (id / 64, 1u64 << (id % 64));
        if self.bits[block] & mask != 0 {
            return false;
        }
        self.bits[block] |= mask;
        self.len += 1;
        true
    }

    /// Returns `true` if the id is present.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.bits[id / 64] & (1u64 << (id % 64)) != 0
    }

    /// Number of ids in the set.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

/// A partial route under expansion: the node sequence so far, its true
/// accumulated travel cost `g`, the load of the current trip, and the set of
/// stores already visited.
///
/// One record serves every strategy; heuristic terms only ever influence the
/// frontier priority, never the stored cost.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) route: Vec<NodeId>,
    pub(crate) cost: f64,
    pub(crate) load: f64,
    pub(crate) visited: NodeSet,
}

impl SearchState {
    /// The initial state: at the depot, nothing travelled, nothing loaded.
    pub(crate) fn initial(depot: NodeId, num_nodes: usize) -> Self {
        Self {
            route: vec![depot],
            cost: 0.0,
            load: 0.0,
            visited: NodeSet::new(num_nodes),
        }
    }

    /// The node the route currently ends at.
    pub(crate) fn last(&self) -> NodeId {
        *self.route.last().expect("route is never empty")
    }

    /// A new state extending this route by one node.
    ///
    /// `new_load` is the trip load after the move (zero when `to` is the
    /// depot); `visit_store` marks `to` as a visited store.
    pub(crate) fn extend(&self, to: NodeId, leg_cost: f64, new_load: f64, visit_store: bool) -> Self {
        let mut route = Vec::with_capacity(self.route.len() + 1);
        route.extend_from_slice(&self.route);
        route.push(to);
        let mut visited = self.visited.clone();
        if visit_store {
            visited.insert(to);
        }
        Self {
            route,
            cost: self.cost + leg_cost,
            load: new_load,
            visited,
        }
    }

    /// The memoization signature of this state.
    pub(crate) fn memo_key(&self) -> MemoKey {
        MemoKey {
            visited: self.visited.clone(),
            last: self.last(),
            load_bits: self.load.to_bits(),
        }
    }
}

/// Signature under which partial routes dominate one another: the visited
/// store set, the current node, and the exact trip load. Two states sharing
/// a signature face the identical residual problem, so only the cheaper
/// accumulated cost needs expanding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
    visited: NodeSet,
    last: NodeId,
    load_bits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_set_insert_contains() {
        let mut set = NodeSet::new(100);
        assert!(!set.contains(70));
        assert!(set.insert(70));
        assert!(set.contains(70));
        assert!(!set.insert(70));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_node_set_spans_blocks() {
        let mut set = NodeSet::new(130);
        set.insert(0);
        set.insert(63);
        set.insert(64);
        set.insert(129);
        assert_eq!(set.len(), 4);
        assert!(set.contains(129));
        assert!(!set.contains(128));
    }

    #[test]
    fn test_initial_state() {
        let state = SearchState::initial(0, 4);
        assert_eq!(state.route, vec![0]);
        assert_eq!(state.cost, 0.0);
        assert_eq!(state.load, 0.0);
        assert_eq!(state.last(), 0);
        assert_eq!(state.visited.len(), 0);
    }

    #[test]
    fn test_extend_store() {
        let state = SearchState::initial(0, 4);
        let next = state.extend(2, 6.0, 4.0, true);
        assert_eq!(next.route, vec![0, 2]);
        assert_eq!(next.cost, 6.0);
        assert_eq!(next.load, 4.0);
        assert!(next.visited.contains(2));
        // Parent state untouched.
        assert_eq!(state.route, vec![0]);
        assert!(!state.visited.contains(2));
    }

    #[test]
    fn test_extend_depot_resets_load() {
        let state = SearchState::initial(0, 4).extend(1, 5.0, 3.0, true);
        let back = state.extend(0, 5.0, 0.0, false);
        assert_eq!(back.route, vec![0, 1, 0]);
        assert_eq!(back.cost, 10.0);
        assert_eq!(back.load, 0.0);
        assert_eq!(back.visited.len(), 1);
    }

    #[test]
    fn test_memo_key_distinguishes_last_node() {
        // Same visited set and load through different current nodes.
        let a = SearchState::initial(0, 4)
            .extend(1, 5.0, 3.0, true)
            .extend(2, 2.0, 7.0, true);
        let b = SearchState::initial(0, 4)
            .extend(2, 6.0, 4.0, true)
            .extend(1, 2.0, 7.0, true);
        assert_ne!(a.memo_key(), b.memo_key());
        assert_eq!(a.memo_key(), a.clone().memo_key());
    }

    #[test]
    fn test_memo_key_distinguishes_load() {
        let base = SearchState::initial(0, 4).extend(1, 5.0, 3.0, true);
        let reset = SearchState::initial(0, 4)
            .extend(1, 5.0, 3.0, true)
            .extend(0, 5.0, 0.0, false)
            .extend(2, 6.0, 4.0, true);
        let direct = SearchState::initial(0, 4)
            .extend(1, 5.0, 3.0, true)
            .extend(2, 2.0, 7.0, true);
        assert_ne!(base.memo_key(), direct.memo_key());
        assert_ne!(reset.memo_key(), direct.memo_key());
    }
}

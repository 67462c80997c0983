//! Branch-and-bound search engine.
//!
//! One expansion loop serves all three strategies; they differ only in how
//! the next partial route is chosen. Depth-first runs on an explicit LIFO
//! stack, uniform-cost and best-first on a [`PriorityFrontier`] keyed by the
//! accumulated cost `g`, respectively `g` plus the shortest-path estimate of
//! the remaining cost.
//!
//! Every expansion applies, in order: domination check against the memo
//! table, pruning against the cheapest edge that any completion must still
//! traverse, completion of routes that have visited every store, and branch
//! generation under the capacity and visit-once rules.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::models::{NodeId, ProblemInstance, Solution};

use super::bound::shortest_path_bound;
use super::frontier::PriorityFrontier;
use super::state::{MemoKey, SearchState};

/// Exploration order of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// LIFO backtracking on an explicit stack; no ordering heuristic.
    DepthFirst,
    /// Globally cheapest partial route first (priority = accumulated cost).
    UniformCost,
    /// Accumulated cost plus the shortest-path estimate of the remaining
    /// cost. The estimate is not a proven admissible bound, so this strategy
    /// trades the exactness guarantee for fewer expansions; see
    /// [`shortest_path_bound`].
    BestFirst,
}

impl Strategy {
    /// All strategies, in the order the driver reports them.
    pub const ALL: [Strategy; 3] = [Strategy::DepthFirst, Strategy::UniformCost, Strategy::BestFirst];

    /// Human-readable strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DepthFirst => "depth-first",
            Strategy::UniformCost => "uniform-cost",
            Strategy::BestFirst => "best-first",
        }
    }
}

/// Optional limits and switches for a search run.
///
/// The defaults run an unbounded search with memoization on.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Discard partial routes dominated by a cheaper route with the same
    /// (visited set, current node, trip load) signature. Disabling this only
    /// affects running time, never the objective found.
    pub memoization: bool,
    /// Stop after this many node expansions.
    pub max_iterations: Option<u64>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            memoization: true,
            max_iterations: None,
            time_limit: None,
        }
    }
}

/// Why a search returned no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// No feasible route exists: a store's demand exceeds the vehicle
    /// capacity, or the exhausted search space contains no complete
    /// feasible route.
    Infeasible,
    /// A configured limit stopped the search before any feasible route was
    /// found. The instance may still be solvable.
    LimitReached,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible => write!(f, "no feasible route exists for this instance"),
            Self::LimitReached => {
                write!(f, "search limit reached before any feasible route was found")
            }
        }
    }
}

impl Error for SearchError {}

/// Result of a completed search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The best complete feasible route found.
    pub solution: Solution,
    /// Number of node expansions performed (diagnostic).
    pub iterations: u64,
    /// `true` if the search space was exhausted; `false` if a configured
    /// limit stopped the run early, in which case the solution is the best
    /// found so far rather than a proven optimum.
    pub complete: bool,
}

/// Branch-and-bound solver for a single-vehicle capacitated routing
/// instance.
///
/// An engine is cheap to construct and holds no state between runs: every
/// [`solve`](SearchEngine::solve) call owns its own frontier, memo table,
/// and incumbent, so independent engines may solve the same shared instance
/// concurrently.
///
/// # Examples
///
/// ```
/// use cvrp_search::distance::DistanceMatrix;
/// use cvrp_search::models::{Node, ProblemInstance};
/// use cvrp_search::search::{SearchEngine, Strategy};
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
/// let outcome = SearchEngine::new(Strategy::UniformCost)
///     .solve(&instance)
///     .unwrap();
/// assert_eq!(outcome.solution.objective(), 13.0);
/// assert!(outcome.complete);
/// ```
#[derive(Debug, Clone)]
pub struct SearchEngine {
    strategy: Strategy,
    config: SearchConfig,
}

impl SearchEngine {
    /// Creates an engine with the default configuration.
    pub fn new(strategy: Strategy) -> Self {
        Self::with_config(strategy, SearchConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(strategy: Strategy, config: SearchConfig) -> Self {
        Self { strategy, config }
    }

    /// The strategy this engine expands with.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Searches for a minimum-distance complete feasible route.
    ///
    /// Returns [`SearchError::Infeasible`] when no feasible route exists —
    /// the depot-only incumbent placeholder is never reported as a solution.
    pub fn solve(&self, instance: &ProblemInstance) -> Result<SearchOutcome, SearchError> {
        // A store that can never fit in a trip makes the whole instance
        // undeliverable; detect it before searching.
        if instance.stores().any(|s| s.demand() > instance.capacity()) {
            return Err(SearchError::Infeasible);
        }

        if instance.num_stores() == 0 {
            let depot = instance.depot().id();
            return Ok(SearchOutcome {
                solution: Solution::new(vec![depot], 0.0),
                iterations: 0,
                complete: true,
            });
        }

        Run::new(instance, self.strategy, &self.config).solve()
    }
}

/// Work-list discipline behind one expansion loop: LIFO stack for
/// depth-first, priority frontier for the cost-ordered strategies.
enum Worklist {
    Stack(Vec<SearchState>),
    Frontier(PriorityFrontier<SearchState>),
}

impl Worklist {
    fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::DepthFirst => Self::Stack(Vec::new()),
            Strategy::UniformCost | Strategy::BestFirst => {
                Self::Frontier(PriorityFrontier::new())
            }
        }
    }

    fn push(&mut self, state: SearchState, priority: f64) {
        match self {
            Self::Stack(stack) => stack.push(state),
            Self::Frontier(frontier) => frontier.enqueue(state, priority),
        }
    }

    fn pop(&mut self) -> Option<SearchState> {
        match self {
            Self::Stack(stack) => stack.pop(),
            Self::Frontier(frontier) => frontier.dequeue(),
        }
    }
}

/// State owned by a single `solve` call.
struct Run<'a> {
    instance: &'a ProblemInstance,
    strategy: Strategy,
    config: &'a SearchConfig,
    memo: HashMap<MemoKey, f64>,
    incumbent: Option<(Vec<NodeId>, f64)>,
    iterations: u64,
    deadline: Option<Instant>,
}

impl<'a> Run<'a> {
    fn new(instance: &'a ProblemInstance, strategy: Strategy, config: &'a SearchConfig) -> Self {
        Self {
            instance,
            strategy,
            config,
            memo: HashMap::new(),
            incumbent: None,
            iterations: 0,
            deadline: config.time_limit.map(|limit| Instant::now() + limit),
        }
    }

    fn solve(mut self) -> Result<SearchOutcome, SearchError> {
        let depot = self.instance.depot().id();
        let mut worklist = Worklist::for_strategy(self.strategy);
        worklist.push(SearchState::initial(depot, self.instance.num_nodes()), 0.0);

        let mut complete = true;
        while let Some(state) = worklist.pop() {
            if self.limit_reached() {
                complete = false;
                break;
            }
            self.expand(state, &mut worklist);
        }

        match self.incumbent {
            Some((route, cost)) => Ok(SearchOutcome {
                solution: Solution::new(route, cost),
                iterations: self.iterations,
                complete,
            }),
            None if complete => Err(SearchError::Infeasible),
            None => Err(SearchError::LimitReached),
        }
    }

    fn limit_reached(&self) -> bool {
        if let Some(cap) = self.config.max_iterations {
            if self.iterations >= cap {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        false
    }

    fn expand(&mut self, state: SearchState, worklist: &mut Worklist) {
        let last = state.last();
        let depot = self.instance.depot().id();

        if self.config.memoization {
            let key = state.memo_key();
            if let Some(&best) = self.memo.get(&key) {
                if best <= state.cost {
                    return; // dominated
                }
            }
            self.memo.insert(key, state.cost);
        }

        let unvisited: Vec<NodeId> = self
            .instance
            .stores()
            .map(|store| store.id())
            .filter(|&id| !state.visited.contains(id))
            .collect();

        // Any completion must leave `last` along one of these edges.
        let min_return = self
            .instance
            .distances()
            .min_outgoing(last, std::iter::once(depot).chain(unvisited.iter().copied()))
            .expect("depot is always a candidate");
        if let Some((_, best)) = &self.incumbent {
            if state.cost + min_return >= *best {
                return;
            }
        }

        if state.visited.len() == self.instance.num_stores() {
            self.complete_route(state, last, depot);
            return;
        }

        self.iterations += 1;

        let mut successors: Vec<NodeId> = Vec::with_capacity(unvisited.len() + 1);
        if last != depot {
            successors.push(depot);
        }
        successors.extend_from_slice(&unvisited);
        if self.strategy == Strategy::DepthFirst {
            // LIFO pop order: pushing in reverse keeps id-order expansion.
            successors.reverse();
        }

        let capacity = self.instance.capacity();
        for &succ in &successors {
            let node = self.instance.node(succ);
            let new_load = if node.is_depot() {
                0.0
            } else {
                state.load + node.demand()
            };
            if new_load > capacity {
                continue;
            }

            let leg = self.instance.distance(last, succ);
            let g = state.cost + leg;
            let priority = match self.strategy {
                Strategy::DepthFirst | Strategy::UniformCost => g,
                Strategy::BestFirst => {
                    let remaining: Vec<NodeId> = unvisited
                        .iter()
                        .copied()
                        .filter(|&id| id != succ)
                        .collect();
                    g + shortest_path_bound(self.instance, succ, &remaining)
                }
            };
            if let Some((_, best)) = &self.incumbent {
                if priority >= *best {
                    continue;
                }
            }

            worklist.push(state.extend(succ, leg, new_load, node.is_store()), priority);
        }
    }

    /// Closes a route that has visited every store and promotes it to
    /// incumbent if it is strictly better and feasible.
    fn complete_route(&mut self, state: SearchState, last: NodeId, depot: NodeId) {
        let cost = state.cost + self.instance.distance(last, depot);
        if let Some((_, best)) = &self.incumbent {
            if cost >= *best {
                return;
            }
        }
        let mut route = state.route;
        route.push(depot);
        if self.instance.is_feasible(&route) {
            self.incumbent = Some((route, cost));
        }
    }
}

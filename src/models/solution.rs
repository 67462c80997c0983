//! Solution type.

use std::fmt;

use super::NodeId;

/// A complete route produced by a solver, together with its objective value.
///
/// The route is an ordered sequence of node ids beginning and ending at the
/// depot; the objective is its total travel distance.
///
/// # Examples
///
/// ```
/// use cvrp_search::models::Solution;
///
/// let sol = Solution::new(vec![0, 2, 1, 0], 13.0);
/// assert_eq!(sol.route(), &[0, 2, 1, 0]);
/// assert_eq!(sol.objective(), 13.0);
/// assert_eq!(sol.to_string(), "0,2,1,0");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    route: Vec<NodeId>,
    objective: f64,
}

impl Solution {
    /// Creates a solution from a route and its objective value.
    pub fn new(route: Vec<NodeId>, objective: f64) -> Self {
        Self { route, objective }
    }

    /// The route as a sequence of node ids.
    pub fn route(&self) -> &[NodeId] {
        &self.route
    }

    /// Total travel distance of the route.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of nodes in the route, depot visits included.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns `true` if the route contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.route.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let sol = Solution::new(vec![0, 1, 0], 10.0);
        assert_eq!(sol.route(), &[0, 1, 0]);
        assert_eq!(sol.objective(), 10.0);
        assert_eq!(sol.len(), 3);
        assert!(!sol.is_empty());
    }

    #[test]
    fn test_display() {
        let sol = Solution::new(vec![0, 3, 1, 2, 0], 42.0);
        assert_eq!(sol.to_string(), "0,3,1,2,0");
    }

    #[test]
    fn test_display_single_node() {
        let sol = Solution::new(vec![0], 0.0);
        assert_eq!(sol.to_string(), "0");
    }
}

//! Random instance generation.
//!
//! Produces reproducible Gaussian-sampled instances: store demands drawn
//! from `N(demand_mean, demand_std_dev)` clipped to `[1, capacity]`, and
//! directed pairwise distances drawn from
//! `N(distance_mean, distance_std_dev)` clipped to a minimum of 1. The
//! distance table is asymmetric by construction — each direction is sampled
//! independently.

use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::distance::DistanceMatrix;
use crate::models::{Node, ProblemInstance};

/// Parameters for [`generate`].
///
/// The defaults mirror a mid-size delivery scenario: capacity 50, distances
/// around 30±10, demands around 10±5.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    /// Number of store nodes; the generated instance has one node more (the
    /// depot, id 0).
    pub number_of_stores: usize,
    /// Vehicle load capacity.
    pub vehicle_capacity: f64,
    /// Seed for the generator; seeded from the OS when `None`.
    pub seed: Option<u64>,
    /// Mean travel distance between nodes.
    pub distance_mean: f64,
    /// Standard deviation of travel distances.
    pub distance_std_dev: f64,
    /// Mean store demand.
    pub demand_mean: f64,
    /// Standard deviation of store demands.
    pub demand_std_dev: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            number_of_stores: 10,
            vehicle_capacity: 50.0,
            seed: None,
            distance_mean: 30.0,
            distance_std_dev: 10.0,
            demand_mean: 10.0,
            demand_std_dev: 5.0,
        }
    }
}

/// An invalid generation parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// `number_of_stores` must be at least 1.
    InvalidStoreCount,
    /// Capacity must be a positive finite number.
    InvalidCapacity(f64),
    /// A mean or standard deviation must be a positive finite number.
    InvalidDistribution {
        /// Name of the offending parameter.
        what: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStoreCount => write!(f, "number of stores must be at least 1"),
            Self::InvalidCapacity(c) => write!(f, "vehicle capacity must be positive, got {c}"),
            Self::InvalidDistribution { what, value } => {
                write!(f, "{what} must be positive, got {value}")
            }
        }
    }
}

impl Error for GeneratorError {}

/// Generates a random problem instance.
///
/// Deterministic for a fixed seed: the same parameters always yield the same
/// nodes and distance table.
///
/// # Examples
///
/// ```
/// use cvrp_search::generator::{generate, GeneratorParams};
///
/// let params = GeneratorParams {
///     number_of_stores: 5,
///     seed: Some(12),
///     ..GeneratorParams::default()
/// };
/// let instance = generate(&params).unwrap();
/// assert_eq!(instance.num_stores(), 5);
/// assert_eq!(instance.depot().id(), 0);
/// ```
pub fn generate(params: &GeneratorParams) -> Result<ProblemInstance, GeneratorError> {
    if params.number_of_stores == 0 {
        return Err(GeneratorError::InvalidStoreCount);
    }
    if !params.vehicle_capacity.is_finite() || params.vehicle_capacity <= 0.0 {
        return Err(GeneratorError::InvalidCapacity(params.vehicle_capacity));
    }
    for (what, value) in [
        ("distance mean", params.distance_mean),
        ("distance std dev", params.distance_std_dev),
        ("demand mean", params.demand_mean),
        ("demand std dev", params.demand_std_dev),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(GeneratorError::InvalidDistribution { what, value });
        }
    }

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let demands = Normal::new(params.demand_mean, params.demand_std_dev)
        .expect("std dev validated above");
    let distances = Normal::new(params.distance_mean, params.distance_std_dev)
        .expect("std dev validated above");

    let n = params.number_of_stores + 1;
    let mut nodes = Vec::with_capacity(n);
    nodes.push(Node::depot());
    for id in 1..n {
        let demand = round3(
            demands
                .sample(&mut rng)
                .max(1.0)
                .min(params.vehicle_capacity),
        );
        nodes.push(Node::store(id, demand).expect("demand clipped to a valid range"));
    }

    let mut table = DistanceMatrix::new(n);
    for from in 0..n {
        for to in 0..n {
            if from == to {
                continue;
            }
            table.set(from, to, round3(distances.sample(&mut rng).max(1.0)));
        }
    }

    let instance = ProblemInstance::new(nodes, table, params.vehicle_capacity)
        .expect("generated instance satisfies every construction invariant");
    Ok(instance)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

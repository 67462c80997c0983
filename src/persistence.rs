//! Instance persistence.
//!
//! Saves and loads a [`ProblemInstance`] as a JSON record with exactly three
//! fields: the vehicle capacity, the node list (id, role, demand), and the
//! dense row-major distance table. The round trip is lossless, and `load`
//! re-validates everything through [`ProblemInstance::new`], so a malformed
//! file can never reach the search.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::{InstanceError, Node, NodeId, NodeRole, ProblemInstance};

/// Why a save or load failed.
#[derive(Debug)]
pub enum PersistenceError {
    /// The file could not be read or written.
    Io(std::io::Error),
    /// The file is not valid JSON for the instance record.
    Format(serde_json::Error),
    /// A node record's role contradicts its id, or its demand is invalid.
    InvalidNode(NodeId),
    /// The record is well-formed but does not describe a valid instance.
    Instance(InstanceError),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Format(err) => write!(f, "malformed instance file: {err}"),
            Self::InvalidNode(id) => write!(f, "inconsistent record for node {id}"),
            Self::Instance(err) => write!(f, "invalid instance: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::InvalidNode(_) => None,
            Self::Instance(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err)
    }
}

#[derive(Serialize, Deserialize)]
struct InstanceRecord {
    vehicle_capacity: f64,
    nodes: Vec<NodeRecord>,
    distances: Vec<Vec<f64>>,
}

#[derive(Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    role: RoleRecord,
    demand: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum RoleRecord {
    Depot,
    Store,
}

/// Writes an instance to `path` as JSON.
pub fn save(instance: &ProblemInstance, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &to_record(instance))?;
    writer.flush()?;
    Ok(())
}

/// Reads an instance from a JSON file written by [`save`].
pub fn load(path: impl AsRef<Path>) -> Result<ProblemInstance, PersistenceError> {
    let file = File::open(path)?;
    let record: InstanceRecord = serde_json::from_reader(BufReader::new(file))?;
    from_record(record)
}

fn to_record(instance: &ProblemInstance) -> InstanceRecord {
    let n = instance.num_nodes();
    InstanceRecord {
        vehicle_capacity: instance.capacity(),
        nodes: instance
            .nodes()
            .iter()
            .map(|node| NodeRecord {
                id: node.id(),
                role: match node.role() {
                    NodeRole::Depot => RoleRecord::Depot,
                    NodeRole::Store => RoleRecord::Store,
                },
                demand: node.demand(),
            })
            .collect(),
        distances: instance
            .distances()
            .data()
            .chunks(n)
            .map(|row| row.to_vec())
            .collect(),
    }
}

fn from_record(record: InstanceRecord) -> Result<ProblemInstance, PersistenceError> {
    let n = record.nodes.len();

    let mut nodes = Vec::with_capacity(n);
    for node in &record.nodes {
        let built = match node.role {
            RoleRecord::Depot if node.id == 0 && node.demand == 0.0 => Node::depot(),
            RoleRecord::Depot => return Err(PersistenceError::InvalidNode(node.id)),
            RoleRecord::Store => Node::store(node.id, node.demand)
                .ok_or(PersistenceError::InvalidNode(node.id))?,
        };
        nodes.push(built);
    }

    if record.distances.len() != n {
        return Err(PersistenceError::Instance(InstanceError::DistanceTableSize {
            expected: n,
            actual: record.distances.len(),
        }));
    }
    let mut flat = Vec::with_capacity(n * n);
    for row in &record.distances {
        if row.len() != n {
            return Err(PersistenceError::Instance(InstanceError::DistanceTableSize {
                expected: n,
                actual: row.len(),
            }));
        }
        flat.extend_from_slice(row);
    }
    let distances = DistanceMatrix::from_data(n, flat).expect("row sizes checked above");

    ProblemInstance::new(nodes, distances, record.vehicle_capacity)
        .map_err(PersistenceError::Instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GeneratorParams};

    fn sample_instance() -> ProblemInstance {
        generate(&GeneratorParams {
            number_of_stores: 6,
            seed: Some(12),
            ..GeneratorParams::default()
        })
        .expect("valid params")
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("instance.json");

        let original = sample_instance();
        save(&original, &path).expect("save");
        let restored = load(&path).expect("load");

        assert_eq!(restored.capacity(), original.capacity());
        assert_eq!(restored.num_nodes(), original.num_nodes());
        assert_eq!(restored.distances(), original.distances());
        for (a, b) in original.nodes().iter().zip(restored.nodes()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.role(), b.role());
            assert_eq!(a.demand(), b.demand());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load(dir.path().join("nothing.json"));
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        let mut file = File::create(&path).expect("create");
        file.write_all(b"{ not json").expect("write");

        assert!(matches!(load(&path), Err(PersistenceError::Format(_))));
    }

    #[test]
    fn test_load_depot_with_wrong_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad-depot.json");
        std::fs::write(
            &path,
            r#"{
                "vehicle_capacity": 10.0,
                "nodes": [
                    {"id": 0, "role": "depot", "demand": 0.0},
                    {"id": 1, "role": "depot", "demand": 0.0}
                ],
                "distances": [[0.0, 1.0], [1.0, 0.0]]
            }"#,
        )
        .expect("write");

        assert!(matches!(load(&path), Err(PersistenceError::InvalidNode(1))));
    }

    #[test]
    fn test_load_ragged_distance_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ragged.json");
        std::fs::write(
            &path,
            r#"{
                "vehicle_capacity": 10.0,
                "nodes": [
                    {"id": 0, "role": "depot", "demand": 0.0},
                    {"id": 1, "role": "store", "demand": 2.0}
                ],
                "distances": [[0.0, 1.0], [1.0]]
            }"#,
        )
        .expect("write");

        assert!(matches!(
            load(&path),
            Err(PersistenceError::Instance(InstanceError::DistanceTableSize {
                expected: 2,
                actual: 1
            }))
        ));
    }

    #[test]
    fn test_load_invalid_capacity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad-capacity.json");
        std::fs::write(
            &path,
            r#"{
                "vehicle_capacity": -3.0,
                "nodes": [{"id": 0, "role": "depot", "demand": 0.0}],
                "distances": [[0.0]]
            }"#,
        )
        .expect("write");

        assert!(matches!(
            load(&path),
            Err(PersistenceError::Instance(InstanceError::InvalidCapacity(_)))
        ));
    }
}

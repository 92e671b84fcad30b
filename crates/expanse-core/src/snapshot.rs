//! Snapshot records exported to the persistence layer
//!
//! Flat structure, no schema versioning:
//! `{"time": 1700000000.0, "objects": [{"pos": [x, y]}, ...]}`

use serde::{Deserialize, Serialize};

use crate::{ExpanseResult, Position2D};

/// One object as persisted: its comoving position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub pos: [f64; 2],
}

impl ObjectRecord {
    pub fn position(&self) -> Position2D {
        Position2D::from(self.pos)
    }
}

impl From<Position2D> for ObjectRecord {
    fn from(p: Position2D) -> Self {
        ObjectRecord { pos: p.to_array() }
    }
}

/// A full snapshot: wall-clock time plus every object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceSnapshot {
    pub time: f64,
    pub objects: Vec<ObjectRecord>,
}

impl SpaceSnapshot {
    pub fn new(time: f64, objects: Vec<ObjectRecord>) -> Self {
        Self { time, objects }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> ExpanseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> ExpanseResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Comoving positions of all objects
    pub fn positions(&self) -> impl Iterator<Item = Position2D> + '_ {
        self.objects.iter().map(ObjectRecord::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_layout() {
        let snap = SpaceSnapshot::new(
            12.5,
            vec![Position2D::new(1.0, -2.0).into(), Position2D::new(0.5, 0.0).into()],
        );
        let value: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();

        assert_eq!(value["time"], 12.5);
        assert_eq!(value["objects"][0]["pos"][0], 1.0);
        assert_eq!(value["objects"][0]["pos"][1], -2.0);
        assert_eq!(value["objects"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_snapshot_from_external_json() {
        let data = r#"{"time": 1.0, "objects": [{"pos": [3.0, 4.0]}]}"#;
        let snap = SpaceSnapshot::from_json(data).unwrap();
        let positions: Vec<_> = snap.positions().collect();
        assert_eq!(positions, vec![Position2D::new(3.0, 4.0)]);
    }

    #[test]
    fn test_snapshot_rejects_missing_objects() {
        assert!(SpaceSnapshot::from_json(r#"{"time": 1.0}"#).is_err());
    }
}

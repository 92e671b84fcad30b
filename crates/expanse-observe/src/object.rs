//! Space objects

use expanse_core::{ObjectRecord, Position2D};

/// A point object with a fixed comoving position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceObject {
    comoving: Position2D,
}

impl SpaceObject {
    pub fn new(comoving: Position2D) -> Self {
        Self { comoving }
    }

    /// Comoving ("dimensionless") position, fixed for the object's lifetime
    pub fn comoving_position(&self) -> Position2D {
        self.comoving
    }

    /// Comoving distance from the observer at the origin
    pub fn comoving_distance(&self) -> f64 {
        self.comoving.length()
    }

    /// Physical position for a given scale factor
    pub fn physical_position(&self, scale_factor: f64) -> Position2D {
        self.comoving.scale(scale_factor)
    }

    pub fn to_record(&self) -> ObjectRecord {
        ObjectRecord::from(self.comoving)
    }
}

impl From<Position2D> for SpaceObject {
    fn from(p: Position2D) -> Self {
        SpaceObject::new(p)
    }
}

impl From<&ObjectRecord> for SpaceObject {
    fn from(record: &ObjectRecord) -> Self {
        SpaceObject::new(record.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_position() {
        let obj = SpaceObject::new(Position2D::new(100.0, -50.0));
        assert_eq!(obj.physical_position(2.0), Position2D::new(200.0, -100.0));
        assert_eq!(obj.comoving_position(), Position2D::new(100.0, -50.0));
    }

    #[test]
    fn test_record_conversion() {
        let obj = SpaceObject::new(Position2D::new(1.5, 2.5));
        let record = obj.to_record();
        assert_eq!(record.pos, [1.5, 2.5]);
        assert_eq!(SpaceObject::from(&record), obj);
    }
}

//! Positions in the simulated plane

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// 2D position in world units (comoving or physical, depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub const ORIGIN: Position2D = Position2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Multiply both coordinates by a factor
    pub fn scale(&self, factor: f64) -> Position2D {
        Position2D {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Same direction, new distance from the origin.
    /// A point at the origin has no direction and stays there.
    pub fn with_length(&self, length: f64) -> Position2D {
        let current = self.length();
        if current == 0.0 {
            return Position2D::ORIGIN;
        }
        self.scale(length / current)
    }

    /// Distance to another position
    pub fn distance(&self, other: &Position2D) -> f64 {
        (*self - *other).length()
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Position2D {
    fn from(v: [f64; 2]) -> Self {
        Position2D::new(v[0], v[1])
    }
}

impl From<(f64, f64)> for Position2D {
    fn from(v: (f64, f64)) -> Self {
        Position2D::new(v.0, v.1)
    }
}

impl Add for Position2D {
    type Output = Position2D;

    fn add(self, rhs: Position2D) -> Self::Output {
        Position2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position2D {
    type Output = Position2D;

    fn sub(self, rhs: Position2D) -> Self::Output {
        Position2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position2D {
    type Output = Position2D;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_scale() {
        let p = Position2D::new(3.0, 4.0);
        assert_eq!(p.length(), 5.0);
        assert_eq!(p * 2.0, Position2D::new(6.0, 8.0));
    }

    #[test]
    fn test_with_length_keeps_direction() {
        let p = Position2D::new(3.0, 4.0).with_length(10.0);
        assert!((p.x - 6.0).abs() < 1e-12);
        assert!((p.y - 8.0).abs() < 1e-12);

        assert_eq!(Position2D::ORIGIN.with_length(5.0), Position2D::ORIGIN);
    }

    #[test]
    fn test_distance() {
        let a = Position2D::new(0.0, 0.0);
        let b = Position2D::new(10.0, -10.0);
        assert_eq!(a.distance(&b), 200f64.sqrt());
        assert_eq!(b.distance(&a), a.distance(&b));
    }
}

//! Point coordinates that keep the precision they were created with.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A 2D point in image coordinates.
///
/// Coordinates are stored as JSON numbers so that an integer stays an integer
/// and a float keeps its exact value through a save/load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Number; 2]", into = "[Number; 2]")]
pub struct Point {
    pub x: Number,
    pub y: Number,
}

impl Point {
    /// Create a point from anything convertible into a JSON number (integers).
    pub fn new(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Create a point from float coordinates.
    /// Returns None if either coordinate is NaN or infinite.
    pub fn from_f64(x: f64, y: f64) -> Option<Self> {
        Some(Self {
            x: Number::from_f64(x)?,
            y: Number::from_f64(y)?,
        })
    }

    /// The point as float coordinates, for rendering.
    pub fn as_f64(&self) -> (f64, f64) {
        (
            self.x.as_f64().unwrap_or_default(),
            self.y.as_f64().unwrap_or_default(),
        )
    }

    /// The reserved point kept in every grouped segment.
    pub fn sentinel() -> Self {
        let (x, y) = crate::constants::SENTINEL_POSITION;
        Self::new(x, y)
    }

    /// True if this point sits on the sentinel position, whether written as
    /// integers or floats.
    pub fn is_sentinel_position(&self) -> bool {
        self.as_f64() == Self::sentinel().as_f64()
    }
}

impl From<[Number; 2]> for Point {
    fn from([x, y]: [Number; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [Number; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coordinates_stay_integers() {
        let point = Point::new(12, 34);
        assert_eq!(serde_json::to_string(&point).unwrap(), "[12,34]");
    }

    #[test]
    fn test_float_coordinates_keep_value() {
        let point: Point = serde_json::from_str("[12.5, 0.125]").unwrap();
        assert_eq!(point, Point::from_f64(12.5, 0.125).unwrap());
        assert_eq!(serde_json::to_string(&point).unwrap(), "[12.5,0.125]");
    }

    #[test]
    fn test_float_and_integer_differ() {
        let float: Point = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_ne!(float, Point::new(1, 2));
        assert_eq!(float.as_f64(), (1.0, 2.0));
    }

    #[test]
    fn test_sentinel_position_in_either_notation() {
        assert!(Point::new(-10, -10).is_sentinel_position());
        assert!(Point::from_f64(-10.0, -10.0).unwrap().is_sentinel_position());
        assert!(!Point::new(-10, 10).is_sentinel_position());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Point::from_f64(f64::NAN, 1.0).is_none());
        assert!(Point::from_f64(1.0, f64::INFINITY).is_none());
    }
}

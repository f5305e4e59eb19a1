//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{TilesError, TilesResult};

/// A geographic or projected bounding box.
///
/// For geographic CRS (CRS84, EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857, etc.), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build a bounding box from a lower-left and upper-right corner pair.
    ///
    /// Fails when a coordinate is not finite or the corners are inverted.
    pub fn from_corners(lower_left: [f64; 2], upper_right: [f64; 2]) -> TilesResult<Self> {
        let bbox = Self::new(lower_left[0], lower_left[1], upper_right[0], upper_right[1]);
        let finite = bbox.to_array().iter().all(|v| v.is_finite());
        if !finite || bbox.min_x > bbox.max_x || bbox.min_y > bbox.max_y {
            return Err(TilesError::InvalidBbox(format!(
                "lowerLeft {:?} / upperRight {:?}",
                lower_left, upper_right
            )));
        }
        Ok(bbox)
    }

    /// The box as `[min_x, min_y, max_x, max_y]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Same box with x and y exchanged, for CRSs published in north/east order.
    pub fn swap_axes(&self) -> Self {
        Self::new(self.min_y, self.min_x, self.max_y, self.max_x)
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Compute the intersection of two bounding boxes.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        Some(BoundingBox {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        })
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners() {
        let bbox = BoundingBox::from_corners([-180.0, -90.0], [180.0, 90.0]).unwrap();
        assert_eq!(bbox.to_array(), [-180.0, -90.0, 180.0, 90.0]);
    }

    #[test]
    fn test_from_corners_inverted() {
        let result = BoundingBox::from_corners([10.0, 10.0], [5.0, 5.0]);
        assert!(matches!(result, Err(TilesError::InvalidBbox(_))));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(-5.0, 5.0, 5.0, 20.0);
        assert_eq!(a.union(&b), BoundingBox::new(-5.0, 0.0, 10.0, 20.0));
    }
}

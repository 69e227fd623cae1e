use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A point in 3D space with single precision coordinates.
///
/// Any float is accepted, including NaN and infinities. Use [`PointXyz::is_finite`]
/// to filter out invalid samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PointXyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PointXyz {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns true when none of the coordinates is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Coordinates padded to the 4-float layout, with w = 1.
    pub fn to_homogeneous(&self) -> [f32; 4] {
        [self.x, self.y, self.z, 1.0]
    }
}

impl From<[f32; 3]> for PointXyz {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for PointXyz {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<PointXyz> for [f32; 3] {
    fn from(point: PointXyz) -> Self {
        point.to_array()
    }
}

/// Formats as `(x, y, z)`, e.g. `(1, 2.5, -inf)`.
impl fmt::Display for PointXyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

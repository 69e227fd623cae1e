//! Small value records for point cloud samples: 3D coordinates and RGB colours.

pub mod error;
pub mod point;

pub use error::{Channel, RangeError};
pub use point::{PointXyz, Rgb};

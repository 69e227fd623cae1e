mod rgb;
mod xyz;

pub use rgb::Rgb;
pub use xyz::PointXyz;

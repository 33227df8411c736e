//! Polygon type and clipping.

mod clip;
mod core;

pub use self::core::Polygon;
pub use clip::clip_to_box;

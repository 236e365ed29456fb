//! Screen-space drawing: the pixel buffer, its primitives, and the line
//! parameterization they share.

pub mod line;
pub mod raster;

pub use line::{Line, Pt};
pub use raster::Rasterizer;

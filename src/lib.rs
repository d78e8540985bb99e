// Pointer-driven "reveal": a fan of rays from the cursor is cast against
// rectangular obstacles, and the hit segments become a mask that shows one
// image through another.

pub mod composite;
pub mod config;
pub mod draw;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod scene;
pub mod types;

pub use emitter::{Emitter, Hit, Ray, VisibilityPass};
pub use error::Error;
pub use geometry::{intersect, Obstacle, Segment};
pub use mask::StrokeStyle;
pub use scene::{FrameStats, Scene};

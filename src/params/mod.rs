//! Parameter definitions with units and documented semantics.
//!
//! Everything that shapes the scene is gathered here:
//! - Plane geometry (plane units, segment counts)
//! - Material setup (base color, texture addressing)
//! - Window and camera configuration

mod material;
mod plane;
mod render;

// Re-export all types
pub use material::{MaterialParams, TextureAddressMode};
pub use plane::PlaneParams;
pub use render::RenderConfig;

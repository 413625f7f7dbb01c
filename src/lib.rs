//! Wavesheet library - a textured plane rippled by scrolling simplex noise

pub mod backend;
pub mod camera;
pub mod cli;
pub mod error;
pub mod frame;
pub mod material;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod shader;
pub mod texture;
pub mod wave;

pub use error::{Result, WaveError};

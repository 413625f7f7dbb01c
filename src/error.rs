//! Error taxonomy for the wave pipeline.

use thiserror::Error;

/// Errors raised while building or driving the wave mesh
#[derive(Debug, Error)]
pub enum WaveError {
    /// WGSL failed to parse or validate, or the GPU rejected the pipeline.
    /// Fatal: no frame is drawn.
    #[error("Shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Texture fetch or decode failed. Recovered by drawing nothing.
    #[error("Failed to load texture from {source_name}: {reason}")]
    TextureLoad { source_name: String, reason: String },

    /// A uniform was written to a material that has already been destroyed
    #[error("Uniform '{0}' written to a destroyed material")]
    UniformBinding(&'static str),

    /// A name-keyed write named no writable uniform, or carried the wrong
    /// number of components for it
    #[error("Uniform '{name}' cannot be set from {components} component(s)")]
    UniformMismatch { name: String, components: usize },

    /// Adapter, device or surface acquisition failed
    #[error("Failed to initialize GPU: {0}")]
    GpuInit(String),

    /// Surface could not hand out a frame and reconfiguring will not help
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

impl WaveError {
    pub(crate) fn texture_load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::TextureLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaveError>;

//! Wave material: the uniform set and its GPU binding.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::backend::RenderBackend;
use crate::error::{Result, WaveError};

/// Uniforms the wave program reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformName {
    /// Seconds since mount, scrolls the noise
    ElapsedTime,
    /// Bound for completeness; the fragment stage does not blend it
    BaseColor,
    Texture,
}

impl UniformName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElapsedTime => "elapsedTime",
            Self::BaseColor => "baseColor",
            Self::Texture => "texture",
        }
    }

    /// Look a uniform up by the name the shader program exposes
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::ElapsedTime, Self::BaseColor, Self::Texture]
            .into_iter()
            .find(|uniform| uniform.as_str() == name)
    }

    /// Binding slot in group 0 of wave.wgsl (0 is the camera)
    pub fn binding(self) -> u32 {
        match self {
            Self::ElapsedTime | Self::BaseColor => 1,
            Self::Texture => 2,
        }
    }
}

impl fmt::Display for UniformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for one of the writable uniforms.
///
/// The texture is fixed at creation, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    ElapsedTime(f32),
    BaseColor(Vec3),
}

impl UniformValue {
    /// Build a value from a uniform name and its raw components:
    /// one float for `elapsedTime`, three for `baseColor`
    pub fn from_components(name: &str, components: &[f32]) -> Result<Self> {
        let mismatch = || WaveError::UniformMismatch {
            name: name.to_string(),
            components: components.len(),
        };
        match (UniformName::from_name(name), components) {
            (Some(UniformName::ElapsedTime), &[seconds]) => Ok(Self::ElapsedTime(seconds)),
            (Some(UniformName::BaseColor), &[r, g, b]) => Ok(Self::BaseColor(Vec3::new(r, g, b))),
            _ => Err(mismatch()),
        }
    }

    pub fn name(&self) -> UniformName {
        match self {
            Self::ElapsedTime(_) => UniformName::ElapsedTime,
            Self::BaseColor(_) => UniformName::BaseColor,
        }
    }
}

/// CPU copy of the scalar/vector uniforms (the texture lives with the material)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    pub elapsed_time: f32,
    pub base_color: Vec3,
}

impl UniformSet {
    pub fn new(base_color: Vec3) -> Self {
        Self {
            elapsed_time: 0.0,
            base_color,
        }
    }

    /// Layout of `WaveUniforms` in wave.wgsl
    pub fn to_gpu(&self) -> WaveUniforms {
        WaveUniforms {
            base_color: self.base_color.to_array(),
            elapsed_time: self.elapsed_time,
        }
    }
}

/// Uniform buffer for the wave shader (vec3 color packed with f32 time)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaveUniforms {
    pub base_color: [f32; 3],
    pub elapsed_time: f32,
}

struct MaterialResources<B: RenderBackend> {
    material: B::Material,
    texture: B::Texture,
}

/// Uniform set bound to exactly one draw target.
///
/// Owns the texture for the mesh's lifetime. Once destroyed, any uniform
/// write is a `UniformBinding` error.
pub struct WaveMaterial<B: RenderBackend> {
    uniforms: UniformSet,
    resources: Option<MaterialResources<B>>,
}

impl<B: RenderBackend> WaveMaterial<B> {
    /// Create the material around an uploaded texture.
    ///
    /// On failure the texture is released before returning.
    pub fn create(backend: &mut B, base_color: Vec3, texture: B::Texture) -> Result<Self> {
        let uniforms = UniformSet::new(base_color);
        match backend.create_material(&texture, &uniforms) {
            Ok(material) => Ok(Self {
                uniforms,
                resources: Some(MaterialResources { material, texture }),
            }),
            Err(e) => {
                backend.release_texture(texture);
                Err(e)
            }
        }
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn is_destroyed(&self) -> bool {
        self.resources.is_none()
    }

    /// Write one uniform; uploaded on the next `bind`
    pub fn set_uniform(&mut self, value: UniformValue) -> Result<()> {
        if self.resources.is_none() {
            return Err(WaveError::UniformBinding(value.name().as_str()));
        }
        match value {
            UniformValue::ElapsedTime(seconds) => self.uniforms.elapsed_time = seconds,
            UniformValue::BaseColor(color) => self.uniforms.base_color = color,
        }
        Ok(())
    }

    /// Write a uniform addressed by its shader name, e.g. `("elapsedTime", &[t])`
    pub fn set_uniform_by_name(&mut self, name: &str, components: &[f32]) -> Result<()> {
        self.set_uniform(UniformValue::from_components(name, components)?)
    }

    /// Per-frame write of the time uniform
    pub fn set_elapsed_time(&mut self, seconds: f32) -> Result<()> {
        self.set_uniform(UniformValue::ElapsedTime(seconds))
    }

    pub fn set_base_color(&mut self, color: Vec3) -> Result<()> {
        self.set_uniform(UniformValue::BaseColor(color))
    }

    /// Upload every uniform and hand out the binding a draw needs
    pub fn bind<'a>(&'a self, backend: &mut B) -> Result<BoundMaterial<'a, B>> {
        let resources = self
            .resources
            .as_ref()
            .ok_or(WaveError::UniformBinding(UniformName::Texture.as_str()))?;

        backend.write_uniforms(&resources.material, &self.uniforms);

        Ok(BoundMaterial {
            handle: &resources.material,
            uniforms: self.uniforms,
        })
    }

    /// Release the material and its texture. Returns false if already released.
    pub fn destroy(&mut self, backend: &mut B) -> bool {
        match self.resources.take() {
            Some(MaterialResources { material, texture }) => {
                backend.release_material(material);
                backend.release_texture(texture);
                true
            }
            None => false,
        }
    }
}

/// Proof that a material's uniforms were uploaded for the current draw.
///
/// Only `WaveMaterial::bind` constructs one.
pub struct BoundMaterial<'a, B: RenderBackend + ?Sized> {
    handle: &'a B::Material,
    uniforms: UniformSet,
}

impl<'a, B: RenderBackend + ?Sized> BoundMaterial<'a, B> {
    pub fn handle(&self) -> &'a B::Material {
        self.handle
    }

    /// Uniform values as uploaded by `bind`
    pub fn uniforms(&self) -> UniformSet {
        self.uniforms
    }
}

/// Policy for writes to a destroyed material: a bug, so debug builds panic
/// and release builds drop the write.
pub(crate) fn report_binding_error(err: WaveError) {
    if cfg!(debug_assertions) {
        panic!("{}", err);
    }
    log::error!("{}", err);
}

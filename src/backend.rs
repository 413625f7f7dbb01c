//! GPU seam between the wave lifecycle and a concrete renderer.
//!
//! `WgpuBackend` in `rendering` is the real implementation. Handles are
//! released by value, so a handle cannot be released twice.

use crate::error::Result;
use crate::material::{BoundMaterial, UniformSet};
use crate::mesh::PlaneGeometry;
use crate::texture::TextureData;

/// Resources and draw submission for the wave mesh
pub trait RenderBackend {
    type Geometry;
    type Texture;
    type Material;

    /// Upload the immutable plane vertex and index data
    fn upload_geometry(&mut self, geometry: &PlaneGeometry) -> Result<Self::Geometry>;

    /// Upload a decoded image as a sampled texture
    fn upload_texture(&mut self, texture: &TextureData) -> Result<Self::Texture>;

    /// Create the uniform storage and binding for one draw target
    fn create_material(
        &mut self,
        texture: &Self::Texture,
        uniforms: &UniformSet,
    ) -> Result<Self::Material>;

    /// Upload the full uniform set to the material's GPU state
    fn write_uniforms(&mut self, material: &Self::Material, uniforms: &UniformSet);

    /// Submit one frame: the draw if given, otherwise just a cleared target
    fn render(&mut self, draw: Option<DrawCall<'_, Self>>) -> Result<()>;

    fn release_material(&mut self, material: Self::Material);
    fn release_texture(&mut self, texture: Self::Texture);
    fn release_geometry(&mut self, geometry: Self::Geometry);
}

/// A bound material plus the geometry it shades
pub struct DrawCall<'a, B: RenderBackend + ?Sized> {
    pub material: BoundMaterial<'a, B>,
    pub geometry: &'a B::Geometry,
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend that runs the CPU shader mirror instead of a GPU.

    use glam::Vec4;

    use super::*;
    use crate::error::WaveError;
    use crate::mesh::Vertex;
    use crate::params::TextureAddressMode;
    use crate::shader;

    #[derive(Debug)]
    pub struct MemGeometry {
        pub id: u32,
        pub vertices: Vec<Vertex>,
    }

    #[derive(Debug)]
    pub struct MemTexture {
        pub id: u32,
        pub data: TextureData,
    }

    #[derive(Debug)]
    pub struct MemMaterial {
        pub id: u32,
        pub texture: TextureData,
    }

    /// One rendered frame: per-vertex fragment colors, empty for clear-only frames
    #[derive(Debug, Clone)]
    pub struct Frame {
        pub elapsed_time: Option<f32>,
        pub colors: Vec<Vec4>,
    }

    #[derive(Debug, Default)]
    pub struct MemoryBackend {
        next_id: u32,
        pub address_mode: TextureAddressMode,
        pub textures_uploaded: Vec<u32>,
        pub textures_released: Vec<u32>,
        pub materials_created: Vec<u32>,
        pub materials_released: Vec<u32>,
        pub geometries_released: Vec<u32>,
        pub uniform_writes: Vec<UniformSet>,
        pub frames: Vec<Frame>,
        pub fail_texture_upload: bool,
    }

    impl MemoryBackend {
        fn next_id(&mut self) -> u32 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl RenderBackend for MemoryBackend {
        type Geometry = MemGeometry;
        type Texture = MemTexture;
        type Material = MemMaterial;

        fn upload_geometry(&mut self, geometry: &PlaneGeometry) -> Result<MemGeometry> {
            Ok(MemGeometry {
                id: self.next_id(),
                vertices: geometry.vertices().to_vec(),
            })
        }

        fn upload_texture(&mut self, texture: &TextureData) -> Result<MemTexture> {
            if self.fail_texture_upload {
                return Err(WaveError::GpuInit("texture upload refused".to_string()));
            }
            let id = self.next_id();
            self.textures_uploaded.push(id);
            Ok(MemTexture {
                id,
                data: texture.clone(),
            })
        }

        fn create_material(
            &mut self,
            texture: &MemTexture,
            uniforms: &UniformSet,
        ) -> Result<MemMaterial> {
            let id = self.next_id();
            self.materials_created.push(id);
            self.uniform_writes.push(*uniforms);
            Ok(MemMaterial {
                id,
                texture: texture.data.clone(),
            })
        }

        fn write_uniforms(&mut self, _material: &MemMaterial, uniforms: &UniformSet) {
            self.uniform_writes.push(*uniforms);
        }

        fn render(&mut self, draw: Option<DrawCall<'_, Self>>) -> Result<()> {
            let frame = match draw {
                Some(call) => {
                    let uniforms = call.material.uniforms();
                    let texture = &call.material.handle().texture;
                    let colors = call
                        .geometry
                        .vertices
                        .iter()
                        .map(|v| {
                            let out = shader::run_vertex(v, uniforms.elapsed_time);
                            shader::run_fragment(&out, texture, self.address_mode)
                        })
                        .collect();
                    Frame {
                        elapsed_time: Some(uniforms.elapsed_time),
                        colors,
                    }
                }
                None => Frame {
                    elapsed_time: None,
                    colors: Vec::new(),
                },
            };
            self.frames.push(frame);
            Ok(())
        }

        fn release_material(&mut self, material: MemMaterial) {
            self.materials_released.push(material.id);
        }

        fn release_texture(&mut self, texture: MemTexture) {
            self.textures_released.push(texture.id);
        }

        fn release_geometry(&mut self, geometry: MemGeometry) {
            self.geometries_released.push(geometry.id);
        }
    }
}

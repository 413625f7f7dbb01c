//! Subdivided plane mesh the wave is drawn on.

use bytemuck::{Pod, Zeroable};

use crate::params::PlaneParams;

/// Vertex data for the plane (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `VertexInput` in wave.wgsl
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Flat plane in local XY, facing +z.
///
/// Immutable once built: the vertex stage displaces a fresh copy of each
/// position every frame, nothing is written back.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    params: PlaneParams,
}

impl PlaneGeometry {
    /// Build the grid row by row from the top edge (+y) down.
    ///
    /// UVs run left to right in u and top to bottom from 1 to 0 in v.
    /// Each cell becomes two counter-clockwise triangles.
    pub fn new(params: PlaneParams) -> Self {
        let grid_x = params.width_segments.max(1);
        let grid_y = params.height_segments.max(1);
        let half_width = params.width / 2.0;
        let half_height = params.height / 2.0;
        let segment_width = params.width / grid_x as f32;
        let segment_height = params.height / grid_y as f32;

        let mut vertices = Vec::with_capacity(params.vertex_count());
        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - half_height;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - half_width;
                vertices.push(Vertex {
                    position: [x, -y, 0.0],
                    uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                });
            }
        }

        let row = grid_x + 1;
        let mut indices = Vec::with_capacity(params.index_count());
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            vertices,
            indices,
            params: PlaneParams {
                width_segments: grid_x,
                height_segments: grid_y,
                ..params
            },
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn params(&self) -> &PlaneParams {
        &self.params
    }
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self::new(PlaneParams::default())
    }
}

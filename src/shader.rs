//! Wave shader program: WGSL source, offline validation, and a CPU mirror of
//! both stages.
//!
//! The CPU mirror runs the same math as `shaders/wave.wgsl` and is what tests
//! (and the in-memory backend) use to predict GPU output.

use glam::{Mat4, Vec2, Vec3, Vec4};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::ShaderStage;

use crate::error::{Result, WaveError};
use crate::mesh::Vertex;
use crate::params::TextureAddressMode;
use crate::texture::TextureData;

/// Spatial frequency of the noise along local x
pub const NOISE_FREQUENCY: f32 = 1.5;

/// Displacement scale along local z (plane units)
pub const NOISE_AMPLITUDE: f32 = 0.25;

/// Texture coordinate offset per unit of displaced height
pub const SAMPLE_OFFSET_SCALE: f32 = 0.4;

/// WGSL source for the wave program
pub const WAVE_SHADER_SOURCE: &str = include_str!("shaders/wave.wgsl");

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// A parsed and validated shader program
pub struct ShaderProgram {
    label: String,
    source: String,
    module: naga::Module,
}

impl ShaderProgram {
    /// The wave program shipped with the crate
    pub fn wave() -> Result<Self> {
        Self::validate("Wave Shader", WAVE_SHADER_SOURCE)
    }

    /// Parse and validate WGSL, and check both stage entry points exist
    pub fn validate(label: &str, source: &str) -> Result<Self> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| WaveError::ShaderCompile(e.emit_to_string(source)))?;

        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .map_err(|e| WaveError::ShaderCompile(e.emit_to_string(source)))?;

        for (name, stage) in [
            (VERTEX_ENTRY_POINT, ShaderStage::Vertex),
            (FRAGMENT_ENTRY_POINT, ShaderStage::Fragment),
        ] {
            let found = module
                .entry_points
                .iter()
                .any(|ep| ep.name == name && ep.stage == stage);
            if !found {
                return Err(WaveError::ShaderCompile(format!(
                    "{}: missing {:?} entry point '{}'",
                    label, stage, name
                )));
            }
        }

        log::debug!(
            "{} validated ({} functions, {} entry points)",
            label,
            module.functions.len(),
            module.entry_points.len()
        );

        Ok(Self {
            label: label.to_string(),
            source: source.to_string(),
            module,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }
}

/// Values the vertex stage forwards to the fragment stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    /// Displaced local position
    pub position: Vec3,
    pub uv: Vec2,
    /// Post-displacement z, drives the texture offset
    pub wave_height: f32,
}

/// Noise displacement along local z for a position at `elapsed_time`
pub fn displacement(position: Vec3, elapsed_time: f32) -> f32 {
    let noise_pos = Vec3::new(
        position.x * NOISE_FREQUENCY + elapsed_time,
        position.y,
        position.z,
    );
    crate::noise::simplex3(noise_pos) * NOISE_AMPLITUDE
}

/// CPU mirror of `vs_main` (without the clip-space transform)
pub fn run_vertex(vertex: &Vertex, elapsed_time: f32) -> VertexOutput {
    let mut position = Vec3::from_array(vertex.position);
    position.z += displacement(position, elapsed_time);

    VertexOutput {
        position,
        uv: Vec2::from_array(vertex.uv),
        wave_height: position.z,
    }
}

/// Clip-space position for a vertex stage output
pub fn clip_position(output: &VertexOutput, model_view_proj: Mat4) -> Vec4 {
    model_view_proj * output.position.extend(1.0)
}

/// Texture coordinate the fragment stage samples at
pub fn sample_coord(uv: Vec2, wave_height: f32) -> Vec2 {
    uv + Vec2::splat(wave_height * SAMPLE_OFFSET_SCALE)
}

/// CPU mirror of `fs_main`
pub fn run_fragment(
    input: &VertexOutput,
    texture: &TextureData,
    address_mode: TextureAddressMode,
) -> Vec4 {
    let coord = sample_coord(input.uv, input.wave_height);
    texture.sample(coord, address_mode).truncate().extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(position: [f32; 3], uv: [f32; 2]) -> Vertex {
        Vertex { position, uv }
    }

    #[test]
    fn test_wave_shader_validates() {
        let program = ShaderProgram::wave().expect("wave.wgsl should validate");
        assert_eq!(program.module().entry_points.len(), 2);
        assert_eq!(program.source(), WAVE_SHADER_SOURCE);
    }

    #[test]
    fn test_wgsl_constants_match_cpu_mirror() {
        for (name, value) in [
            ("NOISE_FREQUENCY", NOISE_FREQUENCY),
            ("NOISE_AMPLITUDE", NOISE_AMPLITUDE),
            ("SAMPLE_OFFSET_SCALE", SAMPLE_OFFSET_SCALE),
        ] {
            let line = format!("const {}: f32 = {:?};", name, value);
            assert!(
                WAVE_SHADER_SOURCE.contains(&line),
                "wave.wgsl is missing `{}`",
                line
            );
        }
    }

    #[test]
    fn test_syntax_error_is_compile_error() {
        let result = ShaderProgram::validate("Broken", "fn vs_main( -> {");
        assert!(matches!(result, Err(WaveError::ShaderCompile(_))));
    }

    #[test]
    fn test_type_error_is_compile_error() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return vec3<f32>(0.0);
            }
        "#;
        let result = ShaderProgram::validate("Mistyped", source);
        assert!(matches!(result, Err(WaveError::ShaderCompile(_))));
    }

    #[test]
    fn test_missing_fragment_stage_is_compile_error() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return vec4<f32>(0.0, 0.0, 0.0, 1.0);
            }
        "#;
        match ShaderProgram::validate("Vertex Only", source) {
            Err(WaveError::ShaderCompile(msg)) => assert!(msg.contains(FRAGMENT_ENTRY_POINT)),
            other => panic!("expected compile error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_displacement_at_origin() {
        let expected = crate::noise::noise3(0.0, 0.0, 0.0) * NOISE_AMPLITUDE;
        assert_eq!(displacement(Vec3::ZERO, 0.0), expected);
        // Pinned reference value
        assert!((expected - (-0.103_049_7)).abs() < 1e-5);
    }

    #[test]
    fn test_vertex_stage_is_pure() {
        let v = vertex([0.12, -0.25, 0.0], [0.8, 0.1]);
        let a = run_vertex(&v, 3.75);
        let b = run_vertex(&v, 3.75);
        assert_eq!(a, b);
    }

    #[test]
    fn test_vertex_stage_displaces_z_only() {
        let v = vertex([0.2, 0.3, 0.0], [0.5, 0.25]);
        let out = run_vertex(&v, 0.0);

        assert_eq!(out.position.x, 0.2);
        assert_eq!(out.position.y, 0.3);
        assert_eq!(out.uv, Vec2::new(0.5, 0.25));
        assert_eq!(out.wave_height, out.position.z);

        let expected = crate::noise::noise3(0.2 * NOISE_FREQUENCY, 0.3, 0.0) * NOISE_AMPLITUDE;
        assert_eq!(out.position.z, expected);
    }

    #[test]
    fn test_time_scrolls_noise_along_x() {
        // Advancing time by t samples the same noise as moving x by t / frequency
        let v = vertex([0.1, 0.2, 0.0], [0.0, 0.0]);
        let t = 0.6;
        let shifted = vertex([0.1 + t / NOISE_FREQUENCY, 0.2, 0.0], [0.0, 0.0]);
        let a = run_vertex(&v, t).wave_height;
        let b = run_vertex(&shifted, 0.0).wave_height;
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    fn test_displacement_continuous_in_time() {
        let position = Vec3::new(0.137, -0.211, 0.0);
        let step = 1.0 / 240.0;
        let mut previous = displacement(position, 0.0);
        for frame in 1..2400 {
            let current = displacement(position, frame as f32 * step);
            assert!(
                (current - previous).abs() < 0.01,
                "displacement jumped from {} to {} at frame {}",
                previous,
                current,
                frame
            );
            previous = current;
        }
    }

    #[test]
    fn test_displacement_bounded_by_amplitude() {
        for ix in 0..=16 {
            for iy in 0..=16 {
                let p = Vec3::new(ix as f32 * 0.025 - 0.2, 0.3 - iy as f32 * 0.0375, 0.0);
                for t in [0.0, 1.3, 17.9, 250.0] {
                    let d = displacement(p, t);
                    assert!(d.abs() <= NOISE_AMPLITUDE * 1.05);
                }
            }
        }
    }

    #[test]
    fn test_sample_coord_offsets_both_axes() {
        let uv = Vec2::new(0.25, 0.75);
        let wave = -0.125;
        let coord = sample_coord(uv, wave);
        assert_eq!(coord, Vec2::new(0.25 + wave * 0.4, 0.75 + wave * 0.4));
    }

    #[test]
    fn test_fragment_alpha_is_opaque() {
        let texture = TextureData::solid([10, 200, 30, 0]);
        let input = VertexOutput {
            position: Vec3::ZERO,
            uv: Vec2::new(0.5, 0.5),
            wave_height: 0.1,
        };
        let color = run_fragment(&input, &texture, TextureAddressMode::Repeat);
        assert_eq!(color.w, 1.0);
        assert!((color.y - 200.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_position_uses_displaced_point() {
        let out = VertexOutput {
            position: Vec3::new(0.1, 0.2, 0.05),
            uv: Vec2::ZERO,
            wave_height: 0.05,
        };
        let clip = clip_position(&out, Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(clip, Vec4::new(1.1, 0.2, 0.05, 1.0));
    }
}

//! Material setup: base color and texture addressing.

use clap::ValueEnum;

/// How texture coordinates outside [0, 1] are resolved.
///
/// The fragment stage pushes coordinates past the edge wherever the surface
/// is displaced, so this choice is visible at the plane borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TextureAddressMode {
    /// Tile the image
    #[default]
    Repeat,
    /// Stretch the edge texels
    ClampToEdge,
    /// Tile with every other copy mirrored
    MirrorRepeat,
}

impl From<TextureAddressMode> for wgpu::AddressMode {
    fn from(mode: TextureAddressMode) -> Self {
        match mode {
            TextureAddressMode::Repeat => wgpu::AddressMode::Repeat,
            TextureAddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            TextureAddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

impl TextureAddressMode {
    /// Resolve a texel index (possibly out of range) into `0..size`
    pub fn resolve(self, index: i64, size: u32) -> u32 {
        let size = size.max(1) as i64;
        let resolved = match self {
            Self::Repeat => index.rem_euclid(size),
            Self::ClampToEdge => index.clamp(0, size - 1),
            Self::MirrorRepeat => {
                let period = index.rem_euclid(size * 2);
                if period < size {
                    period
                } else {
                    size * 2 - 1 - period
                }
            }
        };
        resolved as u32
    }
}

/// Initial material state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Base color uniform (sRGB, 0..1). Bound but not blended by the shader.
    pub base_color: [f32; 3],

    /// Sampler addressing for out-of-range texture coordinates
    pub address_mode: TextureAddressMode,

    /// Flip decoded images vertically so the first image row lands at uv.v = 1
    pub flip_y: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            // hotpink, #ff69b4
            base_color: [1.0, 105.0 / 255.0, 180.0 / 255.0],
            address_mode: TextureAddressMode::Repeat,
            flip_y: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_wraps_both_directions() {
        let mode = TextureAddressMode::Repeat;
        assert_eq!(mode.resolve(-1, 4), 3);
        assert_eq!(mode.resolve(4, 4), 0);
        assert_eq!(mode.resolve(9, 4), 1);
    }

    #[test]
    fn test_clamp_holds_edges() {
        let mode = TextureAddressMode::ClampToEdge;
        assert_eq!(mode.resolve(-7, 4), 0);
        assert_eq!(mode.resolve(2, 4), 2);
        assert_eq!(mode.resolve(12, 4), 3);
    }

    #[test]
    fn test_mirror_reflects() {
        let mode = TextureAddressMode::MirrorRepeat;
        assert_eq!(mode.resolve(4, 4), 3);
        assert_eq!(mode.resolve(7, 4), 0);
        assert_eq!(mode.resolve(-1, 4), 0);
        assert_eq!(mode.resolve(-5, 4), 3);
    }
}

//! Command-line argument parsing.

use clap::Parser;

use crate::params::{MaterialParams, RenderConfig, TextureAddressMode};
use crate::texture::TextureSource;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavesheet")]
#[command(about = "Noise-displaced textured plane", long_about = None)]
pub struct Args {
    /// Image file or http(s) URL to texture the plane with
    #[arg(long, value_name = "PATH|URL", default_value_t = TextureSource::default())]
    pub texture: TextureSource,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Vertical field of view (degrees)
    #[arg(long, value_name = "DEGREES", default_value = "10", value_parser = parse_fov)]
    pub fov: f32,

    /// How texture lookups past the image edge are resolved
    #[arg(long, value_enum, default_value_t = TextureAddressMode::Repeat)]
    pub address_mode: TextureAddressMode,

    /// Base color uniform as R,G,B in 0..1 (default: hotpink)
    #[arg(long, value_name = "R,G,B", value_parser = parse_color)]
    pub color: Option<[f32; 3]>,
}

impl Args {
    /// Window/camera and material configuration for these arguments
    pub fn to_configs(&self) -> (RenderConfig, MaterialParams) {
        let render = RenderConfig {
            window_width: self.width,
            window_height: self.height,
            fov_degrees: self.fov,
            ..Default::default()
        };

        let defaults = MaterialParams::default();
        let material = MaterialParams {
            base_color: self.color.unwrap_or(defaults.base_color),
            address_mode: self.address_mode,
            ..defaults
        };

        (render, material)
    }
}

fn parse_fov(s: &str) -> Result<f32, String> {
    let fov: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if !(fov > 0.0 && fov < 180.0) {
        return Err(format!("field of view must be between 0 and 180 degrees, got {}", fov));
    }
    Ok(fov)
}

fn parse_color(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got '{}'", s));
    };

    let mut color = [0.0; 3];
    for (channel, text) in color.iter_mut().zip([r, g, b]) {
        let value: f32 = text
            .parse()
            .map_err(|_| format!("'{}' is not a number", text))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("color channel {} is outside 0..1", value));
        }
        *channel = value;
    }
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wavesheet").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.texture, TextureSource::default());
        assert_eq!(args.address_mode, TextureAddressMode::Repeat);

        let (render, material) = args.to_configs();
        assert_eq!(render.fov_degrees, 10.0);
        assert_eq!((render.window_width, render.window_height), (1280, 720));
        assert_eq!(material, MaterialParams::default());
    }

    #[test]
    fn test_local_texture_and_overrides() {
        let args = parse(&[
            "--texture",
            "photo.png",
            "--address-mode",
            "clamp-to-edge",
            "--color",
            "0.5, 0.25 ,1",
            "--fov",
            "45",
        ]);
        assert_eq!(args.texture, TextureSource::Path("photo.png".into()));

        let (render, material) = args.to_configs();
        assert_eq!(render.fov_degrees, 45.0);
        assert_eq!(material.address_mode, TextureAddressMode::ClampToEdge);
        assert_eq!(material.base_color, [0.5, 0.25, 1.0]);
        assert!(material.flip_y);
    }

    #[test]
    fn test_url_texture() {
        let args = parse(&["--texture", "https://example.com/a.jpg"]);
        assert_eq!(
            args.texture,
            TextureSource::Url("https://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(parse_color("1,0").is_err());
        assert!(parse_color("1,0,x").is_err());
        assert!(parse_color("1,0,2").is_err());
        assert!(Args::try_parse_from(["wavesheet", "--color", "red"]).is_err());
    }

    #[test]
    fn test_bad_fov_rejected() {
        assert!(parse_fov("0").is_err());
        assert!(parse_fov("180").is_err());
        assert!(parse_fov("NaN").is_err());
        assert_eq!(parse_fov("30"), Ok(30.0));
    }
}

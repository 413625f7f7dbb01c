//! Texture sources, decoding, and background loading.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::task::Poll;
use std::thread;

use glam::{Vec2, Vec4};
use image::DynamicImage;

use crate::error::{Result, WaveError};
use crate::params::TextureAddressMode;

/// Photograph the wave is textured with unless told otherwise
pub const DEFAULT_TEXTURE_URL: &str = "https://static.langimg.com/thumb/msid-88634667,imgsize-40988,width-700,height-525,resizemode-75/navbharat-times.jpg";

/// Largest download accepted for a remote texture (bytes)
const MAX_DOWNLOAD_BYTES: u64 = 32 * 1024 * 1024;

/// Where a texture comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Local image file
    Path(PathBuf),
    /// `http://` or `https://` URL
    Url(String),
}

impl FromStr for TextureSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl Default for TextureSource {
    fn default() -> Self {
        Self::Url(DEFAULT_TEXTURE_URL.to_string())
    }
}

/// Decoded RGBA8 image, first row at the top of the picture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Convert a decoded image, optionally flipping it upside down
    pub fn from_image(img: DynamicImage, flip_y: bool) -> Self {
        let img = if flip_y { img.flipv() } else { img };
        let rgba = img.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) held in memory
    pub fn decode(bytes: &[u8], name: &str, flip_y: bool) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| WaveError::texture_load(name, e))?;
        Ok(Self::from_image(img, flip_y))
    }

    /// 1x1 texture of a single color
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Bytes per row of tightly packed pixels
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Texel at integer coordinates, normalized to 0..1
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        let offset = ((y * self.width + x) * 4) as usize;
        let px = &self.pixels[offset..offset + 4];
        Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0
    }

    /// Bilinear sample at `uv`, resolving out-of-range texels with `mode`.
    ///
    /// Mirrors a linear-filtered GPU sampler: texel centers sit at
    /// `(i + 0.5) / size`, and `uv = (0, 0)` is the first stored texel.
    pub fn sample(&self, uv: Vec2, mode: TextureAddressMode) -> Vec4 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let fetch = |dx: i64, dy: i64| {
            let tx = mode.resolve(x0 as i64 + dx, self.width);
            let ty = mode.resolve(y0 as i64 + dy, self.height);
            self.texel(tx, ty)
        };

        let top = fetch(0, 0).lerp(fetch(1, 0), fx);
        let bottom = fetch(0, 1).lerp(fetch(1, 1), fx);
        top.lerp(bottom, fy)
    }
}

/// Fetch and decode a texture, blocking the calling thread
pub fn load_texture(source: &TextureSource, flip_y: bool) -> Result<TextureData> {
    let name = source.to_string();
    match source {
        TextureSource::Path(path) => {
            let img = image::open(path).map_err(|e| WaveError::texture_load(&name, e))?;
            Ok(TextureData::from_image(img, flip_y))
        }
        TextureSource::Url(url) => {
            log::info!("Downloading texture from {}", url);
            let response = ureq::get(url)
                .call()
                .map_err(|e| WaveError::texture_load(&name, e))?;

            let mut bytes = Vec::new();
            response
                .into_reader()
                .take(MAX_DOWNLOAD_BYTES)
                .read_to_end(&mut bytes)
                .map_err(|e| WaveError::texture_load(&name, e))?;

            log::debug!("Downloaded {} bytes from {}", bytes.len(), url);
            TextureData::decode(&bytes, &name, flip_y)
        }
    }
}

/// Texture load running off the render thread.
///
/// Polled once per frame; resolves exactly once to the decoded image or a
/// load error.
pub struct TextureLoader {
    source_name: String,
    receiver: Receiver<Result<TextureData>>,
}

impl TextureLoader {
    /// Start loading `source` on a background thread
    pub fn spawn(source: TextureSource, flip_y: bool) -> Self {
        let source_name = source.to_string();
        let (sender, receiver) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || {
                let result = load_texture(&source, flip_y);
                // Receiver gone means the mesh was unmounted first
                let _ = sender.send(result);
            });

        if let Err(e) = spawned {
            log::error!("Failed to start texture loader: {}", e);
        }

        Self::from_channel(source_name, receiver)
    }

    /// Loader fed by an existing channel; resolves on the first message
    pub fn from_channel(
        source_name: impl Into<String>,
        receiver: Receiver<Result<TextureData>>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            receiver,
        }
    }

    /// Loader that has already resolved to `result`
    pub fn resolved(source_name: impl Into<String>, result: Result<TextureData>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(result);
        Self::from_channel(source_name, receiver)
    }

    /// Loader for an image already in memory
    pub fn ready(data: TextureData) -> Self {
        Self::resolved("memory", Ok(data))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Check for a finished load without blocking
    pub fn poll(&self) -> Poll<Result<TextureData>> {
        match self.receiver.try_recv() {
            Ok(result) => Poll::Ready(result),
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => Poll::Ready(Err(WaveError::texture_load(
                &self.source_name,
                "loader stopped without a result",
            ))),
        }
    }
}

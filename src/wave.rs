//! The wave mesh: plane geometry, material, and frame driver tied together
//! through mount, per-frame drive, and unmount.

use std::task::Poll;
use std::time::Instant;

use glam::Vec3;

use crate::backend::{DrawCall, RenderBackend};
use crate::error::{Result, WaveError};
use crate::frame::FrameDriver;
use crate::material::{report_binding_error, UniformName, WaveMaterial};
use crate::mesh::PlaneGeometry;
use crate::params::MaterialParams;
use crate::texture::TextureLoader;

/// Texture/material readiness
enum MeshState<B: RenderBackend> {
    /// Texture still loading; frames draw nothing
    Pending(TextureLoader),
    /// Material created; frames draw the wave
    Ready(WaveMaterial<B>),
    /// Texture could not be loaded or uploaded; frames draw nothing
    Failed,
    /// Unmounted
    Released,
}

/// What a frame ended up doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The wave was drawn with this elapsed time
    Drawn { elapsed: f32 },
    /// Texture still loading, target cleared only
    Pending,
    /// Texture failed, target cleared only
    Unavailable,
    /// Not mounted (or already unmounted); nothing submitted
    Idle,
}

/// One noise-displaced, textured plane
pub struct WaveMesh<B: RenderBackend> {
    geometry: Option<B::Geometry>,
    state: MeshState<B>,
    driver: FrameDriver,
    base_color: Vec3,
}

impl<B: RenderBackend> WaveMesh<B> {
    /// Upload the plane, start the clock, and take the texture.
    ///
    /// A loader that has already resolved gets its texture and material
    /// created here; otherwise the first frames keep polling it.
    pub fn mount(
        backend: &mut B,
        plane: &PlaneGeometry,
        params: &MaterialParams,
        loader: TextureLoader,
        now: Instant,
    ) -> Result<Self> {
        let geometry = backend.upload_geometry(plane)?;

        let mut driver = FrameDriver::new();
        driver.start(now);

        log::info!(
            "Wave mesh mounted ({} vertices), waiting on texture {}",
            plane.vertices().len(),
            loader.source_name()
        );

        let mut mesh = Self {
            geometry: Some(geometry),
            state: MeshState::Pending(loader),
            driver,
            base_color: Vec3::from_array(params.base_color),
        };
        mesh.poll_texture(backend);
        Ok(mesh)
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, MeshState::Ready(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, MeshState::Released)
    }

    pub fn material(&self) -> Option<&WaveMaterial<B>> {
        match &self.state {
            MeshState::Ready(material) => Some(material),
            _ => None,
        }
    }

    /// Change the base color uniform (kept for the material once it exists)
    pub fn set_base_color(&mut self, color: Vec3) {
        match &mut self.state {
            MeshState::Ready(material) => {
                if let Err(e) = material.set_base_color(color) {
                    report_binding_error(e);
                    return;
                }
            }
            MeshState::Released => {
                report_binding_error(WaveError::UniformBinding(UniformName::BaseColor.as_str()));
                return;
            }
            MeshState::Pending(_) | MeshState::Failed => {}
        }
        self.base_color = color;
    }

    /// Drive one host frame: advance time, write it, and draw.
    ///
    /// Texture-not-ready frames clear the target and are retried on the next
    /// call. Errors returned here come from frame submission only.
    pub fn frame(&mut self, backend: &mut B, now: Instant) -> Result<FrameOutcome> {
        let Some(elapsed) = self.driver.tick(now) else {
            return Ok(FrameOutcome::Idle);
        };

        self.poll_texture(backend);

        let material = match &mut self.state {
            MeshState::Ready(material) => material,
            MeshState::Failed => {
                backend.render(None)?;
                return Ok(FrameOutcome::Unavailable);
            }
            MeshState::Pending(_) | MeshState::Released => {
                backend.render(None)?;
                return Ok(FrameOutcome::Pending);
            }
        };
        let Some(geometry) = self.geometry.as_ref() else {
            return Ok(FrameOutcome::Idle);
        };

        if let Err(e) = material.set_elapsed_time(elapsed) {
            report_binding_error(e);
            return Ok(FrameOutcome::Idle);
        }

        let bound = match material.bind(backend) {
            Ok(bound) => bound,
            Err(e) => {
                report_binding_error(e);
                return Ok(FrameOutcome::Idle);
            }
        };

        backend.render(Some(DrawCall {
            material: bound,
            geometry,
        }))?;

        log::debug!("Frame {} drawn at {:.3}s", self.driver.frame_count(), elapsed);
        Ok(FrameOutcome::Drawn { elapsed })
    }

    /// Stop the clock and release every GPU handle. Safe to call repeatedly;
    /// returns true only on the call that actually released.
    pub fn unmount(&mut self, backend: &mut B) -> bool {
        if self.is_released() {
            return false;
        }

        self.driver.stop();

        // Dropping a pending loader detaches it; its thread finishes on its own
        if let MeshState::Ready(mut material) =
            std::mem::replace(&mut self.state, MeshState::Released)
        {
            material.destroy(backend);
        }

        if let Some(geometry) = self.geometry.take() {
            backend.release_geometry(geometry);
        }

        log::info!(
            "Wave mesh unmounted after {} frames",
            self.driver.frame_count()
        );
        true
    }

    /// Pending → Ready (upload + material) or Failed
    fn poll_texture(&mut self, backend: &mut B) {
        let MeshState::Pending(loader) = &self.state else {
            return;
        };

        let data = match loader.poll() {
            Poll::Pending => return,
            Poll::Ready(Ok(data)) => data,
            Poll::Ready(Err(e)) => {
                log::error!("{}", e);
                self.state = MeshState::Failed;
                return;
            }
        };

        log::info!(
            "Texture {} ready ({}x{})",
            loader.source_name(),
            data.width,
            data.height
        );

        let material = backend
            .upload_texture(&data)
            .and_then(|texture| WaveMaterial::create(backend, self.base_color, texture));

        self.state = match material {
            Ok(material) => MeshState::Ready(material),
            Err(e) => {
                log::error!("Failed to create wave material: {}", e);
                MeshState::Failed
            }
        };
    }
}

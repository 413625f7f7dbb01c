//! Frame driver: turns host frame timestamps into the elapsed-time uniform.

use std::time::Instant;

/// Lifecycle of the per-frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameState {
    /// Created, not yet mounted
    Unstarted,
    /// Mounted; elapsed time counts from `started_at`
    Running {
        started_at: Instant,
        last_elapsed: f32,
    },
    /// Unmounted; no further ticks
    Stopped,
}

/// Single writer of the elapsed-time uniform.
///
/// Elapsed time starts at 0 on mount and never decreases while running,
/// even if the host hands back an earlier timestamp.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: FrameState,
    frames: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            state: FrameState::Unstarted,
            frames: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, FrameState::Running { .. })
    }

    /// Frames ticked since start
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Most recent elapsed time, if running
    pub fn elapsed(&self) -> Option<f32> {
        match self.state {
            FrameState::Running { last_elapsed, .. } => Some(last_elapsed),
            _ => None,
        }
    }

    /// Unstarted → Running. Returns false (and changes nothing) otherwise.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.state {
            FrameState::Unstarted => {
                self.state = FrameState::Running {
                    started_at: now,
                    last_elapsed: 0.0,
                };
                true
            }
            state => {
                log::warn!("Frame driver start ignored in state {:?}", state);
                false
            }
        }
    }

    /// Advance to `now` and return the elapsed seconds to write before the draw
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let FrameState::Running {
            started_at,
            last_elapsed,
        } = self.state
        else {
            return None;
        };

        let elapsed = now
            .saturating_duration_since(started_at)
            .as_secs_f32()
            .max(last_elapsed);

        self.state = FrameState::Running {
            started_at,
            last_elapsed: elapsed,
        };
        self.frames += 1;
        Some(elapsed)
    }

    /// Enter Stopped. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == FrameState::Stopped {
            return false;
        }
        self.state = FrameState::Stopped;
        true
    }
}

//! Frame driver
//!
//! Each frame clears the surface, advances the field one step and redraws
//! it. The host calls [`RenderLoop::frame`] once per display refresh and
//! re-requests the next callback itself; there is no pause or stop.

use crate::renderer::DrawSurface;
use crate::sim::{SimState, tick};

/// Frames in the rolling FPS window
const FPS_WINDOW: usize = 60;

/// Per-session frame driver
#[derive(Debug, Clone)]
pub struct RenderLoop {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::start()
    }
}

impl RenderLoop {
    /// Start a loop. It is running from here on.
    pub fn start() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Frames per second over the last `FPS_WINDOW` frames (0 until known)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Run one frame at host time `time` (ms). Returns the number of balls
    /// that settled this frame. The frame count lives in `SimState::frame`.
    pub fn frame<S: DrawSurface + ?Sized>(
        &mut self,
        state: &mut SimState,
        surface: &mut S,
        time: f64,
    ) -> usize {
        surface.clear();
        let settled = tick(state, surface);

        self.track_fps(time);
        settled
    }

    /// Run frames back to back at `frame_ms` spacing until every ball rests
    /// or `state.frame` reaches `max_frames`. Returns true if everything rests.
    pub fn run_until_resting<S: DrawSurface + ?Sized>(
        &mut self,
        state: &mut SimState,
        surface: &mut S,
        frame_ms: f64,
        max_frames: u64,
    ) -> bool {
        while state.field.resting_count() < state.field.len() {
            if state.frame >= max_frames {
                return false;
            }
            let time = (state.frame + 1) as f64 * frame_ms;
            self.frame(state, surface, time);
        }
        true
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we will overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

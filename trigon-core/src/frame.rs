/// Per-frame context handed from the driver to the renderer
use std::time::Duration;

use crate::camera::Camera;
use crate::geometry::Vec3;

/// Snapshot of the directional controls for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub forward: bool,
    pub back: bool,
    pub quit: bool,
}

impl InputState {
    /// Camera displacement for this frame, `step` units per held direction.
    ///
    /// Screen y grows downwards, so `up` moves towards -y.
    pub fn movement(&self, step: f32) -> Vec3 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0.0,
        };
        Vec3::new(
            axis(self.left, self.right),
            axis(self.up, self.down),
            axis(self.back, self.forward),
        )
    }
}

/// Everything a single render call may read
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub camera: &'a Camera,
    pub input: InputState,
    /// Time since the previous frame
    pub elapsed: Duration,
    pub frame: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self {
            camera,
            input: InputState::default(),
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }
}

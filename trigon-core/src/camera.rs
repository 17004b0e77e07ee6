/// Camera: world-to-view transform plus perspective projection
use crate::geometry::Vec3;
use crate::transform::{Euler, TransformChain, Transformation};

const TRANSLATE: usize = 0;
const ROTATE: usize = 1;
const PROJECT: usize = 2;

/// Focal distance used by [`Camera::default`]
pub const DEFAULT_DISTANCE: f32 = 640.0;

/// A camera looking down +z from `position`.
///
/// Its chain always has exactly three stages, applied in order:
/// the inverse translation, the rotation, and the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    chain: TransformChain,
}

impl Camera {
    /// Camera at the origin with no rotation and focal distance `distance`
    pub fn new(distance: f32) -> Self {
        let chain = [
            Transformation::Translate(Vec3::zeros()),
            Transformation::Identity,
            Transformation::projection(distance),
        ]
        .into_iter()
        .collect();
        Self {
            position: Vec3::zeros(),
            chain,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the camera; world space is shifted by `-p` so the camera sits at the origin
    pub fn set_position(&mut self, p: Vec3) {
        self.position = p;
        self.chain.set(TRANSLATE, Transformation::Translate(-p));
    }

    pub fn translate_by(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }

    pub fn set_rotation(&mut self, angles: Euler) {
        self.chain.set(ROTATE, Transformation::Rotation(angles));
    }

    /// Replace the projection stage, usually with a [`Transformation::Projection`]
    pub fn set_projection(&mut self, projection: Transformation) {
        self.chain.set(PROJECT, projection);
    }

    /// The world-to-screen chain objects append after their own
    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.chain.apply(v)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::DepthMode;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.chain().len(), 3);
        assert_eq!(camera.position(), Vec3::zeros());
        assert_eq!(camera.apply(Vec3::new(3.0, 4.0, 0.0)), Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_position_shifts_world() {
        let mut camera = Camera::new(100.0);
        camera.set_position(Vec3::new(10.0, -5.0, -100.0));
        // (10, -5, 0) is straight ahead, 100 units away: f = 0.5
        let v = camera.apply(Vec3::new(10.0, -5.0, 0.0));
        assert!((v - Vec3::new(0.0, 0.0, 100.0)).norm() < 1e-5);

        camera.translate_by(Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(camera.position(), Vec3::new(10.0, -5.0, -50.0));
        assert_eq!(camera.chain().len(), 3);
    }

    #[test]
    fn test_stage_order_is_fixed() {
        let mut camera = Camera::new(1.0);
        camera.set_projection(Transformation::Identity);
        camera.set_rotation(Euler::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        camera.set_position(Vec3::new(1.0, 0.0, 0.0));
        // Translate first, then rotate: (2, 0, 0) -> (1, 0, 0) -> (0, -1, 0)
        let v = camera.apply(Vec3::new(2.0, 0.0, 0.0));
        assert!((v - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-5);
        let stages: Vec<_> = camera.chain().iter().copied().collect();
        assert_eq!(stages[0], Transformation::translate(-1.0, -0.0, -0.0));
        assert_eq!(stages[2], Transformation::Identity);
    }

    #[test]
    fn test_set_projection_replaces_stage() {
        let mut camera = Camera::default();
        camera.set_projection(Transformation::Projection {
            distance: 10.0,
            depth: DepthMode::Collapse,
        });
        let v = camera.apply(Vec3::new(10.0, 0.0, 10.0));
        assert!((v - Vec3::new(5.0, 0.0, 5.0)).norm() < 1e-5);
    }
}

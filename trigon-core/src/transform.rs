/// Transformation stages and ordered transformation chains
use crate::geometry::Vec3;

/// Euler angles (in radians) for the yaw-pitch-roll rotation stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// What the projection stage does with the depth component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Keep the camera-space z so faces can be depth sorted afterwards.
    #[default]
    Preserve,
    /// Overwrite z with `z * f` like x and y.
    Collapse,
}

/// A single stage of a transformation chain
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transformation {
    #[default]
    Identity,
    Translate(Vec3),
    Scale(Vec3),
    Rotation(Euler),
    /// Perspective divide with focal distance `distance`.
    ///
    /// `f = d / (z + d)`; the division is unguarded, so a vertex at
    /// `z == -d` yields non-finite coordinates.
    Projection { distance: f32, depth: DepthMode },
}

impl Transformation {
    pub fn translate(dx: f32, dy: f32, dz: f32) -> Self {
        Self::Translate(Vec3::new(dx, dy, dz))
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::Scale(Vec3::new(sx, sy, sz))
    }

    pub fn rotation(rx: f32, ry: f32, rz: f32) -> Self {
        Self::Rotation(Euler::new(rx, ry, rz))
    }

    pub fn projection(distance: f32) -> Self {
        Self::Projection {
            distance,
            depth: DepthMode::Preserve,
        }
    }

    /// Apply this stage to one vector, producing a new one
    pub fn apply(&self, v: Vec3) -> Vec3 {
        match *self {
            Self::Identity => v,
            Self::Translate(d) => v + d,
            Self::Scale(s) => v.component_mul(&s),
            Self::Rotation(angles) => rotate(&angles, v),
            Self::Projection { distance, depth } => {
                let f = distance / (v.z + distance);
                let z = match depth {
                    DepthMode::Preserve => v.z,
                    DepthMode::Collapse => v.z * f,
                };
                Vec3::new(v.x * f, v.y * f, z)
            }
        }
    }
}

// Rotate Y, then X, then Z, expanded into a single set of products.
// The x term of the z row is the orthonormal completion of the other two
// rows (c2 * s1); every other coefficient keeps its established sign.
fn rotate(angles: &Euler, v: Vec3) -> Vec3 {
    let (s1, c1) = angles.y.sin_cos();
    let (s2, c2) = angles.x.sin_cos();
    let (s3, c3) = angles.z.sin_cos();

    let x = v.x * (s1 * s2 * s3 + c1 * c3) + v.y * (c2 * s3) + v.z * (c1 * s2 * s3 - c3 * s1);
    let y = v.x * (c3 * s1 * s2 - c1 * s3) + v.y * (c2 * c3) + v.z * (c1 * c3 * s2 + s1 * s3);
    let z = v.x * (c2 * s1) + v.y * (-s2) + v.z * (c1 * c2);

    Vec3::new(x, y, z)
}

/// An ordered sequence of transformation stages, applied left to right
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformChain {
    stages: Vec<Transformation>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, t: Transformation) {
        self.stages.push(t);
    }

    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Replace the stage at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn set(&mut self, index: usize, t: Transformation) {
        self.stages[index] = t;
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.stages.iter()
    }

    /// Fold `v` through every stage; an empty chain is the identity
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.stages.iter().fold(v, |acc, t| t.apply(acc))
    }
}

impl FromIterator<Transformation> for TransformChain {
    fn from_iter<I: IntoIterator<Item = Transformation>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = TransformChain::new();
        for v in [Vec3::zeros(), Vec3::new(1.5, -2.0, 300.0), Vec3::new(-7.0, 0.25, -1.0)] {
            assert_eq!(chain.apply(v), v);
        }
        assert_eq!(Transformation::Identity.apply(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_translate_and_inverse() {
        let chain: TransformChain = [
            Transformation::translate(12.5, -3.0, 400.0),
            Transformation::translate(-12.5, 3.0, -400.0),
        ]
        .into_iter()
        .collect();
        let v = Vec3::new(3.0, 4.0, 5.0);
        assert!(close(chain.apply(v), v));
    }

    #[test]
    fn test_scale() {
        let v = Transformation::scale(2.0, 0.5, -1.0).apply(Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(v, Vec3::new(6.0, 2.0, -5.0));
    }

    #[test]
    fn test_chain_order() {
        let mut chain = TransformChain::new();
        chain.push(Transformation::scale(2.0, 2.0, 2.0));
        chain.push(Transformation::translate(1.0, 0.0, 0.0));
        assert_eq!(chain.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(3.0, 0.0, 0.0));

        chain.clear();
        chain.push(Transformation::translate(1.0, 0.0, 0.0));
        chain.push(Transformation::scale(2.0, 2.0, 2.0));
        assert_eq!(chain.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let vs = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-100.0, 0.5, 42.0), Vec3::new(0.0, 0.0, -9.0)];
        let angles = [(0.3, 1.1, -2.0), (FRAC_PI_2, 0.4, 0.9), (PI, -PI, 0.1), (0.0, 0.0, 0.0)];
        for v in vs {
            for (rx, ry, rz) in angles {
                let r = Transformation::rotation(rx, ry, rz).apply(v);
                assert!((r.norm() - v.norm()).abs() < 1e-3 * v.norm().max(1.0));
            }
        }
    }

    #[test]
    fn test_rotation_about_z() {
        // rz alone: x' = x*c3 + y*s3, y' = -x*s3 + y*c3
        let r = Transformation::rotation(0.0, 0.0, FRAC_PI_2).apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(r, Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_rotation_about_y() {
        let r = Transformation::rotation(0.0, FRAC_PI_2, 0.0).apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(r, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotation_about_x() {
        let r = Transformation::rotation(FRAC_PI_2, 0.0, 0.0).apply(Vec3::new(0.0, 1.0, 0.0));
        assert!(close(r, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_projection_preserves_depth() {
        let t = Transformation::projection(640.0);
        let v = t.apply(Vec3::new(100.0, 50.0, 640.0));
        assert!(close(v, Vec3::new(50.0, 25.0, 640.0)));
    }

    #[test]
    fn test_projection_collapses_depth() {
        let t = Transformation::Projection {
            distance: 640.0,
            depth: DepthMode::Collapse,
        };
        let v = t.apply(Vec3::new(100.0, 50.0, 640.0));
        assert!(close(v, Vec3::new(50.0, 25.0, 320.0)));
    }

    #[test]
    fn test_projection_at_focal_plane_is_non_finite() {
        let v = Transformation::projection(10.0).apply(Vec3::new(1.0, 1.0, -10.0));
        assert!(!v.x.is_finite());
    }

    #[test]
    fn test_euler_rotate() {
        let mut e = Euler::zero();
        e.rotate(0.1, 0.2, 0.3);
        assert!((e.x - 0.1).abs() < 1e-6);
        assert!((e.y - 0.2).abs() < 1e-6);
        assert!((e.z - 0.3).abs() < 1e-6);
    }
}

/// Geometry primitives: vectors, trigons and indexed meshes
use nalgebra::{Point2, Vector3};

use crate::error::MeshError;

/// Three-component value type used for every vertex and normal
pub type Vec3 = Vector3<f32>;

/// Screen-space point
pub type Point = Point2<f32>;

/// A triangle face defined by three vertex indices.
///
/// Winding order is significant: it decides which way the face normal points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trigon {
    pub indices: [usize; 3],
}

impl Trigon {
    pub fn new(i0: usize, i1: usize, i2: usize) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }

    /// Same corners, opposite winding
    pub fn reversed(self) -> Self {
        let [a, b, c] = self.indices;
        Self::new(a, c, b)
    }
}

impl From<[usize; 3]> for Trigon {
    fn from(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// A fixed vertex list plus the trigons indexing into it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    trigons: Vec<Trigon>,
}

impl Mesh {
    /// Build a mesh, rejecting any trigon that indexes past the vertex list
    pub fn new(vertices: Vec<Vec3>, trigons: Vec<Trigon>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (triangle, t) in trigons.iter().enumerate() {
            if let Some(&index) = t.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, trigons })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn trigons(&self) -> &[Trigon] {
        &self.trigons
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn trigon_count(&self) -> usize {
        self.trigons.len()
    }

    /// Axis-aligned box with one corner at `origin` and extents `size`.
    ///
    /// Vertices 0..4 lie on the `origin.z` face, 4..8 on the far face, both
    /// in the order (x, y), (x+w, y), (x+w, y+h), (x, y+h). All twelve
    /// trigons wind so their normals point out of the box.
    pub fn cuboid(origin: Vec3, size: Vec3) -> Self {
        let (x, y, z) = (origin.x, origin.y, origin.z);
        let (w, h, d) = (size.x, size.y, size.z);

        let vertices = vec![
            Vec3::new(x, y, z),
            Vec3::new(x + w, y, z),
            Vec3::new(x + w, y + h, z),
            Vec3::new(x, y + h, z),
            Vec3::new(x, y, z + d),
            Vec3::new(x + w, y, z + d),
            Vec3::new(x + w, y + h, z + d),
            Vec3::new(x, y + h, z + d),
        ];

        let trigons = [
            // Near (z) and far (z + d)
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            // Top (y) and bottom (y + h)
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            // Left (x) and right (x + w)
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ]
        .into_iter()
        .map(Trigon::from)
        .collect();

        Self { vertices, trigons }
    }

    /// Cube of edge `size` centred on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        Self::cuboid(Vec3::new(-half, -half, -half), Vec3::new(size, size, size))
    }

    /// Rectangle in the plane `z = origin.z`, facing towards -z
    pub fn flat_quad(origin: Vec3, w: f32, h: f32) -> Self {
        let (x, y, z) = (origin.x, origin.y, origin.z);
        let vertices = vec![
            Vec3::new(x, y, z),
            Vec3::new(x + w, y, z),
            Vec3::new(x + w, y + h, z),
            Vec3::new(x, y + h, z),
        ];
        let trigons = vec![Trigon::new(0, 3, 1), Trigon::new(1, 3, 2)];
        Self { vertices, trigons }
    }
}

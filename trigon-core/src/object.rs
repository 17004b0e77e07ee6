/// Renderable objects and their per-frame caches
use crate::geometry::{Mesh, Point, Trigon, Vec3};
use crate::transform::{TransformChain, Transformation};

/// Coarse per-object gate, checked before any per-face work
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Culling {
    /// Always drawn.
    #[default]
    Never,
    /// Never drawn.
    Always,
    /// Skipped when every transformed vertex lies farther than this depth.
    BeyondDepth(f32),
}

/// A mesh placed in the world through its own transformation chain.
///
/// The mesh is fixed at construction; the chain is meant to be cleared and
/// rebuilt by the caller every frame.
#[derive(Debug, Clone, Default)]
pub struct Object {
    mesh: Mesh,
    transforms: TransformChain,
    culling: Culling,
}

impl Object {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            transforms: TransformChain::new(),
            culling: Culling::Never,
        }
    }

    pub fn with_culling(mut self, culling: Culling) -> Self {
        self.culling = culling;
        self
    }

    pub fn reset_transforms(&mut self) {
        self.transforms.clear();
    }

    /// Append a stage; stages apply in the order they were added
    pub fn add_transform(&mut self, t: Transformation) {
        self.transforms.push(t);
    }

    pub fn transforms(&self) -> &TransformChain {
        &self.transforms
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangles(&self) -> &[Trigon] {
        self.mesh.trigons()
    }

    pub fn culling(&self) -> Culling {
        self.culling
    }

    /// Whether the object takes part in this frame at all
    pub fn is_object_visible(&self, cache: &ObjectCache) -> bool {
        match self.culling {
            Culling::Never => true,
            Culling::Always => false,
            Culling::BeyondDepth(max) => cache.transformed.iter().any(|v| v.z <= max),
        }
    }
}

/// Normal of the face (v0, v1, v2), unnormalized.
///
/// The x and z terms are those of `(v0 - v1) x (v0 - v2)`; the y term has the
/// opposite sign. Only z decides visibility and x the shade, so culling and
/// shading match the cross product. The magnitude is twice the face area, so
/// a zero-area face gives a zero vector.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let (x0, y0, z0) = (v0.x, v0.y, v0.z);
    let (x1, y1, z1) = (v1.x, v1.y, v1.z);
    let (x2, y2, z2) = (v2.x, v2.y, v2.z);
    Vec3::new(
        (y0 - y1) * (z0 - z2) - (z0 - z1) * (y0 - y2),
        -((z0 - z1) * (x0 - x2) - (x0 - x1) * (z0 - z2)),
        (x0 - x1) * (y0 - y2) - (y0 - y1) * (x0 - x2),
    )
}

/// Scratch buffers derived from one object during one frame
#[derive(Debug, Clone, Default)]
pub struct ObjectCache {
    transformed: Vec<Vec3>,
    normals: Vec<Vec3>,
    projected: Vec<Point>,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every base vertex through the object's chain, then `extra` if given
    pub fn update_transformed_vertices(&mut self, object: &Object, extra: Option<&TransformChain>) {
        self.transformed.clear();
        self.transformed.reserve(object.vertex_count());
        self.transformed.extend(object.mesh.vertices().iter().map(|&v| {
            let v = object.transforms.apply(v);
            match extra {
                Some(chain) => chain.apply(v),
                None => v,
            }
        }));
    }

    /// One normal per triangle, from the transformed vertices.
    ///
    /// # Panics
    /// If called before [`update_transformed_vertices`](Self::update_transformed_vertices)
    /// for a non-empty object.
    pub fn compute_normals(&mut self, object: &Object) {
        let transformed = &self.transformed;
        self.normals.clear();
        self.normals.reserve(object.triangles().len());
        self.normals.extend(object.triangles().iter().map(|t| {
            let [a, b, c] = t.indices.map(|i| transformed[i]);
            face_normal(a, b, c)
        }));
    }

    /// A face is visible when its normal points towards the camera (negative z).
    ///
    /// A normal with zero z counts as hidden.
    pub fn is_face_visible(&self, i: usize) -> bool {
        self.normals[i].z < 0.0
    }

    /// Shift the transformed vertices into screen space around `screen_center`.
    ///
    /// The perspective divide is the projection stage at the end of the camera
    /// chain, already applied by the transform step.
    pub fn compute_projection(&mut self, screen_center: Point) {
        self.projected.clear();
        self.projected.reserve(self.transformed.len());
        self.projected.extend(
            self.transformed
                .iter()
                .map(|v| Point::new(screen_center.x + v.x, screen_center.y + v.y)),
        );
    }

    pub fn transformed(&self) -> &[Vec3] {
        &self.transformed
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn projected(&self) -> &[Point] {
        &self.projected
    }
}

/// Flat-shaded painter's-algorithm render pipeline
use log::{debug, trace};

use crate::camera::Camera;
use crate::frame::FrameContext;
use crate::geometry::{Point, Vec3};
use crate::object::{Object, ObjectCache};
use crate::surface::{Color, Surface};

/// How visible faces are handed to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Shaded, filled triangles.
    #[default]
    Filled,
    /// White triangle outlines.
    Wireframe,
}

/// A visible triangle ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Sum of the three camera-space z values; larger is farther away.
    pub depth: f32,
    pub shade: f32,
    pub color: Color,
    pub points: [Point; 3],
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub objects: usize,
    pub culled_objects: usize,
    pub faces_considered: usize,
    pub faces_drawn: usize,
}

/// Shade from the normal's x direction, remapped from [-1, 1] to [0, 1].
///
/// A zero normal divides by zero and yields NaN.
pub fn shade(normal: Vec3) -> f32 {
    normal.x / normal.norm() / 2.0 + 0.5
}

/// Order faces farthest first. The sort is stable, so equal depths keep
/// their collection order.
pub fn sort_faces(faces: &mut [Face]) {
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Runs the per-frame pipeline and owns its scratch memory
#[derive(Debug, Default)]
pub struct Renderer {
    mode: RenderMode,
    caches: Vec<ObjectCache>,
    faces: Vec<Face>,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Faces from the last frame, in draw order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Cache of the object at `index` from the last frame
    pub fn cache(&self, index: usize) -> Option<&ObjectCache> {
        self.caches.get(index)
    }

    /// Render one frame of `objects` as seen by `ctx.camera`
    pub fn render<S>(&mut self, objects: &[Object], ctx: &FrameContext<'_>, surface: &mut S) -> FrameStats
    where
        S: Surface + ?Sized,
    {
        let center = Point::new(surface.width() as f32 / 2.0, surface.height() as f32 / 2.0);
        let mut stats = self.collect_faces(objects, ctx.camera, center);
        sort_faces(&mut self.faces);

        for face in &self.faces {
            match self.mode {
                RenderMode::Filled => surface.fill_polygon(&face.points, face.color),
                RenderMode::Wireframe => surface.draw_line_loop(&face.points, Color::WHITE),
            }
        }
        stats.faces_drawn = self.faces.len();

        debug!(
            "frame {} (+{:?}): {} faces drawn of {} considered, {}/{} objects culled",
            ctx.frame,
            ctx.elapsed,
            stats.faces_drawn,
            stats.faces_considered,
            stats.culled_objects,
            stats.objects
        );
        stats
    }

    /// Transform, cull, project and shade every object, leaving the
    /// unsorted faces in [`faces`](Self::faces)
    pub fn collect_faces(&mut self, objects: &[Object], camera: &Camera, center: Point) -> FrameStats {
        let mut stats = FrameStats {
            objects: objects.len(),
            ..FrameStats::default()
        };

        self.faces.clear();
        self.caches.resize_with(objects.len(), ObjectCache::default);

        for (index, (object, cache)) in objects.iter().zip(&mut self.caches).enumerate() {
            cache.update_transformed_vertices(object, Some(camera.chain()));
            cache.compute_projection(center);

            if !object.is_object_visible(cache) {
                trace!("object {index} culled by {:?}", object.culling());
                stats.culled_objects += 1;
                continue;
            }

            cache.compute_normals(object);
            stats.faces_considered += object.triangles().len();

            for (i, t) in object.triangles().iter().enumerate() {
                if !cache.is_face_visible(i) {
                    continue;
                }
                let shade = shade(cache.normals()[i]);
                let [a, b, c] = t.indices;
                let z = cache.transformed();
                let p = cache.projected();
                self.faces.push(Face {
                    depth: z[a].z + z[b].z + z[c].z,
                    shade,
                    color: Color::grey(shade),
                    points: [p[a], p[b], p[c]],
                });
            }
        }
        stats
    }
}

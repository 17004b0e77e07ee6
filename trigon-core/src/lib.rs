/// Trigon Core Library - software flat-shaded 3D pipeline
///
/// Transformation chains, meshes and objects, an ASCII solid parser, a
/// camera, and a painter's-algorithm renderer that draws into any
/// [`Surface`].

pub mod camera;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod object;
pub mod render;
pub mod stl;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use error::{MeshError, StlError};
pub use frame::{FrameContext, InputState};
pub use geometry::{Mesh, Point, Trigon, Vec3};
pub use object::{Culling, Object, ObjectCache};
pub use render::{Face, FrameStats, RenderMode, Renderer};
pub use surface::{Color, DrawCommand, DrawList, Surface};
pub use transform::{DepthMode, Euler, TransformChain, Transformation};

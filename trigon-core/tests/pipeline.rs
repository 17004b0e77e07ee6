use trigon_core::stl::parse_ascii_stl;
use trigon_core::{
    Camera, DrawCommand, DrawList, FrameContext, Mesh, Object, Point, Renderer, Transformation,
    Trigon, Vec3,
};

const SCREEN_W: u32 = 1280;
const SCREEN_H: u32 = 720;

fn center() -> Point {
    Point::new(SCREEN_W as f32 / 2.0, SCREEN_H as f32 / 2.0)
}

fn render(objects: &[Object], camera: &Camera) -> (Renderer, DrawList) {
    let mut renderer = Renderer::default();
    let mut surface = DrawList::new(SCREEN_W, SCREEN_H);
    renderer.render(objects, &FrameContext::new(camera), &mut surface);
    (renderer, surface)
}

#[test]
fn projects_around_screen_center() {
    let mesh = Mesh::new(vec![Vec3::zeros(), Vec3::new(100.0, 0.0, 0.0)], Vec::new()).unwrap();
    let camera = Camera::new(640.0);
    let (renderer, _) = render(&[Object::new(mesh)], &camera);

    let projected = renderer.cache(0).unwrap().projected();
    assert_eq!(projected[0], Point::new(640.0, 360.0));
    assert_eq!(projected[1], Point::new(740.0, 360.0));
}

#[test]
fn distant_cube_is_foreshortened() {
    let camera = Camera::new(640.0);
    let near = Object::new(Mesh::cube(1.0));
    let mut far = Object::new(Mesh::cube(1.0));
    far.add_transform(Transformation::translate(0.0, 0.0, 500.0));

    let (renderer, _) = render(&[near, far], &camera);
    let near = renderer.cache(0).unwrap().projected();
    let far = renderer.cache(1).unwrap().projected();
    assert_eq!(near.len(), 8);

    for (n, f) in near.iter().zip(far) {
        let dn = (n - center()).norm();
        let df = (f - center()).norm();
        assert!(df < dn, "{f:?} should be closer to the center than {n:?}");
    }
}

#[test]
fn camera_position_matches_moving_the_world() {
    let mut moved = Object::new(Mesh::cube(50.0));
    moved.add_transform(Transformation::translate(20.0, -10.0, 300.0));
    let (by_object, _) = render(&[moved], &Camera::new(640.0));

    let mut camera = Camera::new(640.0);
    camera.set_position(Vec3::new(-20.0, 10.0, -300.0));
    let (by_camera, _) = render(&[Object::new(Mesh::cube(50.0))], &camera);

    assert_eq!(by_object.faces().len(), by_camera.faces().len());
    for (a, b) in by_object.faces().iter().zip(by_camera.faces()) {
        assert!((a.depth - b.depth).abs() < 1e-3);
        for (p, q) in a.points.iter().zip(&b.points) {
            assert!((p - q).norm() < 1e-3);
        }
    }
}

#[test]
fn nearer_objects_are_drawn_last() {
    let mut back = Object::new(Mesh::flat_quad(Vec3::new(-100.0, -100.0, 0.0), 200.0, 200.0));
    back.add_transform(Transformation::translate(0.0, 0.0, 800.0));
    let mut front = Object::new(Mesh::cube(40.0));
    front.add_transform(Transformation::rotation(0.4, 0.7, 0.0));
    front.add_transform(Transformation::translate(0.0, 0.0, 200.0));

    // Front first in the object list; depth order must still win.
    let (renderer, surface) = render(&[front, back], &Camera::new(640.0));
    let depths: Vec<f32> = renderer.faces().iter().map(|f| f.depth).collect();
    assert!(depths.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(depths[0], 2400.0);
    assert_eq!(surface.commands().len(), depths.len());
    assert!(matches!(surface.commands()[0], DrawCommand::Polygon { .. }));
}

#[test]
fn parsed_mesh_renders() {
    let input = "\
solid tri
facet normal 0 0 -1
outer loop
vertex 0 0 100
vertex 0 50 100
vertex 50 0 100
endloop
endfacet
facet normal 0 0 1
outer loop
vertex 0 0 100
vertex 50 0 100
vertex 0 50 100
endloop
endfacet
endsolid tri
";
    let parsed = parse_ascii_stl(input).unwrap();
    assert_eq!(parsed.mesh.trigons(), &[Trigon::new(0, 1, 2), Trigon::new(3, 4, 5)]);

    let (renderer, _) = render(&[Object::new(parsed.mesh)], &Camera::new(640.0));
    // Only the facet wound towards the camera survives culling.
    assert_eq!(renderer.faces().len(), 1);
    assert_eq!(renderer.faces()[0].depth, 300.0);
}

/// Example: render a single frame of an ASCII solid file to stdout
///
/// Usage: cargo run --example snapshot -- [path/to/file.stl] [cols] [rows]

use std::env;
use std::io;
use std::path::Path;
use trigon_core::Mesh;
use trigon_terminal::{load_mesh, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => load_mesh(Path::new(path))?.mesh,
        None => Mesh::cube(2.0),
    };
    let cols = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(80);
    let rows = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(24);

    let mut app = TerminalApp::with_size(mesh, AppConfig::default(), cols, rows);
    app.update();
    let stats = app.render_frame();

    for row in 0..app.surface().rows() {
        println!("{}", app.surface().row_text(row));
    }
    println!("{} of {} faces drawn", stats.faces_drawn, stats.faces_considered);
    Ok(())
}

/// Trigon terminal viewer
///
/// Renders an ASCII solid file (or a cube) with flat shading.
/// Controls:
///   - WASD / Arrow Keys: Move the camera
///   - +/-: Move the camera forward / back
///   - M: Toggle filled / wireframe
///   - Q/ESC: Quit
use std::env;
use std::io;
use std::process::ExitCode;

use trigon_core::Mesh;
use trigon_terminal::{load_mesh, AppConfig, TerminalApp};

fn run() -> io::Result<()> {
    let config = AppConfig::from_args(env::args().skip(1))?;

    let mesh = match &config.mesh_path {
        Some(path) => {
            println!("Loading {}", path.display());
            // Diagnostics are logged by the parser as warnings.
            let parsed = load_mesh(path)?;
            println!(
                "Loaded {} triangles ({} warnings)",
                parsed.mesh.trigon_count(),
                parsed.diagnostics.len()
            );
            parsed.mesh
        }
        None => Mesh::cube(2.0),
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, config)?;
    app.run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("trigon: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Terminal front end: frame loop, input, and an ASCII display surface
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use trigon_core::{
    stl, Camera, Euler, FrameContext, FrameStats, InputState, Mesh, Object, RenderMode, Renderer,
    StlError, Transformation, Vec3,
};

pub mod ascii;
pub mod config;

pub use ascii::AsciiSurface;
pub use config::AppConfig;

/// Edge length, in scene units, the displayed mesh is scaled to
const MODEL_SIZE: f32 = 40.0;

/// Per-frame spin applied when spinning is enabled (radians)
const SPIN: (f32, f32, f32) = (0.02, 0.03, 0.0);

/// Centre and uniform scale that fit a mesh into a `MODEL_SIZE` box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub center: Vec3,
    pub scale: f32,
}

impl Fit {
    pub fn new(mesh: &Mesh, size: f32) -> Self {
        let mut vertices = mesh.vertices().iter();
        let Some(&first) = vertices.next() else {
            return Self {
                center: Vec3::zeros(),
                scale: 1.0,
            };
        };
        let (min, max) = vertices.fold((first, first), |(lo, hi), v| (lo.inf(v), hi.sup(v)));
        let extent = (max - min).max();
        Self {
            center: (min + max) / 2.0,
            scale: if extent > 1e-9 { size / extent } else { 1.0 },
        }
    }
}

/// Load an ASCII solid file for display.
///
/// Read failures keep their I/O kind; anything wrong with the file's
/// contents is reported as `InvalidData`.
pub fn load_mesh(path: &Path) -> io::Result<stl::Parsed> {
    stl::load(path).map_err(|e| {
        let kind = match &e {
            StlError::Io { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, e.to_string())
    })
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    object: Object,
    fit: Fit,
    rotation: Euler,
    camera: Camera,
    renderer: Renderer,
    surface: AsciiSurface,
    config: AppConfig,
    input: InputState,
    running: bool,
    frame: u64,
    last_frame: Instant,
    last_fps_sample: Instant,
    fps_frames: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: AppConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(mesh, config, cols as usize, rows as usize))
    }

    /// Build the app for a grid of the given size without touching the terminal
    pub fn with_size(mesh: Mesh, config: AppConfig, cols: usize, rows: usize) -> Self {
        let object = Object::new(mesh);
        let fit = Fit::new(object.mesh(), MODEL_SIZE);
        let mut camera = Camera::new(config.focal_distance);
        camera.set_position(Vec3::new(0.0, 0.0, -config.focal_distance));
        let now = Instant::now();

        Self {
            object,
            fit,
            rotation: Euler::new(0.3, 0.3, 0.0),
            camera,
            renderer: Renderer::new(config.mode),
            surface: AsciiSurface::new(cols, rows),
            config,
            input: InputState::default(),
            running: true,
            frame: 0,
            last_frame: now,
            last_fps_sample: now,
            fps_frames: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface(&self) -> &AsciiSurface {
        &self.surface
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f32(1.0 / self.config.target_fps.max(1) as f32);

        while self.running {
            let frame_start = Instant::now();

            self.poll_input()?;
            if self.input.quit {
                self.running = false;
                break;
            }

            self.update();
            self.render_frame();
            self.present()?;

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            self.fps_frames += 1;
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.fps_frames as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.fps_frames = 0;
                self.last_fps_sample = now;
            }
        }

        info!("stopped after {} frames", self.frame);
        Ok(())
    }

    /// Drain pending terminal events into this frame's input snapshot
    fn poll_input(&mut self) -> io::Result<()> {
        self.input = InputState::default();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(cols, rows) => {
                    debug!("resized to {cols}x{rows}");
                    self.surface = AsciiSurface::new(cols as usize, rows as usize);
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.input.quit = true,
            KeyCode::Char('w') | KeyCode::Up => self.input.up = true,
            KeyCode::Char('s') | KeyCode::Down => self.input.down = true,
            KeyCode::Char('a') | KeyCode::Left => self.input.left = true,
            KeyCode::Char('d') | KeyCode::Right => self.input.right = true,
            KeyCode::Char('+') | KeyCode::Char('=') => self.input.forward = true,
            KeyCode::Char('-') => self.input.back = true,
            KeyCode::Char('m') => {
                let mode = match self.renderer.mode() {
                    RenderMode::Filled => RenderMode::Wireframe,
                    RenderMode::Wireframe => RenderMode::Filled,
                };
                self.renderer.set_mode(mode);
            }
            _ => {}
        }
    }

    /// Spin the object and rebuild its chain for the coming frame
    pub fn update(&mut self) {
        if self.config.spin {
            let (dx, dy, dz) = SPIN;
            self.rotation.rotate(dx, dy, dz);
        }

        let Fit { center, scale } = self.fit;
        self.object.reset_transforms();
        self.object.add_transform(Transformation::Translate(-center));
        self.object.add_transform(Transformation::scale(scale, scale, scale));
        self.object.add_transform(Transformation::Rotation(self.rotation));
    }

    pub fn render_frame(&mut self) -> FrameStats {
        let now = Instant::now();
        let ctx = FrameContext {
            camera: &self.camera,
            input: self.input,
            elapsed: now - self.last_frame,
            frame: self.frame,
        };
        self.last_frame = now;
        self.frame += 1;

        self.surface.clear();
        self.stats = self
            .renderer
            .render(std::slice::from_ref(&self.object), &ctx, &mut self.surface);

        // The frame is drawn; the camera may move before the next one.
        let motion = ctx.input.movement(self.config.camera_step);
        self.camera.translate_by(motion);
        self.stats
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let p = self.camera.position();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Trigon | FPS: {:.1} | faces {}/{} | cam ({:.0}, {:.0}, {:.0}) | WASD/Arrows=Move +/-=Zoom M=Mode Q=Quit",
                self.fps, self.stats.faces_drawn, self.stats.faces_considered, p.x, p.y, p.z
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> TerminalApp {
        TerminalApp::with_size(Mesh::cube(2.0), AppConfig::default(), 80, 24)
    }

    #[test]
    fn test_fit_centres_and_scales() {
        let mesh = Mesh::cuboid(Vec3::new(10.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 1.0));
        let fit = Fit::new(&mesh, 40.0);
        assert_eq!(fit.center, Vec3::new(12.0, 1.0, 0.5));
        assert_eq!(fit.scale, 10.0);
        assert_eq!(Fit::new(&Mesh::empty(), 40.0).scale, 1.0);
    }

    #[test]
    fn test_keys_move_camera() {
        let mut app = app();
        let start = app.camera().position();
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
        app.update();
        assert_eq!(app.camera().position(), start);

        app.render_frame();
        assert_eq!(app.camera().position(), start + Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_load_mesh_error_kinds() {
        let dir = std::env::temp_dir().join(format!("trigon-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = load_mesh(&dir.join("missing.stl")).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);

        let truncated = dir.join("truncated.stl");
        std::fs::write(&truncated, "solid cut\n facet normal 0 0 1\n").unwrap();
        let err = load_mesh(&truncated).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.input.quit);
    }

    #[test]
    fn test_frame_draws_something() {
        let mut app = app();
        app.update();
        let stats = app.render_frame();
        assert!(stats.faces_drawn > 0);
        let drawn = (0..app.surface().rows())
            .flat_map(|r| app.surface().row_text(r).chars().collect::<Vec<_>>())
            .filter(|&c| c != ' ')
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn test_mode_toggle() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
        assert_eq!(app.renderer.mode(), RenderMode::Wireframe);
    }
}

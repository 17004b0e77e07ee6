/// The display surface the pipeline draws into
use crate::geometry::Point;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level for a shade in `[0, 1]`.
    ///
    /// Out-of-range shades clamp; NaN becomes black.
    pub fn grey(shade: f32) -> Self {
        let v = (shade * 255.0).round() as u8;
        Self::rgb(v, v, v)
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luma(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

/// Something that can draw flat 2D primitives in screen space.
///
/// The pipeline never reads pixels back.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill_polygon(&mut self, points: &[Point; 3], color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Outline a closed polygon
    fn draw_line_loop(&mut self, points: &[Point], color: Color) {
        for (i, &p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            self.draw_line(p, q, color);
        }
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon { points: [Point; 3], color: Color },
    Line { from: Point, to: Point, color: Color },
}

/// A surface that only records what was drawn, in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_polygon(&mut self, points: &[Point; 3], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: *points,
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

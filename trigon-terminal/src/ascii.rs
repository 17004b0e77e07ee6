/// Character-grid display surface for terminal output
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use trigon_core::{Color, Point, Surface};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: u32 = 2;

/// Surface that rasterizes into a grid of characters.
///
/// It reports `rows * CELL_ASPECT` as its height so the scene is laid out in
/// square units; y is squeezed back onto rows when drawing.
pub struct AsciiSurface {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl AsciiSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Character at a cell, if inside the grid
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// One row as a string, for snapshots and tests
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols].iter().collect()
    }

    fn to_cell(p: Point) -> (f32, f32) {
        (p.x, p.y / CELL_ASPECT as f32)
    }

    fn plot(&mut self, col: i64, row: i64, c: char) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = c;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = self.cells[row * self.cols + col];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => TermColor::DarkGrey,
                    '-' | '=' => TermColor::Grey,
                    '+' | '*' => TermColor::White,
                    '#' | '%' | '@' => TermColor::Cyan,
                    _ => TermColor::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if row + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a color's brightness onto the ramp
fn glyph(color: Color) -> char {
    let index = (color.luma() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

impl Surface for AsciiSurface {
    fn width(&self) -> u32 {
        self.cols as u32
    }

    fn height(&self) -> u32 {
        self.rows as u32 * CELL_ASPECT
    }

    fn fill_polygon(&mut self, points: &[Point; 3], color: Color) {
        let [v0, v1, v2] = points.map(Self::to_cell);
        let character = glyph(color);

        // Bounding box, clipped to the grid
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.cols as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.rows as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, character);
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (a, b) = (Self::to_cell(from), Self::to_cell(to));
        if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
            return;
        }
        let character = glyph(color);

        // DDA, one step per cell along the major axis
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let steps = dx.abs().max(dy.abs()).ceil().min((self.cols + self.rows) as f32 * 4.0) as i64;
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let x = (a.0 + dx * t).floor() as i64;
            let y = (a.1 + dy * t).floor() as i64;
            self.plot(x, y, character);
        }
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

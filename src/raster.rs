//! Braille rasterization of fitted segments.
//!
//! Each terminal cell holds a 2x4 grid of dots, which gives roughly square dots on a
//! typical terminal font.

use crate::error::Result;
use crate::fit::{FitTransform, Viewport};
use crate::turtle::Segment;

const BRAILLE_BASE: u32 = 0x2800;
const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

// Bit for dot (row, col) within a cell:
// 0 3
// 1 4
// 2 5
// 6 7
const DOT_BITS: [[u8; DOTS_X]; DOTS_Y] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Dot grid covering `cols x rows` terminal cells. Each lit dot remembers the index of the
/// last segment drawn through it.
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    dots: Vec<Option<usize>>,
}

/// A non-empty cell ready for output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrailleCell {
    pub col: usize,
    pub row: usize,
    pub ch: char,
    /// Highest segment index among the cell's dots.
    pub order: usize,
}

impl BrailleCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            dots: vec![None; cols * DOTS_X * rows * DOTS_Y],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Dot resolution.
    pub fn dot_size(&self) -> (usize, usize) {
        (self.cols * DOTS_X, self.rows * DOTS_Y)
    }

    /// Viewport in dot coordinates; the far edge maps onto the last dot.
    pub fn viewport(&self, padding: f64) -> Result<Viewport> {
        let (w, h) = self.dot_size();
        Viewport::new(w as f64 - 1.0, h as f64 - 1.0, padding)
    }

    pub fn clear(&mut self) {
        self.dots.fill(None);
    }

    fn plot(&mut self, x: i64, y: i64, order: usize) {
        let (w, h) = self.dot_size();
        if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
            self.dots[y as usize * w + x as usize] = Some(order);
        }
    }

    /// Bresenham line between two dot positions, clipped to the canvas.
    fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, order: usize) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, order);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Transform every segment with `fit` and plot it. Segment order is preserved in the
    /// recorded indices.
    pub fn draw(&mut self, segments: &[Segment], fit: &FitTransform) {
        for (order, segment) in segments.iter().enumerate() {
            let s = fit.apply_segment(segment);
            self.line(
                s.start.x.round() as i64,
                s.start.y.round() as i64,
                s.end.x.round() as i64,
                s.end.y.round() as i64,
                order,
            );
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = BrailleCell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| self.cell(col, row))
        })
    }

    fn cell(&self, col: usize, row: usize) -> Option<BrailleCell> {
        let w = self.cols * DOTS_X;
        let mut bits = 0u8;
        let mut order = None;

        for (dy, row_bits) in DOT_BITS.iter().enumerate() {
            for (dx, bit) in row_bits.iter().enumerate() {
                let idx = (row * DOTS_Y + dy) * w + col * DOTS_X + dx;
                if let Some(o) = self.dots[idx] {
                    bits |= bit;
                    order = Some(order.map_or(o, |cur: usize| cur.max(o)));
                }
            }
        }

        let order = order?;
        let ch = char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' ');
        Some(BrailleCell { col, row, ch, order })
    }

    /// Plain text rendering, one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![vec![' '; self.cols]; self.rows];
        for cell in self.cells() {
            lines[cell.row][cell.col] = cell.ch;
        }
        lines.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

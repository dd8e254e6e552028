/// Half-block terminal output for rendered frames
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use facet_core::{Color, PixelBuffer};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Samples a frame onto a grid of terminal cells, two pixels per cell.
pub struct CellRenderer {
    cols: usize,
    rows: usize,
}

impl CellRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Nearest-neighbour sample of `frame`, scaled to fit and centered, as a
    /// `cols` × `2 * rows` grid in row-major order.
    pub fn sample(&self, frame: &PixelBuffer) -> Vec<Color> {
        let (grid_w, grid_h) = (self.cols, self.rows * 2);
        let mut grid = vec![Color::BLACK; grid_w * grid_h];
        if grid.is_empty() {
            return grid;
        }

        let scale_x = grid_w as f64 / frame.width() as f64;
        let scale = scale_x.min(grid_h as f64 / frame.height() as f64);
        let draw_w = (frame.width() as f64 * scale) as usize;
        let draw_h = (frame.height() as f64 * scale) as usize;
        let left = (grid_w - draw_w) / 2;
        let top = (grid_h - draw_h) / 2;

        for gy in top..top + draw_h {
            let sy = ((gy - top) as f64 / scale) as usize;
            for gx in left..left + draw_w {
                let sx = ((gx - left) as f64 / scale) as usize;
                if let Some(color) = frame.get(sx, sy) {
                    grid[gy * grid_w + gx] = color;
                }
            }
        }
        grid
    }

    /// Queue the frame starting at the top-left cell. The caller flushes.
    pub fn draw<W: Write>(&self, frame: &PixelBuffer, writer: &mut W) -> std::io::Result<()> {
        let grid = self.sample(frame);
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            let mut last: Option<(Color, Color)> = None;
            for col in 0..self.cols {
                let top = grid[(row * 2) * self.cols + col];
                let bottom = grid[(row * 2 + 1) * self.cols + col];
                if last != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(term_color(top)))?;
                    writer.queue(SetBackgroundColor(term_color(bottom)))?;
                    last = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

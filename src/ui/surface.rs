//! Paints sky drawing commands into a ratatui buffer.
//!
//! One terminal cell covers `CELL_WIDTH_PX` x `CELL_HEIGHT_PX` virtual
//! pixels. Large shapes tint cell backgrounds; small ones become glyphs.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::sky::{Rgba, Surface};

pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;
pub const SKY_BACKGROUND: (u8, u8, u8) = (10, 12, 24);

const LINE_SAMPLE_PX: f32 = CELL_HEIGHT_PX / 2.0;

pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    fn cell_at(&self, px: f32, py: f32) -> Option<(u16, u16)> {
        if !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px / CELL_WIDTH_PX) as u32;
        let row = (py / CELL_HEIGHT_PX) as u32;
        if col >= u32::from(self.area.width) || row >= u32::from(self.area.height) {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }

    fn background_at(&self, pos: (u16, u16)) -> (u8, u8, u8) {
        match self.buf.cell(pos).map(|cell| cell.bg) {
            Some(Color::Rgb(r, g, b)) => (r, g, b),
            _ => SKY_BACKGROUND,
        }
    }

    fn tint(&mut self, pos: (u16, u16), color: Rgba) {
        let blended = blend(color, self.background_at(pos));
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_bg(blended);
        }
    }

    fn glyph(&mut self, pos: (u16, u16), symbol: &str, color: Rgba) {
        let fg = blend(color, self.background_at(pos));
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_symbol(symbol).set_fg(fg);
        }
    }

    /// Every cell whose centre falls inside the circle, with its distance
    /// from the centre in pixels.
    fn cells_in_circle(&self, cx: f32, cy: f32, radius: f32) -> Vec<((u16, u16), f32)> {
        let mut cells = Vec::new();
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return cells;
        }
        for row in 0..self.area.height {
            let py = (f32::from(row) + 0.5) * CELL_HEIGHT_PX;
            if (py - cy).abs() > radius {
                continue;
            }
            for col in 0..self.area.width {
                let px = (f32::from(col) + 0.5) * CELL_WIDTH_PX;
                let dist = (px - cx).hypot(py - cy);
                if dist <= radius {
                    cells.push(((self.area.x + col, self.area.y + row), dist));
                }
            }
        }
        cells
    }
}

impl Surface for TerminalSurface<'_> {
    fn clear(&mut self) {
        let (r, g, b) = SKY_BACKGROUND;
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(Color::Rgb(r, g, b));
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius < CELL_WIDTH_PX / 2.0 {
            if let Some(pos) = self.cell_at(cx, cy) {
                let symbol = if radius < 1.0 { "·" } else { "•" };
                self.glyph(pos, symbol, color);
            }
            return;
        }
        let cells = self.cells_in_circle(cx, cy, radius);
        if cells.is_empty() {
            if let Some(pos) = self.cell_at(cx, cy) {
                self.tint(pos, color);
            }
            return;
        }
        for (pos, _) in cells {
            self.tint(pos, color);
        }
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        let symbol = if width >= 2.0 { "*" } else { "│" };
        let length = (to.0 - from.0).hypot(to.1 - from.1);
        if !length.is_finite() {
            return;
        }
        let steps = (length / LINE_SAMPLE_PX).ceil().max(1.0) as usize;
        let mut last = None;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let px = from.0 + (to.0 - from.0) * t;
            let py = from.1 + (to.1 - from.1) * t;
            let Some(pos) = self.cell_at(px, py) else {
                continue;
            };
            if last != Some(pos) {
                self.glyph(pos, symbol, color);
                last = Some(pos);
            }
        }
    }

    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner: Rgba, outer: Rgba) {
        for (pos, dist) in self.cells_in_circle(cx, cy, radius) {
            let t = (dist / radius).clamp(0.0, 1.0);
            self.tint(pos, lerp(inner, outer, t));
        }
    }
}

fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let channel = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Rgba::new(
        channel(a.r, b.r),
        channel(a.g, b.g),
        channel(a.b, b.b),
        a.a + (b.a - a.a) * t,
    )
}

/// `color` composited over an opaque background.
fn blend(color: Rgba, under: (u8, u8, u8)) -> Color {
    let alpha = if color.a.is_finite() {
        color.a.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mix = |over: u8, base: u8| {
        (f32::from(base) + (f32::from(over) - f32::from(base)) * alpha).round() as u8
    };
    Color::Rgb(
        mix(color.r, under.0),
        mix(color.g, under.1),
        mix(color.b, under.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(cols: u16, rows: u16) -> Buffer {
        Buffer::empty(Rect::new(0, 0, cols, rows))
    }

    fn bg(buf: &Buffer, x: u16, y: u16) -> Color {
        buf[(x, y)].bg
    }

    #[test]
    fn clear_paints_the_night_background() {
        let mut buf = buffer(4, 2);
        buf[(1, 1)].set_symbol("x");
        TerminalSurface::new(&mut buf, Rect::new(0, 0, 4, 2)).clear();
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(bg(&buf, 3, 1), Color::Rgb(10, 12, 24));
    }

    #[test]
    fn small_circles_become_glyphs() {
        let mut buf = buffer(10, 5);
        let mut surface = TerminalSurface::new(&mut buf, Rect::new(0, 0, 10, 5));
        surface.clear();
        surface.fill_circle(20.0, 40.0, 1.5, Rgba::new(255, 255, 255, 1.0));
        assert_eq!(buf[(2, 2)].symbol(), "•");
        assert_eq!(buf[(2, 2)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn large_circles_tint_backgrounds() {
        let mut buf = buffer(20, 10);
        let mut surface = TerminalSurface::new(&mut buf, Rect::new(0, 0, 20, 10));
        surface.clear();
        surface.fill_circle(80.0, 80.0, 40.0, Rgba::new(210, 212, 224, 0.5));
        assert_eq!(bg(&buf, 10, 5), Color::Rgb(110, 112, 124));
        assert_eq!(bg(&buf, 0, 0), Color::Rgb(10, 12, 24));
        assert_eq!(buf[(10, 5)].symbol(), " ");
    }

    #[test]
    fn vertical_streaks_cover_each_crossed_row() {
        let mut buf = buffer(10, 10);
        let mut surface = TerminalSurface::new(&mut buf, Rect::new(0, 0, 10, 10));
        surface.clear();
        surface.stroke_line((12.0, 4.0), (12.0, 36.0), 1.0, Rgba::new(174, 194, 224, 1.0));
        for row in 0..=2 {
            assert_eq!(buf[(1, row)].symbol(), "│", "row {row}");
        }
        assert_eq!(buf[(1, 3)].symbol(), " ");
    }

    #[test]
    fn off_canvas_commands_are_ignored() {
        let mut buf = buffer(4, 4);
        let mut surface = TerminalSurface::new(&mut buf, Rect::new(0, 0, 4, 4));
        surface.clear();
        surface.fill_circle(-50.0, 10.0, 1.0, Rgba::new(255, 255, 255, 1.0));
        surface.stroke_line((10.0, -40.0), (10.0, -20.0), 1.0, Rgba::new(255, 255, 255, 1.0));
        surface.fill_circle(f32::NAN, 10.0, 1.0, Rgba::new(255, 255, 255, 1.0));
        surface.radial_glow(
            f32::NAN,
            0.0,
            30.0,
            Rgba::new(255, 0, 0, 1.0),
            Rgba::new(255, 0, 0, 0.0),
        );
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
        assert!(buf.content().iter().all(|cell| cell.bg == Color::Rgb(10, 12, 24)));
    }

    #[test]
    fn glow_fades_towards_its_edge() {
        let mut buf = buffer(20, 10);
        let mut surface = TerminalSurface::new(&mut buf, Rect::new(0, 0, 20, 10));
        surface.clear();
        let gold = Rgba::new(252, 226, 136, 1.0);
        surface.radial_glow(84.0, 88.0, 64.0, gold, gold.with_alpha(0.0));
        let Color::Rgb(centre, ..) = bg(&buf, 10, 5) else {
            panic!("expected rgb");
        };
        let Color::Rgb(edge, ..) = bg(&buf, 16, 5) else {
            panic!("expected rgb");
        };
        assert!(centre > edge);
    }
}

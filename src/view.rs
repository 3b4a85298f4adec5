use speedy2d::dimen::Vector2;

use crate::engine::Pt;

const PADDING: f64 = 0.1;

/// World-to-pixel mapping. World y grows upward, screen y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    min: Pt,
    max: Pt,
}

impl Viewport {
    /// Frames the vertices together with the unit square, where fresh
    /// starting points are drawn from.
    pub fn fit(vertices: &[Pt]) -> Viewport {
        let (mut min, mut max) = (Pt::new(0.0, 0.0), Pt::new(1.0, 1.0));
        for v in vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Viewport {
            min: Pt::new(min.x - PADDING, min.y - PADDING),
            max: Pt::new(max.x + PADDING, max.y + PADDING),
        }
    }

    #[cfg(test)]
    pub(crate) fn bounds(&self) -> (Pt, Pt) {
        (self.min, self.max)
    }

    pub fn to_screen(&self, p: Pt, window: Vector2<u32>) -> Vector2<f32> {
        let (w, h) = (f64::from(window.x), f64::from(window.y));
        let (span_x, span_y) = (self.max.x - self.min.x, self.max.y - self.min.y);
        let scale = (w / span_x).min(h / span_y);
        let off_x = (w - span_x * scale) / 2.0;
        let off_y = (h - span_y * scale) / 2.0;

        let sx = off_x + (p.x - self.min.x) * scale;
        let sy = off_y + (self.max.y - p.y) * scale;
        Vector2::new(sx as f32, sy as f32)
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

//! An [`image::RgbaImage`] with scanline polygon fill, Bresenham lines and
//! filled ellipses.

use hashbrown::HashSet;
use image::RgbaImage;
use orrery_mesh::Rgba;

use crate::surface::{Point, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(background)),
        }
    }

    /// A fully transparent canvas, for layers that are composited later.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, [0, 0, 0, 0])
    }

    /// Start from a copy of an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Number of distinct RGBA values on the canvas.
    pub fn unique_color_count(&self) -> usize {
        self.image.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, image::Rgba(color));
        }
    }

    fn span(&mut self, y: i64, x0: i64, x1: i64, color: Rgba) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.image.width() as i64 - 1);
        for x in x0..=x1 {
            self.put(x, y, color);
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) {
        let (mut x, mut y) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
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

    fn draw_polygon(&mut self, points: &[Point], fill: Rgba) {
        if points.len() < 3 || points.iter().any(|p| !(p.0.is_finite() && p.1.is_finite())) {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

        // Pixel centers inside the polygon, even-odd rule.
        let first = (min_y - 0.5).ceil().max(0.0) as i64;
        let last = ((max_y - 0.5).floor() as i64).min(self.image.height() as i64 - 1);
        let mut crossings = Vec::with_capacity(points.len());
        for y in first..=last {
            let sample = y as f64 + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sample) != (by <= sample) {
                    crossings.push(ax + (sample - ay) * (bx - ax) / (by - ay));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i64;
                let x1 = (pair[1] - 0.5).floor() as i64;
                if x0 <= x1 {
                    self.span(y, x0, x1, fill);
                }
            }
        }

        // Outline in the fill color so neighbouring faces leave no cracks.
        for (i, &a) in points.iter().enumerate() {
            self.draw_line(a, points[(i + 1) % points.len()], fill);
        }
    }

    fn draw_ellipse(&mut self, center: Point, radii: (f64, f64), fill: Rgba) {
        let (cx, cy) = center;
        let (rx, ry) = (radii.0.abs(), radii.1.abs());
        if rx < 0.5 && ry < 0.5 {
            self.put(cx.floor() as i64, cy.floor() as i64, fill);
            return;
        }
        let (rx, ry) = (rx.max(0.5), ry.max(0.5));
        let top = (cy - ry).floor() as i64;
        let bottom = (cy + ry).ceil() as i64;
        for y in top..=bottom {
            let dy = (y as f64 + 0.5 - cy) / ry;
            if dy.abs() > 1.0 {
                continue;
            }
            let half = rx * (1.0 - dy * dy).sqrt();
            let x0 = (cx - half - 0.5).ceil() as i64;
            let x1 = (cx + half - 0.5).floor() as i64;
            if x0 <= x1 {
                self.span(y, x0, x1, fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = [0, 0, 0, 255];
    const RED: Rgba = [255, 0, 0, 255];

    #[test]
    fn test_new_canvas_dimensions() {
        let canvas = Canvas::new(64, 32, BLACK);
        assert_eq!((canvas.width(), canvas.height()), (64, 32));
        assert_eq!(canvas.unique_color_count(), 1);
        assert_eq!(Canvas::transparent(2, 2).pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(64, 0), None);
    }

    #[test]
    fn test_line_endpoints_and_diagonal() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.draw_line((1.0, 1.0), (8.0, 8.0), RED);
        for i in 1..=8 {
            assert_eq!(canvas.pixel(i, i), Some(RED), "diagonal pixel {i} missing");
        }
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(9, 9), Some(BLACK));
    }

    #[test]
    fn test_line_clipped_off_canvas() {
        let mut canvas = Canvas::new(5, 5, BLACK);
        canvas.draw_line((-10.0, 2.0), (20.0, 2.0), RED);
        for x in 0..5 {
            assert_eq!(canvas.pixel(x, 2), Some(RED));
        }
        assert_eq!(canvas.pixel(2, 1), Some(BLACK));
    }

    #[test]
    fn test_polygon_fills_interior_only() {
        let mut canvas = Canvas::new(20, 20, BLACK);
        canvas.draw_polygon(&[(2.0, 2.0), (17.0, 2.0), (2.0, 17.0)], RED);
        assert_eq!(canvas.pixel(4, 4), Some(RED), "interior pixel");
        assert_eq!(canvas.pixel(16, 16), Some(BLACK), "beyond the hypotenuse");
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn test_polygon_overwrites_without_blending() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        let translucent = [0, 255, 0, 100];
        canvas.draw_polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], translucent);
        assert_eq!(canvas.pixel(5, 5), Some(translucent));
        assert_eq!(canvas.unique_color_count(), 1);
    }

    #[test]
    fn test_degenerate_polygon_ignored() {
        let mut canvas = Canvas::new(4, 4, BLACK);
        canvas.draw_polygon(&[(1.0, 1.0), (2.0, 2.0)], RED);
        canvas.draw_polygon(&[(f64::NAN, 1.0), (2.0, 2.0), (3.0, 1.0)], RED);
        assert_eq!(canvas.unique_color_count(), 1);
    }

    #[test]
    fn test_ellipse_fill() {
        let mut canvas = Canvas::new(21, 21, BLACK);
        canvas.draw_ellipse((10.5, 10.5), (5.0, 5.0), RED);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(14, 10), Some(RED));
        assert_eq!(canvas.pixel(17, 10), Some(BLACK));
        assert_eq!(canvas.pixel(14, 14), Some(BLACK), "outside the circle's corner");
    }

    #[test]
    fn test_tiny_ellipse_is_one_pixel() {
        let mut canvas = Canvas::new(5, 5, BLACK);
        canvas.draw_ellipse((2.2, 3.7), (0.2, 0.2), RED);
        assert_eq!(canvas.pixel(2, 3), Some(RED));
        let lit = canvas.image().pixels().filter(|p| p.0 == RED).count();
        assert_eq!(lit, 1);
    }
}

//! The drawing operations the renderer needs from a 2-D target.

use image::RgbaImage;
use orrery_mesh::Rgba;

/// A point in screen space, in pixels. `(0, 0)` is the top-left corner.
pub type Point = (f64, f64);

/// A 2-D raster target.
///
/// Drawing replaces pixels outright; blending between layers happens only
/// through [`alpha_composite`].
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Draw a one pixel wide line.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba);

    /// Fill a closed polygon.
    fn draw_polygon(&mut self, points: &[Point], fill: Rgba);

    /// Fill an axis-aligned ellipse.
    fn draw_ellipse(&mut self, center: Point, radii: (f64, f64), fill: Rgba);
}

/// Source-over composite of `overlay` onto a copy of `base`.
///
/// Both images are anchored at the top-left corner; parts of `overlay`
/// outside `base` are dropped.
pub fn alpha_composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    image::imageops::overlay(&mut out, overlay, 0, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as Px;

    #[test]
    fn test_transparent_overlay_is_noop() {
        let base = RgbaImage::from_pixel(4, 4, Px([10, 20, 30, 255]));
        let overlay = RgbaImage::new(4, 4);
        assert_eq!(alpha_composite(&base, &overlay), base);
    }

    #[test]
    fn test_opaque_overlay_replaces() {
        let base = RgbaImage::from_pixel(2, 2, Px([10, 20, 30, 255]));
        let overlay = RgbaImage::from_pixel(2, 2, Px([200, 100, 0, 255]));
        assert_eq!(alpha_composite(&base, &overlay).get_pixel(1, 1), &Px([200, 100, 0, 255]));
    }

    #[test]
    fn test_translucent_overlay_blends() {
        let base = RgbaImage::from_pixel(1, 1, Px([0, 0, 0, 255]));
        let overlay = RgbaImage::from_pixel(1, 1, Px([255, 255, 255, 128]));
        let Px([r, g, b, a]) = *alpha_composite(&base, &overlay).get_pixel(0, 0);
        assert_eq!(a, 255, "an opaque base stays opaque");
        assert!((120..=136).contains(&r), "half white over black should be mid grey, got {r}");
        assert_eq!((r, r), (g, b));
    }

    #[test]
    fn test_base_not_modified() {
        let base = RgbaImage::from_pixel(1, 1, Px([0, 0, 0, 255]));
        let overlay = RgbaImage::from_pixel(1, 1, Px([255, 0, 0, 255]));
        let _ = alpha_composite(&base, &overlay);
        assert_eq!(base.get_pixel(0, 0), &Px([0, 0, 0, 255]));
    }
}

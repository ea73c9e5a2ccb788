//! Uniform scale + translate mapping of drawing bounds into a padded viewport.

use crate::error::{LsysError, Result};
use crate::turtle::{Bounds, Point, Segment};

/// Target area for [`FitTransform::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    magnify: bool,
}

impl Viewport {
    /// Validated viewport; the area left after padding must be positive on both axes.
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self> {
        let viewport = Self { width, height, padding, magnify: true };
        let (dw, dh) = viewport.drawable();
        if !(padding.is_finite() && padding >= 0.0 && dw.is_finite() && dh.is_finite() && dw > 0.0 && dh > 0.0) {
            return Err(LsysError::InvalidViewport { width, height, padding });
        }
        Ok(viewport)
    }

    /// Never scale drawings up; small drawings stay at their natural size, centered.
    pub fn no_magnify(mut self) -> Self {
        self.magnify = false;
        self
    }

    /// Width and height left after padding.
    pub fn drawable(&self) -> (f64, f64) {
        (self.width - 2.0 * self.padding, self.height - 2.0 * self.padding)
    }
}

/// Scale and offset taking turtle coordinates to viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    pub fn compute(bounds: &Bounds, viewport: &Viewport) -> Self {
        let (draw_w, draw_h) = viewport.drawable();
        let (w, h) = (bounds.width(), bounds.height());

        let mut scale = match (w > 0.0, h > 0.0) {
            (true, true) => (draw_w / w).min(draw_h / h),
            (true, false) => draw_w / w,
            (false, true) => draw_h / h,
            (false, false) => 1.0,
        };
        if !viewport.magnify {
            scale = scale.min(1.0);
        }

        let offset_x = viewport.padding + (draw_w - w * scale) / 2.0 - bounds.min_x * scale;
        let offset_y = viewport.padding + (draw_h - h * scale) / 2.0 - bounds.min_y * scale;

        Self { scale, offset_x, offset_y }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.offset_x, p.y * self.scale + self.offset_y)
    }

    pub fn apply_segment(&self, segment: &Segment) -> Segment {
        Segment { start: self.apply(segment.start), end: self.apply(segment.end) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds { min_x, min_y, max_x, max_y }
    }

    fn assert_inside(p: Point, vp: &Viewport) {
        assert!(p.x >= vp.padding - EPS && p.x <= vp.width - vp.padding + EPS, "x={} outside", p.x);
        assert!(p.y >= vp.padding - EPS && p.y <= vp.height - vp.padding + EPS, "y={} outside", p.y);
    }

    #[test]
    fn fits_corners_inside_padding() {
        let vp = Viewport::new(800.0, 600.0, 50.0).unwrap();
        for b in [
            bounds(-10.0, -200.0, 35.0, 3.0),
            bounds(0.0, 0.0, 1.0, 1.0),
            bounds(1000.0, 1000.0, 5000.0, 1200.0),
        ] {
            let fit = FitTransform::compute(&b, &vp);
            assert_inside(fit.apply(b.min()), &vp);
            assert_inside(fit.apply(b.max()), &vp);
        }
    }

    #[test]
    fn scale_is_min_of_axes() {
        let vp = Viewport::new(800.0, 600.0, 50.0).unwrap();
        let b = bounds(0.0, 0.0, 100.0, 20.0);
        let fit = FitTransform::compute(&b, &vp);
        let scale_x: f64 = 700.0 / 100.0;
        let scale_y: f64 = 500.0 / 20.0;
        assert!((fit.scale - scale_x.min(scale_y)).abs() < EPS);
    }

    #[test]
    fn centers_the_scaled_box() {
        let vp = Viewport::new(200.0, 100.0, 10.0).unwrap();
        let b = bounds(0.0, 0.0, 10.0, 10.0);
        let fit = FitTransform::compute(&b, &vp);
        // Height limits: 80 / 10 = 8, so the box is 80 wide inside 180.
        assert!((fit.scale - 8.0).abs() < EPS);
        let min = fit.apply(b.min());
        let max = fit.apply(b.max());
        assert!((min.x - 60.0).abs() < EPS);
        assert!((max.x - 140.0).abs() < EPS);
        assert!((min.y - 10.0).abs() < EPS);
        assert!((max.y - 90.0).abs() < EPS);
    }

    #[test]
    fn magnifies_small_drawings() {
        let vp = Viewport::new(100.0, 100.0, 0.0).unwrap();
        let fit = FitTransform::compute(&bounds(0.0, 0.0, 1.0, 1.0), &vp);
        assert!((fit.scale - 100.0).abs() < EPS);
    }

    #[test]
    fn no_magnify_caps_scale() {
        let vp = Viewport::new(100.0, 100.0, 0.0).unwrap().no_magnify();
        let b = bounds(0.0, 0.0, 10.0, 20.0);
        let fit = FitTransform::compute(&b, &vp);
        assert_eq!(fit.scale, 1.0);
        let min = fit.apply(b.min());
        assert!((min.x - 45.0).abs() < EPS);
        assert!((min.y - 40.0).abs() < EPS);

        let big = bounds(0.0, 0.0, 1000.0, 500.0);
        assert!((FitTransform::compute(&big, &vp).scale - 0.1).abs() < EPS);
    }

    #[test]
    fn degenerate_axis_uses_the_other() {
        let vp = Viewport::new(300.0, 200.0, 0.0).unwrap();
        let fit = FitTransform::compute(&bounds(0.0, 5.0, 30.0, 5.0), &vp);
        assert!((fit.scale - 10.0).abs() < EPS);
        let fit = FitTransform::compute(&bounds(2.0, 0.0, 2.0, 40.0), &vp);
        assert!((fit.scale - 5.0).abs() < EPS);
        let fit = FitTransform::compute(&bounds(2.0, 3.0, 2.0, 3.0), &vp);
        assert_eq!(fit.scale, 1.0);
    }

    #[test]
    fn apply_segment_leaves_input_untouched() {
        let vp = Viewport::new(100.0, 100.0, 10.0).unwrap();
        let seg = Segment { start: Point::new(0.0, 0.0), end: Point::new(1.0, 1.0) };
        let fit = FitTransform::compute(&bounds(0.0, 0.0, 1.0, 1.0), &vp);
        let out = fit.apply_segment(&seg);
        assert_eq!(seg.start, Point::new(0.0, 0.0));
        assert!((out.start.x - 10.0).abs() < EPS);
        assert!((out.end.y - 90.0).abs() < EPS);
    }

    #[test]
    fn rejects_viewports_without_drawable_area() {
        assert!(matches!(Viewport::new(100.0, 100.0, 50.0), Err(LsysError::InvalidViewport { .. })));
        assert!(Viewport::new(0.0, 100.0, 0.0).is_err());
        assert!(Viewport::new(100.0, 100.0, -1.0).is_err());
        assert!(Viewport::new(f64::NAN, 100.0, 0.0).is_err());
    }
}

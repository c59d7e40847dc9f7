//! View <-> scene conversion for a scrollable, zoomable chart widget.
//!
//! Pixels per scene unit on each axis are `zoom * view_scaling`, so the chart scaling sets
//! the aspect and `zoom` sets the magnification. The view center always shows `center`.

use {
    super::ChartScaling,
    crate::{
        config::CHART,
        domain::{ScenePos, SceneRect, ViewPos},
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// View width in pixels.
    pub width: f64,
    /// View height in pixels.
    pub height: f64,
    /// Scene position shown at the middle of the view.
    pub center: ScenePos,
    pub zoom: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            // .max(1.0) keeps the pixel math away from zero-sized views
            width: width.max(1.0),
            height: height.max(1.0),
            center: ScenePos::default(),
            zoom: 1.0,
            scale_x: usable_scale(scale_x),
            scale_y: usable_scale(scale_y),
        }
    }

    #[must_use]
    pub fn from_scaling(scaling: &ChartScaling, width: f64, height: f64) -> Self {
        Self::new(width, height, scaling.view_scaling_x(), scaling.view_scaling_y())
    }

    pub fn update_size(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn set_scaling(&mut self, scaling: &ChartScaling) {
        self.scale_x = usable_scale(scaling.view_scaling_x());
        self.scale_y = usable_scale(scaling.view_scaling_y());
    }

    #[inline]
    #[must_use]
    pub fn pixels_per_unit_x(&self) -> f64 {
        self.zoom * self.scale_x
    }

    #[inline]
    #[must_use]
    pub fn pixels_per_unit_y(&self) -> f64 {
        self.zoom * self.scale_y
    }

    #[must_use]
    pub fn view_to_scene(&self, view: ViewPos) -> ScenePos {
        ScenePos {
            x: self.center.x + (view.x - self.width / 2.0) / self.pixels_per_unit_x(),
            y: self.center.y + (view.y - self.height / 2.0) / self.pixels_per_unit_y(),
        }
    }

    #[must_use]
    pub fn scene_to_view(&self, scene: ScenePos) -> ViewPos {
        ViewPos {
            x: (scene.x - self.center.x) * self.pixels_per_unit_x() + self.width / 2.0,
            y: (scene.y - self.center.y) * self.pixels_per_unit_y() + self.height / 2.0,
        }
    }

    /// Scene delta covered by a pixel delta.
    #[must_use]
    pub fn view_delta_to_scene(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.pixels_per_unit_x(), dy / self.pixels_per_unit_y())
    }

    /// Zoom by `factor`, keeping the scene point under `anchor` where it is.
    pub fn zoom_at(&mut self, anchor: ViewPos, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("Ignoring zoom factor {}", factor);
            return;
        }
        let before = self.view_to_scene(anchor);
        self.zoom = (self.zoom * factor).clamp(CHART.min_zoom, CHART.max_zoom);
        let after = self.view_to_scene(anchor);
        self.center = self.center.translate(before.x - after.x, before.y - after.y);
    }

    /// One wheel notch in (positive) or out (negative).
    pub fn zoom_steps_at(&mut self, anchor: ViewPos, steps: i32) {
        self.zoom_at(anchor, CHART.zoom_step.powi(steps));
    }

    /// Scroll so the content follows a pointer moved by (dx, dy) pixels.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let (sx, sy) = self.view_delta_to_scene(dx, dy);
        self.center = self.center.translate(-sx, -sy);
    }

    pub fn center_on(&mut self, pos: ScenePos) {
        self.center = pos;
    }

    #[must_use]
    pub fn visible_rect(&self) -> SceneRect {
        SceneRect::from_points(
            self.view_to_scene(ViewPos::new(0.0, 0.0)),
            self.view_to_scene(ViewPos::new(self.width, self.height)),
        )
    }

    /// Center on `rect` and zoom so all of it, plus the fit margin, is visible.
    pub fn fit_to(&mut self, rect: SceneRect) {
        let rect = rect.expand(CHART.fit_margin_pct);
        self.center = rect.center();

        let zoom_x = if rect.width() > 0.0 {
            self.width / (rect.width() * self.scale_x)
        } else {
            f64::INFINITY
        };
        let zoom_y = if rect.height() > 0.0 {
            self.height / (rect.height() * self.scale_y)
        } else {
            f64::INFINITY
        };
        let zoom = zoom_x.min(zoom_y);
        if zoom.is_finite() {
            self.zoom = zoom.clamp(CHART.min_zoom, CHART.max_zoom);
        }
    }

    #[must_use]
    pub fn is_in_view(&self, view: ViewPos) -> bool {
        view.x >= 0.0 && view.x < self.width && view.y >= 0.0 && view.y < self.height
    }
}

// Zero, negative or non-finite scales would make every conversion inf/NaN.
fn usable_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::warn!("Ignoring view scale {}, using 1", scale);
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_viewport() -> Viewport {
        let mut vp = Viewport::from_scaling(&ChartScaling::new("1:2", 1.0, 2.0), 1600.0, 900.0);
        vp.center = ScenePos::new(2_460_000.0, -50_000.0);
        vp.zoom = 8.0;
        vp
    }

    #[test]
    fn test_center_maps_to_view_middle() {
        let vp = test_viewport();
        let mid = vp.scene_to_view(vp.center);
        assert!((mid.x - 800.0).abs() < 1e-9);
        assert!((mid.y - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_view_scene_roundtrip() {
        let vp = test_viewport();
        for view in [ViewPos::new(0.0, 0.0), ViewPos::new(123.4, 876.5), ViewPos::new(1599.0, 1.0)] {
            let back = vp.scene_to_view(vp.view_to_scene(view));
            assert!((back.x - view.x).abs() < 1e-6);
            assert!((back.y - view.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_scaling_sets_aspect() {
        let vp = test_viewport();
        // 1 day : 2 price units -> one day is as wide as two price units are tall
        assert!((vp.pixels_per_unit_x() - 2.0 * vp.pixels_per_unit_y()).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut vp = test_viewport();
        let anchor = ViewPos::new(300.0, 200.0);
        let before = vp.view_to_scene(anchor);
        vp.zoom_at(anchor, 2.5);
        let after = vp.view_to_scene(anchor);
        assert!((before.x - after.x).abs() < 1e-6);
        assert!((before.y - after.y).abs() < 1e-6);
        assert_eq!(vp.zoom, 20.0);
    }

    #[test]
    fn test_zoom_is_clamped_and_rejects_garbage() {
        let mut vp = test_viewport();
        vp.zoom_at(ViewPos::new(0.0, 0.0), 1e12);
        assert_eq!(vp.zoom, CHART.max_zoom);
        vp.zoom_at(ViewPos::new(0.0, 0.0), -1.0);
        assert_eq!(vp.zoom, CHART.max_zoom);
        vp.zoom_steps_at(ViewPos::new(0.0, 0.0), -1);
        assert!(vp.zoom < CHART.max_zoom);
    }

    #[test]
    fn test_pan_moves_content_with_pointer() {
        let mut vp = test_viewport();
        let scene = ScenePos::new(2_460_001.0, -50_010.0);
        let before = vp.scene_to_view(scene);
        vp.pan_by_pixels(40.0, -25.0);
        let after = vp.scene_to_view(scene);
        assert!((after.x - before.x - 40.0).abs() < 1e-6);
        assert!((after.y - before.y + 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_to_shows_whole_rect() {
        let mut vp = test_viewport();
        let rect = SceneRect::from_points(
            ScenePos::new(2_459_000.0, -60_000.0),
            ScenePos::new(2_459_100.0, -40_000.0),
        );
        vp.fit_to(rect);
        let visible = vp.visible_rect();
        assert!(visible.left <= rect.left + 1e-6 && visible.right >= rect.right - 1e-6);
        assert!(visible.top <= rect.top + 1e-6 && visible.bottom >= rect.bottom - 1e-6);
        assert!(vp.center.distance_to(rect.center()) < 1e-6);
        // Margin keeps the data off the edges
        assert!(vp.is_in_view(vp.scene_to_view(ScenePos::new(rect.right, rect.bottom))));
    }

    #[test]
    fn test_bad_scales_fall_back_to_one() {
        let vp = Viewport::new(100.0, 100.0, 0.0, f64::NAN);
        assert_eq!((vp.scale_x, vp.scale_y), (1.0, 1.0));
        assert!(vp.view_to_scene(ViewPos::new(10.0, 20.0)).is_finite());
    }

    #[test]
    fn test_resize_rescale_and_center() {
        let mut vp = test_viewport();
        let target = ScenePos::new(2_459_500.0, -42.0);
        vp.center_on(target);
        vp.update_size(800.0, 0.0);
        assert_eq!((vp.width, vp.height), (800.0, 1.0));
        assert_eq!(vp.scene_to_view(target), ViewPos::new(400.0, 0.5));

        vp.set_scaling(&ChartScaling::new("1:4", 1.0, 4.0));
        assert!((vp.pixels_per_unit_x() - 4.0 * vp.pixels_per_unit_y()).abs() < 1e-12);
        // The center stays put under a new aspect
        assert_eq!(vp.scene_to_view(target), ViewPos::new(400.0, 0.5));
    }

    #[test]
    fn test_zero_size_protection() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 1.0);
        assert!(vp.width >= 1.0 && vp.height >= 1.0);
        assert!(vp.view_to_scene(ViewPos::new(0.5, 0.5)).is_finite());
    }
}

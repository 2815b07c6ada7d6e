//! View transform - normalized detector space to canvas pixel space
//!
//! The live feed is always mirrored (front-facing-camera mental model) and
//! drawn cover-fit: scaled until it fills the canvas, center-cropped on the
//! overflowing axis. Every overlay point goes through the same transform as
//! the video itself, so overlays stay aligned pixel-for-pixel. The transform
//! is cheap and recomputed every frame; resizes self-correct on the next
//! frame.

use aura_core::{BoundingBox, NormalizedLandmark, Point};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Source video's native decoded dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceDims {
    pub width: u32,
    pub height: u32,
}

impl SourceDims {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Readiness is signaled by dimensions being non-zero.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Mirrored cover-fit mapping from normalized [0,1] coordinates to canvas
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    draw_width: f32,
    draw_height: f32,
    offset_x: f32,
    offset_y: f32,
    mirrored: bool,
}

impl ViewTransform {
    /// Compute the cover-fit transform for one frame.
    ///
    /// When the source has no decoded dimensions yet, the canvas itself is
    /// the draw rectangle (zero offsets), so early overlays land in sensible
    /// positions instead of collapsing to the origin.
    pub fn cover(viewport: Viewport, source: SourceDims, mirrored: bool) -> Self {
        if !source.is_ready() {
            return Self {
                draw_width: viewport.width,
                draw_height: viewport.height,
                offset_x: 0.0,
                offset_y: 0.0,
                mirrored,
            };
        }

        let scale = (viewport.width / source.width as f32)
            .max(viewport.height / source.height as f32);
        let draw_width = source.width as f32 * scale;
        let draw_height = source.height as f32 * scale;

        Self {
            draw_width,
            draw_height,
            offset_x: (viewport.width - draw_width) / 2.0,
            offset_y: (viewport.height - draw_height) / 2.0,
            mirrored,
        }
    }

    /// The rectangle the video itself is drawn into.
    pub fn draw_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.draw_width, self.draw_height)
    }

    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Map a normalized coordinate pair to canvas pixels.
    #[inline]
    pub fn xy(&self, x: f32, y: f32) -> Point {
        let tx = if self.mirrored { 1.0 - x } else { x };
        Point::new(
            tx * self.draw_width + self.offset_x,
            y * self.draw_height + self.offset_y,
        )
    }

    /// Map a landmark, rejecting non-finite coordinates so one bad point
    /// never aborts a frame.
    pub fn point(&self, landmark: &NormalizedLandmark) -> Option<Point> {
        if !landmark.is_finite() {
            return None;
        }
        Some(self.xy(landmark.x, landmark.y))
    }

    /// Map a normalized box to canvas pixels.
    ///
    /// Mirroring flips the whole box, not just its origin: the mirrored
    /// left edge is the transform of the box's right edge.
    pub fn rect(&self, bbox: &BoundingBox) -> Option<Rect> {
        if !bbox.is_finite() {
            return None;
        }

        let width = bbox.width * self.draw_width;
        let height = bbox.height * self.draw_height;
        let x = if self.mirrored {
            (1.0 - bbox.right()) * self.draw_width + self.offset_x
        } else {
            bbox.x * self.draw_width + self.offset_x
        };
        let y = bbox.y * self.draw_height + self.offset_y;

        Some(Rect::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_cover_wide_canvas_tall_video() {
        // canvas wider than video: video scales to canvas width, crops
        // vertically
        let t = ViewTransform::cover(
            Viewport::new(1920.0, 1080.0),
            SourceDims::new(640, 480),
            false,
        );
        let rect = t.draw_rect();

        assert!(close(rect.width, 1920.0));
        assert!(close(rect.height, 1440.0));
        assert!(close(rect.x, 0.0));
        assert!(close(rect.y, -180.0));
    }

    #[test]
    fn test_corners_mirror_horizontally() {
        let t = ViewTransform::cover(
            Viewport::new(800.0, 600.0),
            SourceDims::new(640, 480),
            true,
        );
        let rect = t.draw_rect();

        // (0,0) maps to the draw rect's top-RIGHT corner under mirroring
        let p00 = t.xy(0.0, 0.0);
        assert!(close(p00.x, rect.x + rect.width));
        assert!(close(p00.y, rect.y));

        // (1,1) maps to the draw rect's bottom-LEFT corner
        let p11 = t.xy(1.0, 1.0);
        assert!(close(p11.x, rect.x));
        assert!(close(p11.y, rect.y + rect.height));
    }

    #[test]
    fn test_fallback_when_source_not_ready() {
        let t = ViewTransform::cover(
            Viewport::new(800.0, 600.0),
            SourceDims::default(),
            true,
        );
        let rect = t.draw_rect();

        assert!(close(rect.x, 0.0));
        assert!(close(rect.y, 0.0));
        assert!(close(rect.width, 800.0));
        assert!(close(rect.height, 600.0));

        // overlays do not collapse to the origin
        let p = t.xy(0.5, 0.5);
        assert!(close(p.x, 400.0));
        assert!(close(p.y, 300.0));
    }

    #[test]
    fn test_box_mirroring_flips_box_not_origin() {
        let t = ViewTransform::cover(
            Viewport::new(1000.0, 1000.0),
            SourceDims::new(1000, 1000),
            true,
        );

        // a box hugging the left edge of the source must hug the right edge
        // of the canvas once mirrored
        let bbox = BoundingBox::new(0.0, 0.2, 0.3, 0.4);
        let rect = t.rect(&bbox).unwrap();

        assert!(close(rect.x, 700.0));
        assert!(close(rect.width, 300.0));
        assert!(close(rect.y, 200.0));
        assert!(close(rect.height, 400.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let t = ViewTransform::cover(
            Viewport::new(800.0, 600.0),
            SourceDims::new(640, 480),
            true,
        );

        assert!(t.point(&NormalizedLandmark::new(f32::NAN, 0.5)).is_none());
        assert!(t
            .rect(&BoundingBox::new(0.1, 0.1, f32::INFINITY, 0.2))
            .is_none());
    }

    proptest! {
        #[test]
        fn prop_center_maps_to_draw_rect_center(
            cw in 16.0f32..4096.0,
            ch in 16.0f32..4096.0,
            vw in 16u32..4096,
            vh in 16u32..4096,
            mirrored in proptest::bool::ANY,
        ) {
            let t = ViewTransform::cover(
                Viewport::new(cw, ch),
                SourceDims::new(vw, vh),
                mirrored,
            );
            let center = t.draw_rect().center();
            let p = t.xy(0.5, 0.5);

            prop_assert!((p.x - center.x).abs() < 1e-1);
            prop_assert!((p.y - center.y).abs() < 1e-1);
        }

        #[test]
        fn prop_cover_fully_covers_canvas(
            cw in 16.0f32..4096.0,
            ch in 16.0f32..4096.0,
            vw in 16u32..4096,
            vh in 16u32..4096,
        ) {
            let t = ViewTransform::cover(
                Viewport::new(cw, ch),
                SourceDims::new(vw, vh),
                false,
            );
            let rect = t.draw_rect();

            prop_assert!(rect.x <= 1e-2);
            prop_assert!(rect.y <= 1e-2);
            prop_assert!(rect.x + rect.width >= cw - 1e-1);
            prop_assert!(rect.y + rect.height >= ch - 1e-1);
        }
    }
}

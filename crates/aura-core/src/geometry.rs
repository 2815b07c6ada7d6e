//! Normalized geometry primitives
//!
//! Detectors emit coordinates in [0,1] relative to the source frame; the
//! render layer converts them to canvas pixels. Nothing here assumes a
//! particular canvas size.

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A single tracked landmark in normalized [0,1] coordinates.
///
/// `z` is detector-relative depth when the detector provides it; absent
/// `visibility` means fully visible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    pub z: Option<f32>,
    pub visibility: Option<f32>,
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Visibility with the "absent means fully visible" convention applied.
    #[inline]
    pub fn visibility_or_full(&self) -> f32 {
        self.visibility.unwrap_or(1.0)
    }

    /// True when both plane coordinates are finite numbers.
    ///
    /// Detectors occasionally emit NaN under tracking loss; such points are
    /// skipped element-by-element rather than aborting a frame.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn lerp(&self, other: &NormalizedLandmark, t: f32) -> NormalizedLandmark {
        NormalizedLandmark {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: match (self.z, other.z) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (a, b) => if t < 0.5 { a } else { b },
            },
            visibility: match (self.visibility, other.visibility) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (a, b) => if t < 0.5 { a } else { b },
            },
        }
    }
}

/// Axis-aligned box in normalized coordinates, top-left origin.
///
/// `x + width` may exceed 1.0; detectors are allowed to emit boxes that
/// overrun the frame and the renderer clips implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Tightest box around a set of landmarks, ignoring non-finite points.
    /// Returns `None` when no finite point exists.
    pub fn around(landmarks: &[NormalizedLandmark]) -> Option<BoundingBox> {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut any = false;

        for lm in landmarks.iter().filter(|lm| lm.is_finite()) {
            min_x = min_x.min(lm.x);
            min_y = min_y.min(lm.y);
            max_x = max_x.max(lm.x);
            max_y = max_y.max(lm.y);
            any = true;
        }

        if !any {
            return None;
        }

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

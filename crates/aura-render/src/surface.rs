//! Render surfaces - the imperative half of rendering
//!
//! A surface only needs the small primitive set the draw commands use; the
//! compositor never knows which backend it feeds. The software framebuffer
//! below is a real backend (and what the tests observe): it rasterizes
//! geometry into RGBA pixels. It has no video decoder, so a video command
//! stamps the plane extent with a constant plane color, and text is
//! recorded as runs rather than rasterized glyphs; side-channel text lives
//! outside the raster path anyway.

use aura_core::{OverlayError, OverlayResult, Point};

use crate::{Color, DrawCmd, DrawList, Rect, Viewport};

/// A rasterization backend for draw lists.
pub trait RenderSurface {
    /// Current canvas dimensions; re-read every frame so container resizes
    /// self-correct on the next invocation.
    fn viewport(&self) -> Viewport;

    /// Rasterize one frame's commands. An error aborts this invocation
    /// only; the render loop re-arms regardless.
    fn submit(&mut self, list: &DrawList) -> OverlayResult<()>;
}

/// A recorded text draw (origin in pixels).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub origin: Point,
    pub text: String,
    pub size: f32,
}

/// The color a video command stamps, standing in for the decoded plane.
pub const VIDEO_PLANE: [u8; 4] = [24, 24, 24, 255];

const CLEAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// CPU framebuffer backend.
#[derive(Debug)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    opacity: f32,
    text_runs: Vec<TextRun>,
}

impl SoftwareSurface {
    /// Errors with `SurfaceUnavailable` on a degenerate size, mirroring a
    /// failed context acquisition.
    pub fn new(width: u32, height: u32) -> OverlayResult<Self> {
        if width == 0 || height == 0 {
            return Err(OverlayError::SurfaceUnavailable);
        }
        Ok(Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; (width * height) as usize],
            opacity: 1.0,
            text_runs: Vec::new(),
        })
    }

    /// Resize the backing buffer (container resize between frames).
    pub fn resize(&mut self, width: u32, height: u32) -> OverlayResult<()> {
        if width == 0 || height == 0 {
            return Err(OverlayError::SurfaceUnavailable);
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![CLEAR_COLOR; (width * height) as usize];
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Text draws recorded since the last clear.
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    /// How many pixels differ from the cleared background.
    pub fn touched_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != CLEAR_COLOR).count()
    }

    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = (color.a * self.opacity).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }

        let idx = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[idx];
        let mix = |src: f32, dst: u8| -> u8 {
            let d = dst as f32 / 255.0;
            ((src * a + d * (1.0 - a)) * 255.0).round() as u8
        };
        self.pixels[idx] = [
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            255,
        ];
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.floor() as i64;
        let y0 = rect.y.floor() as i64;
        let x1 = (rect.x + rect.width).ceil() as i64;
        let y1 = (rect.y + rect.height).ceil() as i64;

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let w = width.round().max(1.0);
        // top and bottom edges
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color);
        self.fill_rect(
            Rect::new(rect.x, rect.y + rect.height - w, rect.width, w),
            color,
        );
        // left and right edges
        self.fill_rect(Rect::new(rect.x, rect.y, w, rect.height), color);
        self.fill_rect(
            Rect::new(rect.x + rect.width - w, rect.y, w, rect.height),
            color,
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        // Bresenham over rounded endpoints; this backend approximates glow
        // by the line itself
        let mut x0 = from.x.round() as i64;
        let mut y0 = from.y.round() as i64;
        let x1 = to.x.round() as i64;
        let y1 = to.y.round() as i64;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn circle(&mut self, center: Point, radius: f32, color: Color, filled: bool) {
        let r = radius.max(0.5);
        let x0 = (center.x - r).floor() as i64;
        let y0 = (center.y - r).floor() as i64;
        let x1 = (center.x + r).ceil() as i64;
        let y1 = (center.y + r).ceil() as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                let d = (dx * dx + dy * dy).sqrt();
                let inside = if filled { d <= r } else { d <= r && d >= r - 1.0 };
                if inside {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl RenderSurface for SoftwareSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    fn submit(&mut self, list: &DrawList) -> OverlayResult<()> {
        for cmd in list.iter() {
            match cmd {
                DrawCmd::Clear => {
                    self.pixels.fill(CLEAR_COLOR);
                    self.text_runs.clear();
                    self.opacity = 1.0;
                }
                DrawCmd::Video { dst, .. } => {
                    let color = Color::rgb(
                        VIDEO_PLANE[0] as f32 / 255.0,
                        VIDEO_PLANE[1] as f32 / 255.0,
                        VIDEO_PLANE[2] as f32 / 255.0,
                    );
                    self.fill_rect(*dst, color);
                }
                DrawCmd::SetOpacity(o) => {
                    self.opacity = o.clamp(0.0, 1.0);
                }
                DrawCmd::Line {
                    from, to, color, ..
                } => {
                    self.line(*from, *to, *color);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                    filled,
                } => {
                    self.circle(*center, *radius, *color, *filled);
                }
                DrawCmd::StrokeRect { rect, color, width } => {
                    self.stroke_rect(*rect, *color, *width);
                }
                DrawCmd::FillRect { rect, color } => {
                    self.fill_rect(*rect, *color);
                }
                DrawCmd::Text {
                    origin, text, size, ..
                } => {
                    self.text_runs.push(TextRun {
                        origin: *origin,
                        text: text.clone(),
                        size: *size,
                    });
                }
            }
        }
        Ok(())
    }
}

//! Draw commands - the output of one compose pass
//!
//! The compositor is pure: it never touches a drawing context, it emits an
//! ordered command list. Whatever rasterizes the list (software framebuffer,
//! canvas, GPU surface) only needs the primitives below.

use aura_core::Point;

use crate::Rect;

/// Color with straight alpha, all channels in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface
    Clear,
    /// Draw the current video frame into `dst`, horizontally flipped when
    /// `mirrored`
    Video { dst: Rect, mirrored: bool },
    /// Set the global opacity applied to subsequent commands
    SetOpacity(f32),
    /// Stroke a line segment; `glow` is a soft shadow-blur radius in pixels
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        glow: f32,
    },
    /// A joint/iris marker
    Circle {
        center: Point,
        radius: f32,
        color: Color,
        filled: bool,
    },
    /// Stroke a rectangle outline
    StrokeRect { rect: Rect, color: Color, width: f32 },
    /// Fill a rectangle (label chips, panels)
    FillRect { rect: Rect, color: Color },
    /// Draw text at a baseline origin
    Text {
        origin: Point,
        text: String,
        color: Color,
        size: f32,
    },
}

/// Ordered draw commands for one composited frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }

    /// Count of line segments, handy in tests.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { .. }))
            .count()
    }

    /// All text payloads, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let a = Color::BLACK;
        let b = Color::WHITE;

        let mid = a.lerp(&b, 0.5);
        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.a - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_draw_list_helpers() {
        let mut list = DrawList::new();
        list.push(DrawCmd::Clear);
        list.push(DrawCmd::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            color: Color::WHITE,
            width: 2.0,
            glow: 0.0,
        });
        list.push(DrawCmd::Text {
            origin: Point::new(5.0, 5.0),
            text: "person 90%".into(),
            color: Color::WHITE,
            size: 12.0,
        });

        assert_eq!(list.len(), 3);
        assert_eq!(list.line_count(), 1);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["person 90%"]);
    }
}

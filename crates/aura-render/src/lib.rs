//! AURA Render - Snapshot to pixels
//!
//! Rendering is split into a pure half and an imperative half. The pure
//! half turns a scene snapshot plus configuration plus a view transform
//! into an ordered list of draw commands; the imperative half is a small
//! drawing-primitive surface (line, circle, rect, text) that rasterizes the
//! list. Backends are swappable behind [`RenderSurface`]; a software
//! framebuffer implementation ships here and carries the tests.
//!
//! Layer order is fixed: video, then objects, pose, hands, face. Least
//! visually intrusive first, the detailed face mesh last and on top.

pub mod command;
pub mod compositor;
pub mod layers;
pub mod surface;
pub mod topology;
pub mod transform;

pub use command::*;
pub use compositor::*;
pub use layers::*;
pub use surface::*;
pub use transform::*;

//! Detector adapter contracts
//!
//! A detector is an explicit owned resource with a documented lifecycle:
//! `init` once, `detect` per frame while ready, `close` at teardown. The
//! hosting task owns its detector outright, so two initializations of the
//! same instance cannot race.
//!
//! Failure stays inside the adapter boundary: `detect` returning `None`
//! means "nothing this cycle" and is silently tolerated; no error type ever
//! crosses into the cache or render paths.

use std::time::Duration;

use bytes::Bytes;

use aura_core::{Modality, OverlayResult};
use aura_render::SourceDims;
use aura_snapshot::DetectionUpdate;

/// One captured frame. Pixel data is reference-counted; grabbing and
/// handing a frame to several adapters copies nothing.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Bytes, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn dims(&self) -> SourceDims {
        SourceDims::new(self.width, self.height)
    }
}

/// A live video source.
///
/// Readiness is signaled by `dimensions()` turning non-zero; `grab` may
/// return `None` before the first decoded frame.
pub trait FrameSource: Send + Sync {
    fn dimensions(&self) -> SourceDims;
    fn grab(&self) -> Option<Frame>;
}

/// A detection model behind the adapter boundary.
///
/// `detect` is a synchronous inference call; the hosting task provides the
/// asynchrony. Returning `None` means the detector produced nothing this
/// cycle (failure included) and leaves the previous cached value alone;
/// returning an empty update (no landmarks, no objects) explicitly clears
/// the slot. Implementations must never emit landmark arrays of a wrong
/// fixed length; deliver "no detection" instead.
pub trait Detector: Send {
    fn modality(&self) -> Modality;

    /// Load the model. Called exactly once by the hosting task before any
    /// `detect`.
    fn init(&mut self) -> OverlayResult<()>;

    fn is_ready(&self) -> bool;

    /// How often the hosting task feeds this detector.
    fn cadence(&self) -> Duration {
        Duration::from_millis(33)
    }

    fn detect(&mut self, frame: &Frame) -> Option<DetectionUpdate>;

    /// Release model resources. Called once at teardown.
    fn close(&mut self);
}

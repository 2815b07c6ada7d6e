//! Error types for the overlay engine
//!
//! Detector failure is never an error at this level: adapters collapse it
//! to "no detection this cycle" before it reaches the cache. Errors here
//! cover the seams that genuinely can fail: surfaces, sources, lifecycles.

use thiserror::Error;

use crate::Modality;

/// Overlay engine errors
#[derive(Error, Debug)]
pub enum OverlayError {
    /// No rendering surface could be acquired; overlay is unavailable for
    /// this session but the host must keep running.
    #[error("Rendering surface unavailable")]
    SurfaceUnavailable,

    #[error("Frame source has no decoded dimensions yet")]
    SourceNotReady,

    #[error("Detector not initialized: {0}")]
    DetectorNotReady(Modality),

    #[error("Detector already closed: {0}")]
    DetectorClosed(Modality),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("Capture session already closed")]
    SessionClosed,
}

/// Result type for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;

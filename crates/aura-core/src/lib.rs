//! AURA Core - Fundamental types and primitives
//!
//! This crate defines the types shared by the whole overlay engine:
//! - Normalized geometry (landmarks, bounding boxes)
//! - Detection result entities, one per modality
//! - The modality enumeration
//! - Capture-relative time
//! - Module configuration
//! - The error taxonomy

pub mod config;
pub mod detections;
pub mod error;
pub mod geometry;
pub mod modality;
pub mod time;

pub use config::*;
pub use detections::*;
pub use error::*;
pub use geometry::*;
pub use modality::*;
pub use time::*;

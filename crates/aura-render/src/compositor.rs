//! Compositor - one composited frame per invocation
//!
//! `compose` is the pure heart of the render path: snapshot + config +
//! transform in, ordered draw commands out. The frame throttle decouples
//! the compositor's effective rate (~30 Hz) from the display's native
//! refresh and from every detector's cadence: ticks under the interval skip
//! the work but the loop re-arms regardless.

use std::time::Duration;

use aura_core::{CaptureTime, Modality, ModuleConfig};
use aura_snapshot::SceneSnapshot;

use crate::{
    layers, DrawCmd, DrawList, SourceDims, ViewTransform, Viewport,
};

/// Default effective compose rate cap.
pub const DEFAULT_MAX_FPS: f32 = 30.0;

/// Produce the draw commands for one composited frame.
///
/// Layer order is fixed: video, objects, pose, hands, face. A layer draws
/// only when its module is enabled AND its display toggle is on; config
/// gates rendering here even if a stale value slipped past an ungated read.
pub fn compose(
    snapshot: &SceneSnapshot,
    config: &ModuleConfig,
    transform: &ViewTransform,
    source: SourceDims,
) -> DrawList {
    let mut list = DrawList::new();
    list.push(DrawCmd::Clear);

    if source.is_ready() {
        list.push(DrawCmd::Video {
            dst: transform.draw_rect(),
            mirrored: transform.is_mirrored(),
        });
    }

    list.push(DrawCmd::SetOpacity(config.opacity));

    if config.enabled(Modality::Object) {
        layers::render_objects(&mut list, &snapshot.objects, config, transform);
    }

    if config.enabled(Modality::Pose) && config.show_skeleton {
        if let Some(landmarks) = &snapshot.pose_landmarks {
            layers::render_pose(&mut list, landmarks, transform);
        }
    }

    if config.enabled(Modality::Hand) {
        layers::render_hands(&mut list, &snapshot.hands, config, transform);
    }

    if config.enabled(Modality::FaceMesh) {
        if let Some(landmarks) = &snapshot.face_landmarks {
            layers::render_face(&mut list, landmarks, transform);
        }
    }

    list.push(DrawCmd::SetOpacity(1.0));
    tracing::trace!(commands = list.len(), "composed frame");
    list
}

/// Caps effective frame work by timestamp comparison.
///
/// `should_run` answers "is it time to draw again"; a `false` means skip
/// the work this tick and try again next tick. The caller re-arms either
/// way.
#[derive(Debug)]
pub struct FrameThrottle {
    min_interval: Duration,
    last_run: Option<CaptureTime>,
}

impl FrameThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_run: None,
        }
    }

    pub fn with_max_fps(fps: f32) -> Self {
        Self::new(Duration::from_secs_f32(1.0 / fps.max(1.0)))
    }

    /// True when enough time has elapsed since the last executed frame;
    /// records `now` as the new last-executed timestamp when it is.
    pub fn should_run(&mut self, now: CaptureTime) -> bool {
        match self.last_run {
            Some(last) if now.since(last) < self.min_interval => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_run = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::with_max_fps(DEFAULT_MAX_FPS)
    }
}

/// Percent-of-canvas anchor for a side-channel panel.
///
/// Panels carry crisp text and live outside the raster canvas; they are
/// positioned with the same transform as the overlay so they track the
/// face, but refreshed at snapshot cadence, not the capped canvas rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelAnchor {
    pub x_pct: f32,
    pub y_pct: f32,
}

/// Placement of the side-channel panels for the current snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelLayout {
    /// Attribute card anchor, present when the card should show
    pub bio_card: Option<PanelAnchor>,
    /// Transcript panel visibility
    pub transcript_visible: bool,
}

/// Compute side-panel placement from the same snapshot and transform the
/// canvas uses.
pub fn panel_layout(
    snapshot: &SceneSnapshot,
    config: &ModuleConfig,
    transform: &ViewTransform,
    viewport: Viewport,
) -> PanelLayout {
    let mut layout = PanelLayout::default();

    if config.enabled(Modality::FaceAttributes) && config.show_bio_card {
        if let Some(attrs) = &snapshot.face_bio {
            // prefer the forehead mesh landmark; fall back to the attribute
            // detector's own box when the mesh is absent
            let anchor_point = snapshot
                .face_landmarks
                .as_ref()
                .and_then(|lms| lms.get(crate::topology::FACE_FOREHEAD))
                .and_then(|lm| transform.point(lm))
                .or_else(|| {
                    transform
                        .rect(&attrs.bounding_box)
                        .map(|r| aura_core::Point::new(r.x + r.width / 2.0, r.y))
                });

            if let Some(p) = anchor_point {
                layout.bio_card = Some(PanelAnchor {
                    x_pct: (p.x / viewport.width * 100.0).clamp(0.0, 100.0),
                    y_pct: (p.y / viewport.height * 100.0).clamp(0.0, 100.0),
                });
            }
        }
    }

    layout.transcript_visible = config.enabled(Modality::Speech)
        && config.show_transcript
        && !snapshot.speech.is_empty();

    layout
}

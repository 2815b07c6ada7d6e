//! Capture session - lifecycle owner for adapters and the render loop
//!
//! One task per detector, one render task, one shared cache. Detector
//! completions write; the render tick reads, composes, submits. Teardown
//! stops the loop's re-arming, closes every detector, and clears the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use aura_core::{CaptureTime, Modality, ModuleConfig};
use aura_metrics::{estimate_proximity, ProximityEstimate};
use aura_render::{
    compose, panel_layout, FrameThrottle, PanelLayout, RenderSurface, ViewTransform, Viewport,
};
use aura_snapshot::{SceneSnapshot, SnapshotCache};

use crate::{Detector, FrameSource};

/// Session tuning.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Render tick granularity (the "display refresh" the throttle divides)
    pub tick_interval: Duration,
    /// Effective compose rate cap
    pub max_fps: f32,
    /// Quiet window after which a modality's slot is cleared; `None`
    /// disables the staleness policy entirely
    pub staleness_window: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            max_fps: aura_render::DEFAULT_MAX_FPS,
            staleness_window: Some(Duration::from_secs(2)),
        }
    }
}

/// Monotonic clock anchored at session start; the only place `Instant`
/// is converted to [`CaptureTime`].
#[derive(Debug)]
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> CaptureTime {
        CaptureTime::from_micros(self.started.elapsed().as_micros() as u64)
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears slots that have gone quiet. The cache itself never times
/// anything out; this policy is the explicit collaborator layered on top,
/// applied by the render tick.
#[derive(Debug, Clone)]
pub struct StalenessPolicy {
    window: Duration,
}

impl StalenessPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn apply(&self, cache: &SnapshotCache, now: CaptureTime) {
        for &modality in Modality::all() {
            if let Some(updated) = cache.last_update(modality) {
                if now.since(updated) > self.window {
                    debug!(modality = %modality, "clearing stale slot");
                    cache.clear(modality);
                }
            }
        }
    }
}

/// A running overlay session.
pub struct CaptureSession {
    cache: Arc<SnapshotCache>,
    config: Arc<RwLock<ModuleConfig>>,
    clock: Arc<SessionClock>,
    source: Arc<dyn FrameSource>,
    last_viewport: Arc<RwLock<Viewport>>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl CaptureSession {
    /// Spawn adapter and render tasks. Must be called within a tokio
    /// runtime.
    ///
    /// A detector whose `init` fails degrades to "no results ever" for its
    /// modality; the session itself still starts.
    pub fn start(
        source: Arc<dyn FrameSource>,
        detectors: Vec<Box<dyn Detector>>,
        surface: Box<dyn RenderSurface + Send>,
        session_config: SessionConfig,
        module_config: ModuleConfig,
    ) -> Self {
        let cache = Arc::new(SnapshotCache::new());
        let config = Arc::new(RwLock::new(module_config));
        let clock = Arc::new(SessionClock::new());
        let last_viewport = Arc::new(RwLock::new(surface.viewport()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut tasks = Vec::with_capacity(detectors.len() + 1);

        for detector in detectors {
            tasks.push(tokio::spawn(run_adapter(
                detector,
                Arc::clone(&source),
                Arc::clone(&cache),
                Arc::clone(&config),
                Arc::clone(&clock),
                shutdown_rx.clone(),
            )));
        }

        tasks.push(tokio::spawn(run_render(
            surface,
            Arc::clone(&source),
            Arc::clone(&cache),
            Arc::clone(&config),
            Arc::clone(&clock),
            Arc::clone(&last_viewport),
            shutdown_rx,
            session_config,
        )));

        info!(tasks = tasks.len(), "capture session started");

        Self {
            cache,
            config,
            clock,
            source,
            last_viewport,
            shutdown_tx,
            tasks,
        }
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Current module configuration (copy).
    pub fn module_config(&self) -> ModuleConfig {
        self.config.read().clone()
    }

    /// Apply a pure config transition.
    pub fn update_config(&self, f: impl FnOnce(&mut ModuleConfig)) {
        f(&mut self.config.write());
    }

    /// Enable or disable one module. Disabling stops feeding that detector
    /// and clears its cache slot so stale results stop rendering;
    /// re-enabling starts a fresh detection cycle with no replay.
    pub fn set_module_enabled(&self, modality: Modality, enabled: bool) {
        self.config.write().set_enabled(modality, enabled);
        if !enabled {
            self.cache.clear(modality);
        }
    }

    /// The latest snapshot, config-gated, for side-channel consumers.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.cache.read_gated(&self.config.read())
    }

    /// Side-panel placement for the current snapshot, at snapshot cadence.
    pub fn panels(&self) -> PanelLayout {
        let viewport = *self.last_viewport.read();
        let dims = self.source.dimensions();
        let transform = ViewTransform::cover(viewport, dims, true);
        let config = self.config.read().clone();
        panel_layout(&self.snapshot(), &config, &transform, viewport)
    }

    /// Derived closeness signal over the current gated snapshot.
    pub fn proximity(&self) -> ProximityEstimate {
        let snapshot = self.snapshot();
        estimate_proximity(
            snapshot.pose_landmarks.as_deref(),
            snapshot.face_landmarks.as_deref(),
        )
    }

    /// Stop re-arming the render loop, close every detector, release the
    /// cache.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "session task ended abnormally");
                }
            }
        }
        self.cache.clear_all();
        info!("capture session stopped");
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// One detector's hosting loop: init once, then detect at the detector's
/// own cadence while its module is enabled. Completions only ever write
/// into the cache.
async fn run_adapter(
    mut detector: Box<dyn Detector>,
    source: Arc<dyn FrameSource>,
    cache: Arc<SnapshotCache>,
    config: Arc<RwLock<ModuleConfig>>,
    clock: Arc<SessionClock>,
    mut shutdown: watch::Receiver<bool>,
) {
    let modality = detector.modality();

    if let Err(e) = detector.init() {
        // degraded start: this modality simply never produces results
        warn!(modality = %modality, error = %e, "detector failed to initialize");
        return;
    }
    debug!(modality = %modality, cadence = ?detector.cadence(), "detector ready");

    let mut interval = tokio::time::interval(detector.cadence());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => {}
        }

        if !config.read().enabled(modality) {
            continue;
        }

        let Some(frame) = source.grab() else {
            continue;
        };

        let submitted_at = clock.now();
        if let Some(update) = detector.detect(&frame) {
            debug_assert_eq!(update.modality(), modality);
            cache.update_at(update, submitted_at);
        }
    }

    detector.close();
    debug!(modality = %modality, "detector closed");
}

/// The render loop: a continuously re-armed tick, throttled to the
/// effective cap. A failed submit aborts that invocation only.
#[allow(clippy::too_many_arguments)]
async fn run_render(
    mut surface: Box<dyn RenderSurface + Send>,
    source: Arc<dyn FrameSource>,
    cache: Arc<SnapshotCache>,
    config: Arc<RwLock<ModuleConfig>>,
    clock: Arc<SessionClock>,
    last_viewport: Arc<RwLock<Viewport>>,
    mut shutdown: watch::Receiver<bool>,
    session_config: SessionConfig,
) {
    let mut throttle = FrameThrottle::with_max_fps(session_config.max_fps);
    let staleness = session_config.staleness_window.map(StalenessPolicy::new);
    let mut interval = tokio::time::interval(session_config.tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => {}
        }

        let now = clock.now();
        if !throttle.should_run(now) {
            // under the cap: skip the work, stay armed
            continue;
        }

        if let Some(policy) = &staleness {
            policy.apply(&cache, now);
        }

        // viewport and transform are recomputed every frame; a container
        // resize mid-frame self-corrects next frame
        let viewport = surface.viewport();
        *last_viewport.write() = viewport;

        let dims = source.dimensions();
        let transform = ViewTransform::cover(viewport, dims, true);
        let module_config = config.read().clone();
        let snapshot = cache.read_gated(&module_config);

        let list = compose(&snapshot, &module_config, &transform, dims);
        if let Err(e) = surface.submit(&list) {
            warn!(error = %e, "render submit failed, skipping frame");
        }
    }
}

use tracing::debug;

use crate::core::{Layout, SelectionState, TimelineManager, TimelineRect};
use crate::error::DiaryResult;
use crate::extensions::{DiaryEvent, DiaryPlugin};
use crate::interaction::{
    AutoScrollState, KeyboardInteraction, LiveRegion, PointerInteraction, TransientFeedback,
};
use crate::render::Renderer;

use super::validation::validate_engine_config;
use super::{DiaryConfig, DiaryEngineConfig};

/// Main orchestration facade consumed by host applications.
///
/// `DiaryEngine` owns the `TimelineManager`, hands it to whichever input
/// state machine is driving, and pushes a fresh frame to the renderer after
/// every store change.
pub struct DiaryEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) manager: TimelineManager,
    pub(super) config: DiaryEngineConfig,
    pub(super) layout: Layout,
    pub(super) timeline_rect: TimelineRect,
    pub(super) selection: Option<SelectionState>,
    pub(super) pointer: PointerInteraction,
    pub(super) keyboard: KeyboardInteraction,
    pub(super) live_region: LiveRegion,
    pub(super) feedback: TransientFeedback,
    pub(super) auto_scroll: AutoScrollState,
    pub(super) plugins: Vec<Box<dyn DiaryPlugin>>,
}

impl<R: Renderer> DiaryEngine<R> {
    pub fn new(renderer: R, diary: &DiaryConfig, config: DiaryEngineConfig) -> DiaryResult<Self> {
        let config = validate_engine_config(config)?;
        let manager = TimelineManager::new(diary.build_modules()?)?;
        let layout = Layout::for_viewport_width(config.viewport_width_px, config.layout_breakpoint_px);
        debug!(?layout, timelines = manager.module_count(), "diary engine initialized");
        Ok(Self {
            renderer,
            manager,
            config,
            layout,
            timeline_rect: config.timeline_rect,
            selection: None,
            pointer: PointerInteraction::default(),
            keyboard: KeyboardInteraction::default(),
            live_region: LiveRegion::default(),
            feedback: TransientFeedback::new(config.invalid_flash_seconds),
            auto_scroll: AutoScrollState::new(config.auto_scroll),
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn manager(&self) -> &TimelineManager {
        &self.manager
    }

    #[must_use]
    pub fn config(&self) -> DiaryEngineConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn timeline_rect(&self) -> TimelineRect {
        self.timeline_rect
    }

    #[must_use]
    pub fn live_region(&self) -> &LiveRegion {
        &self.live_region
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Rebuilds the frame from the store and hands it to the renderer.
    pub fn render(&mut self) -> DiaryResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        self.emit_event(DiaryEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

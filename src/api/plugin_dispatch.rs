use crate::extensions::{DiaryContext, DiaryEvent};
use crate::render::Renderer;

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    pub(super) fn plugin_context(&self) -> DiaryContext {
        DiaryContext {
            active_index: self.manager.active_index(),
            layout: self.layout,
            activities_len: self.manager.active_activities().len(),
            coverage_minutes: self.manager.coverage(),
            interaction_mode: self.pointer.mode(),
            keyboard_mode: self.keyboard.mode(),
        }
    }

    pub(super) fn emit_event(&mut self, event: DiaryEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}

use tracing::trace;

use crate::core::time_math::slot_to_minutes;
use crate::core::{ActivityRecord, Axis, MINUTE_INCREMENT, TimeSpan};
use crate::interaction::FlashTarget;
use crate::render::{
    BlockPrimitive, BlockState, Color, DEFAULT_BLOCK_COLOR, Renderer, SlotRangePrimitive,
    TimelineFrame,
};

use super::DiaryEngine;

impl<R: Renderer> DiaryEngine<R> {
    /// Projects the active timeline's store into a render frame.
    #[must_use]
    pub fn build_frame(&self) -> TimelineFrame {
        let axis = self.layout.axis();
        let resizing = self.pointer.session().map(|session| session.id);
        let flash = self.feedback.current();
        let flashed_id = flash.and_then(|flash| match flash.target {
            FlashTarget::Activity(id) => Some(id),
            FlashTarget::Candidate => None,
        });

        let activities = self.manager.active_activities();
        let mut frame = TimelineFrame::new(self.manager.active_key(), self.layout);
        for record in activities.sorted_by_start() {
            let state = if flashed_id == Some(record.id) {
                BlockState::Invalid
            } else if resizing == Some(record.id) {
                BlockState::Resizing
            } else {
                BlockState::Normal
            };
            frame = frame.with_block(block_for_record(record, axis, state));
        }

        frame.invalid_candidate = flash
            .filter(|flash| flash.target == FlashTarget::Candidate)
            .map(|flash| {
                let mut block = BlockPrimitive::from_span(flash.span, axis);
                if let Some(selection) = &self.selection {
                    block.activity = selection.label();
                    block.category = selection.category.clone();
                    block.color = parse_color(&selection.color());
                }
                block.state = BlockState::Invalid;
                block
            });

        let focus_start = slot_to_minutes(self.keyboard.focus());
        frame.keyboard_focus = Some(SlotRangePrimitive::from_span(TimeSpan::new(
            focus_start,
            focus_start + MINUTE_INCREMENT,
        )));
        frame.keyboard_selection = self
            .keyboard
            .selected_span()
            .map(SlotRangePrimitive::from_span);
        frame.coverage_minutes = activities.coverage();
        frame
    }
}

fn block_for_record(
    record: &ActivityRecord,
    axis: Axis,
    state: BlockState,
) -> BlockPrimitive {
    let mut block = BlockPrimitive::from_span(record.span(), axis);
    block.id = Some(record.id);
    block.activity = record.activity.clone();
    block.category = record.category.clone();
    block.color = parse_color(&record.color);
    block.state = state;
    block
}

fn parse_color(text: &str) -> Color {
    Color::from_hex(text).unwrap_or_else(|err| {
        trace!(error = %err, "falling back to default block color");
        DEFAULT_BLOCK_COLOR
    })
}

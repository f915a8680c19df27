use crate::error::DiaryResult;
use crate::render::{Renderer, TimelineFrame};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frames and keeps the last one so tests can inspect the
/// projection the host would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_block_count: usize,
    pub last_frame: Option<TimelineFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> DiaryResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_block_count = frame.blocks.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

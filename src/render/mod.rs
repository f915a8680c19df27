mod frame;
mod null_renderer;
mod primitives;

pub use frame::TimelineFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{BlockPrimitive, BlockState, Color, DEFAULT_BLOCK_COLOR, SlotRangePrimitive};

use crate::error::DiaryResult;

/// Contract implemented by any rendering backend (DOM bridge, canvas, ...).
///
/// Backends receive a fully materialized `TimelineFrame` derived from the
/// activity store, so drawing code never becomes a source of truth.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> DiaryResult<()>;
}

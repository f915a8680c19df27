use serde::{Deserialize, Serialize};

use crate::core::Layout;
use crate::error::DiaryResult;
use crate::render::{BlockPrimitive, SlotRangePrimitive};

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub timeline_key: String,
    pub layout: Layout,
    /// Placed blocks sorted by start.
    pub blocks: Vec<BlockPrimitive>,
    /// Short-lived invalid block at a rejected click position.
    pub invalid_candidate: Option<BlockPrimitive>,
    pub keyboard_focus: Option<SlotRangePrimitive>,
    pub keyboard_selection: Option<SlotRangePrimitive>,
    pub coverage_minutes: u32,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(timeline_key: impl Into<String>, layout: Layout) -> Self {
        Self {
            timeline_key: timeline_key.into(),
            layout,
            blocks: Vec::new(),
            invalid_candidate: None,
            keyboard_focus: None,
            keyboard_selection: None,
            coverage_minutes: 0,
        }
    }

    #[must_use]
    pub fn with_block(mut self, block: BlockPrimitive) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn validate(&self) -> DiaryResult<()> {
        for block in &self.blocks {
            block.validate()?;
        }
        if let Some(candidate) = &self.invalid_candidate {
            candidate.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.invalid_candidate.is_none()
    }
}

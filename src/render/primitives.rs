use serde::{Deserialize, Serialize};

use crate::core::{ActivityId, Axis, TimeSpan, minutes_to_percentage};
use crate::error::{DiaryError, DiaryResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb` or `#rrggbb` as supplied by the activity chooser.
    pub fn from_hex(text: &str) -> DiaryResult<Self> {
        let invalid = || DiaryError::InvalidData(format!("invalid hex color `{text}`"));
        let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => return Err(invalid()),
        };
        let channel = |index: usize| -> DiaryResult<f64> {
            let byte = expanded
                .get(index..index + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)?;
            Ok(f64::from(byte) / 255.0)
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn validate(self) -> DiaryResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DiaryError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Fallback fill for records whose color string cannot be parsed.
pub const DEFAULT_BLOCK_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Normal,
    Resizing,
    Invalid,
}

/// Render projection of one activity block.
///
/// Carries every attribute a host renderer must preserve on the node: id,
/// category, display strings, absolute minutes and length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPrimitive {
    /// `None` for the throwaway block drawn at a rejected click.
    pub id: Option<ActivityId>,
    pub activity: String,
    pub category: String,
    pub color: Color,
    pub start_time: String,
    pub end_time: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub length_minutes: u32,
    pub axis: Axis,
    /// Position of the start edge along `axis`, in percent.
    pub offset_percent: f64,
    /// Size along `axis`, in percent.
    pub extent_percent: f64,
    pub state: BlockState,
}

impl BlockPrimitive {
    #[must_use]
    pub fn from_span(span: TimeSpan, axis: Axis) -> Self {
        let offset_percent = minutes_to_percentage(span.start);
        let end_percent = minutes_to_percentage(span.end);
        Self {
            id: None,
            activity: String::new(),
            category: String::new(),
            color: DEFAULT_BLOCK_COLOR,
            start_time: span.start_label(),
            end_time: span.end_label(),
            start_minutes: span.start,
            end_minutes: span.end,
            length_minutes: span.length(),
            axis,
            offset_percent,
            extent_percent: (end_percent - offset_percent).max(0.0),
            state: BlockState::Normal,
        }
    }

    pub fn validate(&self) -> DiaryResult<()> {
        if !self.offset_percent.is_finite() || !self.extent_percent.is_finite() {
            return Err(DiaryError::InvalidData(
                "block geometry must be finite".to_owned(),
            ));
        }
        if self.offset_percent < 0.0 || self.offset_percent + self.extent_percent > 100.0 + 1e-9 {
            return Err(DiaryError::InvalidData(
                "block geometry must stay inside the timeline".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Highlight for the keyboard-focused slot or the range being selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRangePrimitive {
    pub span: TimeSpan,
    pub offset_percent: f64,
    pub extent_percent: f64,
}

impl SlotRangePrimitive {
    #[must_use]
    pub fn from_span(span: TimeSpan) -> Self {
        let offset_percent = minutes_to_percentage(span.start);
        Self {
            span,
            offset_percent,
            extent_percent: (minutes_to_percentage(span.end) - offset_percent).max(0.0),
        }
    }
}

use serde_json::Value;

use crate::core::validate_min_coverage;
use crate::error::{DiaryError, DiaryResult};

use super::DiaryEngineConfig;

pub(super) fn validate_engine_config(config: DiaryEngineConfig) -> DiaryResult<DiaryEngineConfig> {
    if !config.viewport_width_px.is_finite() || config.viewport_width_px <= 0.0 {
        return Err(DiaryError::InvalidConfig(
            "viewport width must be finite and > 0".to_owned(),
        ));
    }
    if !config.layout_breakpoint_px.is_finite() || config.layout_breakpoint_px < 0.0 {
        return Err(DiaryError::InvalidConfig(
            "layout breakpoint must be finite and >= 0".to_owned(),
        ));
    }
    if !config.invalid_flash_seconds.is_finite() || config.invalid_flash_seconds <= 0.0 {
        return Err(DiaryError::InvalidConfig(
            "invalid flash duration must be finite and > 0".to_owned(),
        ));
    }
    let auto_scroll = config.auto_scroll;
    if !auto_scroll.edge_band_px.is_finite() || auto_scroll.edge_band_px < 0.0 {
        return Err(DiaryError::InvalidConfig(
            "auto-scroll edge band must be finite and >= 0".to_owned(),
        ));
    }
    if !auto_scroll.max_speed_px_per_sec.is_finite() || auto_scroll.max_speed_px_per_sec < 0.0 {
        return Err(DiaryError::InvalidConfig(
            "auto-scroll speed must be finite and >= 0".to_owned(),
        ));
    }
    if !config.timeline_rect.is_valid() {
        return Err(DiaryError::InvalidViewport {
            length: config.timeline_rect.width.min(config.timeline_rect.height),
        });
    }
    Ok(config)
}

/// Reads a configured minimum coverage. Missing or `null` means no minimum.
pub(super) fn min_coverage_from_json(value: Option<&Value>) -> DiaryResult<u32> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => {
            let minutes = number.as_f64().ok_or_else(|| {
                DiaryError::InvalidConfig(format!("minimum coverage {number} is not representable"))
            })?;
            validate_min_coverage(minutes)
        }
        Some(other) => Err(DiaryError::InvalidConfig(format!(
            "minimum coverage must be a number, got {other}"
        ))),
    }
}

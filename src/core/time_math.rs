use chrono::{NaiveTime, Timelike};

use crate::error::{DiaryError, DiaryResult};

/// 04:00 expressed as minutes since midnight.
pub const TIMELINE_START: u32 = 240;
/// 04:00 on the following calendar day.
pub const TIMELINE_END: u32 = 1680;
pub const DAY_MINUTES: u32 = 1440;
pub const MINUTE_INCREMENT: u32 = 10;
pub const MINUTES_PER_HOUR: u32 = 60;
/// Number of keyboard-navigable 10-minute slots in one timeline day.
pub const SLOT_COUNT: usize = (DAY_MINUTES / MINUTE_INCREMENT) as usize;

const NEXT_DAY_SUFFIX: &str = "(+1)";

/// Maps absolute minutes onto the timeline's dominant axis in `[0, 100]`.
///
/// Values before 04:00 belong to the tail of the diary day and wrap into the
/// next virtual day. The end boundary (1680) maps to 100.
#[must_use]
pub fn minutes_to_percentage(minutes: u32) -> f64 {
    let mut relative = i64::from(minutes) - i64::from(TIMELINE_START);
    if relative < 0 {
        relative += i64::from(DAY_MINUTES);
    }
    let percent = relative as f64 / f64::from(DAY_MINUTES) * 100.0;
    percent.clamp(0.0, 100.0)
}

/// Maps a percentage along the timeline back to absolute minutes.
///
/// The result is snapped to the 10-minute grid and clamped to
/// `[TIMELINE_START, TIMELINE_END]`.
pub fn position_to_minutes(percent: f64) -> DiaryResult<u32> {
    if !percent.is_finite() {
        return Err(DiaryError::InvalidData(
            "timeline percent must be finite".to_owned(),
        ));
    }
    let raw = f64::from(TIMELINE_START) + percent / 100.0 * f64::from(DAY_MINUTES);
    let snapped = round_to_increment(raw)
        .clamp(f64::from(TIMELINE_START), f64::from(TIMELINE_END));
    Ok(snapped as u32)
}

/// Rounds half away from zero to the nearest `MINUTE_INCREMENT`.
#[must_use]
pub fn round_to_increment(minutes: f64) -> f64 {
    let step = f64::from(MINUTE_INCREMENT);
    (minutes / step).round() * step
}

/// Formats absolute minutes as `HH:MM`, tagging next-day values with `(+1)`.
///
/// An end bound landing on 04:00 always means the following morning.
#[must_use]
pub fn format_time(minutes: u32, is_end: bool) -> String {
    let day_minutes = minutes % DAY_MINUTES;
    let hours = day_minutes / MINUTES_PER_HOUR;
    let mins = day_minutes % MINUTES_PER_HOUR;
    let next_day = minutes >= DAY_MINUTES || (is_end && day_minutes == TIMELINE_START);
    if next_day {
        format!("{hours:02}:{mins:02}{NEXT_DAY_SUFFIX}")
    } else {
        format!("{hours:02}:{mins:02}")
    }
}

/// Parses `HH:MM` or `HH:MM(+1)` into absolute minutes.
pub fn parse_time(text: &str) -> DiaryResult<u32> {
    let trimmed = text.trim();
    let (clock, next_day) = match trimmed.strip_suffix(NEXT_DAY_SUFFIX) {
        Some(clock) => (clock.trim_end(), true),
        None => (trimmed, false),
    };
    let time = NaiveTime::parse_from_str(clock, "%H:%M")
        .map_err(|e| DiaryError::InvalidData(format!("invalid time `{text}`: {e}")))?;
    let minutes = time.hour() * MINUTES_PER_HOUR + time.minute();
    Ok(if next_day {
        minutes + DAY_MINUTES
    } else {
        minutes
    })
}

#[must_use]
pub fn slot_to_minutes(slot: usize) -> u32 {
    let slot = slot.min(SLOT_COUNT - 1) as u32;
    TIMELINE_START + slot * MINUTE_INCREMENT
}

/// Slot containing `minutes`, clamped to the valid slot range.
#[must_use]
pub fn minutes_to_slot(minutes: u32) -> usize {
    let clamped = minutes.clamp(TIMELINE_START, TIMELINE_END - MINUTE_INCREMENT);
    ((clamped - TIMELINE_START) / MINUTE_INCREMENT) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn boundary_mappings_hit_both_ends() {
        assert_eq!(position_to_minutes(0.0).expect("0%"), TIMELINE_START);
        assert_eq!(position_to_minutes(100.0).expect("100%"), TIMELINE_END);
        assert_abs_diff_eq!(minutes_to_percentage(TIMELINE_START), 0.0);
        assert_abs_diff_eq!(minutes_to_percentage(TIMELINE_END), 100.0);
    }

    #[test]
    fn early_morning_minutes_wrap_into_next_virtual_day() {
        // 02:00 calendar time sits 22h after the 04:00 start.
        assert_abs_diff_eq!(minutes_to_percentage(120), 22.0 / 24.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn position_to_minutes_clamps_and_snaps() {
        assert_eq!(position_to_minutes(-15.0).expect("negative"), TIMELINE_START);
        assert_eq!(position_to_minutes(140.0).expect("overflow"), TIMELINE_END);
        // 0.3472% of 1440 is 5 minutes: half rounds away from zero.
        let five_minutes = 5.0 / 1440.0 * 100.0;
        assert_eq!(position_to_minutes(five_minutes).expect("half"), 250);
    }

    #[test]
    fn position_to_minutes_rejects_nan() {
        let err = position_to_minutes(f64::NAN).expect_err("nan must fail");
        assert!(format!("{err}").contains("percent"));
    }

    #[test]
    fn format_time_tags_next_day_values() {
        assert_eq!(format_time(240, false), "04:00");
        assert_eq!(format_time(1430, false), "23:50");
        assert_eq!(format_time(1440, false), "00:00(+1)");
        assert_eq!(format_time(1670, true), "03:50(+1)");
        assert_eq!(format_time(1680, true), "04:00(+1)");
        assert_eq!(format_time(240, true), "04:00(+1)");
    }

    #[test]
    fn parse_time_handles_suffix_and_rejects_garbage() {
        assert_eq!(parse_time("04:40").expect("plain"), 280);
        assert_eq!(parse_time("04:00(+1)").expect("suffixed"), 1680);
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn slot_helpers_cover_the_whole_day() {
        assert_eq!(slot_to_minutes(0), 240);
        assert_eq!(slot_to_minutes(143), 1670);
        assert_eq!(slot_to_minutes(500), 1670);
        assert_eq!(minutes_to_slot(280), 4);
        assert_eq!(minutes_to_slot(TIMELINE_END), SLOT_COUNT - 1);
    }
}

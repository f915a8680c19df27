pub mod activity;
pub mod activity_list;
pub mod layout;
pub mod placement;
pub mod time_math;
pub mod timeline_manager;
pub mod timeline_module;
pub mod types;

pub use activity::{ActivityChoice, ActivityId, ActivityOption, ActivityRecord, SelectionState};
pub use activity_list::ActivityList;
pub use layout::{Axis, Layout, PhysicalEdge, SpanEdge};
pub use placement::{
    PlacementRejection, PlacementVerdict, can_place, is_module_full, meets_minimum_coverage,
    placement_verdict, validate_min_coverage,
};
pub use time_math::{
    DAY_MINUTES, MINUTE_INCREMENT, SLOT_COUNT, TIMELINE_END, TIMELINE_START, format_time,
    minutes_to_percentage, parse_time, position_to_minutes,
};
pub use timeline_manager::TimelineManager;
pub use timeline_module::{ActivityCategory, SelectionMode, TimelineModule};
pub use types::{PointerPosition, TimeSpan, TimelineRect};

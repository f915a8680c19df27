mod diary_config;
mod engine;
mod engine_config;
mod engine_snapshot;
mod export;
mod json_contract;
mod keyboard_controller;
mod placement_controller;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod resize_controller;
mod snapshot_controller;
mod timeline_controller;
mod validation;

pub use diary_config::{DiaryConfig, TimelineConfig};
pub use engine::DiaryEngine;
pub use engine_config::DiaryEngineConfig;
pub use engine_snapshot::{DiarySnapshot, ModuleSnapshot};
pub use export::{ActivityRow, flatten_rows};
pub use json_contract::{DIARY_SNAPSHOT_JSON_SCHEMA_V1, DiarySnapshotJsonContractV1};

//! timeline-diary: time-use diary placement engine.
//!
//! Converts between minutes, axis percentages and pixels on a 24-hour
//! timeline that starts at 04:00, validates activity placement, and drives
//! pointer and keyboard interaction over a single activity store. Drawing is
//! delegated to a `render::Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{DiaryConfig, DiaryEngine, DiaryEngineConfig, TimelineConfig};
pub use error::{DiaryError, DiaryResult};

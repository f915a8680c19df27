//! Observer hooks for hosts that react to diary changes (autosave, logging,
//! progress indicators) without touching the core paths.

pub mod plugins;

pub use plugins::{DiaryContext, DiaryEvent, DiaryPlugin};

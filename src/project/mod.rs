//! # Project Module
//!
//! Read-only access to a project directory: the manifest, the ordered
//! vocabulary items, and the clip cache the engine renders into. Editing a
//! project (adding items, fetching narration or images) is the front end's
//! job; this module never writes project data.

pub mod item;
pub mod manifest;
pub mod store;

pub use item::VocabularyItem;
pub use manifest::{Color, ProjectManifest, RenderStyle};
pub use store::Project;

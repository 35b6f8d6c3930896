//! # Composition Module
//!
//! The composition engine coordinates sequence planning, text layout, and
//! graph assembly to turn a vocabulary project into one narrated video.

pub mod engine;
pub mod graph;
pub mod plan;
pub mod sequence;

// Re-exports for convenience
pub use engine::{CompositionEngine, GeneratedVideo};
pub use graph::{CompositionGraph, FilterNode, FilterOp, GraphBuilder, TextAlign};
pub use plan::{ColorRole, PlanBlock, SegmentPlan};
pub use sequence::{plan_sequence, SegmentDescriptor, SegmentKind};

//! # Wordreel
//!
//! Turn a vocabulary list into a narrated instructional video.
//!
//! This library takes a project directory (a manifest plus an ordered item
//! database with cached narration and illustrations) and composes one video:
//! an intro card followed by a word segment and an example segment per item,
//! each held on screen for as long as its narration needs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wordreel::{
//!     backend::FfmpegBackend,
//!     composition::CompositionEngine,
//!     config::Config,
//!     project::Project,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let project = Project::load("my_project/")?;
//!
//! let backend = Arc::new(FfmpegBackend::new(config.encode.clone()));
//! let engine = CompositionEngine::new(config, backend);
//! let video = engine.generate(&project, "output.mp4").await?;
//! println!("wrote {:?} ({:.1}s)", video.path, video.duration);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`project`] - Project loading and the vocabulary data model
//! - [`layout`] - Deterministic text fitting and vertical stacking
//! - [`composition`] - Main composition engine
//! - [`backend`] - Driver for the external compositing tool
//! - [`config`] - Configuration management
//!
//! ## Swapping the Backend
//!
//! Any tool that can composite a filter graph, probe durations, and
//! concatenate clips can drive the engine by implementing the
//! [`MediaBackend`](backend::MediaBackend) trait:
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use wordreel::backend::{MediaBackend, RenderRequest};
//! use wordreel::error::{BackendError, ProbeError};
//!
//! struct NullBackend;
//!
//! impl MediaBackend for NullBackend {
//!     fn probe_duration(&self, _path: &Path) -> Result<f64, ProbeError> {
//!         Ok(0.0)
//!     }
//!
//!     fn render(&self, _request: &RenderRequest) -> Result<(), BackendError> {
//!         Ok(())
//!     }
//!
//!     fn concat(&self, _manifest: &Path, _output: &Path) -> Result<(), BackendError> {
//!         Ok(())
//!     }
//!
//!     fn is_available(&self) -> bool {
//!         true
//!     }
//! }
//! ```

pub mod backend;
pub mod composition;
pub mod config;
pub mod error;
pub mod layout;
pub mod project;

// Re-export commonly used types for convenience
pub use crate::{
    backend::{FfmpegBackend, MediaBackend}, // Export the backend seam
    composition::{CompositionEngine, GeneratedVideo},
    config::Config,
    error::{GeneratorError, Result},
    project::Project,
};

//! # Media Backend Module
//!
//! The capability interface to the external compositing tool, plus its
//! FFmpeg implementation. Any backend offering graph compositing with text
//! and image overlays, audio mixing, duration probing and manifest
//! concatenation satisfies the engine.

pub mod ffmpeg;

pub use ffmpeg::FfmpegBackend;

use std::path::{Path, PathBuf};

use crate::composition::CompositionGraph;
use crate::error::{BackendError, ProbeError};

/// One render invocation: a graph, the requested clip duration, and the
/// output path
///
/// The duration carries the engine's literal request. A backend may clamp
/// degenerate values (such as zero) up to its shortest encodable clip.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub graph: CompositionGraph,
    pub duration: f64,
    pub output: PathBuf,
}

/// Capability interface over the external media-compositing tool
///
/// Implementations block until their external process completes; the
/// engine wraps every call in a blocking task.
pub trait MediaBackend: Send + Sync {
    /// Measure a media file's duration in seconds without decoding it
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;

    /// Render one composition graph to a clip file
    fn render(&self, request: &RenderRequest) -> Result<(), BackendError>;

    /// Concatenate the clips listed in `manifest`, re-encoded at constant
    /// rates, into `output`
    fn concat(&self, manifest: &Path, output: &Path) -> Result<(), BackendError>;

    /// Whether the backend's external tools can be invoked
    fn is_available(&self) -> bool;
}

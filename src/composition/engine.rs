use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;
use tracing::{debug, info, warn};

use crate::{
    backend::{MediaBackend, RenderRequest},
    config::Config,
    error::{BackendError, ConcatError, RenderError, Result},
    project::Project,
};

use super::{
    graph::GraphBuilder,
    plan::SegmentPlan,
    sequence::{plan_sequence, SegmentDescriptor, SegmentKind},
};

/// Main composition engine that orchestrates the entire video generation process
///
/// The engine follows a clear pipeline:
/// 1. Sequence Planning - Expand the item list into an ordered run of segments
/// 2. Segment Rendering - Lay out, compose, and encode one clip per segment
/// 3. Concatenation - Stitch the clips into the final video
pub struct CompositionEngine {
    config: Config,
    backend: Arc<dyn MediaBackend>,
}

/// One rendered clip on disk, with the duration it was encoded at
struct ClipFile {
    path: PathBuf,
    duration: f64,
}

/// Summary of a finished generation run
#[derive(Debug, Clone)]
pub struct GeneratedVideo {
    pub path: PathBuf,
    pub duration: f64,
    pub clip_count: usize,
    pub file_size: u64,
}

impl CompositionEngine {
    /// Create a new composition engine with the given configuration and backend
    pub fn new(config: Config, backend: Arc<dyn MediaBackend>) -> Self {
        Self { config, backend }
    }

    /// Main generation method - orchestrates the entire pipeline
    ///
    /// # Arguments
    ///
    /// * `project` - An opened project (manifest, items, asset cache)
    /// * `output_path` - Path for the final output video
    pub async fn generate<P: AsRef<Path>>(
        &self,
        project: &Project,
        output_path: P,
    ) -> Result<GeneratedVideo> {
        let output_path = output_path.as_ref();

        if !self.backend.is_available() {
            return Err(BackendError::NotFound { tool: "ffmpeg".to_string() }.into());
        }

        info!("🎬 Starting video generation");
        info!("   Project: {}", project.manifest().name);
        info!("   Items: {}", project.items().len());
        info!("   Output: {:?}", output_path);

        // Pipeline Step 1: Sequence Planning
        let descriptors = self.plan(project);

        // Pipeline Step 2: Segment Rendering
        let clips = self.render_segments(project, &descriptors).await?;

        // Pipeline Step 3: Concatenation
        let video = self.concatenate(project, &clips, output_path).await?;

        info!("🎉 Generation complete! Output saved to: {:?}", output_path);
        Ok(video)
    }

    // ==========================================
    // PIPELINE STEP 1: SEQUENCE PLANNING
    // ==========================================

    /// Expand the project's item list into the ordered render sequence
    fn plan(&self, project: &Project) -> Vec<SegmentDescriptor> {
        info!("📋 Step 1: Planning segment sequence...");

        let descriptors = plan_sequence(project.items());

        let word_segments = descriptors
            .iter()
            .filter(|d| d.kind == SegmentKind::Word)
            .count();
        let example_segments = descriptors
            .iter()
            .filter(|d| d.kind == SegmentKind::Example)
            .count();

        info!("   ✅ Sequence planned:");
        info!("      Segments: {}", descriptors.len());
        info!("      Word segments: {}", word_segments);
        info!("      Example segments: {}", example_segments);

        descriptors
    }

    // ==========================================
    // PIPELINE STEP 2: SEGMENT RENDERING
    // ==========================================

    /// Render every segment in the sequence to its own clip file
    ///
    /// Segments are rendered strictly in sequence order, so clip file
    /// names double as the concatenation order.
    async fn render_segments(
        &self,
        project: &Project,
        descriptors: &[SegmentDescriptor],
    ) -> Result<Vec<ClipFile>> {
        info!("🎞️  Step 2: Rendering {} segments...", descriptors.len());

        let style = project.render_style()?;
        let work_dir = project.ensure_videos_dir()?;
        let builder = GraphBuilder::new(&style, &self.config);

        let mut clips = Vec::with_capacity(descriptors.len());

        for (index, descriptor) in descriptors.iter().enumerate() {
            let mut plan = self.plan_segment(project, index, descriptor)?;
            resolve_assets(&mut plan, project.root());

            let narration_duration = match &plan.narration {
                Some(path) => self.probe_narration(path.clone()).await,
                None => 0.0,
            };
            if narration_duration <= 0.0 {
                // An unreadable clip would stall the mix; the segment
                // falls back to its silent bed instead
                plan.narration = None;
            }

            let duration = match descriptor.kind {
                SegmentKind::Intro => self.config.timing.intro_duration,
                _ => narration_duration * self.config.timing.duration_multiplier,
            };

            let clip_path = work_dir.join(format!("segment_{:03}.mp4", index));
            debug!("      {:03} - {} ({:.3}s)", index, plan.label, duration);

            let request = RenderRequest {
                graph: builder.segment_graph(&plan),
                duration,
                output: clip_path.clone(),
            };

            let backend = Arc::clone(&self.backend);
            let rendered = task::spawn_blocking(move || backend.render(&request)).await;

            match rendered {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    return Err(RenderError::SegmentFailed {
                        index,
                        label: plan.label.clone(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    return Err(RenderError::SegmentFailed {
                        index,
                        label: plan.label.clone(),
                        reason: format!("render task failed: {}", e),
                    }
                    .into());
                }
            }

            clips.push(ClipFile { path: clip_path, duration });
        }

        info!("   ✅ Segments rendered:");
        info!("      Clips rendered: {}", clips.len());
        info!("      Total planned duration: {:.1}s", clips.iter().map(|c| c.duration).sum::<f64>());

        Ok(clips)
    }

    /// Build the layout plan for one segment descriptor
    fn plan_segment(
        &self,
        project: &Project,
        index: usize,
        descriptor: &SegmentDescriptor,
    ) -> Result<SegmentPlan> {
        match descriptor.kind {
            SegmentKind::Intro => Ok(SegmentPlan::intro(project.manifest(), &self.config)),
            kind => {
                let item = descriptor
                    .item_index
                    .and_then(|i| project.items().get(i))
                    .ok_or_else(|| RenderError::InvalidRequest {
                        details: format!("segment {} references a missing item", index),
                    })?;
                Ok(SegmentPlan::for_item(item, kind, &self.config))
            }
        }
    }

    /// Probe a narration clip's duration, degrading to zero on failure
    ///
    /// A missing or unreadable clip is not fatal; the segment is rendered
    /// without narration and the run continues.
    async fn probe_narration(&self, path: PathBuf) -> f64 {
        let backend = Arc::clone(&self.backend);
        let probe_path = path.clone();
        let probed = task::spawn_blocking(move || backend.probe_duration(&probe_path)).await;

        match probed {
            Ok(Ok(duration)) => duration,
            Ok(Err(e)) => {
                warn!("Could not probe narration {:?}: {}", path, e);
                0.0
            }
            Err(e) => {
                warn!("Probe task failed for {:?}: {}", path, e);
                0.0
            }
        }
    }

    // ==========================================
    // PIPELINE STEP 3: CONCATENATION
    // ==========================================

    /// Stitch the rendered clips into the final output video
    async fn concatenate(
        &self,
        project: &Project,
        clips: &[ClipFile],
        output_path: &Path,
    ) -> Result<GeneratedVideo> {
        info!("🔗 Step 3: Concatenating {} clips...", clips.len());

        if clips.is_empty() {
            return Err(ConcatError::NoClips.into());
        }

        let manifest_path = project.videos_dir().join("concat.txt");
        write_concat_manifest(&manifest_path, clips)?;

        let backend = Arc::clone(&self.backend);
        let manifest = manifest_path.clone();
        let output = output_path.to_path_buf();
        let concatenated = task::spawn_blocking(move || backend.concat(&manifest, &output)).await;

        // The manifest is transient state; it goes away whether or not
        // the concat itself succeeded
        if let Err(e) = std::fs::remove_file(&manifest_path) {
            warn!("Failed to remove concat manifest {:?}: {}", manifest_path, e);
        }

        match concatenated {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(ConcatError::Failed { reason: e.to_string() }.into());
            }
            Err(e) => {
                return Err(ConcatError::Failed {
                    reason: format!("concat task failed: {}", e),
                }
                .into());
            }
        }

        let duration = clips.iter().map(|c| c.duration).sum();
        let file_size = std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0);

        info!("   ✅ Concatenation complete:");
        info!("      File saved: {:?}", output_path);
        info!("      Duration: {:.1}s", duration);
        info!("      Clips: {}", clips.len());
        info!("      File size: {:.1} MB", file_size as f64 / 1024.0 / 1024.0);

        Ok(GeneratedVideo {
            path: output_path.to_path_buf(),
            duration,
            clip_count: clips.len(),
            file_size,
        })
    }
}

/// Asset paths in the item database are stored relative to the project root
fn resolve_assets(plan: &mut SegmentPlan, root: &Path) {
    plan.narration = plan.narration.take().map(|p| resolve_asset(root, p));
    plan.image = plan.image.take().map(|p| resolve_asset(root, p));
}

fn resolve_asset(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

/// Write the concat demuxer manifest, one `file` directive per clip
///
/// Paths are canonicalized so the manifest is independent of the working
/// directory the backend runs in.
fn write_concat_manifest(
    manifest_path: &Path,
    clips: &[ClipFile],
) -> std::result::Result<(), ConcatError> {
    use std::io::Write;

    let mut file = std::fs::File::create(manifest_path).map_err(|_| ConcatError::ManifestFailed {
        path: manifest_path.display().to_string(),
    })?;

    for clip in clips {
        let path = clip
            .path
            .canonicalize()
            .unwrap_or_else(|_| clip.path.clone());
        let escaped = path.display().to_string().replace('\'', "'\\''");
        writeln!(file, "file '{}'", escaped).map_err(|_| ConcatError::ManifestFailed {
            path: manifest_path.display().to_string(),
        })?;
    }

    Ok(())
}

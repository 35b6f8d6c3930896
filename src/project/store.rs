use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ProjectError, Result};

use super::{ProjectManifest, RenderStyle, VocabularyItem};

/// An opened project directory
///
/// Expected layout (created and maintained by the editing front end):
///
/// ```text
/// <root>/
///   manifest.json     project name, colors, intro card text
///   database.json     ordered vocabulary items
///   cache/videos/     rendered clips (the engine's working directory)
/// ```
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    manifest: ProjectManifest,
    items: Vec<VocabularyItem>,
}

impl Project {
    /// Open a project directory, reading and validating its manifest and
    /// item database
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let manifest_path = root.join("manifest.json");
        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|_| ProjectError::ManifestNotFound {
                path: manifest_path.display().to_string(),
            })?;
        let manifest: ProjectManifest = serde_json::from_str(&content)
            .map_err(|_| ProjectError::ParseFailed {
                path: manifest_path.display().to_string(),
            })?;

        let database_path = root.join("database.json");
        let content = std::fs::read_to_string(&database_path)
            .map_err(|_| ProjectError::DatabaseNotFound {
                path: database_path.display().to_string(),
            })?;
        let items: Vec<VocabularyItem> = serde_json::from_str(&content)
            .map_err(|_| ProjectError::ParseFailed {
                path: database_path.display().to_string(),
            })?;

        for item in &items {
            Self::validate_item(item)?;
        }

        debug!("Loaded project '{}' with {} items", manifest.name, items.len());

        Ok(Self { root, manifest, items })
    }

    fn validate_item(item: &VocabularyItem) -> Result<()> {
        if item.name.is_empty() {
            return Err(ProjectError::InvalidItem {
                id: item.id.clone(),
                reason: "empty name".to_string(),
            }.into());
        }

        if item.count == 0 {
            return Err(ProjectError::InvalidItem {
                id: item.id.clone(),
                reason: "repeat count must be at least 1".to_string(),
            }.into());
        }

        Ok(())
    }

    /// Project manifest (name, colors, intro card text)
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// Vocabulary items in their stored order
    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    /// Parsed color roles for rendering
    pub fn render_style(&self) -> Result<RenderStyle> {
        self.manifest.render_style()
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory rendered clips are written into
    pub fn videos_dir(&self) -> PathBuf {
        self.root.join("cache").join("videos")
    }

    /// Create the clip cache directory if it does not exist yet
    pub fn ensure_videos_dir(&self) -> Result<PathBuf> {
        let dir = self.videos_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Remove every cached clip, leaving other caches (audio, images) alone
    pub fn clear_video_cache(&self) -> Result<()> {
        let dir = self.videos_dir();
        if !dir.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!("Failed to remove cached clip {:?}: {}", path, e);
                }
            }
        }

        info!("Cleared video cache at {:?}", dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_project(dir: &Path, database: &str) {
        let manifest = r##"{
            "name": "demo",
            "backgroundColor": "#FFFFFF",
            "characterColor": ["#222222", "#888888"],
            "title": "Demo",
            "subtitle": "Vocabulary"
        }"##;
        std::fs::write(dir.join("manifest.json"), manifest).unwrap();
        std::fs::write(dir.join("database.json"), database).unwrap();
    }

    #[test]
    fn test_load_project() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            r#"[{"id":"aaaaa","name":"apple","example":"","description":["苹果",""],"image":"","audio":["",""],"count":1}]"#,
        );

        let project = Project::load(dir.path()).unwrap();
        assert_eq!(project.manifest().name, "demo");
        assert_eq!(project.items().len(), 1);
        assert_eq!(project.items()[0].name, "apple");
        assert!(project.render_style().is_ok());
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("database.json"), "[]").unwrap();

        let result = Project::load(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_repeat_count_is_rejected() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            r#"[{"id":"aaaaa","name":"apple","description":["苹果",""],"count":0}]"#,
        );

        let result = Project::load(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_video_cache() {
        let dir = tempdir().unwrap();
        write_project(dir.path(), "[]");

        let project = Project::load(dir.path()).unwrap();
        let videos = project.ensure_videos_dir().unwrap();
        std::fs::write(videos.join("segment_000.mp4"), b"stub").unwrap();
        std::fs::write(videos.join("segment_001.mp4"), b"stub").unwrap();

        project.clear_video_cache().unwrap();
        assert_eq!(std::fs::read_dir(&videos).unwrap().count(), 0);
    }
}

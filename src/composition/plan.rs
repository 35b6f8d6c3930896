use std::path::PathBuf;

use crate::{
    config::Config,
    layout::{layout_text, FitSpec, TextBlock},
    project::{ProjectManifest, VocabularyItem},
};

use super::sequence::SegmentKind;

/// Which palette entry a block is drawn with
///
/// Emphasis never changes the palette, only which blocks hold the primary
/// role, so a viewer's eye can follow the "live" content across segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
}

/// A laid-out text block together with its color role
#[derive(Debug, Clone, PartialEq)]
pub struct PlanBlock {
    pub block: TextBlock,
    pub role: ColorRole,
}

/// Everything needed to render one segment
///
/// Derived from one vocabulary item (or the project manifest for the intro
/// card) and consumed by graph assembly. Lives for a single render call.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    pub kind: SegmentKind,

    /// Human-readable identity for logs and error context
    pub label: String,

    /// Blocks in draw order: word, meaning, then the example pair when
    /// present
    pub blocks: Vec<PlanBlock>,

    /// Narration clip for this segment, when the item has one
    pub narration: Option<PathBuf>,

    /// Illustration, when the item has one
    pub image: Option<PathBuf>,
}

impl SegmentPlan {
    /// Plan a word- or example-emphasis segment for one item
    ///
    /// `kind` selects the narration track and which blocks take the primary
    /// color role; callers pass `Word` or `Example` (the intro card has its
    /// own constructor).
    pub fn for_item(item: &VocabularyItem, kind: SegmentKind, config: &Config) -> Self {
        let text = &config.text;
        let width_budget = if item.has_image() {
            config.canvas.half_width_budget()
        } else {
            config.canvas.full_width_budget()
        };

        let fit = |base_size: f32| FitSpec {
            base_size,
            min_size: text.min_font_size,
            max_chars: text.max_line_chars,
            width_budget,
        };

        let word_role = match kind {
            SegmentKind::Example => ColorRole::Secondary,
            _ => ColorRole::Primary,
        };
        let example_role = match word_role {
            ColorRole::Primary => ColorRole::Secondary,
            ColorRole::Secondary => ColorRole::Primary,
        };

        let mut blocks = vec![
            PlanBlock {
                block: layout_text(&item.name, &fit(text.word_font_size)),
                role: word_role,
            },
            PlanBlock {
                block: layout_text(item.meaning(), &fit(text.meaning_font_size)),
                role: word_role,
            },
        ];

        // The example pair is present together or absent together
        if item.has_example() {
            blocks.push(PlanBlock {
                block: layout_text(&item.example, &fit(text.example_font_size)),
                role: example_role,
            });
            blocks.push(PlanBlock {
                block: layout_text(item.example_meaning(), &fit(text.meaning_font_size)),
                role: example_role,
            });
        }

        let narration = match kind {
            SegmentKind::Example => item.example_audio(),
            _ => item.word_audio(),
        };

        Self {
            kind,
            label: format!("{} ({})", item.name, kind.label()),
            blocks,
            narration: non_empty_path(narration),
            image: non_empty_path(&item.image),
        }
    }

    /// Plan the intro card from the project manifest
    pub fn intro(manifest: &ProjectManifest, config: &Config) -> Self {
        let text = &config.text;
        let width_budget = config.canvas.full_width_budget();

        let fit = |base_size: f32| FitSpec {
            base_size,
            min_size: text.min_font_size,
            max_chars: text.max_line_chars,
            width_budget,
        };

        Self {
            kind: SegmentKind::Intro,
            label: "intro".to_string(),
            blocks: vec![
                PlanBlock {
                    block: layout_text(&manifest.title, &fit(text.word_font_size)),
                    role: ColorRole::Primary,
                },
                PlanBlock {
                    block: layout_text(&manifest.subtitle, &fit(text.meaning_font_size)),
                    role: ColorRole::Secondary,
                },
            ],
            narration: None,
            image: None,
        }
    }
}

fn non_empty_path(path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

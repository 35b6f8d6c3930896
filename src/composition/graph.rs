use std::path::PathBuf;

use crate::{
    config::Config,
    layout::{stack_blocks, TextBlock},
    project::{Color, RenderStyle},
};

use super::plan::{ColorRole, SegmentPlan};

/// Horizontal anchor for a text draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Centered across the full canvas
    CanvasCenter,

    /// Centered within the right half (the left half holds the image)
    RightHalfCenter,
}

impl TextAlign {
    /// Backend x expression; `w` and `text_w` resolve at render time
    pub fn x_expr(&self) -> &'static str {
        match self {
            TextAlign::CanvasCenter => "(w-text_w)/2",
            TextAlign::RightHalfCenter => "(3*w/4-text_w/2)",
        }
    }
}

/// One tagged composition operation
///
/// Every variant carries everything its backend filter needs, so a graph
/// renders to a script without consulting configuration again.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Solid background color source, unbounded; the invocation's target
    /// duration bounds it
    Background { color: Color, width: u32, height: u32, fps: f64 },

    /// Scale an input image to cover a square, then center-crop it
    ImagePrep { size: u32 },

    /// Place a prepared image onto the canvas
    Overlay { x: i64, y: i64 },

    /// Draw one line of text at a fixed vertical offset
    DrawText {
        text: String,
        font_file: String,
        font_size: f32,
        color: Color,
        align: TextAlign,
        y: f32,
    },

    /// Silent stereo bed; guarantees an audio stream on every segment
    Silence { sample_rate: u32 },

    /// Pad narration with trailing silence so it never ends early
    AudioPad,

    /// Mix narration over the bed; mixing attenuates each input, leaving
    /// the voice at reduced relative volume
    AudioMix { inputs: usize },
}

impl FilterOp {
    /// Render this operation's filter arguments
    fn args(&self) -> String {
        match self {
            FilterOp::Background { color, width, height, fps } => {
                format!("color=c={}:s={}x{}:r={}", color, width, height, fps)
            }
            FilterOp::ImagePrep { size } => {
                format!(
                    "scale={size}:{size}:force_original_aspect_ratio=increase,crop={size}:{size}"
                )
            }
            FilterOp::Overlay { x, y } => format!("overlay=x={x}:y={y}"),
            FilterOp::DrawText { text, font_file, font_size, color, align, y } => {
                let mut args = String::from("drawtext=expansion=none");
                if !font_file.is_empty() {
                    args.push_str(&format!(":fontfile={}", quote(font_file)));
                }
                args.push_str(&format!(":text={}", quote(text)));
                args.push_str(&format!(":fontsize={}", font_size.round() as u32));
                args.push_str(&format!(":fontcolor={}", color));
                args.push_str(&format!(":x={}", align.x_expr()));
                args.push_str(&format!(":y={}", y.round() as i64));
                args
            }
            FilterOp::Silence { sample_rate } => {
                format!("anullsrc=channel_layout=stereo:sample_rate={sample_rate}")
            }
            FilterOp::AudioPad => "apad".to_string(),
            FilterOp::AudioMix { inputs } => {
                format!("amix=inputs={inputs}:duration=longest")
            }
        }
    }
}

/// A node: one operation, its consumed pins, and the pin it produces
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    pub op: FilterOp,
    pub inputs: Vec<String>,
    pub output: String,
}

impl FilterNode {
    fn render(&self) -> String {
        let mut out = String::new();
        for input in &self.inputs {
            out.push('[');
            out.push_str(input);
            out.push(']');
        }
        out.push_str(&self.op.args());
        out.push('[');
        out.push_str(&self.output);
        out.push(']');
        out
    }
}

/// The composition description for one segment
///
/// An ordered list of tagged operation nodes plus the two pins the output
/// file's video and audio streams map from. Exists only for the duration of
/// one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionGraph {
    inputs: Vec<PathBuf>,
    nodes: Vec<FilterNode>,
    video_pin: String,
    audio_pin: String,
}

impl CompositionGraph {
    fn new() -> Self {
        Self {
            inputs: Vec::new(),
            nodes: Vec::new(),
            video_pin: String::new(),
            audio_pin: String::new(),
        }
    }

    /// Register a file input, returning its stream index
    fn add_input(&mut self, path: PathBuf) -> usize {
        self.inputs.push(path);
        self.inputs.len() - 1
    }

    fn push(&mut self, node: FilterNode) {
        self.nodes.push(node);
    }

    /// File inputs in stream-index order
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Operation nodes in emission order
    pub fn nodes(&self) -> &[FilterNode] {
        &self.nodes
    }

    /// Pin carrying the final composed video
    pub fn video_pin(&self) -> &str {
        &self.video_pin
    }

    /// Pin carrying the final mixed audio
    pub fn audio_pin(&self) -> &str {
        &self.audio_pin
    }

    /// Render the whole graph as a backend filter script
    pub fn filter_script(&self) -> String {
        self.nodes
            .iter()
            .map(FilterNode::render)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Turns segment plans into composition graphs
///
/// All pixel geometry (square crop size, overlay position, per-line text
/// offsets) is resolved here, so swapping the backend means re-targeting
/// this one emission step.
pub struct GraphBuilder<'a> {
    style: &'a RenderStyle,
    config: &'a Config,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(style: &'a RenderStyle, config: &'a Config) -> Self {
        Self { style, config }
    }

    /// Build the composition graph for one segment plan
    pub fn segment_graph(&self, plan: &SegmentPlan) -> CompositionGraph {
        let canvas = &self.config.canvas;
        let text = &self.config.text;

        let mut graph = CompositionGraph::new();

        graph.push(FilterNode {
            op: FilterOp::Background {
                color: self.style.background,
                width: canvas.width,
                height: canvas.height,
                fps: self.config.encode.fps,
            },
            inputs: vec![],
            output: "bg".to_string(),
        });

        let mut video = "bg".to_string();
        let mut stage = 0usize;

        if let Some(image) = &plan.image {
            let index = graph.add_input(image.clone());
            let size = (canvas.width / 2)
                .min(canvas.height)
                .saturating_sub(2 * canvas.horizontal_margin);

            graph.push(FilterNode {
                op: FilterOp::ImagePrep { size },
                inputs: vec![format!("{index}:v")],
                output: "img".to_string(),
            });

            let output = format!("v{stage}");
            stage += 1;
            graph.push(FilterNode {
                op: FilterOp::Overlay {
                    x: ((canvas.width / 2 - size) / 2) as i64,
                    y: ((canvas.height - size) / 2) as i64,
                },
                inputs: vec![video, "img".to_string()],
                output: output.clone(),
            });
            video = output;
        }

        let align = if plan.image.is_some() {
            TextAlign::RightHalfCenter
        } else {
            TextAlign::CanvasCenter
        };

        let blocks: Vec<&TextBlock> = plan.blocks.iter().map(|b| &b.block).collect();
        let layout = stack_blocks(
            &blocks,
            text.line_spacing,
            text.block_spacing,
            canvas.height as f32,
        );

        // Draw order is block order then line order; each node consumes the
        // previous video pin, keeping the chain deterministic
        let mut block_top = layout.start_y;
        for (block_index, plan_block) in plan.blocks.iter().enumerate() {
            if !plan_block.block.is_visible() {
                continue;
            }

            let color = match plan_block.role {
                ColorRole::Primary => self.style.primary,
                ColorRole::Secondary => self.style.secondary,
            };

            for (line_index, line) in plan_block.block.lines.iter().enumerate() {
                let line_y = block_top
                    + line_index as f32 * (plan_block.block.font_size + text.line_spacing);

                let output = format!("v{stage}");
                stage += 1;
                graph.push(FilterNode {
                    op: FilterOp::DrawText {
                        text: line.clone(),
                        font_file: text.font_file.clone(),
                        font_size: plan_block.block.font_size,
                        color,
                        align,
                        y: line_y,
                    },
                    inputs: vec![video],
                    output: output.clone(),
                });
                video = output;
            }

            block_top += layout.heights[block_index] + text.block_spacing;
        }

        graph.push(FilterNode {
            op: FilterOp::Silence {
                sample_rate: self.config.encode.audio_sample_rate,
            },
            inputs: vec![],
            output: "bed".to_string(),
        });

        let audio = if let Some(narration) = &plan.narration {
            let index = graph.add_input(narration.clone());
            graph.push(FilterNode {
                op: FilterOp::AudioPad,
                inputs: vec![format!("{index}:a")],
                output: "nar".to_string(),
            });
            graph.push(FilterNode {
                op: FilterOp::AudioMix { inputs: 2 },
                inputs: vec!["nar".to_string(), "bed".to_string()],
                output: "mix".to_string(),
            });
            "mix".to_string()
        } else {
            "bed".to_string()
        };

        graph.video_pin = video;
        graph.audio_pin = audio;
        graph
    }
}

/// Quote a value for the backend's filter syntax
///
/// Everything inside single quotes is literal except the quote itself,
/// which is closed, escaped and reopened.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::sequence::SegmentKind;
    use crate::project::VocabularyItem;

    fn style() -> RenderStyle {
        RenderStyle {
            background: Color { r: 0xFF, g: 0xFF, b: 0xFF },
            primary: Color { r: 0x22, g: 0x22, b: 0x22 },
            secondary: Color { r: 0x88, g: 0x88, b: 0x88 },
        }
    }

    fn item(image: &str, audio: &str) -> VocabularyItem {
        VocabularyItem {
            id: "aaaaa".to_string(),
            name: "apple".to_string(),
            example: "I ate an apple.".to_string(),
            description: ["苹果".to_string(), "我吃了一个苹果。".to_string()],
            image: image.to_string(),
            audio: [audio.to_string(), String::new()],
            count: 1,
        }
    }

    fn word_graph(image: &str, audio: &str) -> CompositionGraph {
        let config = Config::default();
        let plan = SegmentPlan::for_item(&item(image, audio), SegmentKind::Word, &config);
        GraphBuilder::new(&style(), &config).segment_graph(&plan)
    }

    #[test]
    fn test_graph_is_deterministic() {
        let first = word_graph("/img.png", "/word.mp3");
        let second = word_graph("/img.png", "/word.mp3");
        assert_eq!(first, second);
        assert_eq!(first.filter_script(), second.filter_script());
    }

    #[test]
    fn test_nodes_chain_through_named_pins() {
        let graph = word_graph("", "");
        let nodes = graph.nodes();

        // Background first, then one drawtext per line, then the bed
        assert!(matches!(nodes[0].op, FilterOp::Background { .. }));
        assert_eq!(nodes[0].output, "bg");

        let mut previous = "bg".to_string();
        for node in nodes.iter().filter(|n| matches!(n.op, FilterOp::DrawText { .. })) {
            assert_eq!(node.inputs, vec![previous.clone()]);
            previous = node.output.clone();
        }
        assert_eq!(graph.video_pin(), previous);
        assert_eq!(graph.audio_pin(), "bed");
    }

    #[test]
    fn test_draw_count_matches_visible_lines() {
        let config = Config::default();
        let plan = SegmentPlan::for_item(&item("", ""), SegmentKind::Word, &config);
        let expected: usize = plan.blocks.iter().map(|b| b.block.lines.len()).sum();

        let graph = GraphBuilder::new(&style(), &config).segment_graph(&plan);
        let draws = graph
            .nodes()
            .iter()
            .filter(|n| matches!(n.op, FilterOp::DrawText { .. }))
            .count();
        assert_eq!(draws, expected);
    }

    #[test]
    fn test_image_adds_overlay_and_right_half_alignment() {
        let graph = word_graph("/img.png", "");
        assert_eq!(graph.inputs(), &[PathBuf::from("/img.png")]);

        let script = graph.filter_script();
        // 1920x1080 with an 80px margin: 800px square at (80, 140)
        assert!(script.contains("scale=800:800:force_original_aspect_ratio=increase,crop=800:800"));
        assert!(script.contains("overlay=x=80:y=140"));
        assert!(script.contains("x=(3*w/4-text_w/2)"));
        assert!(!script.contains("(w-text_w)/2"));
    }

    #[test]
    fn test_no_image_centers_on_full_canvas() {
        let graph = word_graph("", "");
        assert!(graph.inputs().is_empty());

        let script = graph.filter_script();
        assert!(!script.contains("overlay"));
        assert!(script.contains("x=(w-text_w)/2"));
    }

    #[test]
    fn test_narration_is_padded_and_mixed() {
        let graph = word_graph("", "/word.mp3");
        assert_eq!(graph.inputs(), &[PathBuf::from("/word.mp3")]);
        assert_eq!(graph.audio_pin(), "mix");

        let script = graph.filter_script();
        assert!(script.contains("[0:a]apad[nar]"));
        assert!(script.contains("[nar][bed]amix=inputs=2:duration=longest[mix]"));
    }

    #[test]
    fn test_without_narration_the_bed_is_the_audio_pin() {
        let graph = word_graph("", "");
        assert_eq!(graph.audio_pin(), "bed");
        assert!(!graph.filter_script().contains("amix"));
    }

    #[test]
    fn test_image_and_narration_input_indices() {
        // Image registers first (video section), narration second
        let graph = word_graph("/img.png", "/word.mp3");
        assert_eq!(
            graph.inputs(),
            &[PathBuf::from("/img.png"), PathBuf::from("/word.mp3")]
        );

        let script = graph.filter_script();
        assert!(script.contains("[0:v]scale="));
        assert!(script.contains("[1:a]apad"));
    }

    #[test]
    fn test_sources_are_unbounded() {
        // Duration is enforced by the invocation, never baked into sources
        let script = word_graph("", "/word.mp3").filter_script();
        assert!(script.contains("color=c=0xFFFFFF:s=1920x1080:r=30[bg]"));
        assert!(script.contains("anullsrc=channel_layout=stereo:sample_rate=44100[bed]"));
        assert!(!script.contains(":d="));
    }

    #[test]
    fn test_text_quoting() {
        assert_eq!(quote("apple"), "'apple'");
        assert_eq!(quote("it's"), "'it'\\''s'");

        let config = Config::default();
        let mut quirky = item("", "");
        quirky.example = "it's 50:50, really".to_string();
        let plan = SegmentPlan::for_item(&quirky, SegmentKind::Example, &config);
        let script = GraphBuilder::new(&style(), &config).segment_graph(&plan).filter_script();
        assert!(script.contains("text='it'\\''s 50:50, really'"));
        assert!(script.contains("expansion=none"));
    }

    #[test]
    fn test_roles_pick_palette_colors() {
        let config = Config::default();
        let plan = SegmentPlan::for_item(&item("", ""), SegmentKind::Example, &config);
        let graph = GraphBuilder::new(&style(), &config).segment_graph(&plan);

        // Example emphasis: the word line is drawn in the secondary color
        let first_draw = graph
            .nodes()
            .iter()
            .find_map(|n| match &n.op {
                FilterOp::DrawText { text, color, .. } if text == "apple" => Some(*color),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_draw, Color { r: 0x88, g: 0x88, b: 0x88 });
    }

    #[test]
    fn test_vertical_stack_positions() {
        let config = Config::default();
        let mut simple = item("", "");
        simple.example = String::new();
        let plan = SegmentPlan::for_item(&simple, SegmentKind::Word, &config);
        let graph = GraphBuilder::new(&style(), &config).segment_graph(&plan);

        let ys: Vec<f32> = graph
            .nodes()
            .iter()
            .filter_map(|n| match &n.op {
                FilterOp::DrawText { y, .. } => Some(*y),
                _ => None,
            })
            .collect();

        // word block: 120 + 16 = 136; meaning block: 72 + 16 = 88
        // total = 136 + 88 + 48 = 272, start = 540 - 136 = 404
        assert_eq!(ys, vec![404.0, 404.0 + 136.0 + 48.0]);
    }
}

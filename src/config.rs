use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for Wordreel
///
/// All pixel budgets, font bounds and timing constants live here so that
/// re-targeting a different compositing backend only touches node emission,
/// never the layout math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Canvas geometry
    pub canvas: CanvasConfig,

    /// Text fitting and stacking constants
    pub text: TextConfig,

    /// Segment timing rules
    pub timing: TimingConfig,

    /// Output encoding settings
    pub encode: EncodeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            text: TextConfig::default(),
            timing: TimingConfig::default(),
            encode: EncodeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.text.validate()?;
        self.timing.validate()?;
        self.encode.validate()?;
        Ok(())
    }
}

/// Canvas geometry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Horizontal margin kept clear of text on each side (pixels)
    pub horizontal_margin: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            horizontal_margin: 80,
        }
    }
}

impl CanvasConfig {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "canvas.resolution".to_string(),
                value: format!("{}x{}", self.width, self.height)
            }.into());
        }

        // Text must keep a positive budget even on the half canvas
        if self.horizontal_margin * 2 >= self.width / 2 {
            return Err(ConfigError::InvalidValue {
                key: "canvas.horizontal_margin".to_string(),
                value: self.horizontal_margin.to_string()
            }.into());
        }

        Ok(())
    }

    /// Width budget for text spanning the full canvas
    pub fn full_width_budget(&self) -> f32 {
        (self.width - 2 * self.horizontal_margin) as f32
    }

    /// Width budget for text confined to the right half (image on the left)
    pub fn half_width_budget(&self) -> f32 {
        (self.width / 2 - 2 * self.horizontal_margin) as f32
    }
}

/// Text fitting and stacking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Font file for text drawing; empty string uses the backend default
    pub font_file: String,

    /// Base font size for the word block
    pub word_font_size: f32,

    /// Base font size for meaning blocks
    pub meaning_font_size: f32,

    /// Base font size for the example sentence block
    pub example_font_size: f32,

    /// Floor for the shrink-to-fit loop
    pub min_font_size: f32,

    /// Upper bound on characters per line regardless of font size
    pub max_line_chars: usize,

    /// Extra pixels between lines within a block
    pub line_spacing: f32,

    /// Extra pixels between stacked blocks
    pub block_spacing: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_file: String::new(),
            word_font_size: 120.0,
            meaning_font_size: 72.0,
            example_font_size: 64.0,
            min_font_size: 36.0,
            max_line_chars: 30,
            line_spacing: 16.0,
            block_spacing: 48.0,
        }
    }
}

impl TextConfig {
    fn validate(&self) -> Result<()> {
        if self.min_font_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "text.min_font_size".to_string(),
                value: self.min_font_size.to_string()
            }.into());
        }

        for (key, size) in [
            ("text.word_font_size", self.word_font_size),
            ("text.meaning_font_size", self.meaning_font_size),
            ("text.example_font_size", self.example_font_size),
        ] {
            if size < self.min_font_size {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: format!("{} < min {}", size, self.min_font_size)
                }.into());
            }
        }

        if self.max_line_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "text.max_line_chars".to_string(),
                value: self.max_line_chars.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Segment timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Segment duration as a multiple of the narration duration
    ///
    /// The default of 2.0 leaves half of each segment as silent reading
    /// time after the voice-over finishes.
    pub duration_multiplier: f64,

    /// Fixed duration of the intro card in seconds
    pub intro_duration: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_multiplier: 2.0,
            intro_duration: 3.0,
        }
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<()> {
        if self.duration_multiplier <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.duration_multiplier".to_string(),
                value: self.duration_multiplier.to_string()
            }.into());
        }

        if self.intro_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.intro_duration".to_string(),
                value: self.intro_duration.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Output encoding configuration
///
/// Frame rate and audio sample rate are held constant across every clip so
/// the final concatenation cannot drift between independently rendered
/// segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Constant output frame rate
    pub fps: f64,

    /// Constant audio sample rate (Hz)
    pub audio_sample_rate: u32,

    /// Video encoder passed to the backend
    pub video_codec: String,

    /// Audio encoder passed to the backend
    pub audio_codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            audio_sample_rate: 44100,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            quality: 85,
        }
    }
}

impl EncodeConfig {
    fn validate(&self) -> Result<()> {
        if self.fps <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "encode.fps".to_string(),
                value: self.fps.to_string()
            }.into());
        }

        if self.audio_sample_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "encode.audio_sample_rate".to_string(),
                value: self.audio_sample_rate.to_string()
            }.into());
        }

        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "encode.quality".to_string(),
                value: self.quality.to_string()
            }.into());
        }

        if self.video_codec.is_empty() || self.audio_codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "encode.codecs".to_string(),
                value: format!("{:?}/{:?}", self.video_codec, self.audio_codec)
            }.into());
        }

        Ok(())
    }
}

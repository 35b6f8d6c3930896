use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, Result};

/// Project-level settings as stored in `manifest.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    /// Project name
    pub name: String,

    /// Canvas background color as `#RRGGBB`
    pub background_color: String,

    /// Text colors as `#RRGGBB`: primary role first, secondary role second
    pub character_color: [String; 2],

    /// Intro card title
    #[serde(default)]
    pub title: String,

    /// Intro card subtitle
    #[serde(default)]
    pub subtitle: String,
}

impl ProjectManifest {
    /// Parse the manifest colors into a [`RenderStyle`]
    pub fn render_style(&self) -> Result<RenderStyle> {
        Ok(RenderStyle {
            background: Color::from_hex(&self.background_color)?,
            primary: Color::from_hex(&self.character_color[0])?,
            secondary: Color::from_hex(&self.character_color[1])?,
        })
    }
}

/// Resolved colors for one rendering invocation
///
/// Constant across all segments of a video: emphasis swaps which blocks get
/// the primary role, never the palette itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
}

/// An RGB color parsed from `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parse a `#RRGGBB` (or bare `RRGGBB`) hex string
    pub fn from_hex(value: &str) -> std::result::Result<Self, ProjectError> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ProjectError::InvalidColor { value: value.to_string() });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ProjectError::InvalidColor { value: value.to_string() })
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Color {
    /// Formats as `0xRRGGBB`, the form the compositing backend accepts
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

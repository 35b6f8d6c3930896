use serde::{Deserialize, Serialize};

/// A single vocabulary entry as stored in the project's `database.json`
///
/// Narration and image paths are resolved by the front end before a project
/// is rendered; an empty string means the asset was never fetched. The
/// engine treats missing assets as valid variants, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Stable identifier, unique within one project
    pub id: String,

    /// The word itself
    pub name: String,

    /// Example sentence (may be empty)
    #[serde(default)]
    pub example: String,

    /// Meanings: word sense first, example-sentence sense second
    pub description: [String; 2],

    /// Illustration path (may be empty)
    #[serde(default)]
    pub image: String,

    /// Narration clips: word audio first, example audio second
    #[serde(default)]
    pub audio: [String; 2],

    /// How many times this item's segments repeat in the final video
    pub count: u32,
}

impl VocabularyItem {
    /// Whether this item carries an example sentence
    pub fn has_example(&self) -> bool {
        !self.example.is_empty()
    }

    /// Whether this item carries an illustration
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Meaning of the word
    pub fn meaning(&self) -> &str {
        &self.description[0]
    }

    /// Meaning of the example sentence
    pub fn example_meaning(&self) -> &str {
        &self.description[1]
    }

    /// Narration path for the word segment (may be empty)
    pub fn word_audio(&self) -> &str {
        &self.audio[0]
    }

    /// Narration path for the example segment (may be empty)
    pub fn example_audio(&self) -> &str {
        &self.audio[1]
    }
}

/// Fitting constraints for a single block of text
///
/// `width_budget` is the pixel width the block may occupy (full canvas or
/// the right half, depending on whether an image shares the frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSpec {
    /// Preferred font size
    pub base_size: f32,

    /// Smallest size the shrink loop may settle on
    pub min_size: f32,

    /// Upper bound on characters per line regardless of font size
    pub max_chars: usize,

    /// Horizontal pixel budget for one line
    pub width_budget: f32,
}

/// A laid-out block of text: wrapped lines plus the settled font size
///
/// Ephemeral: blocks are produced per segment and consumed once during
/// graph assembly; nothing persists them.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: f32,
}

impl TextBlock {
    /// A block with no visible lines (drawn as nothing)
    pub fn empty(font_size: f32) -> Self {
        Self { lines: Vec::new(), font_size }
    }

    /// Whether the block contributes any visible line
    pub fn is_visible(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// Fit `text` into the given constraints
///
/// The text is kept on one line at `base_size` when it fits. Otherwise the
/// font shrinks in 10% multiplicative steps until the text fits a single
/// line or the size floor is reached, and the text is then greedily
/// word-wrapped at the settled capacity. A single word longer than a whole
/// line is split at character boundaries.
///
/// Lengths are measured in characters, not bytes: meanings are typically
/// CJK and multi-byte throughout.
///
/// Deterministic: identical inputs always produce identical output.
pub fn layout_text(text: &str, fit: &FitSpec) -> TextBlock {
    if text.is_empty() {
        return TextBlock::empty(fit.base_size);
    }

    let length = text.chars().count();
    let mut font_size = fit.base_size;

    while length > capacity(font_size, fit) && font_size > fit.min_size {
        font_size = (font_size * 0.9).max(fit.min_size);
    }

    let capacity = capacity(font_size, fit);
    if length <= capacity {
        return TextBlock { lines: vec![text.to_string()], font_size };
    }

    TextBlock { lines: wrap(text, capacity), font_size }
}

/// How many characters fit one line at the given size
///
/// Treats the average glyph advance as half the font size, capped by the
/// configured per-line character limit.
fn capacity(font_size: f32, fit: &FitSpec) -> usize {
    let by_width = (fit.width_budget / (font_size * 0.5)).floor() as usize;
    by_width.min(fit.max_chars).max(1)
}

fn wrap(text: &str, capacity: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > capacity {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            // No line can hold this word whole; split at character boundaries
            for ch in word.chars() {
                if current_len == capacity {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
            continue;
        }

        let joined_len = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if joined_len > capacity {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = joined_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit() -> FitSpec {
        FitSpec {
            base_size: 100.0,
            min_size: 30.0,
            max_chars: 40,
            width_budget: 1000.0,
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let text = "a moderately long sentence that will need wrapping somewhere";
        let first = layout_text(text, &fit());
        let second = layout_text(text, &fit());
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_text_is_one_line_at_base_size() {
        // capacity(100) = min(floor(1000 / 50), 40) = 20
        let block = layout_text("hello", &fit());
        assert_eq!(block.lines, vec!["hello".to_string()]);
        assert_eq!(block.font_size, 100.0);
    }

    #[test]
    fn test_shrink_settles_between_base_and_minimum() {
        // 25 chars: fits at 72.9 (capacity 27) after three shrink steps
        let block = layout_text("abcdefghijklmnopqrstuvwxy", &fit());
        assert_eq!(block.lines.len(), 1);
        assert!((block.font_size - 72.9).abs() < 1e-3);
    }

    #[test]
    fn test_overflow_at_minimum_wraps_at_floor_size() {
        // 10 words of 5 chars: 59 chars total, over capacity even at the
        // floor, so the result wraps at min_size
        let text = "aaaaa bbbbb ccccc ddddd eeeee fffff ggggg hhhhh iiiii jjjjj";
        let block = layout_text(text, &fit());
        assert_eq!(block.font_size, 30.0);
        assert!(block.lines.len() > 1);
        for line in &block.lines {
            assert!(line.chars().count() <= 40);
        }
    }

    #[test]
    fn test_single_long_word_is_hard_split() {
        let text = "a".repeat(50);
        let block = layout_text(&text, &fit());
        assert_eq!(block.font_size, 30.0);
        assert_eq!(block.lines, vec!["a".repeat(40), "a".repeat(10)]);
    }

    #[test]
    fn test_lengths_are_characters_not_bytes() {
        // 10 CJK chars are 30 bytes but must still fit one line at base size
        let block = layout_text("苹果苹果苹果苹果苹果", &fit());
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.font_size, 100.0);
    }

    #[test]
    fn test_cjk_sentence_hard_splits_without_spaces() {
        // 42 chars, over the line cap even at the floor size
        let text = "我吃了一个苹果".repeat(6);
        let block = layout_text(&text, &fit());
        assert!(block.lines.len() > 1);
        let rejoined: String = block.lines.concat();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let block = layout_text("", &fit());
        assert!(block.lines.is_empty());
        assert!(!block.is_visible());
        assert_eq!(block.font_size, 100.0);
    }

    #[test]
    fn test_boundary_length_stays_on_one_line() {
        // Exactly at capacity(base) = 20
        let text = "x".repeat(20);
        let block = layout_text(&text, &fit());
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.font_size, 100.0);
    }
}

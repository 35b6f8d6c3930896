use super::text::TextBlock;

/// Vertical placement for a stack of text blocks
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    /// Y offset of the first visible block's top edge
    pub start_y: f32,

    /// Height of the whole stack including inter-block spacing
    pub total_height: f32,

    /// Per-block pixel heights, aligned with the input slice.
    /// Blocks without lines report zero.
    pub heights: Vec<f32>,
}

/// Pixel height of one block: every line occupies its font size plus the
/// line spacing
pub fn block_height(block: &TextBlock, line_spacing: f32) -> f32 {
    block.lines.len() as f32 * (block.font_size + line_spacing)
}

/// Center a stack of blocks vertically within the canvas
///
/// Blocks without lines contribute neither height nor spacing, so an
/// absent example pair leaves no gap in the middle of the stack.
pub fn stack_blocks(
    blocks: &[&TextBlock],
    line_spacing: f32,
    block_spacing: f32,
    canvas_height: f32,
) -> StackLayout {
    let heights: Vec<f32> = blocks
        .iter()
        .map(|block| block_height(block, line_spacing))
        .collect();

    let visible = blocks.iter().filter(|block| block.is_visible()).count();
    let total_height = heights.iter().sum::<f32>()
        + block_spacing * visible.saturating_sub(1) as f32;

    StackLayout {
        start_y: canvas_height / 2.0 - total_height / 2.0,
        total_height,
        heights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: usize, font_size: f32) -> TextBlock {
        TextBlock {
            lines: (0..lines).map(|i| format!("line {}", i)).collect(),
            font_size,
        }
    }

    #[test]
    fn test_empty_stack_has_zero_height() {
        let layout = stack_blocks(&[], 10.0, 40.0, 1080.0);
        assert_eq!(layout.total_height, 0.0);
        assert_eq!(layout.start_y, 540.0);
        assert!(layout.heights.is_empty());
    }

    #[test]
    fn test_single_block_is_centered() {
        // One block of height 2 * (100 + 10) = 220
        let b = block(2, 100.0);
        let layout = stack_blocks(&[&b], 10.0, 40.0, 1080.0);
        assert_eq!(layout.total_height, 220.0);
        assert_eq!(layout.start_y, 540.0 - 110.0);
        assert_eq!(layout.heights, vec![220.0]);
    }

    #[test]
    fn test_spacing_counts_between_blocks_only() {
        // Heights 110 and 60, one gap of 40: total 210
        let a = block(1, 100.0);
        let b = block(1, 50.0);
        let layout = stack_blocks(&[&a, &b], 10.0, 40.0, 1080.0);
        assert_eq!(layout.total_height, 110.0 + 60.0 + 40.0);
        assert_eq!(layout.start_y, 540.0 - 105.0);
    }

    #[test]
    fn test_absent_blocks_leave_no_gap() {
        let a = block(1, 100.0);
        let empty = TextBlock::empty(64.0);
        let b = block(1, 50.0);

        let with_gap = stack_blocks(&[&a, &b], 10.0, 40.0, 1080.0);
        let with_empty = stack_blocks(&[&a, &empty, &b], 10.0, 40.0, 1080.0);

        assert_eq!(with_gap.total_height, with_empty.total_height);
        assert_eq!(with_gap.start_y, with_empty.start_y);
        assert_eq!(with_empty.heights, vec![110.0, 0.0, 60.0]);
    }
}

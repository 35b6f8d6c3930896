use crate::project::VocabularyItem;

/// What one rendered clip presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Title card shown before the first item
    Intro,

    /// Word and meaning carry the primary color role
    Word,

    /// Example sentence and its translation carry the primary color role
    Example,
}

impl SegmentKind {
    /// Short label used in logs and error context
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::Intro => "intro",
            SegmentKind::Word => "word",
            SegmentKind::Example => "example",
        }
    }
}

/// One entry in the ordered render plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDescriptor {
    pub kind: SegmentKind,

    /// Index into the project's item list; `None` for the intro card
    pub item_index: Option<usize>,

    /// Which repetition of the item this is (0-based)
    pub repetition: u32,
}

/// Expand the ordered item list into the full render sequence
///
/// One intro card first, then for every item in stored order and every
/// repetition: a word segment, followed by an example segment when the item
/// has an example sentence. The emission order here is the order clips are
/// concatenated in; nothing downstream reorders.
pub fn plan_sequence(items: &[VocabularyItem]) -> Vec<SegmentDescriptor> {
    let mut sequence = vec![SegmentDescriptor {
        kind: SegmentKind::Intro,
        item_index: None,
        repetition: 0,
    }];

    for (item_index, item) in items.iter().enumerate() {
        for repetition in 0..item.count {
            sequence.push(SegmentDescriptor {
                kind: SegmentKind::Word,
                item_index: Some(item_index),
                repetition,
            });

            if item.has_example() {
                sequence.push(SegmentDescriptor {
                    kind: SegmentKind::Example,
                    item_index: Some(item_index),
                    repetition,
                });
            }
        }
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, example: &str, count: u32) -> VocabularyItem {
        VocabularyItem {
            id: format!("id-{}", name),
            name: name.to_string(),
            example: example.to_string(),
            description: ["meaning".to_string(), "example meaning".to_string()],
            image: String::new(),
            audio: [String::new(), String::new()],
            count,
        }
    }

    #[test]
    fn test_intro_comes_first() {
        let sequence = plan_sequence(&[item("apple", "I ate an apple.", 1)]);
        assert_eq!(sequence[0].kind, SegmentKind::Intro);
        assert_eq!(sequence[0].item_index, None);
    }

    #[test]
    fn test_item_with_example_emits_pairs() {
        let sequence = plan_sequence(&[item("apple", "I ate an apple.", 1)]);
        let kinds: Vec<SegmentKind> = sequence.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![SegmentKind::Intro, SegmentKind::Word, SegmentKind::Example]);
    }

    #[test]
    fn test_empty_example_emits_no_example_segment() {
        let sequence = plan_sequence(&[item("pear", "", 2)]);
        let kinds: Vec<SegmentKind> = sequence.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![SegmentKind::Intro, SegmentKind::Word, SegmentKind::Word]);
    }

    #[test]
    fn test_repeat_count_three_emits_three_contiguous_words() {
        let sequence = plan_sequence(&[item("apple", "I ate an apple.", 3), item("pear", "", 1)]);

        let apple: Vec<&SegmentDescriptor> = sequence
            .iter()
            .filter(|d| d.item_index == Some(0))
            .collect();
        let words = apple.iter().filter(|d| d.kind == SegmentKind::Word).count();
        let examples = apple.iter().filter(|d| d.kind == SegmentKind::Example).count();
        assert_eq!(words, 3);
        assert_eq!(examples, 3);

        // All apple segments come before any pear segment
        let first_pear = sequence.iter().position(|d| d.item_index == Some(1)).unwrap();
        let last_apple = sequence.iter().rposition(|d| d.item_index == Some(0)).unwrap();
        assert!(last_apple < first_pear);

        // Repetitions count up in order
        let reps: Vec<u32> = apple
            .iter()
            .filter(|d| d.kind == SegmentKind::Word)
            .map(|d| d.repetition)
            .collect();
        assert_eq!(reps, vec![0, 1, 2]);
    }

    #[test]
    fn test_planning_is_stable() {
        let items = vec![item("a", "ex", 2), item("b", "", 1)];
        assert_eq!(plan_sequence(&items), plan_sequence(&items));
    }

    #[test]
    fn test_no_items_still_plans_the_intro() {
        let sequence = plan_sequence(&[]);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].kind, SegmentKind::Intro);
    }
}

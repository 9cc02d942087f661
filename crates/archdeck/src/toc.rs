use crate::deck::SlideRecord;

/// One table-of-contents line. `slide_index` is a position in the slide
/// store, not a slide id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub slide_index: usize,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocSection {
    pub name: String,
    pub entries: Vec<TocEntry>,
}

/// Slides grouped by section. Sections appear in order of first appearance,
/// entries keep slide order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocIndex {
    sections: Vec<TocSection>,
}

impl TocIndex {
    pub fn build(slides: &[SlideRecord]) -> Self {
        let mut sections: Vec<TocSection> = Vec::new();
        for (slide_index, slide) in slides.iter().enumerate() {
            let entry = TocEntry {
                title: slide.title.clone(),
                slide_index,
                section: slide.section.clone(),
            };
            match sections.iter_mut().find(|s| s.name == slide.section) {
                Some(section) => section.entries.push(entry),
                None => sections.push(TocSection {
                    name: slide.section.clone(),
                    entries: vec![entry],
                }),
            }
        }
        Self { sections }
    }

    pub fn sections(&self) -> &[TocSection] {
        &self.sections
    }

    /// Section containing the given slide position.
    pub fn section_of(&self, slide_index: usize) -> Option<&TocSection> {
        self.sections
            .iter()
            .find(|s| s.entries.iter().any(|e| e.slide_index == slide_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{SlideStore, Variant};

    fn slide(id: u32, title: &str, section: &str) -> SlideRecord {
        SlideRecord {
            id,
            title: title.to_string(),
            section: section.to_string(),
            variant: Variant::Default,
            content: Vec::new(),
        }
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let slides = vec![
            slide(1, "Intro", "Basics"),
            slide(2, "State", "Data"),
            slide(3, "Recap", "Basics"),
            slide(4, "Cache", "Data"),
            slide(5, "Deploy", "Ops"),
        ];
        let toc = TocIndex::build(&slides);
        let names: Vec<&str> = toc.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Basics", "Data", "Ops"]);

        let basics: Vec<usize> = toc.sections()[0]
            .entries
            .iter()
            .map(|e| e.slide_index)
            .collect();
        assert_eq!(basics, [0, 2]);
        assert_eq!(toc.sections()[1].entries[1].title, "Cache");
    }

    #[test]
    fn test_slide_index_is_position_not_id() {
        let slides = vec![slide(28, "A", "S"), slide(28, "B", "S"), slide(7, "C", "T")];
        let toc = TocIndex::build(&slides);
        let indices: Vec<usize> = toc
            .sections()
            .iter()
            .flat_map(|s| s.entries.iter().map(|e| e.slide_index))
            .collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn test_build_is_stable() {
        let store = SlideStore::builtin().unwrap();
        let a = TocIndex::build(store.slides());
        let b = TocIndex::build(store.slides());
        assert_eq!(a, b);
        let total: usize = a.sections().iter().map(|s| s.entries.len()).sum();
        assert_eq!(total, store.slide_count());
    }

    #[test]
    fn test_section_of() {
        let slides = vec![slide(1, "A", "One"), slide(2, "B", "Two")];
        let toc = TocIndex::build(&slides);
        assert_eq!(toc.section_of(1).map(|s| s.name.as_str()), Some("Two"));
        assert!(toc.section_of(5).is_none());
    }

    #[test]
    fn test_empty_slides() {
        assert!(TocIndex::build(&[]).sections().is_empty());
    }
}

//! Built-in layout for the wishlist packs page.
//!
//! Offsets index the page's flat image sequence (205 unique images) and
//! only hold for that export. Pack lists are curated by hand.

use super::{BlockSpec, LayoutConfig, SectionSpec};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn layout() -> LayoutConfig {
    LayoutConfig {
        sections: vec![animals(), nature(), construction(), official_total()],
    }
}

fn animals() -> SectionSpec {
    SectionSpec::Images {
        title: "ANIMAIS".into(),
        subtitle: Some("pontos".into()),
        blocks: vec![
            BlockSpec::new("7", 0, 7).truncating(),
            BlockSpec::new("15", 7, 22).truncating(),
            BlockSpec::new("2", 22, 24),
            BlockSpec::new("35", 24, 59),
            BlockSpec::new("18", 59, 77),
            BlockSpec::new("3", 77, 80),
            BlockSpec::new("20", 80, 100),
            BlockSpec::new("24", 100, 124),
            BlockSpec::new("17", 124, 141),
            BlockSpec::new("25", 141, 166),
            BlockSpec::new("29", 166, 195),
            BlockSpec::titled("15_2", "15", 195, 205),
        ],
    }
}

fn nature() -> SectionSpec {
    SectionSpec::Text {
        title: "NATUREZA".into(),
        subtitle: None,
        items: strings(&[
            "Aquatic Park Pack (8)🏆",
            "Conservation Pack (13)🏆",
            "Africa Pack (9)🏆",
            "Australia Pack (9)🏆",
            "Twilight Animal Pack (8)🏆",
            "Oceania Pack (10)🏆",
            "Tropical Pack (8)🏆",
            "Zookeepers Animal Pack (8)🏆",
            "South America Animal Pack (9)🏆",
        ]),
        not_included: strings(&[
            "Grasslands Animal Pack",
            "Wetlands Animal Pack",
            "North America Animal Pack",
            "Eurasia Animal Pack",
            "Americas Animal Pack",
            "Arid Animal Pack",
            "Southeast Asia Animal Pack",
            "Arctic Pack",
            "Asia Animal Pack",
            "Zookeepers Animal Pack",
        ]),
    }
}

fn construction() -> SectionSpec {
    SectionSpec::Text {
        title: "CONSTRUÇÃO".into(),
        subtitle: None,
        items: strings(&[
            "Europe Animal Pack🏆",
            "Aquatic Park Pack🏆",
            "Arctic Pack🏆",
            "Australia Pack🏆",
            "Twilight Animal Pack🏆",
            "Oceania Pack🏆",
            "Tropical Pack🏆",
            "Zookeepers Animal Pack🏆",
            "Africa Pack🏆",
            "South America Animal Pack🏆",
            "Conservation Pack🏆",
            "Asia Animal Pack🏆",
            "Americas Animal Pack🏆",
        ]),
        not_included: Vec::new(),
    }
}

fn official_total() -> SectionSpec {
    SectionSpec::Images {
        title: "TOTAL OFICIAL".into(),
        subtitle: Some("(92/210)".into()),
        blocks: vec![
            BlockSpec::titled("27", "27¹", 0, 27).truncating(),
            BlockSpec::titled("39", "39¹³", 27, 66),
            BlockSpec::titled("47", "47³", 66, 113),
            BlockSpec::titled("18_total", "18²", 113, 131),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMode;
    use crate::model::{ImageId, Section};

    #[test]
    fn test_wishlist_needs_205_images() {
        assert_eq!(layout().required_images(), 205);
    }

    #[test]
    fn test_wishlist_is_valid_for_full_page() {
        assert!(layout().validate(205, LayoutMode::Strict).is_ok());
        assert!(layout().validate(204, LayoutMode::Strict).is_err());
    }

    #[test]
    fn test_wishlist_short_page_lenient() {
        let images: Vec<ImageId> = (1..=40).map(|n| ImageId::numbered("image", n)).collect();
        let structure = layout().apply(&images, LayoutMode::Lenient).unwrap();

        let block_len = |section: &str, id: &str| match structure.section(section) {
            Some(Section::Images(s)) => s.block(id).unwrap().images.len(),
            _ => panic!("expected image section {}", section),
        };
        assert_eq!(block_len("ANIMAIS", "7"), 7);
        assert_eq!(block_len("ANIMAIS", "15"), 15);
        assert_eq!(block_len("ANIMAIS", "2"), 2);
        assert_eq!(block_len("ANIMAIS", "35"), 0);
        assert_eq!(block_len("ANIMAIS", "15_2"), 0);
        assert_eq!(block_len("TOTAL OFICIAL", "27"), 27);
        assert_eq!(block_len("TOTAL OFICIAL", "39"), 0);
        assert_eq!(block_len("TOTAL OFICIAL", "18_total"), 0);
    }

    #[test]
    fn test_wishlist_tiny_page_truncates_leading_blocks() {
        let images: Vec<ImageId> = (1..=10).map(|n| ImageId::numbered("image", n)).collect();
        let structure = layout().apply(&images, LayoutMode::Lenient).unwrap();

        let Some(Section::Images(animals)) = structure.section("ANIMAIS") else {
            panic!("expected image section");
        };
        assert_eq!(animals.block("7").unwrap().images.len(), 7);
        assert_eq!(animals.block("15").unwrap().images, images[7..].to_vec());
        assert!(animals.block("2").unwrap().images.is_empty());

        let Some(Section::Images(total)) = structure.section("TOTAL OFICIAL") else {
            panic!("expected image section");
        };
        assert_eq!(total.block("27").unwrap().images, images);
    }

    #[test]
    fn test_wishlist_section_order() {
        let titles: Vec<String> = layout()
            .sections
            .iter()
            .map(|s| s.title().to_string())
            .collect();
        assert_eq!(titles, ["ANIMAIS", "NATUREZA", "CONSTRUÇÃO", "TOTAL OFICIAL"]);
    }
}

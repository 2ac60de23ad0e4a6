//! Category colors, icons and the pick lists offered by the transaction form.
//!
//! This is the single lookup table for category display metadata; anything
//! that needs a color or an icon for a category name goes through here.

use once_cell::sync::Lazy;
use shared::{Category, CategoryKind};
use std::collections::HashMap;

/// Color for categories without an explicit entry (slate gray)
pub const FALLBACK_COLOR: &str = "#64748B";
/// Icon for categories without an explicit entry
pub const FALLBACK_ICON: &str = "currency-usd";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

const REGULAR_EXPENSES: &[&str] = &[
    "Ulaşım",
    "İkramlık",
    "Faaliyet",
    "Faturalar",
    "Kamp",
    "Eğitim",
    "Kira",
    "Diğer",
];

const CHARITY: &[&str] = &["Zekat", "Sadaka", "Burs", "İkramlık İçin", "Genel Bağış"];

static STYLES: Lazy<HashMap<&'static str, CategoryStyle>> = Lazy::new(|| {
    [
        // General expenses
        ("Ulaşım", "#F97316", "bus"),
        ("İkramlık", "#EC4899", "food-fork-drink"),
        ("Faaliyet", "#8B5CF6", "account-group"),
        ("Faturalar", "#EF4444", "receipt"),
        ("Kamp", "#10B981", "tent"),
        ("Eğitim", "#6366F1", "school"),
        ("Kira", "#F59E0B", "home"),
        ("Diğer", FALLBACK_COLOR, "dots-horizontal"),
        // Charity
        ("Zekat", "#22C55E", "hand-heart"),
        ("Sadaka", "#3B82F6", "gift"),
        ("Burs", "#A855F7", "school-outline"),
        ("İkramlık İçin", FALLBACK_COLOR, "food"),
        ("Genel Bağış", "#0EA5E9", "heart"),
    ]
    .into_iter()
    .map(|(name, color, icon)| (name, CategoryStyle { color, icon }))
    .collect()
});

pub fn style_for(name: &str) -> Option<CategoryStyle> {
    STYLES.get(name).copied()
}

/// Display color for a category, falling back to gray
pub fn color_for(name: &str) -> &'static str {
    style_for(name).map_or(FALLBACK_COLOR, |style| style.color)
}

/// Icon name for a category, falling back to a generic currency icon
pub fn icon_for(name: &str) -> &'static str {
    style_for(name).map_or(FALLBACK_ICON, |style| style.icon)
}

/// The categories the form offers for `kind`, in display order.
///
/// Income is recorded against the charity categories.
pub fn catalog(kind: CategoryKind) -> Vec<Category> {
    let (prefix, names) = match kind {
        CategoryKind::Income => ("income", CHARITY),
        CategoryKind::Regular => ("regular", REGULAR_EXPENSES),
        CategoryKind::Charity => ("charity", CHARITY),
    };

    names
        .iter()
        .enumerate()
        .map(|(position, name)| Category {
            id: format!("category::{}::{}", prefix, position),
            name: name.to_string(),
            icon: icon_for(name).to_string(),
            color: color_for(name).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_resolve() {
        assert_eq!(color_for("Ulaşım"), "#F97316");
        assert_eq!(icon_for("Ulaşım"), "bus");
        assert_eq!(color_for("Zekat"), "#22C55E");
        assert_eq!(icon_for("Genel Bağış"), "heart");
    }

    #[test]
    fn test_unknown_categories_fall_back() {
        assert_eq!(color_for("Other"), FALLBACK_COLOR);
        assert_eq!(icon_for("Other"), FALLBACK_ICON);
        assert_eq!(color_for(""), "#64748B");
        assert!(style_for("Kırtasiye").is_none());
    }

    #[test]
    fn test_catalog_lists() {
        let regular = catalog(CategoryKind::Regular);
        assert_eq!(regular.len(), 8);
        assert_eq!(regular[0].name, "Ulaşım");
        assert_eq!(regular[7].name, "Diğer");
        assert_eq!(regular[0].id, "category::regular::0");

        let charity = catalog(CategoryKind::Charity);
        let names: Vec<&str> = charity.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zekat", "Sadaka", "Burs", "İkramlık İçin", "Genel Bağış"]);

        let income = catalog(CategoryKind::Income);
        assert_eq!(income.len(), charity.len());
        assert_eq!(income[0].id, "category::income::0");
    }

    #[test]
    fn test_every_catalog_entry_has_a_style() {
        for kind in [CategoryKind::Income, CategoryKind::Regular, CategoryKind::Charity] {
            for category in catalog(kind) {
                assert!(style_for(&category.name).is_some(), "{} has no style", category.name);
            }
        }
    }
}

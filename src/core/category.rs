//! Category lookup business logic.
//!
//! Receipts and budgets refer to categories by id. The directory resolves those
//! ids against the user's category list, separating receipts that were never
//! categorized from those pointing at a category the list does not contain.

use crate::{core::receipt_query::CategoryFilter, entities::Category};
use std::collections::HashMap;

/// Display name for receipts without a category.
pub const UNCATEGORIZED: &str = "uncategorized";
/// Display name for ids missing from the category list.
pub const UNKNOWN_CATEGORY: &str = "unknown category";
/// Display name of the catch-all filter choice.
pub const ALL_CATEGORIES: &str = "all categories";

/// Outcome of resolving a receipt's or budget's category reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    /// The id resolved to a category in the list
    Known(&'a Category),
    /// The id is set but not in the list
    Unknown(i64),
    /// No category id at all
    Uncategorized,
}

/// Categories indexed by id, keeping the list's order.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
    index: HashMap<i64, usize>,
}

impl CategoryDirectory {
    /// Builds a directory from the categories endpoint's list.
    ///
    /// If two entries share an id the first one wins.
    #[must_use]
    pub fn new(categories: &[Category]) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            index.entry(category.id).or_insert(i);
        }
        Self {
            categories: categories.to_vec(),
            index,
        }
    }

    /// All categories in list order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Category> {
        self.index.get(&id).map(|&i| &self.categories[i])
    }

    /// Resolves an optional category reference.
    #[must_use]
    pub fn resolve(&self, id: Option<i64>) -> CategoryRef<'_> {
        match id {
            None => CategoryRef::Uncategorized,
            Some(id) => self
                .get(id)
                .map_or(CategoryRef::Unknown(id), CategoryRef::Known),
        }
    }

    /// Category name, or [`UNCATEGORIZED`] / [`UNKNOWN_CATEGORY`].
    #[must_use]
    pub fn display_name(&self, id: Option<i64>) -> &str {
        match self.resolve(id) {
            CategoryRef::Known(category) => &category.name,
            CategoryRef::Unknown(_) => UNKNOWN_CATEGORY,
            CategoryRef::Uncategorized => UNCATEGORIZED,
        }
    }

    /// Icon of the resolved category, if it has one.
    #[must_use]
    pub fn icon(&self, id: Option<i64>) -> Option<&str> {
        match self.resolve(id) {
            CategoryRef::Known(category) => category.icon.as_deref(),
            _ => None,
        }
    }

    /// Choices for the category selector: "all" first, then each category.
    #[must_use]
    pub fn filter_choices(&self) -> Vec<(CategoryFilter, &str)> {
        std::iter::once((CategoryFilter::All, ALL_CATEGORIES))
            .chain(
                self.categories
                    .iter()
                    .map(|c| (CategoryFilter::Category(c.id), c.name.as_str())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{category, sample_categories};

    #[test]
    fn test_resolve_known_unknown_and_missing() {
        let directory = CategoryDirectory::new(&sample_categories());

        assert!(matches!(
            directory.resolve(Some(2)),
            CategoryRef::Known(c) if c.name == "Shopping"
        ));
        assert_eq!(directory.resolve(Some(42)), CategoryRef::Unknown(42));
        assert_eq!(directory.resolve(None), CategoryRef::Uncategorized);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let directory = CategoryDirectory::new(&sample_categories());
        assert_eq!(directory.display_name(Some(3)), "Transport");
        assert_eq!(directory.display_name(Some(42)), UNKNOWN_CATEGORY);
        assert_eq!(directory.display_name(None), UNCATEGORIZED);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let directory = CategoryDirectory::new(&[category(1, "Food"), category(1, "Dining")]);
        assert_eq!(directory.display_name(Some(1)), "Food");
    }

    #[test]
    fn test_icon_lookup() {
        let mut games = category(4, "Games");
        games.icon = Some("gamepad".to_string());
        let directory = CategoryDirectory::new(&[games, category(5, "Bank")]);

        assert_eq!(directory.icon(Some(4)), Some("gamepad"));
        assert_eq!(directory.icon(Some(5)), None);
        assert_eq!(directory.icon(None), None);
    }

    #[test]
    fn test_filter_choices_start_with_all() {
        let directory = CategoryDirectory::new(&sample_categories());
        let choices = directory.filter_choices();

        assert_eq!(choices.len(), 4);
        assert_eq!(choices[0], (CategoryFilter::All, ALL_CATEGORIES));
        assert_eq!(choices[1], (CategoryFilter::Category(1), "Entertainment"));
    }

    #[test]
    fn test_empty_directory() {
        let directory = CategoryDirectory::default();
        assert!(directory.categories().is_empty());
        assert_eq!(directory.display_name(Some(1)), UNKNOWN_CATEGORY);
    }
}

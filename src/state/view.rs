/// Filter, search and pagination view-model for the gallery grid
///
/// The whole browsing position lives in one serializable object owned by
/// the UI layer. Every derivation (filtered list, page slice) is a pure
/// function over it, so the reset-to-page-1 rules can be tested without
/// rendering anything.
use serde::{Deserialize, Serialize};

use super::data::MediaItem;

/// Fixed page size used when the config does not override it
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// The set of selected category tags.
///
/// Insertion order is preserved so the selection can render as pills in
/// the order the user picked them; matching itself ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected: Vec<String>,
}

impl FilterState {
    /// True when at least one category is selected.
    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    /// The selection in insertion order, for pill display.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn contains(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    /// Add the category if absent, remove it if present. Idempotent per
    /// click; the selection never holds duplicates.
    pub fn toggle(&mut self, category: &str) {
        match self.selected.iter().position(|c| c == category) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(category.to_string()),
        }
    }

    /// Empty the selection, reverting to the unfiltered list.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether a media item passes the category filter.
    /// An empty selection matches everything.
    pub fn matches(&self, item: &MediaItem) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        item.category
            .as_deref()
            .is_some_and(|category| self.contains(category))
    }
}

/// 1-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl PaginationState {
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

/// One page slice of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on the requested page (empty when the list is empty)
    pub items: &'a [T],
    /// The page actually shown, after clamping
    pub page: usize,
    /// Total number of pages; 0 for an empty list
    pub total_pages: usize,
}

/// Slice `items` into the requested page.
///
/// `total_pages = ceil(len / page_size)`; the last page may be shorter.
/// An empty list yields zero pages and an empty slice. Out-of-range page
/// numbers cannot be produced by the page buttons, but are clamped here
/// anyway rather than trusted.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    assert!(page_size > 0, "page size must be positive");

    let total_pages = items.len().div_ceil(page_size);
    if total_pages == 0 {
        return Page {
            items: &[],
            page: 1,
            total_pages: 0,
        };
    }

    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
    }
}

/// Return the subsequence of `items` whose category is selected.
/// With an empty selection this is the identity, order preserved.
pub fn apply_filter<'a>(items: &'a [MediaItem], filter: &FilterState) -> Vec<&'a MediaItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// The complete browsing position: category selection, search term and
/// page cursor. The UI layer is the only mutator; any change to the
/// filter set or the search term snaps the cursor back to page 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryView {
    pub filter: FilterState,
    pub search: String,
    pub pagination: PaginationState,
}

impl GalleryView {
    pub fn toggle_category(&mut self, category: &str) {
        self.filter.toggle(category);
        self.pagination.reset();
    }

    pub fn clear_categories(&mut self) {
        self.filter.clear();
        self.pagination.reset();
    }

    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.pagination.reset();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.current_page = page.max(1);
    }

    /// The filtered list this view exposes: search term first (case
    /// insensitive substring on the name), then the category selection.
    pub fn visible<'a>(&self, items: &'a [MediaItem]) -> Vec<&'a MediaItem> {
        let term = self.search.trim().to_lowercase();
        items
            .iter()
            .filter(|item| term.is_empty() || item.name.to_lowercase().contains(&term))
            .filter(|item| self.filter.matches(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{GroupKey, MediaKind};

    fn item(id: &str, name: &str, category: Option<&str>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            name: name.to_string(),
            file: format!("{id}.jpg"),
            kind: MediaKind::Image,
            date: None,
            category: category.map(str::to_string),
            album: GroupKey::None,
            tags: Vec::new(),
        }
    }

    fn sample() -> Vec<MediaItem> {
        vec![
            item("1", "Opening day", Some("Sports")),
            item("2", "Art week", Some("Arts")),
            item("3", "Untagged", None),
            item("4", "Finals", Some("Sports")),
        ]
    }

    #[test]
    fn empty_selection_is_identity() {
        let items = sample();
        let filtered = apply_filter(&items, &FilterState::default());

        assert_eq!(filtered.len(), items.len());
        for (filtered, original) in filtered.iter().zip(items.iter()) {
            assert!(std::ptr::eq(*filtered, original));
        }
    }

    #[test]
    fn filter_keeps_exactly_the_selected_categories() {
        let items = sample();
        let mut filter = FilterState::default();
        filter.toggle("Sports");

        let filtered = apply_filter(&items, &filter);
        let ids: Vec<&str> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        filter.toggle("Arts");
        let filtered = apply_filter(&items, &filter);
        let ids: Vec<&str> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn toggle_is_idempotent_per_click() {
        let mut filter = FilterState::default();
        filter.toggle("Sports");
        filter.toggle("Sports");
        assert!(!filter.is_active());

        filter.toggle("Sports");
        filter.toggle("Sports");
        filter.toggle("Sports");
        assert_eq!(filter.selected(), ["Sports".to_string()]);
    }

    #[test]
    fn selection_preserves_insertion_order_for_pills() {
        let mut filter = FilterState::default();
        filter.toggle("Sports");
        filter.toggle("Arts");
        filter.toggle("Music");
        filter.toggle("Sports");

        assert_eq!(
            filter.selected(),
            ["Arts".to_string(), "Music".to_string()]
        );
    }

    #[test]
    fn clear_reverts_to_unfiltered() {
        let items = sample();
        let mut filter = FilterState::default();
        filter.toggle("Arts");
        filter.clear();

        assert!(!filter.is_active());
        assert_eq!(apply_filter(&items, &filter).len(), items.len());
    }

    #[test]
    fn pages_reconstruct_the_list_exactly() {
        let items: Vec<i32> = (0..32).collect();
        let page_size = 15;

        let first = paginate(&items, 1, page_size);
        assert_eq!(first.total_pages, 3);

        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            rebuilt.extend_from_slice(paginate(&items, page, page_size).items);
        }
        assert_eq!(rebuilt, items);

        // Last page holds the remainder
        assert_eq!(paginate(&items, 3, page_size).items.len(), 2);
    }

    #[test]
    fn empty_list_paginates_to_zero_pages() {
        let items: Vec<i32> = Vec::new();
        let page = paginate(&items, 1, 15);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<i32> = (0..20).collect();
        assert_eq!(paginate(&items, 0, 15).page, 1);
        assert_eq!(paginate(&items, 99, 15).page, 2);
        assert_eq!(paginate(&items, 99, 15).items.len(), 5);
    }

    #[test]
    fn changing_the_filter_resets_the_page() {
        let mut view = GalleryView::default();
        view.go_to_page(2);
        view.toggle_category("Sports");
        assert_eq!(view.pagination.current_page, 1);

        view.go_to_page(2);
        view.toggle_category("Arts");
        assert_eq!(view.pagination.current_page, 1);

        view.go_to_page(3);
        view.clear_categories();
        assert_eq!(view.pagination.current_page, 1);
    }

    #[test]
    fn changing_the_search_term_resets_the_page() {
        let mut view = GalleryView::default();
        view.go_to_page(4);
        view.set_search("finals".into());
        assert_eq!(view.pagination.current_page, 1);
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        let items = sample();
        let mut view = GalleryView::default();
        view.set_search("ART".into());

        let ids: Vec<&str> = view.visible(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn search_and_filter_compose() {
        let items = sample();
        let mut view = GalleryView::default();
        view.set_search("s".into());
        view.toggle_category("Sports");

        let ids: Vec<&str> = view.visible(&items).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn view_model_round_trips_through_json() {
        let mut view = GalleryView::default();
        view.toggle_category("Sports");
        view.set_search("day".into());
        view.go_to_page(2);

        let json = serde_json::to_string(&view).unwrap();
        let restored: GalleryView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, restored);
    }
}

//! User intents and the pure state transition they drive

use dex_core::{QueryState, SortKey};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// New search text; surrounding whitespace is ignored
    Search(String),
    /// Select the category if unselected, unselect it otherwise
    ToggleCategory(String),
    /// Pick a group, or `None` for all groups
    SelectGroup(Option<u32>),
    Sort(SortKey),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    /// Back to the default query
    ClearFilters,
}

/// Apply `intent` to `state`. Any filter or sort change goes back to page 1.
pub fn reduce(state: &QueryState, intent: Intent) -> QueryState {
    let mut next = state.clone();
    match intent {
        Intent::Search(text) => {
            next.search = text.trim().to_string();
            next.page = 1;
        }
        Intent::ToggleCategory(category) => {
            if !next.categories.remove(&category) {
                next.categories.insert(category);
            }
            next.page = 1;
        }
        Intent::SelectGroup(group) => {
            next.group = group;
            next.page = 1;
        }
        Intent::Sort(sort) => {
            next.sort = sort;
            next.page = 1;
        }
        Intent::GoToPage(page) => next.page = page.max(1),
        Intent::NextPage => next.page += 1,
        Intent::PreviousPage => next.page = next.page.saturating_sub(1).max(1),
        Intent::ClearFilters => next = QueryState::default(),
    }
    next
}

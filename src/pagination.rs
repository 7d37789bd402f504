use serde::Serialize;

use crate::state::listing::PAGE_SIZE_OPTIONS;

/// Page numbers (1-based) to show, `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One pagination control.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    /// 0-based index sent back to the backend.
    pub index: usize,
    /// 1-based number shown to the user.
    pub label: usize,
    pub current: bool,
}

/// Page of items plus everything the pagination footer renders.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Links to render; `None` is an ellipsis.
    pub pages: Vec<Option<PageLink>>,
    /// Current 0-based page index.
    pub page: usize,
    pub size: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub last: Option<usize>,
    pub size_options: Vec<usize>,
    pub range_label: String,
}

impl<T> Paginated<T> {
    /// Builds the footer for a 0-indexed `page` out of `total_pages`.
    pub fn new(
        items: Vec<T>,
        page: usize,
        size: usize,
        total_pages: usize,
        total_elements: usize,
        range_label: String,
    ) -> Self {
        let current = page.saturating_add(1);

        let pages = get_pages(total_pages, current, 2, 2, 4, 2)
            .into_iter()
            .map(|p| {
                p.map(|label| PageLink {
                    index: label - 1,
                    label,
                    current: label == current,
                })
            })
            .collect();

        let mut size_options = PAGE_SIZE_OPTIONS.to_vec();
        if !size_options.contains(&size) {
            size_options.push(size);
            size_options.sort_unstable();
        }

        Self {
            items,
            pages,
            page,
            size,
            total_pages,
            total_elements,
            previous: page.checked_sub(1),
            next: (current < total_pages).then_some(current),
            last: total_pages.checked_sub(1),
            size_options,
            range_label,
        }
    }
}

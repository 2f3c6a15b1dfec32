//! In-memory page slicing over a fully materialized result set.
//!
//! The store is queried for every match and the window is cut here, so
//! `count` and `total_pages` always describe the whole set.

/// One page of a result set plus where it sits in the whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub users: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            count: 0,
            total_pages: 0,
            has_previous_page: false,
            has_next_page: false,
            users: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
            users: self.users.into_iter().map(f).collect(),
        }
    }
}

/// Cut page `page_number` (1-based) of `page_size` items out of `items`.
///
/// The flags only compare `page_number` against `total_pages`: a page past the
/// end reports a previous page, no next page, and an empty slice.
/// `page_size` must be non-zero.
pub fn paginate<T>(items: Vec<T>, page_number: u64, page_size: u64) -> Page<T> {
    debug_assert!(page_size > 0, "page_size must be positive");
    if items.is_empty() {
        return Page::empty();
    }

    let count = items.len() as u64;
    let total_pages = count.div_ceil(page_size);

    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(count);
    let users = if start < count {
        items
            .into_iter()
            .skip(start as usize)
            .take((end - start) as usize)
            .collect()
    } else {
        Vec::new()
    };

    Page {
        count,
        total_pages,
        has_previous_page: page_number > 1,
        has_next_page: page_number < total_pages,
        users,
    }
}

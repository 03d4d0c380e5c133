//! Fixed-size pagination of an ordered result set.
//!
//! Pages are 1-based. [`paginate`] never clamps: a page outside
//! `1..=total_pages` yields an empty slice, which callers render as "no
//! results on this page". Clamping is [`PageState`]'s job.

use std::num::NonZeroUsize;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `len` items; at least one, even when empty.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Returns the items on 1-based `page`, or an empty slice when out of range.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use eventscout::discovery::paginate;
///
/// let items: Vec<u32> = (1..=10).collect();
/// let size = NonZeroUsize::new(4).unwrap();
///
/// assert_eq!(paginate(&items, size, 1), &[1, 2, 3, 4]);
/// assert_eq!(paginate(&items, size, 3), &[9, 10]);
/// assert!(paginate(&items, size, 4).is_empty());
/// ```
#[must_use]
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(page_size.get());
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size.get()).min(items.len());
    &items[start..end]
}

/// Current page and page size of a paginated view.
///
/// Invariant: `1 <= current_page <= total_pages` for the item count last
/// passed to [`PageState::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: NonZeroUsize,
}

impl PageState {
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Returns to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page`, clamped into `1..=total_pages(len)`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current_page = page.clamp(1, total_pages(len, self.page_size));
    }

    /// `max(1, current - 1)`.
    pub fn prev(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// `min(total_pages, current + 1)`.
    pub fn next(&mut self, len: usize) {
        self.current_page = (self.current_page + 1).min(total_pages(len, self.page_size));
    }

    /// Re-establishes the invariant after the item count changed.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.current_page, len);
    }

    /// Items of the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.current_page)
    }
}

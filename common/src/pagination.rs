//! Abstractions for page-window pagination.
//!
//! Both server-driven pages and locally sliced pages are exposed through the
//! same [`FetchPage`] operation, so a screen never needs to know which one it
//! is talking to.

use std::{convert::Infallible, num::NonZeroUsize, ops::Range};

use crate::Handler;

/// Default number of rows on a page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Returns the number of pages `len` rows occupy with the provided `size`.
#[must_use]
pub fn total_pages(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get())
}

/// Request of a single page window.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PageRequest {
    /// 0-based index of the requested page.
    pub index: usize,

    /// Maximum number of rows on the requested page.
    pub size: NonZeroUsize,
}

impl PageRequest {
    /// Creates a new [`PageRequest`].
    #[must_use]
    pub const fn new(index: usize, size: NonZeroUsize) -> Self {
        Self { index, size }
    }

    /// Creates a [`PageRequest`] of the first page.
    #[must_use]
    pub const fn first(size: NonZeroUsize) -> Self {
        Self::new(0, size)
    }

    /// Creates a [`PageRequest`] from a 1-based page number.
    ///
    /// [`None`] is returned if the `number` is `0`.
    #[must_use]
    pub fn from_number(number: usize, size: NonZeroUsize) -> Option<Self> {
        number.checked_sub(1).map(|index| Self::new(index, size))
    }

    /// Returns the 1-based number of the requested page.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.index + 1
    }

    /// Clamps this [`PageRequest`] into `[0, total_pages - 1]`.
    ///
    /// Requests past the last page are moved onto the last page, and any
    /// request is moved onto the first page when there are no pages at all.
    #[must_use]
    pub fn clamp(self, total_pages: usize) -> Self {
        Self {
            index: self.index.min(total_pages.saturating_sub(1)),
            size: self.size,
        }
    }

    /// Returns the bounds of this page window in a sequence of `len` rows.
    ///
    /// Windows lying past the end are empty.
    #[must_use]
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.index.saturating_mul(self.size.get()).min(len);
        let end = start.saturating_add(self.size.get()).min(len);
        start..end
    }
}

/// A page of rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Rows on this [`Page`].
    pub rows: Vec<T>,

    /// 0-based index of this [`Page`].
    pub index: usize,

    /// Total number of pages in the paginated sequence.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Creates an empty [`Page`] of an empty sequence.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: Vec::new(),
            index: 0,
            total_pages: 0,
        }
    }

    /// Indicates whether this [`Page`] contains no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the 1-based number of this [`Page`].
    #[must_use]
    pub const fn number(&self) -> usize {
        self.index + 1
    }

    /// Indicates whether there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Maps rows of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            index: self.index,
            total_pages: self.total_pages,
        }
    }
}

/// Operation fetching a [`Page`] from a page source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchPage(pub PageRequest);

/// Page source over an already fetched sequence of rows, slicing it locally.
#[derive(Clone, Debug, Default)]
pub struct LocalPages<T> {
    /// Whole sequence of rows.
    rows: Vec<T>,
}

impl<T> LocalPages<T> {
    /// Wraps the provided rows into a [`LocalPages`] source.
    #[must_use]
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Returns all the rows of this [`LocalPages`].
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Slices a [`Page`] out of the rows, clamping out-of-range requests.
    #[must_use]
    pub fn page(&self, req: PageRequest) -> Page<T>
    where
        T: Clone,
    {
        let total_pages = total_pages(self.rows.len(), req.size);
        let req = req.clamp(total_pages);
        Page {
            rows: self.rows[req.window(self.rows.len())].to_vec(),
            index: req.index,
            total_pages,
        }
    }
}

impl<T> From<Vec<T>> for LocalPages<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

impl<T: Clone> Handler<FetchPage> for LocalPages<T> {
    type Ok = Page<T>;
    type Err = Infallible;

    async fn execute(
        &self,
        FetchPage(req): FetchPage,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.page(req))
    }
}

/// Naming of the pagination query parameters an endpoint understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Params {
    /// `pageNumber` and `pageSize` parameters.
    PageNumber,

    /// `page` and `size` parameters.
    Page,
}

impl Params {
    /// Returns the query pairs representing the provided [`PageRequest`].
    ///
    /// Page numbers are 1-based on the wire.
    #[must_use]
    pub fn query(self, req: PageRequest) -> [(&'static str, String); 2] {
        let (number, size) = match self {
            Self::PageNumber => ("pageNumber", "pageSize"),
            Self::Page => ("page", "size"),
        };
        [
            (number, req.number().to_string()),
            (size, req.size.to_string()),
        ]
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use super::{total_pages, LocalPages, PageRequest, Params};

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn counts_total_pages() {
        assert_eq!(total_pages(0, size(10)), 0);
        assert_eq!(total_pages(1, size(10)), 1);
        assert_eq!(total_pages(10, size(10)), 1);
        assert_eq!(total_pages(11, size(10)), 2);
        assert_eq!(total_pages(7, size(1)), 7);
    }

    #[test]
    fn clamps_out_of_range_requests() {
        assert_eq!(PageRequest::new(5, size(3)).clamp(2).index, 1);
        assert_eq!(PageRequest::new(1, size(3)).clamp(2).index, 1);
        assert_eq!(PageRequest::new(4, size(3)).clamp(0).index, 0);
        assert_eq!(
            PageRequest::new(usize::MAX, size(3)).window(10),
            10..10,
        );
    }

    #[test]
    fn slices_local_pages() {
        let pages = LocalPages::new((1..=7).collect::<Vec<_>>());

        let page = pages.page(PageRequest::new(0, size(3)));
        assert_eq!(page.rows, [1, 2, 3]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let page = pages.page(PageRequest::new(2, size(3)));
        assert_eq!(page.rows, [7]);
        assert!(!page.has_next());

        let page = pages.page(PageRequest::new(9, size(3)));
        assert_eq!(page.rows, [7]);
        assert_eq!(page.index, 2);

        assert_eq!(pages.rows().len(), 7);
    }

    #[test]
    fn empty_source_yields_empty_page() {
        let pages = LocalPages::<u8>::new(vec![]);
        let page = pages.page(PageRequest::new(3, size(5)));
        assert!(page.is_empty());
        assert_eq!(page.index, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn renders_query_params() {
        let req = PageRequest::new(2, size(25));
        assert_eq!(
            Params::PageNumber.query(req),
            [("pageNumber", "3".to_owned()), ("pageSize", "25".to_owned())],
        );
        assert_eq!(
            Params::Page.query(req),
            [("page", "3".to_owned()), ("size", "25".to_owned())],
        );
        assert_eq!(PageRequest::from_number(0, size(1)), None);
        assert_eq!(PageRequest::from_number(3, size(1)).unwrap().index, 2);
    }
}

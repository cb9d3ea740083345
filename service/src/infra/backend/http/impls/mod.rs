//! [`Backend`] implementations for [`Http`].

mod application;
mod lease;
mod listing;
mod maintenance;
mod payment;
mod payout;
mod session;
mod user;

use common::{
    pagination::{self, LocalPages},
    Page, PageRequest,
};
use serde::Deserialize;

#[cfg(doc)]
use crate::infra::{Backend, Http};

/// Paginated response of the backend.
///
/// Some endpoints ignore the pagination parameters and respond with a plain
/// array, which is then sliced locally.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Paged<T> {
    /// Page window cut by the backend.
    Window(Window<T>),

    /// Whole sequence of rows.
    All(Vec<T>),
}

/// Page window cut by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Window<T> {
    /// Rows on the page.
    #[serde(alias = "data", alias = "content")]
    items: Vec<T>,

    /// Total number of pages.
    #[serde(default)]
    total_pages: Option<usize>,

    /// Total number of rows on all the pages.
    #[serde(default, alias = "totalItems", alias = "totalElements")]
    total_count: Option<usize>,
}

impl<T: Clone> Paged<T> {
    /// Converts this [`Paged`] response into a [`Page`] of the provided
    /// [`PageRequest`].
    fn into_page(self, req: PageRequest) -> Page<T> {
        match self {
            Self::Window(Window {
                items,
                total_pages,
                total_count,
            }) => {
                let total_pages = total_pages
                    .or_else(|| {
                        total_count.map(|n| pagination::total_pages(n, req.size))
                    })
                    .unwrap_or_else(|| {
                        if items.is_empty() { 0 } else { req.number() }
                    });
                // The backend cuts the window, so the index stays the
                // requested one: the rows belong to it even past the end.
                Page {
                    index: if total_pages == 0 { 0 } else { req.index },
                    rows: items,
                    total_pages,
                }
            }
            Self::All(rows) => LocalPages::new(rows).page(req),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::PageRequest;

    use super::Paged;

    fn req(index: usize) -> PageRequest {
        PageRequest::new(index, NonZeroUsize::new(2).unwrap())
    }

    #[test]
    fn takes_total_pages_from_response() {
        let paged: Paged<u8> =
            serde_json::from_str(r#"{"items":[1,2],"totalPages":4}"#).unwrap();
        let page = paged.into_page(req(1));

        assert_eq!(page.rows, [1, 2]);
        assert_eq!(page.index, 1);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn derives_total_pages_from_count() {
        let paged: Paged<u8> =
            serde_json::from_str(r#"{"data":[5],"totalCount":5}"#).unwrap();

        assert_eq!(paged.into_page(req(2)).total_pages, 3);
    }

    #[test]
    fn keeps_requested_index_past_the_end() {
        let paged: Paged<u8> =
            serde_json::from_str(r#"{"items":[],"totalPages":3}"#).unwrap();
        let page = paged.into_page(req(98));

        assert!(page.rows.is_empty());
        assert_eq!(page.index, 98);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn slices_plain_arrays_locally() {
        let paged: Paged<u8> = serde_json::from_str("[1,2,3]").unwrap();
        let page = paged.into_page(req(5));

        assert_eq!(page.rows, [3]);
        assert_eq!(page.index, 1);
        assert_eq!(page.total_pages, 2);
    }
}

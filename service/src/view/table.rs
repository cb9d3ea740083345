//! Generic [`Table`] rendering with a [`Pager`].

use std::fmt;

use common::Page;
use derive_more::Debug;
use itertools::Itertools as _;

/// Text of the placeholder row rendered for empty data.
pub const NO_DATA: &str = "No data available";

/// Column of a [`Table`].
#[derive(Debug)]
pub struct Column<T> {
    /// Header of this [`Column`].
    pub header: String,

    /// Function extracting the cell text of this [`Column`] from a row.
    #[debug(skip)]
    pub accessor: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> Column<T> {
    /// Creates a new [`Column`].
    #[must_use]
    pub fn new(
        header: impl Into<String>,
        accessor: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Box::new(accessor),
        }
    }
}

/// Table of rows described by its [`Column`]s.
#[derive(Debug)]
pub struct Table<T> {
    /// [`Column`]s of this [`Table`].
    columns: Vec<Column<T>>,
}

impl<T> Table<T> {
    /// Creates a new [`Table`] out of the provided [`Column`]s.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = Column<T>>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Returns the [`Column`]s of this [`Table`].
    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Renders the provided rows.
    ///
    /// Empty `data` is rendered as a single [`Row::NoData`].
    #[must_use]
    pub fn render<'r>(
        &self,
        data: impl IntoIterator<Item = &'r T>,
    ) -> Rendered
    where
        T: 'r,
    {
        let mut rows = data
            .into_iter()
            .map(|row| {
                Row::Cells(
                    self.columns.iter().map(|c| (c.accessor)(row)).collect(),
                )
            })
            .collect::<Vec<_>>();
        if rows.is_empty() {
            rows.push(Row::NoData);
        }
        Rendered {
            headers: self.columns.iter().map(|c| c.header.clone()).collect(),
            rows,
            footer: None,
        }
    }

    /// Renders the rows of the provided [`Page`] with the paging footer.
    #[must_use]
    pub fn render_page(&self, page: &Page<T>) -> Rendered {
        let mut rendered = self.render(&page.rows);
        rendered.footer = Some(Footer {
            current_page: page.number(),
            total_pages: page.total_pages.max(1),
        });
        rendered
    }
}

/// Body row of a [`Rendered`] table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Row {
    /// Cells of a data row, one per [`Column`].
    Cells(Vec<String>),

    /// Placeholder row spanning all the [`Column`]s.
    NoData,
}

/// Paging footer of a [`Rendered`] table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Footer {
    /// 1-based number of the shown page.
    pub current_page: usize,

    /// Total number of pages.
    pub total_pages: usize,
}

/// Rendered [`Table`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rendered {
    /// Header row.
    pub headers: Vec<String>,

    /// Body [`Row`]s, never empty.
    pub rows: Vec<Row>,

    /// Paging [`Footer`], if any.
    pub footer: Option<Footer>,
}

impl Rendered {
    /// Indicates whether this [`Rendered`] table shows no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == [Row::NoData]
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| match r {
                        Row::Cells(cells) => cells.get(i),
                        Row::NoData => None,
                    })
                    .map(|c| c.chars().count())
                    .fold(h.chars().count(), usize::max)
            })
            .collect::<Vec<_>>();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(widths.iter().copied())
                .map(|(c, w)| format!("{c:<w$}"))
                .join("  ")
                .trim_end()
                .to_owned()
        };

        writeln!(f, "{}", line(&self.headers))?;
        writeln!(
            f,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).join("  "),
        )?;
        for row in &self.rows {
            match row {
                Row::Cells(cells) => writeln!(f, "{}", line(cells))?,
                Row::NoData => writeln!(f, "{NO_DATA}")?,
            }
        }
        if let Some(Footer {
            current_page,
            total_pages,
        }) = self.footer
        {
            write!(f, "Page {current_page} of {total_pages}")?;
        }
        Ok(())
    }
}

/// Callback invoked with the 1-based number of the newly selected page.
type OnPageChange = Box<dyn FnMut(usize) + Send>;

/// Page navigation control.
#[derive(Debug)]
pub struct Pager {
    /// 1-based number of the current page.
    current_page: usize,

    /// Total number of pages.
    total_pages: usize,

    /// Callback invoked on each page change.
    #[debug(skip)]
    on_page_change: Option<OnPageChange>,
}

impl Pager {
    /// Creates a new [`Pager`] positioned on the provided page.
    #[must_use]
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
            on_page_change: None,
        }
    }

    /// Creates a new [`Pager`] positioned on the provided [`Page`].
    #[must_use]
    pub fn of<T>(page: &Page<T>) -> Self {
        Self::new(page.number(), page.total_pages)
    }

    /// Sets the callback invoked with the number of the newly selected page.
    #[must_use]
    pub fn on_page_change(
        mut self,
        callback: impl FnMut(usize) + Send + 'static,
    ) -> Self {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    /// Returns the 1-based number of the current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Moves onto the provided 1-based page.
    ///
    /// Requests out of `1..=total_pages` or of the current page are ignored
    /// and `false` is returned.
    pub fn go_to(&mut self, page: usize) -> bool {
        if !(1..=self.total_pages).contains(&page) || page == self.current_page
        {
            return false;
        }
        self.current_page = page;
        if let Some(cb) = &mut self.on_page_change {
            cb(page);
        }
        true
    }

    /// Moves onto the next page, if any.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// Moves onto the previous page, if any.
    pub fn previous(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }
}

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use common::Page;

    use super::{Column, Pager, Row, Table};

    fn table() -> Table<(u32, &'static str)> {
        Table::new([
            Column::new("ID", |r: &(u32, &'static str)| r.0.to_string()),
            Column::new("Name", |r: &(u32, &'static str)| r.1.to_owned()),
        ])
    }

    #[test]
    fn renders_cells_per_column() {
        let rendered = table().render(&[(1, "one"), (22, "two")]);

        assert_eq!(rendered.headers, ["ID", "Name"]);
        assert_eq!(
            rendered.rows,
            [
                Row::Cells(vec!["1".into(), "one".into()]),
                Row::Cells(vec!["22".into(), "two".into()]),
            ],
        );
        assert_eq!(rendered.to_string(), "ID  Name\n--  ----\n1   one\n22  two\n");
    }

    #[test]
    fn renders_placeholder_for_empty_data() {
        let rendered = table().render(&[]);

        assert!(rendered.is_empty());
        assert_eq!(rendered.rows, [Row::NoData]);
        assert!(rendered.to_string().contains("No data available"));
    }

    #[test]
    fn renders_page_footer() {
        let page = Page {
            rows: vec![(3, "three")],
            index: 1,
            total_pages: 2,
        };

        let text = table().render_page(&page).to_string();

        assert!(text.ends_with("Page 2 of 2"), "{text}");
    }

    #[test]
    fn ignores_out_of_range_pages() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Pager::new(1, 3).on_page_change({
            let changes = Arc::clone(&changes);
            move |p| changes.lock().unwrap().push(p)
        });

        assert!(!pager.go_to(0));
        assert!(!pager.go_to(4));
        assert!(!pager.go_to(1));
        assert!(!pager.previous());
        assert!(pager.go_to(3));
        assert!(!pager.next());
        assert!(pager.previous());

        assert_eq!(pager.current_page(), 2);
        assert_eq!(*changes.lock().unwrap(), [3, 2]);
    }

    #[test]
    fn empty_pager_ignores_everything() {
        let mut pager = Pager::of(&Page::<u8>::empty());

        assert!(!pager.go_to(1));
        assert!(!pager.next());
        assert!(!pager.previous());
    }
}

//! Generic [`Filter`] of rows by a selected option.

use std::borrow::Cow;

use derive_more::{Debug, Display, Error};

/// Value of the [`FilterOption`] matching every row.
pub const ALL: &str = "all";

/// Selectable option of a [`Filter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterOption {
    /// Value passed to the predicate of a [`Filter`].
    pub value: Cow<'static, str>,

    /// Human-readable label of this [`FilterOption`].
    pub label: Cow<'static, str>,
}

impl FilterOption {
    /// Creates a new [`FilterOption`].
    #[must_use]
    pub fn new(
        value: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates the [`FilterOption`] matching every row.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            value: Cow::Borrowed(ALL),
            label: Cow::Borrowed("All"),
        }
    }
}

/// Callback receiving the rows matching a [`Filter`] after each change.
type OnChange<T> = Box<dyn FnMut(&[&T]) + Send>;

/// Filter of rows by the selected [`FilterOption`].
///
/// The predicate `P` receives a row and the selected [`FilterOption::value`],
/// and must accept every row for [`ALL`].
#[derive(Debug)]
pub struct Filter<T, P> {
    /// Available [`FilterOption`]s, always starting with [`ALL`].
    options: Vec<FilterOption>,

    /// Value of the selected [`FilterOption`].
    selected: Cow<'static, str>,

    /// Predicate deciding whether a row matches the selected value.
    #[debug(skip)]
    predicate: P,

    /// Rows being filtered.
    rows: Vec<T>,

    /// Callback invoked with the matching rows on each change.
    #[debug(skip)]
    on_change: Option<OnChange<T>>,
}

impl<T, P> Filter<T, P>
where
    P: Fn(&T, &str) -> bool,
{
    /// Creates a new [`Filter`] with the [`ALL`] option selected.
    ///
    /// The [`ALL`] option is prepended to the provided ones unless they
    /// contain it already.
    #[must_use]
    pub fn new(
        options: impl IntoIterator<Item = FilterOption>,
        predicate: P,
    ) -> Self {
        let mut options = options.into_iter().collect::<Vec<_>>();
        if !options.iter().any(|o| o.value == ALL) {
            options.insert(0, FilterOption::all());
        }
        Self {
            options,
            selected: Cow::Borrowed(ALL),
            predicate,
            rows: Vec::new(),
            on_change: None,
        }
    }

    /// Selects the provided initial value.
    ///
    /// Unknown values leave the [`ALL`] option selected.
    #[must_use]
    pub fn with_initial_value(mut self, value: &str) -> Self {
        if let Some(opt) = self.option(value) {
            self.selected = opt.value.clone();
        } else {
            tracing::warn!(value, "unknown initial filter value, showing all");
        }
        self
    }

    /// Sets the callback invoked with the matching rows whenever the
    /// selection or the rows change.
    ///
    /// Meant for long-lived front ends re-rendering on each change. One-shot
    /// callers read [`Filter::filtered()`] instead.
    #[must_use]
    pub fn on_change(
        mut self,
        callback: impl FnMut(&[&T]) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Returns the available [`FilterOption`]s.
    #[must_use]
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Returns the value of the selected [`FilterOption`].
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Returns the rows being filtered.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns the provided `rows` matching the selected value, in their
    /// original order.
    #[must_use]
    pub fn apply<'r>(&self, rows: &'r [T]) -> Vec<&'r T> {
        rows.iter()
            .filter(|row| (self.predicate)(row, &self.selected))
            .collect()
    }

    /// Returns the held rows matching the selected value.
    #[must_use]
    pub fn filtered(&self) -> Vec<&T> {
        self.apply(&self.rows)
    }

    /// Selects the [`FilterOption`] with the provided value.
    ///
    /// # Errors
    ///
    /// With [`UnknownFilterValue`] if none of the options has the provided
    /// value. The selection stays unchanged then.
    pub fn select(&mut self, value: &str) -> Result<(), UnknownFilterValue> {
        let opt = self
            .option(value)
            .ok_or_else(|| UnknownFilterValue(value.to_owned()))?;
        self.selected = opt.value.clone();
        self.notify();
        Ok(())
    }

    /// Replaces the rows being filtered.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.notify();
    }

    /// Returns the [`FilterOption`] with the provided value, if any.
    fn option(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Invokes the [`Filter::on_change()`] callback, if any.
    fn notify(&mut self) {
        if let Some(mut cb) = self.on_change.take() {
            cb(&self.filtered());
            self.on_change = Some(cb);
        }
    }
}

/// Error of selecting a value none of the [`FilterOption`]s has.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("Unknown filter value `{_0}`")]
pub struct UnknownFilterValue(#[error(not(source))] pub String);

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use super::{Filter, FilterOption, UnknownFilterValue, ALL};

    fn parity() -> Filter<u32, impl Fn(&u32, &str) -> bool> {
        Filter::new(
            [FilterOption::new("even", "Even"), FilterOption::new("odd", "Odd")],
            |n: &u32, v: &str| match v {
                "even" => n % 2 == 0,
                "odd" => n % 2 == 1,
                _ => true,
            },
        )
    }

    #[test]
    fn prepends_all_option() {
        let filter = parity();

        assert_eq!(filter.options()[0], FilterOption::all());
        assert_eq!(filter.options().len(), 3);
        assert_eq!(filter.selected(), ALL);
    }

    #[test]
    fn returns_matches_in_original_order() {
        let mut filter = parity();
        let rows = [5, 2, 8, 3, 4];

        filter.select("even").unwrap();

        assert_eq!(filter.apply(&rows), [&2, &8, &4]);
    }

    #[test]
    fn is_idempotent() {
        let mut filter = parity();
        filter.select("odd").unwrap();
        let rows = [1, 2, 3, 4, 5];

        let once = filter.apply(&rows).into_iter().copied().collect::<Vec<_>>();
        let twice = filter.apply(&once);

        assert_eq!(twice, once.iter().collect::<Vec<_>>());
    }

    #[test]
    fn never_mutates_rows() {
        let mut filter = parity();
        filter.set_rows(vec![3, 1, 2]);

        filter.select("even").unwrap();
        filter.select("odd").unwrap();
        filter.select(ALL).unwrap();

        assert_eq!(filter.rows(), [3, 1, 2]);
        assert_eq!(filter.filtered().len(), 3);
    }

    #[test]
    fn empty_rows_give_empty_result() {
        let mut filter = parity();
        filter.select("odd").unwrap();

        assert!(filter.apply(&[]).is_empty());
        assert!(filter.filtered().is_empty());
    }

    #[test]
    fn rejects_unknown_values() {
        let mut filter = parity();
        filter.select("odd").unwrap();

        assert_eq!(
            filter.select("prime"),
            Err(UnknownFilterValue("prime".into())),
        );
        assert_eq!(filter.selected(), "odd");
    }

    #[test]
    fn unknown_initial_value_shows_all() {
        let filter = parity().with_initial_value("prime");
        assert_eq!(filter.selected(), ALL);

        let filter = parity().with_initial_value("even");
        assert_eq!(filter.selected(), "even");
    }

    #[test]
    fn notifies_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut filter = parity().on_change({
            let seen = Arc::clone(&seen);
            move |rows| {
                seen.lock()
                    .unwrap()
                    .push(rows.iter().map(|n| **n).collect::<Vec<_>>());
            }
        });

        filter.set_rows(vec![1, 2, 3]);
        filter.select("odd").unwrap();
        _ = filter.select("prime");

        assert_eq!(*seen.lock().unwrap(), [vec![1, 2, 3], vec![1, 3]]);
    }
}

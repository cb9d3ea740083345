//! Date and time utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, ops, str::FromStr, time::Duration};

use derive_more::{Debug, Display, Error};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
    UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// Offset-less timestamps (as `2024-05-01T10:00:00`) are treated as UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        let dt = time::OffsetDateTime::parse(input, &Rfc3339).or_else(|e| {
            time::PrimitiveDateTime::parse(
                input.trim_end_matches('Z'),
                format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second]\
                     [optional [.[subsecond]]]"
                ),
            )
            .map(time::PrimitiveDateTime::assume_utc)
            .map_err(|_| ParseError::Parse(e))
        })?;
        Ok(dt.into())
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the [`DateTime`] as an [RFC 2822] string, the format of
    /// cookie expiration dates.
    ///
    /// [RFC 2822]: https://tools.ietf.org/html/rfc2822
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc2822(&self) -> String {
        self.inner.format(&Rfc2822).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 2822: {e}")
        })
    }

    /// Creates a new [`DateTime`] from the provided [RFC 2822] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 2822] date and time.
    ///
    /// [RFC 2822]: https://tools.ietf.org/html/rfc2822
    pub fn from_rfc2822(input: &str) -> Result<Self, ParseError> {
        Ok(time::OffsetDateTime::parse(input, &Rfc2822)
            .map_err(ParseError::Parse)?
            .into())
    }

    /// Returns the calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.inner.date())
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] or [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string.
    Parse(time::error::Parse),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl<Of: ?Sized> From<time::OffsetDateTime> for DateTimeOf<Of> {
    fn from(dt: time::OffsetDateTime) -> Self {
        Self {
            inner: dt.to_offset(UtcOffset::UTC),
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_rfc3339())
    }
}

impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_rfc3339(&s).map_err(de::Error::custom)
    }
}

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self(time::OffsetDateTime::now_utc().date())
    }

    /// Creates a new [`Date`] from its components.
    ///
    /// [`None`] is returned if the components do not form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day(),
        )
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Parses an ISO `YYYY-MM-DD` date, ignoring any trailing time part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = s.split_once('T').map_or(s, |(d, _)| d);
        time::Date::parse(date.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(ParseError::Parse)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Inclusive range of [`Date`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    /// First day of this [`DateRange`].
    start: Date,

    /// Last day of this [`DateRange`].
    end: Date,
}

impl DateRange {
    /// Creates a new [`DateRange`] if `start` is not after `end`.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Returns the first day of this [`DateRange`].
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of this [`DateRange`].
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Indicates whether the provided [`Date`] lies in this [`DateRange`].
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Indicates whether this [`DateRange`] shares at least one day with the
    /// `other` one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, DateRange, DateTime};

    #[test]
    fn parses_dates_with_time_suffix() {
        let d: Date = "2024-03-01T00:00:00".parse().unwrap();
        assert_eq!(d, Date::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(d.to_string(), "2024-03-01");
        assert!("2024-13-01".parse::<Date>().is_err());
    }

    #[test]
    fn date_range_requires_ordered_bounds() {
        let a = Date::from_ymd(2024, 1, 1).unwrap();
        let b = Date::from_ymd(2024, 12, 31).unwrap();

        let range = DateRange::new(a, b).unwrap();
        assert!(range.contains(Date::from_ymd(2024, 6, 15).unwrap()));
        assert!(!range.contains(Date::from_ymd(2025, 1, 1).unwrap()));
        assert!(DateRange::new(b, a).is_none());
        assert!(DateRange::new(a, a).is_some());
    }

    #[test]
    fn overlapping_ranges() {
        let d = |day| Date::from_ymd(2024, 5, day).unwrap();
        let may = DateRange::new(d(1), d(31)).unwrap();

        assert!(may.overlaps(&DateRange::new(d(31), d(31)).unwrap()));
        assert!(may.overlaps(&DateRange::new(d(10), d(12)).unwrap()));
        assert!(!DateRange::new(d(1), d(9))
            .unwrap()
            .overlaps(&DateRange::new(d(10), d(12)).unwrap()));
    }

    #[test]
    fn parses_offsetless_timestamps_as_utc() {
        let dt = DateTime::from_rfc3339("2024-05-01T10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:00:00Z");

        let dt = DateTime::from_rfc3339("2024-05-01T10:00:00.25+02:00").unwrap();
        assert_eq!(dt.unix_timestamp(), 1_714_550_400);
    }

    #[test]
    fn round_trips_rfc2822() {
        let dt = DateTime::from_unix_timestamp(1_714_557_600).unwrap();
        let s = dt.to_rfc2822();
        assert_eq!(DateTime::from_rfc2822(&s).unwrap(), dt);
    }
}

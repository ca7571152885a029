use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// Returns the calendar month before `month` of `year` as `(month, year)`.
///
/// `month` is expected to be in `1..=12`. January rolls back to December of the previous year;
/// every other month keeps its year.
pub fn prev_month_year(month: u32, year: i32) -> (u32, i32) {
    let prev_month = (month as i64 - 2).rem_euclid(12) as u32 + 1;
    let prev_year = if month == 1 { year.saturating_sub(1) } else { year };
    (prev_month, prev_year)
}

/// The month was outside `1..=12`, or a `YYYY-MM` string could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PeriodError(String);

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for PeriodError {}

/// A calendar month of a specific year, e.g. January 2024.
/// Serializes to a string like "2024-01".
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError(format!(
                "A month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month that contains `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one.
    pub fn prev_month(&self) -> Self {
        let (month, year) = prev_month_year(self.month, self.year);
        Self { year, month }
    }

    /// The same month one year earlier.
    pub fn prev_year(&self) -> Self {
        Self {
            year: self.year.saturating_sub(1),
            month: self.month,
        }
    }

    /// The English name of the month, e.g. "January".
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| chrono::Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Expected format: "2024-01"
        let s = s.trim();
        let (year, month) = s
            .rsplit_once('-')
            .ok_or_else(|| PeriodError(format!("Expected a YYYY-MM period, got: {s}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| PeriodError(format!("Invalid year in '{s}': {e}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| PeriodError(format!("Invalid month in '{s}': {e}")))?;
        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_month_year_every_month() {
        for year in 1990..2060 {
            for month in 1..=12u32 {
                let (prev_m, prev_y) = prev_month_year(month, year);
                if month == 1 {
                    assert_eq!((prev_m, prev_y), (12, year - 1), "{month}/{year}");
                } else {
                    assert_eq!((prev_m, prev_y), (month - 1, year), "{month}/{year}");
                }
                assert!((1..=12).contains(&prev_m));
            }
        }
    }

    #[test]
    fn test_prev_at_the_smallest_year() {
        assert_eq!(prev_month_year(1, i32::MIN), (12, i32::MIN));
        let ym = YearMonth::new(i32::MIN, 5).unwrap();
        assert_eq!(ym.prev_year().year(), i32::MIN);
    }

    #[test]
    fn test_prev_month_december() {
        assert_eq!(prev_month_year(12, 2024), (11, 2024));
    }

    #[test]
    fn test_year_month_new_rejects_bad_months() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 12).is_ok());
    }

    #[test]
    fn test_year_month_prev() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.prev_month(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(jan.prev_year(), YearMonth::new(2023, 1).unwrap());

        let mar = YearMonth::new(2024, 3).unwrap();
        assert_eq!(mar.prev_month(), YearMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_year_month_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(YearMonth::of(date), YearMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_year_month_display_and_parse() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), ym);
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("2024-13".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_serde() {
        let ym = YearMonth::new(2023, 12).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, r#""2023-12""#);
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(YearMonth::new(2024, 1).unwrap().month_name(), "January");
        assert_eq!(YearMonth::new(2024, 12).unwrap().month_name(), "December");
    }
}

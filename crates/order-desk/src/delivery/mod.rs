//! Delivery days: Monday, Wednesday and Friday, except Japanese public holidays and any extra
//! closure days the shop configures.

pub mod holidays;

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use thiserror::Error;

const DELIVERY_WEEKDAYS: [Weekday; 3] = [Weekday::Mon, Weekday::Wed, Weekday::Fri];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error("Not a date: {0}")]
    Malformed(String),

    #[error("No delivery on {0}")]
    Unavailable(NaiveDate),
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryCalendar {
    closures: HashSet<NaiveDate>,
}

impl DeliveryCalendar {
    /// Public holidays are always excluded; `closures` adds shop-specific days off.
    pub fn new(closures: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            closures: closures.into_iter().collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.closures.contains(&date) || holidays::public_holiday(date).is_some()
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        DELIVERY_WEEKDAYS.contains(&date.weekday()) && !self.is_holiday(date)
    }

    /// First delivery day on or after `from`. `None` only past the end of the calendar.
    pub fn next_available(&self, from: NaiveDate) -> Option<NaiveDate> {
        from.iter_days().find(|date| self.is_available(*date))
    }

    /// The next `count` delivery days on or after `from`, for a date picker.
    pub fn upcoming(&self, from: NaiveDate, count: usize) -> Vec<NaiveDate> {
        from.iter_days()
            .filter(|date| self.is_available(*date))
            .take(count)
            .collect()
    }

    /// Parses an ISO date typed into the order form and checks that it is a delivery day.
    pub fn choose(&self, text: &str) -> Result<NaiveDate, DeliveryError> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| DeliveryError::Malformed(text.to_string()))?;
        if self.is_available(date) {
            Ok(date)
        } else {
            Err(DeliveryError::Unavailable(date))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_only_mon_wed_fri() {
        let calendar = DeliveryCalendar::default();
        // 2026-10-19 is a Monday
        let week: Vec<bool> = date(2026, 10, 19)
            .iter_days()
            .take(7)
            .map(|d| calendar.is_available(d))
            .collect();
        assert_eq!(week, vec![true, false, true, false, true, false, false]);
    }

    #[test]
    fn test_public_holidays_are_skipped() {
        let calendar = DeliveryCalendar::default();
        // Sports Day is the second Monday of October
        assert!(!calendar.is_available(date(2026, 10, 12)));
        // Golden Week: Monday 4th and the substitute holiday on Wednesday 6th
        assert_eq!(
            calendar.next_available(date(2026, 5, 2)),
            Some(date(2026, 5, 8))
        );
    }

    #[test]
    fn test_closures_are_skipped() {
        // Labour Thanksgiving Day is public anyway; the 25th is a shop closure
        let calendar = DeliveryCalendar::new([date(2026, 11, 25)]);
        assert!(!calendar.is_available(date(2026, 11, 23)));
        assert!(calendar.is_holiday(date(2026, 11, 25)));
        assert_eq!(
            calendar.next_available(date(2026, 11, 21)),
            Some(date(2026, 11, 27))
        );
        assert_eq!(
            calendar.next_available(date(2026, 11, 27)),
            Some(date(2026, 11, 27))
        );
        assert_eq!(
            calendar.upcoming(date(2026, 11, 20), 3),
            vec![date(2026, 11, 20), date(2026, 11, 27), date(2026, 11, 30)]
        );
    }

    #[test]
    fn test_choose_validates_text() {
        let calendar = DeliveryCalendar::default();
        assert_eq!(calendar.choose(" 2026-11-25 "), Ok(date(2026, 11, 25)));
        assert_eq!(
            calendar.choose("2026-11-23"),
            Err(DeliveryError::Unavailable(date(2026, 11, 23)))
        );
        assert!(matches!(
            calendar.choose("来週の月曜"),
            Err(DeliveryError::Malformed(_))
        ));
    }
}

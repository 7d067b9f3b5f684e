//! Week bucketing and cache keys
//!
//! Menus are published one week at a time, so they are cached per Monday-based
//! week of the year. The bucket string is `<year>w<week>`, e.g. `2026w41`.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::data::RestaurantId;

/// Identifies one Monday-to-Sunday week, e.g. `2026w41`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeekBucket(String);

impl WeekBucket {
    /// Derives the bucket for a date
    ///
    /// Days of January before the year's first Monday fall in week `00`; those are
    /// re-bucketed into the week of December 31 of the previous year, which is the
    /// same calendar week.
    pub fn from_date(date: NaiveDate) -> Self {
        let bucket = date.format("%Yw%W").to_string();
        if !bucket.ends_with("w00") {
            return Self(bucket);
        }

        match NaiveDate::from_ymd_opt(date.year() - 1, 12, 31) {
            Some(last_day) => Self(last_day.format("%Yw%W").to_string()),
            None => Self(bucket),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeekBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Addresses one restaurant's menu for one week, e.g. `2026w41r13`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(bucket: &WeekBucket, restaurant: RestaurantId) -> Self {
        Self(format!("{}r{:02}", bucket, restaurant))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the cache key for a restaurant's menu on a given date
pub fn cache_key(date: NaiveDate, restaurant: RestaurantId) -> CacheKey {
    CacheKey::new(&WeekBucket::from_date(date), restaurant)
}

/// Whether `date` falls in the same week bucket as `today`
pub fn is_current_week(date: NaiveDate, today: NaiveDate) -> bool {
    WeekBucket::from_date(date) == WeekBucket::from_date(today)
}

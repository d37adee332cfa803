//! Episode air-date filtering

use crate::error::{Error, Result};
use crate::types::Record;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write as _;
use tracing::warn;

/// Air dates look like `December 2, 2013`
const AIR_DATE_FORMAT: &str = "%B %d, %Y";

/// Inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    /// Create a range; `from` must not be after `to`
    pub fn new(from: i32, to: i32) -> Result<Self> {
        if from > to {
            return Err(Error::invalid_value(
                "from_year",
                format!("{from} is after to_year {to}"),
            ));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.from..=self.to).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            from: 2017,
            to: 2021,
        }
    }
}

/// Parse an `air_date` value
pub fn parse_air_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), AIR_DATE_FORMAT).ok()
}

/// Names of the episodes aired within `range`, in input order.
///
/// Records without a parseable `air_date` or without a `name` are skipped.
pub fn episodes_aired_between(episodes: &[Record], range: YearRange) -> Vec<String> {
    episodes
        .iter()
        .filter_map(|episode| {
            let name = episode.get("name").and_then(|v| v.as_str())?;
            let Some(air_date) = episode
                .get("air_date")
                .and_then(|v| v.as_str())
                .and_then(parse_air_date)
            else {
                warn!("Skipping episode '{name}': no usable air_date");
                return None;
            };
            range.contains(air_date.year()).then(|| name.to_string())
        })
        .collect()
}

/// Human-readable listing, one episode per line
pub fn render_episode_listing(range: YearRange, names: &[String]) -> String {
    let mut out = format!(
        "Episodes aired between {} and {}:\n",
        range.from(),
        range.to()
    );
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}

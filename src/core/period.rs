//! Calendar periods and the inclusive date ranges they cover.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{FleetError, FleetResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// Anchor string selecting the period that contains `today`.
    pub fn default_anchor(self, today: NaiveDate) -> String {
        match self {
            Period::Day => today.format("%Y-%m-%d").to_string(),
            Period::Week => {
                let week = today.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Period::Month => today.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        })
    }
}

impl FromStr for Period {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "date" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            other => Err(FleetError::invalid(format!("unknown period `{other}`"))),
        }
    }
}

/// Inclusive `[start, end]` window with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl DateRange {
    /// Covers `first` through `last` as whole days.
    pub fn full_days(first: NaiveDate, last: NaiveDate) -> FleetResult<Self> {
        if last < first {
            return Err(FleetError::invalid(format!(
                "range end {last} is before start {first}"
            )));
        }
        Ok(Self::spanning(first, last))
    }

    /// Like [`DateRange::full_days`] without the ordering check; a reversed
    /// pair yields a range that contains nothing.
    pub fn spanning(first: NaiveDate, last: NaiveDate) -> Self {
        let label = if first == last {
            first.format("%d %b %Y").to_string()
        } else {
            format!("{} - {}", first.format("%d %b %Y"), last.format("%d %b %Y"))
        };
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
            label,
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Resolves the range for `period` selected by `anchor`.
///
/// Day anchors are `YYYY-MM-DD`. Week anchors are ISO weeks (`YYYY-Www`) or any
/// date inside the week; weeks run Monday to Sunday. Month anchors are
/// `YYYY-MM` or any date inside the month.
pub fn date_range_for(period: Period, anchor: &str) -> FleetResult<DateRange> {
    let anchor = anchor.trim();
    match period {
        Period::Day => {
            let day = parse_day(anchor)?;
            Ok(DateRange {
                start: start_of_day(day),
                end: end_of_day(day),
                label: day.format("%B %-d, %Y").to_string(),
            })
        }
        Period::Week => {
            let monday = parse_week_start(anchor)?;
            let sunday = monday + Duration::days(6);
            Ok(DateRange {
                start: start_of_day(monday),
                end: end_of_day(sunday),
                label: format!("{} - {}", monday.format("%b %-d"), sunday.format("%b %-d, %Y")),
            })
        }
        Period::Month => {
            let first = parse_month_start(anchor)?;
            let last = last_day_of_month(first);
            Ok(DateRange {
                start: start_of_day(first),
                end: end_of_day(last),
                label: first.format("%B %Y").to_string(),
            })
        }
    }
}

fn parse_day(anchor: &str) -> FleetResult<NaiveDate> {
    NaiveDate::parse_from_str(anchor, "%Y-%m-%d")
        .map_err(|_| FleetError::invalid(format!("expected YYYY-MM-DD, got `{anchor}`")))
}

fn parse_week_start(anchor: &str) -> FleetResult<NaiveDate> {
    if let Some((year, week)) = anchor.split_once("-W") {
        let year: i32 = year
            .parse()
            .map_err(|_| FleetError::invalid(format!("bad week year in `{anchor}`")))?;
        let week: u32 = week
            .parse()
            .map_err(|_| FleetError::invalid(format!("bad week number in `{anchor}`")))?;
        return NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| FleetError::invalid(format!("week `{anchor}` does not exist")));
    }
    let day = parse_day(anchor)?;
    Ok(day - Duration::days(day.weekday().num_days_from_monday() as i64))
}

fn parse_month_start(anchor: &str) -> FleetResult<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(anchor, "%Y-%m-%d") {
        return day
            .with_day(1)
            .ok_or_else(|| FleetError::invalid(format!("bad month anchor `{anchor}`")));
    }
    NaiveDate::parse_from_str(&format!("{anchor}-01"), "%Y-%m-%d")
        .map_err(|_| FleetError::invalid(format!("expected YYYY-MM, got `{anchor}`")))
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|next| next - Duration::days(1))
        .unwrap_or(first)
}

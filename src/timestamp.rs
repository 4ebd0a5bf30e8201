//! Per-value timestamp parsing for sensor exports.
//!
//! Numeric dates such as `03/04/2020` are ambiguous, so the caller picks a
//! [`DateOrder`]. Year-first dates and RFC 3339 strings parse under any order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Interpretation of ambiguous numeric dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    MonthFirst,
    DayFirst,
}

impl DateOrder {
    pub fn from_dayfirst(dayfirst: bool) -> Self {
        if dayfirst {
            DateOrder::DayFirst
        } else {
            DateOrder::MonthFirst
        }
    }

    fn opposite(self) -> Self {
        match self {
            DateOrder::MonthFirst => DateOrder::DayFirst,
            DateOrder::DayFirst => DateOrder::MonthFirst,
        }
    }
}

/// Result of parsing a whole timestamp column.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTimestamps {
    pub values: Vec<Option<NaiveDateTime>>,
    /// True when the preferred order parsed nothing and inference was used.
    pub inferred: bool,
}

impl ParsedTimestamps {
    pub fn invalid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

// `%#z` also takes hour-only offsets such as `+00`.
static OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
];

static TIME_FORMATS: &[&str] = &[
    "%H:%M:%S",
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

static MONTH_NAME_DATETIME_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
];

static MONTH_NAME_DATE_FORMATS: &[&str] = &["%d %b %Y", "%b %d %Y", "%d-%b-%Y"];

/// Parses every cell of a timestamp column.
///
/// Cells are parsed with `order` first. When not a single non-empty cell
/// parses that way, the column is parsed again with [`parse_inferred`].
pub fn parse_column(cells: &[&str], order: DateOrder) -> ParsedTimestamps {
    let values: Vec<_> = cells.iter().map(|c| parse_preferred(c, order)).collect();

    let any_present = cells.iter().any(|c| !c.trim().is_empty());
    if values.iter().all(Option::is_none) && any_present {
        return ParsedTimestamps {
            values: cells.iter().map(|c| parse_inferred(c, order)).collect(),
            inferred: true,
        };
    }

    ParsedTimestamps {
        values,
        inferred: false,
    }
}

/// Parses a single value, reading numeric dates strictly in `order`.
pub fn parse_preferred(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    parse_with(value, &[order], false)
}

/// Parses a single value with format inference: `order`, then the opposite
/// order, then dates with month names.
pub fn parse_inferred(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    parse_with(value, &[order, order.opposite()], true)
}

fn parse_with(value: &str, orders: &[DateOrder], month_names: bool) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.naive_local());
        }
    }

    let (date_part, time_part) = split_date_time(trimmed);
    if let Some(time) = parse_time(time_part) {
        for order in orders {
            if let Some(date) = parse_numeric_date(date_part, *order) {
                return Some(date.and_time(time));
            }
        }
    }

    if month_names {
        for fmt in MONTH_NAME_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt);
            }
        }
        for fmt in MONTH_NAME_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
    }

    None
}

/// Splits at the first whitespace, or at an ISO `T` separator.
fn split_date_time(value: &str) -> (&str, Option<&str>) {
    if let Some((date, time)) = value.split_once(char::is_whitespace) {
        return (date, Some(time.trim()));
    }
    if value.len() > 10 && value.as_bytes()[10] == b'T' {
        return (&value[..10], Some(&value[11..]));
    }
    (value, None)
}

fn parse_time(value: Option<&str>) -> Option<NaiveTime> {
    let Some(value) = value else {
        return Some(NaiveTime::MIN);
    };
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Parses `Y-M-D` (always) or a two-field-then-year date in `order`,
/// separated by `/`, `-` or `.`.
fn parse_numeric_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let sep = value.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let parts: Vec<&str> = value.split(sep).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }

    if a.len() == 4 {
        return NaiveDate::from_ymd_opt(a.parse().ok()?, b.parse().ok()?, c.parse().ok()?);
    }
    if a.len() > 2 || b.len() > 2 {
        return None;
    }

    let year: i32 = match c.len() {
        4 => c.parse().ok()?,
        // POSIX %y pivot: 69-99 are 19xx, 00-68 are 20xx
        2 => {
            let yy: i32 = c.parse().ok()?;
            if yy >= 69 { 1900 + yy } else { 2000 + yy }
        }
        _ => return None,
    };
    let (day, month) = match order {
        DateOrder::DayFirst => (a, b),
        DateOrder::MonthFirst => (b, a),
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

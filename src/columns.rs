//! Column-name normalization and discovery rules.
//!
//! Input files come from many different logger exports, so nothing about the
//! header is fixed. Discovery runs against normalized names only, through
//! explicit ordered rule tables.

use crate::model::Metric;

/// A discovered column: its position in the table and its normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
}

/// A discovered metric column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricColumn {
    pub metric: Metric,
    pub column: ColumnRef,
}

/// Normalizes a raw sensor-export header: trimmed, whitespace to `_`, lower-case.
pub fn normalize_raw(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Normalizes a daily-aggregate header: trimmed and lower-case.
pub fn normalize_daily(name: &str) -> String {
    name.trim().to_lowercase()
}

type NameRule = fn(&str) -> bool;

fn contains_datetime(c: &str) -> bool {
    c.contains("datetime")
}

fn date_and_time(c: &str) -> bool {
    (c.contains("date") && c.contains("time")) || c == "timestamp" || c == "time"
}

fn contains_date(c: &str) -> bool {
    c.contains("date")
}

/// Timestamp rules in priority order; the first rule with any match wins,
/// and within a rule the left-most column wins.
static TIMESTAMP_RULES: &[NameRule] = &[contains_datetime, date_and_time, contains_date];

/// Accepted normalized aliases per heat-stress index, in preference order.
static METRIC_ALIASES: &[(Metric, &[&str])] = &[
    (
        Metric::WbgtOut,
        &["wbgtout", "wbgt_out", "wbgt-out", "wbgt_outdoor"],
    ),
    (Metric::WbgtIn, &["wbgtin", "wbgt_in", "wbgt-in", "wbgt_indoor"]),
    (
        Metric::Thi,
        &["thi", "temperature_humidity_index", "temp_humidity_index"],
    ),
    (Metric::Temperature, &["temperature"]),
    (Metric::Humidity, &["humidity"]),
];

fn position(columns: &[String], name: &str) -> Option<ColumnRef> {
    columns.iter().position(|c| c == name).map(|index| ColumnRef {
        index,
        name: name.to_string(),
    })
}

/// Finds the timestamp column of a raw table.
pub fn find_timestamp_column(columns: &[String]) -> Option<ColumnRef> {
    TIMESTAMP_RULES.iter().find_map(|rule| {
        columns
            .iter()
            .position(|c| rule(c.as_str()))
            .map(|index| ColumnRef {
                index,
                name: columns[index].clone(),
            })
    })
}

/// Finds every metric column present, in alias-table order.
pub fn find_metric_columns(columns: &[String]) -> Vec<MetricColumn> {
    METRIC_ALIASES
        .iter()
        .filter_map(|(metric, aliases)| {
            aliases
                .iter()
                .find_map(|alias| position(columns, alias))
                .map(|column| MetricColumn {
                    metric: *metric,
                    column,
                })
        })
        .collect()
}

/// Finds the first column containing `date` in a daily table.
pub fn find_date_column(columns: &[String]) -> Option<ColumnRef> {
    columns
        .iter()
        .position(|c| c.contains("date"))
        .map(|index| ColumnRef {
            index,
            name: columns[index].clone(),
        })
}

/// Finds the daily-mean column of `metric`, falling back to a bare
/// column named after the metric key.
pub fn find_mean_column(columns: &[String], metric: Metric) -> Option<ColumnRef> {
    let key = metric.key();
    columns
        .iter()
        .position(|c| c.starts_with(key) && c.contains("mean"))
        .map(|index| ColumnRef {
            index,
            name: columns[index].clone(),
        })
        .or_else(|| position(columns, key))
}

/// Finds an exact column name.
pub fn find_exact(columns: &[String], name: &str) -> Option<ColumnRef> {
    position(columns, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_raw() {
        assert_eq!(normalize_raw("  WBGT Out "), "wbgt_out");
        assert_eq!(normalize_raw("Date Time"), "date_time");
        assert_eq!(normalize_raw("THI"), "thi");
    }

    #[test]
    fn test_normalize_daily_keeps_inner_spaces() {
        assert_eq!(normalize_daily(" WBGTout_Mean "), "wbgtout_mean");
        assert_eq!(normalize_daily("a b"), "a b");
    }

    #[test]
    fn test_datetime_rule_beats_earlier_date_time_column() {
        let columns = cols(&["date_time", "local_datetime"]);
        let found = find_timestamp_column(&columns).unwrap();
        assert_eq!(found.name, "local_datetime");
        assert_eq!(found.index, 1);
    }

    #[test]
    fn test_date_and_time_in_either_order() {
        let columns = cols(&["station", "time_of_date"]);
        assert_eq!(find_timestamp_column(&columns).unwrap().name, "time_of_date");
    }

    #[test]
    fn test_exact_timestamp_and_time() {
        assert_eq!(
            find_timestamp_column(&cols(&["x", "timestamp"])).unwrap().name,
            "timestamp"
        );
        assert_eq!(
            find_timestamp_column(&cols(&["time", "wbgtout"])).unwrap().name,
            "time"
        );
        // "timer" is neither exact nor a date+time combination
        assert!(find_timestamp_column(&cols(&["timer"])).is_none());
    }

    #[test]
    fn test_date_fallback_matches_unrelated_date_column() {
        let columns = cols(&["update_date", "wbgtout"]);
        assert_eq!(find_timestamp_column(&columns).unwrap().name, "update_date");
    }

    #[test]
    fn test_no_timestamp_column() {
        assert!(find_timestamp_column(&cols(&["station", "wbgtout"])).is_none());
    }

    #[test]
    fn test_metric_alias_preference() {
        let columns = cols(&["wbgt_out", "wbgtout", "temp_humidity_index", "humidity"]);
        let found = find_metric_columns(&columns);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].metric, Metric::WbgtOut);
        assert_eq!(found[0].column.name, "wbgtout");
        assert_eq!(found[1].metric, Metric::Thi);
        assert_eq!(found[1].column.name, "temp_humidity_index");
        assert_eq!(found[2].metric, Metric::Humidity);
    }

    #[test]
    fn test_metric_columns_need_exact_alias() {
        let found = find_metric_columns(&cols(&["air_temperature", "wbgt_outdoor_c"]));
        assert!(found.is_empty());
    }

    #[test]
    fn test_mean_column_prefix_and_fallback() {
        let columns = cols(&["date", "wbgtout_min", "wbgtout_mean", "thi"]);
        assert_eq!(
            find_mean_column(&columns, Metric::WbgtOut).unwrap().name,
            "wbgtout_mean"
        );
        assert_eq!(find_mean_column(&columns, Metric::Thi).unwrap().name, "thi");
        assert!(find_mean_column(&columns, Metric::WbgtIn).is_none());
    }

    #[test]
    fn test_mean_column_requires_key_prefix() {
        let columns = cols(&["wbgt_out_mean"]);
        assert!(find_mean_column(&columns, Metric::WbgtOut).is_none());
    }

    #[test]
    fn test_date_column() {
        assert_eq!(
            find_date_column(&cols(&["wbgtout_mean", "date"])).unwrap().index,
            1
        );
        assert!(find_date_column(&cols(&["day"])).is_none());
    }
}

use chrono::{DateTime, Utc};

fn utc(timestamp: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp as i64).unwrap_or_default()
}

/// Format timestamp according to zoom level using UTC components.
///
/// - `zoom >= 2.0` -> `HH:MM`
/// - `1.0 <= zoom < 2.0` -> `DD.MM`
/// - `zoom < 1.0` -> `MM.YYYY`
pub fn format_time_label(timestamp: u64, zoom: f64) -> String {
    let date = utc(timestamp);
    if zoom >= 2.0 {
        date.format("%H:%M").to_string()
    } else if zoom >= 1.0 {
        date.format("%d.%m").to_string()
    } else {
        date.format("%m.%Y").to_string()
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC, as shown in trade tables.
pub fn format_trade_date(timestamp: u64) -> String {
    utc(timestamp).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// ISO-8601 instant truncated to whole seconds, without offset:
/// `YYYY-MM-DDTHH:MM:SS`.
pub fn iso_seconds(timestamp: u64) -> String {
    utc(timestamp).format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_seconds_drops_fraction() {
        assert_eq!(iso_seconds(1_700_000_000_999), "2023-11-14T22:13:20");
        assert_eq!(iso_seconds(0), "1970-01-01T00:00:00");
    }

    #[test]
    fn trade_date_is_utc() {
        assert_eq!(format_trade_date(86_400_000), "1970-01-02 00:00:00");
    }
}

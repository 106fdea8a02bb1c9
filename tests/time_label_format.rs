use trade_dashboard_wasm::time_utils::{format_time_label, format_trade_date, iso_seconds};

// 2024-03-09 07:05:04.250 UTC
const TS: u64 = 1_709_967_904_250;

#[test]
fn format_time_label_utc() {
    assert_eq!(format_time_label(0, 2.0), "00:00");
    assert_eq!(format_time_label(0, 1.0), "01.01");
    assert_eq!(format_time_label(0, 0.5), "01.1970");

    assert_eq!(format_time_label(TS, 3.0), "07:05");
    assert_eq!(format_time_label(TS, 1.5), "09.03");
    assert_eq!(format_time_label(TS, 0.1), "03.2024");
}

#[test]
fn trade_dates_are_utc_seconds() {
    assert_eq!(format_trade_date(TS), "2024-03-09 07:05:04");
}

#[test]
fn iso_seconds_keeps_colons_for_the_filename_layer() {
    assert_eq!(iso_seconds(TS), "2024-03-09T07:05:04");
}

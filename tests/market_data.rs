use trade_dashboard_wasm::domain::market_data::{
    Candle, CandleSeries, OHLCV, Price, Symbol, TimeInterval, Timestamp, Volume, default_symbols,
};

fn candle(ts: u64, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(
        Timestamp::from_millis(ts),
        OHLCV::new(
            Price::from(open),
            Price::from(high),
            Price::from(low),
            Price::from(close),
            Volume::from(1.0),
        ),
    )
}

#[test]
fn candle_methods() {
    let c = candle(0, 10.0, 12.0, 9.0, 11.0);
    assert!(c.is_bullish());
    assert!(!candle(0, 11.0, 12.0, 9.0, 10.0).is_bullish());
    assert!((c.change_percent() - 10.0).abs() < 1e-9);
    assert!(c.ohlcv.is_valid());
}

#[test]
fn candle_series_add_and_price_range() {
    let mut series = CandleSeries::new(3);
    series.add_candle(candle(0, 10.0, 12.0, 9.0, 11.0));
    series.add_candle(candle(1, 11.0, 13.0, 10.0, 12.0));
    series.add_candle(candle(2, 12.0, 14.0, 11.0, 13.0));
    assert_eq!(series.count(), 3);
    let (min, max) = series.price_range().unwrap();
    assert_eq!(min.value(), 9.0);
    assert_eq!(max.value(), 14.0);

    // the 4th candle evicts the oldest
    series.add_candle(candle(3, 13.0, 15.0, 12.0, 14.0));
    assert_eq!(series.count(), 3);
    assert_eq!(series.get_candles().front().unwrap().timestamp.value(), 1);
    assert_eq!(series.latest().unwrap().ohlcv.close.value(), 14.0);
}

#[test]
fn out_of_order_candles_are_sorted_and_deduplicated() {
    let mut series = CandleSeries::new(10);
    series.add_candle(candle(2, 1.0, 1.0, 1.0, 1.0));
    series.add_candle(candle(0, 1.0, 1.0, 1.0, 1.0));
    series.add_candle(candle(1, 1.0, 1.0, 1.0, 1.0));
    series.add_candle(candle(1, 2.0, 2.0, 2.0, 2.0));

    let stamps: Vec<u64> = series.get_candles().iter().map(|c| c.timestamp.value()).collect();
    assert_eq!(stamps, [0, 1, 2]);
    assert_eq!(series.get_candles()[1].ohlcv.close.value(), 2.0);
}

#[test]
fn symbols_are_validated_and_upper_cased() {
    assert_eq!(Symbol::new(" aapl ").unwrap().value(), "AAPL");
    assert!(Symbol::new("").is_err());
    assert!(Symbol::new("AA PL").is_err());
}

#[test]
fn default_watch_list_holds_valid_symbols() {
    let symbols = default_symbols();
    assert_eq!(symbols.first().map(Symbol::value), Some("AAPL"));
    assert!(symbols.iter().all(|s| Symbol::new(s.value()).as_ref() == Ok(s)));
}

#[test]
fn collected_series_keeps_every_candle_in_order() {
    let series: CandleSeries = [
        candle(2, 3.0, 3.0, 3.0, 3.0),
        candle(0, 1.0, 1.0, 1.0, 1.0),
        candle(1, 2.0, 2.0, 2.0, 2.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(series.count(), 3);
    let stamps: Vec<u64> = series.get_candles().iter().map(|c| c.timestamp.value()).collect();
    assert_eq!(stamps, [0, 1, 2]);
    assert_eq!(series.latest().unwrap().ohlcv.close.value(), 3.0);
}

#[test]
fn intervals_parse_from_short_names() {
    assert_eq!("1h".parse::<TimeInterval>().unwrap(), TimeInterval::OneHour);
    assert_eq!(TimeInterval::FiveMinutes.duration_ms(), 300_000);
    assert_eq!(TimeInterval::OneDay.to_string(), "1d");
}

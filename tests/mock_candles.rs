use trade_dashboard_wasm::domain::market_data::{MockCandleGenerator, TimeInterval};

const START: u64 = 1_700_000_000_000;

#[test]
fn same_seed_same_series() {
    let a = MockCandleGenerator::new(42, 100.0, TimeInterval::OneMinute).generate(50, START);
    let b = MockCandleGenerator::new(42, 100.0, TimeInterval::OneMinute).generate(50, START);
    assert_eq!(a, b);

    let c = MockCandleGenerator::new(43, 100.0, TimeInterval::OneMinute).generate(50, START);
    assert_ne!(a, c);
}

#[test]
fn candles_are_valid_and_evenly_spaced() {
    let interval = TimeInterval::FifteenMinutes;
    let candles = MockCandleGenerator::new(7, 187.0, interval).generate(200, START);

    assert_eq!(candles.len(), 200);
    assert_eq!(candles[0].timestamp.value(), START);
    assert!(candles.iter().all(|c| c.ohlcv.is_valid()));
    assert!(
        candles
            .windows(2)
            .all(|w| w[1].timestamp.value() - w[0].timestamp.value() == interval.duration_ms())
    );
}

#[test]
fn each_candle_opens_at_the_previous_close() {
    let candles = MockCandleGenerator::new(1, 50.0, TimeInterval::OneHour).generate(30, START);
    assert_eq!(candles[0].ohlcv.open.value(), 50.0);
    for pair in candles.windows(2) {
        assert_eq!(pair[1].ohlcv.open, pair[0].ohlcv.close);
    }
}

#[test]
fn generator_continues_where_it_left_off() {
    let mut generator = MockCandleGenerator::new(9, 10.0, TimeInterval::OneDay);
    let first = generator.generate(5, START);
    let second = generator.generate(5, START + 5 * TimeInterval::OneDay.duration_ms());
    assert_eq!(second[0].ohlcv.open, first[4].ohlcv.close);
}

#[test]
fn prices_stay_positive() {
    let candles = MockCandleGenerator::new(3, 0.02, TimeInterval::OneMinute).generate(500, START);
    assert!(candles.iter().all(|c| c.ohlcv.low.value() > 0.0));
}

#[test]
fn timestamps_saturate_at_the_end_of_time() {
    let candles = MockCandleGenerator::new(5, 100.0, TimeInterval::OneHour).generate(3, u64::MAX);
    assert_eq!(candles.len(), 3);
    assert!(candles.iter().all(|c| c.timestamp.value() == u64::MAX));
    assert!(candles.iter().all(|c| c.ohlcv.is_valid()));

    let near_end = u64::MAX - TimeInterval::OneHour.duration_ms();
    let candles = MockCandleGenerator::new(5, 100.0, TimeInterval::OneHour).generate(3, near_end);
    assert_eq!(candles[1].timestamp.value(), u64::MAX);
    assert_eq!(candles[2].timestamp.value(), u64::MAX);
}

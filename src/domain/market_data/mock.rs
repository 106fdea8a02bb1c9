//! Deterministic OHLC random walk for charts and demos.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::entities::Candle;
use super::value_objects::{OHLCV, Price, TimeInterval, Timestamp, Volume};
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Largest relative close-to-close move per candle.
const MAX_STEP: f64 = 0.02;
/// Prices never fall below this floor.
const PRICE_FLOOR: f64 = 0.01;

pub struct MockCandleGenerator {
    rng: StdRng,
    last_close: f64,
    interval: TimeInterval,
}

impl MockCandleGenerator {
    pub fn new(seed: u64, start_price: f64, interval: TimeInterval) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_close: start_price.max(PRICE_FLOOR),
            interval,
        }
    }

    /// `count` consecutive candles, the first opening at `start_ms`.
    /// Each candle opens at the previous close. Timestamps saturate at
    /// `u64::MAX` instead of wrapping.
    pub fn generate(&mut self, count: usize, start_ms: u64) -> Vec<Candle> {
        let step = self.interval.duration_ms();
        let span = (count as u64).saturating_sub(1).saturating_mul(step);
        if start_ms.checked_add(span).is_none() {
            log_warn!(
                LogComponent::Domain("MockCandles"),
                "⚠️ timeline from {} ms overflows; timestamps clamped",
                start_ms
            );
        }
        (0..count as u64)
            .map(|i| self.next_candle(start_ms.saturating_add(i.saturating_mul(step))))
            .collect()
    }

    fn next_candle(&mut self, timestamp: u64) -> Candle {
        let open = self.last_close;
        let drift = self.rng.gen_range(-MAX_STEP..=MAX_STEP);
        let close = (open * (1.0 + drift)).max(PRICE_FLOOR);

        let body_high = open.max(close);
        let body_low = open.min(close);
        let high = body_high * (1.0 + self.rng.gen_range(0.0..=MAX_STEP / 2.0));
        let wick = self.rng.gen_range(0.0..=MAX_STEP / 2.0);
        let low = (body_low * (1.0 - wick)).max(PRICE_FLOOR.min(body_low));
        let volume = self.rng.gen_range(100.0..10_000.0);

        self.last_close = close;
        Candle::new(
            Timestamp::from_millis(timestamp),
            OHLCV::new(
                Price::from(open),
                Price::from(high),
                Price::from(low),
                Price::from(close),
                Volume::from(volume),
            ),
        )
    }
}

pub use super::value_objects::{OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One interval of trading, stamped with its open time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
}

impl Candle {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlcv.close > self.ohlcv.open
    }

    /// Percentage move from open to close.
    pub fn change_percent(&self) -> f64 {
        let open = self.ohlcv.open.value();
        if open == 0.0 {
            return 0.0;
        }
        (self.ohlcv.close.value() - open) / open * 100.0
    }
}

/// Time-ordered candle window holding at most `max_size` entries. A candle
/// with an existing timestamp replaces the stored one; the oldest falls off
/// when the window is full.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: VecDeque<Candle>,
    max_size: usize,
}

impl CandleSeries {
    pub fn new(max_size: usize) -> Self {
        Self { candles: VecDeque::new(), max_size }
    }

    pub fn add_candle(&mut self, candle: Candle) {
        if let Some(last_candle) = self.candles.back_mut() {
            if last_candle.timestamp == candle.timestamp {
                *last_candle = candle;
                return;
            }
            if candle.timestamp < last_candle.timestamp {
                self.insert_candle_sorted(candle);
                return;
            }
        }

        self.candles.push_back(candle);
        if self.candles.len() > self.max_size {
            self.candles.pop_front();
        }
    }

    fn insert_candle_sorted(&mut self, candle: Candle) {
        let insert_pos = self
            .candles
            .iter()
            .position(|c| c.timestamp >= candle.timestamp)
            .unwrap_or(self.candles.len());

        match self.candles.get_mut(insert_pos) {
            Some(existing) if existing.timestamp == candle.timestamp => *existing = candle,
            _ => self.candles.insert(insert_pos, candle),
        }

        if self.candles.len() > self.max_size {
            self.candles.pop_front();
        }
    }

    pub fn get_candles(&self) -> &VecDeque<Candle> {
        &self.candles
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    pub fn count(&self) -> usize {
        self.candles.len()
    }

    /// Lowest low and highest high over the series
    pub fn price_range(&self) -> Option<(Price, Price)> {
        let first = self.candles.front()?;
        let init = (first.ohlcv.low, first.ohlcv.high);
        Some(self.candles.iter().fold(init, |(min, max), c| {
            (
                if c.ohlcv.low < min { c.ohlcv.low } else { min },
                if c.ohlcv.high > max { c.ohlcv.high } else { max },
            )
        }))
    }
}

/// Sized to hold everything collected.
impl FromIterator<Candle> for CandleSeries {
    fn from_iter<T: IntoIterator<Item = Candle>>(iter: T) -> Self {
        let candles: VecDeque<Candle> = iter.into_iter().collect();
        let max_size = candles.len().max(1);
        let mut series = CandleSeries::new(max_size);
        for candle in candles {
            series.add_candle(candle);
        }
        series
    }
}

//! Market data aggregate: candles, value objects and the mock feed.

pub mod entities;
pub mod mock;
pub mod value_objects;

pub use entities::*;
pub use mock::MockCandleGenerator;
pub use value_objects::*;

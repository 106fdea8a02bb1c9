use derive_more::{Display, Into};

use crate::domain::logging::get_time_provider;
use crate::time_utils::iso_seconds;

pub const DEFAULT_PREFIX: &str = "portfolio";
pub const DEFAULT_DOWNLOAD_NAME: &str = "portfolio-screenshot.png";

/// File name for a saved capture. Never contains `:`.
///
/// Names have one-second resolution: two captures with the same prefix
/// inside the same wall-clock second get the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Into)]
pub struct Filename(String);

impl Filename {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().replace(':', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Filename {
    fn default() -> Self {
        Self(DEFAULT_DOWNLOAD_NAME.to_string())
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `"{prefix}-{YYYY-MM-DDTHH-MM-SS}.png"` for the current instant (UTC).
pub fn synthesize(prefix: &str) -> Filename {
    synthesize_at(prefix, get_time_provider().current_timestamp())
}

/// Same as [`synthesize`] with an explicit clock reading in milliseconds.
pub fn synthesize_at(prefix: &str, timestamp_ms: u64) -> Filename {
    Filename::new(format!("{}-{}.png", prefix, iso_seconds(timestamp_ms)))
}

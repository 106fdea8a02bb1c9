use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

use super::color::{ColorParseError, Rgba};

/// Device pixels rendered per CSS pixel.
pub const SUPERSAMPLING_FACTOR: f64 = 2.0;
pub const DEFAULT_OUTPUT_QUALITY: f64 = 0.92;
pub const DEFAULT_BACKGROUND_FILL: &str = "#ffffff";
/// Largest raster edge browsers reliably allocate for a canvas.
pub const MAX_RASTER_DIMENSION: u64 = 32_767;

/// Output encoding of a capture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ImageFormat {
    #[default]
    #[strum(serialize = "png")]
    #[serde(rename = "png")]
    Png,
    #[strum(to_string = "jpeg", serialize = "jpg")]
    #[serde(rename = "jpeg", alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Only lossy encodings consume the quality setting.
    pub fn is_lossy(&self) -> bool {
        matches!(self, ImageFormat::Jpeg)
    }
}

/// How images served from other origins are treated.
///
/// With `use_cors` the rasterizer first re-requests a foreign image
/// anonymously; an image that still cannot be read back is "tainted".
/// `allow_taint` keeps the capture going and leaves that region blank,
/// otherwise the whole capture fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossOriginPolicy {
    pub use_cors: bool,
    pub allow_taint: bool,
}

impl Default for CrossOriginPolicy {
    fn default() -> Self {
        Self { use_cors: true, allow_taint: true }
    }
}

impl CrossOriginPolicy {
    pub fn strict() -> Self {
        Self { use_cors: true, allow_taint: false }
    }
}

/// Per-invocation capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureOptions {
    pub output_quality: f64,
    pub background_fill: String,
    pub format: ImageFormat,
    pub cross_origin: CrossOriginPolicy,
    /// Emit debug diagnostics while capturing. Errors are logged regardless.
    pub logging: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            output_quality: DEFAULT_OUTPUT_QUALITY,
            background_fill: DEFAULT_BACKGROUND_FILL.to_string(),
            format: ImageFormat::Png,
            cross_origin: CrossOriginPolicy::default(),
            logging: false,
        }
    }
}

impl CaptureOptions {
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.output_quality = quality;
        self
    }

    pub fn with_background(mut self, fill: impl Into<String>) -> Self {
        self.background_fill = fill.into();
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_cross_origin(mut self, policy: CrossOriginPolicy) -> Self {
        self.cross_origin = policy;
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Quality clamped into `(0, 1]`; unusable values fall back to the default.
    pub fn quality(&self) -> f64 {
        clamp_quality(self.output_quality)
    }

    pub fn background(&self) -> Result<Rgba, ColorParseError> {
        self.background_fill.parse()
    }

    /// Parse options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub fn clamp_quality(quality: f64) -> f64 {
    if !quality.is_finite() || quality <= 0.0 {
        DEFAULT_OUTPUT_QUALITY
    } else {
        quality.min(1.0)
    }
}

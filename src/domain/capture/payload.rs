use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use super::options::ImageFormat;
use super::raster::EncodedImage;
use crate::domain::errors::{AppError, ValidationResult};

/// A finished capture: a `data:image/...;base64,` URL and its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    data_url: String,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl CaptureResult {
    /// Wrap a data URL produced elsewhere (e.g. handed back from JavaScript).
    /// Dimensions are unknown and reported as zero.
    pub fn from_data_url(data_url: impl Into<String>) -> ValidationResult<Self> {
        let data_url = data_url.into();
        let (mime, _) = split_data_url(&data_url).ok_or_else(|| {
            AppError::ValidationError("payload is not a base64 image data URL".into())
        })?;
        let format = match mime {
            "image/png" => ImageFormat::Png,
            "image/jpeg" => ImageFormat::Jpeg,
            other => {
                return Err(AppError::ValidationError(format!(
                    "unsupported image type '{}'",
                    other
                )));
            }
        };
        Ok(Self { data_url, width: 0, height: 0, format })
    }

    pub fn as_str(&self) -> &str {
        &self.data_url
    }

    pub fn into_string(self) -> String {
        self.data_url
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Raw encoded image bytes.
    pub fn decode_bytes(&self) -> ValidationResult<Vec<u8>> {
        let (_, body) = split_data_url(&self.data_url)
            .ok_or_else(|| AppError::ValidationError("malformed data URL".into()))?;
        BASE64
            .decode(body)
            .map_err(|e| AppError::ValidationError(format!("invalid base64 body: {}", e)))
    }
}

impl From<EncodedImage> for CaptureResult {
    fn from(encoded: EncodedImage) -> Self {
        Self {
            data_url: encoded.data_url,
            width: encoded.width,
            height: encoded.height,
            format: encoded.format,
        }
    }
}

impl AsRef<str> for CaptureResult {
    fn as_ref(&self) -> &str {
        &self.data_url
    }
}

/// Build `data:<mime>;base64,<body>` from encoded bytes.
pub fn to_data_url(format: ImageFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes))
}

fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, body) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    Some((mime, body))
}

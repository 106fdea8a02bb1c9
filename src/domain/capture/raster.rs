use derive_more::Display;
use futures::future::LocalBoxFuture;

use super::color::Rgba;
use super::geometry::Rect;
use super::options::{CrossOriginPolicy, ImageFormat};
use super::scene::TextRun;

/// Technical failure inside a capture. Logged, never shown to the caller.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum RasterError {
    #[display(fmt = "no element with id '{}'", _0)]
    TargetNotFound(String),
    #[display(fmt = "capture target is not attached to a document")]
    DetachedSurface,
    #[display(fmt = "capture target has zero extent ({}x{})", width, height)]
    ZeroExtent { width: f64, height: f64 },
    #[display(fmt = "raster {}x{} exceeds the {}px limit", width, height, limit)]
    SurfaceTooLarge { width: u64, height: u64, limit: u64 },
    #[display(fmt = "invalid background fill: {}", _0)]
    InvalidBackground(String),
    #[display(fmt = "drawing context unavailable: {}", _0)]
    ContextUnavailable(String),
    #[display(fmt = "renderer error: {}", _0)]
    Renderer(String),
    #[display(fmt = "cross-origin image refused: {}", _0)]
    TaintedImage(String),
    #[display(fmt = "encoding error: {}", _0)]
    Encoding(String),
    #[display(fmt = "no surface has been started")]
    NotStarted,
}

impl std::error::Error for RasterError {}

/// Outcome of checking whether an image can be read back after drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageAccess<I> {
    /// Safe to draw; may be a CORS-reloaded copy of the original.
    Readable(I),
    /// Drawing it would taint the surface.
    Tainted { source: String },
    /// Never loaded or has no pixels.
    Unavailable { source: String },
}

/// What the engine does with an image after probing it.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageDecision<I> {
    Draw(I),
    /// Leave the region showing whatever is beneath it.
    Blank { reason: String },
    Abort(RasterError),
}

impl CrossOriginPolicy {
    pub fn decide<I>(&self, access: ImageAccess<I>) -> ImageDecision<I> {
        match access {
            ImageAccess::Readable(image) => ImageDecision::Draw(image),
            ImageAccess::Unavailable { source } => ImageDecision::Blank {
                reason: format!("image not loaded: {}", source),
            },
            ImageAccess::Tainted { source } if self.allow_taint => ImageDecision::Blank {
                reason: format!("tainted image left blank: {}", source),
            },
            ImageAccess::Tainted { source } => {
                ImageDecision::Abort(RasterError::TaintedImage(source))
            }
        }
    }
}

/// Encoded raster ready to be wrapped as a data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Surface requested by the engine for one capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSpec {
    /// Device pixels.
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub background: Rgba,
    /// Mirrors `CaptureOptions::logging`; rasterizers stay silent unless set.
    pub verbose: bool,
}

/// Pixel sink for a capture. `begin` takes the surface size in device
/// pixels; drawing coordinates are CSS pixels and the rasterizer applies the
/// supersampling `scale` itself.
///
/// A rasterizer owns at most one transient surface. `finish` consumes it and
/// `release` discards it; after either, drawing fails with `NotStarted`.
pub trait Rasterizer {
    type Image;

    fn begin(&mut self, spec: SurfaceSpec) -> Result<(), RasterError>;

    fn check_image<'a>(
        &'a self,
        image: &'a Self::Image,
        policy: CrossOriginPolicy,
    ) -> LocalBoxFuture<'a, ImageAccess<Self::Image>>;

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), RasterError>;

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) -> Result<(), RasterError>;

    fn fill_text(&mut self, run: &TextRun) -> Result<(), RasterError>;

    fn draw_image(&mut self, image: &Self::Image, rect: Rect) -> Result<(), RasterError>;

    fn finish(&mut self, format: ImageFormat, quality: f64) -> Result<EncodedImage, RasterError>;

    fn release(&mut self);
}

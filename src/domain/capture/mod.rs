//! Element-to-image capture: value types and the seams the engine drives.

pub mod color;
pub mod filename;
pub mod geometry;
pub mod options;
pub mod payload;
pub mod raster;
pub mod scene;

pub use color::Rgba;
pub use filename::{DEFAULT_DOWNLOAD_NAME, DEFAULT_PREFIX, Filename, synthesize, synthesize_at};
pub use geometry::{Extent, Rect};
pub use options::{
    CaptureOptions, CrossOriginPolicy, DEFAULT_OUTPUT_QUALITY, ImageFormat, MAX_RASTER_DIMENSION,
    SUPERSAMPLING_FACTOR,
};
pub use payload::CaptureResult;
pub use raster::{EncodedImage, ImageAccess, ImageDecision, RasterError, Rasterizer, SurfaceSpec};
pub use scene::{
    CAPTURE_IGNORE_ATTRIBUTE, CaptureSurface, DisplayList, ExclusionPredicate, IgnoreMarked,
    NoExclusions, NodeDescriptor, Paint, SurfaceNode, TextRun, build_display_list,
};

//! Browser-facing adapters plus the pure-Rust rendering backend.

pub mod dom;
pub mod rendering;
pub mod services;

pub use dom::{BrowserDownloadHost, DomSurface};
pub use rendering::{CanvasRasterizer, SceneSurface, SoftwareRasterizer};
pub use services::{BrowserTimeProvider, ConsoleLogger};

//! Browser document adapters.

pub mod download;
pub mod surface;

pub use download::BrowserDownloadHost;
pub use surface::{DomNode, DomSurface};

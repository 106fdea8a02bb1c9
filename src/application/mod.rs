//! Application layer: capture orchestration and download flow.

pub mod capture_service;
pub mod download;
pub mod screenshot_service;

pub use capture_service::CaptureEngine;
pub use download::{DownloadHost, trigger, trigger_with};
pub use screenshot_service::ScreenshotService;

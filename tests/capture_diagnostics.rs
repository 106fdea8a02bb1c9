use futures::executor::block_on;
use std::sync::Mutex;
use trade_dashboard_wasm::application::CaptureEngine;
use trade_dashboard_wasm::domain::capture::{CaptureOptions, IgnoreMarked, Rgba};
use trade_dashboard_wasm::domain::errors::AppError;
use trade_dashboard_wasm::domain::logging::{LogEntry, LogLevel, Logger, init_logger};
use trade_dashboard_wasm::infrastructure::rendering::SceneNode;
use trade_dashboard_wasm::infrastructure::{SceneSurface, SoftwareRasterizer};

static ENTRIES: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());

struct RecordingLogger;

impl Logger for RecordingLogger {
    fn log(&self, entry: LogEntry) {
        ENTRIES.lock().unwrap().push(entry);
    }
}

fn errors_mentioning(needle: &str) -> usize {
    ENTRIES
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.level == LogLevel::Error && e.message.contains(needle))
        .count()
}

// Single test: the logger is process-global.
#[test]
fn failures_are_logged_with_detail_and_returned_opaque() {
    init_logger(Box::new(RecordingLogger));
    let mut engine = CaptureEngine::new(SoftwareRasterizer::new());
    // The text run reaches the rasterizer, which has its own diagnostics.
    let root = SceneNode::builder("div")
        .rect(0.0, 0.0, 40.0, 10.0)
        .child(
            SceneNode::builder("span")
                .rect(0.0, 0.0, 40.0, 10.0)
                .text("AAPL", "12px sans-serif", Rgba::BLACK)
                .build(),
        )
        .build();

    let detached = SceneSurface::new(root.clone()).detached();
    let err = block_on(engine.capture(&detached, &CaptureOptions::default(), &IgnoreMarked))
        .unwrap_err();
    assert_eq!(err, AppError::CaptureFailed);
    assert_eq!(errors_mentioning("not attached to a document"), 1);

    let options = CaptureOptions::default().with_background("chartreuse-ish");
    let err = block_on(engine.capture(&SceneSurface::new(root.clone()), &options, &IgnoreMarked))
        .unwrap_err();
    assert_eq!(err.to_string(), "capture failed, please retry");
    assert_eq!(errors_mentioning("invalid background fill"), 1);

    // Silent by default.
    let before = ENTRIES.lock().unwrap().len();
    let quiet = CaptureOptions::default();
    block_on(engine.capture(&SceneSurface::new(root.clone()), &quiet, &IgnoreMarked)).unwrap();
    assert_eq!(ENTRIES.lock().unwrap().len(), before);

    let verbose = CaptureOptions::default().with_logging(true);
    block_on(engine.capture(&SceneSurface::new(root), &verbose, &IgnoreMarked)).unwrap();
    let levels: Vec<LogLevel> = ENTRIES.lock().unwrap()[before..]
        .iter()
        .map(|e| e.level)
        .collect();
    assert!(levels.contains(&LogLevel::Debug));
    assert!(levels.iter().all(|level| *level < LogLevel::Warn));
    assert!(
        ENTRIES.lock().unwrap()[before..]
            .iter()
            .any(|e| e.message.contains("text run 'AAPL'"))
    );
}

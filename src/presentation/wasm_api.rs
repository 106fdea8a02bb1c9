//! JS bridge. Only argument conversion lives here; the flows are in the
//! application layer.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{CaptureEngine, ScreenshotService, trigger};
use crate::domain::{
    capture::{
        CaptureOptions, CaptureResult, DEFAULT_PREFIX, Filename, IgnoreMarked, RasterError,
        synthesize,
    },
    errors::{AppError, CaptureOutcome},
    logging::LogComponent,
    market_data::{MockCandleGenerator, TimeInterval},
};
use crate::infrastructure::{BrowserDownloadHost, CanvasRasterizer, DomSurface};
use crate::log_error;

const COMPONENT: LogComponent = LogComponent::Presentation("WasmApi");

fn to_js(err: AppError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// A missing target or browser handle counts as a failed capture.
fn unavailable(err: RasterError) -> AppError {
    log_error!(COMPONENT, "❌ capture not started: {}", err);
    AppError::CaptureFailed
}

/// `undefined`/`null` means defaults; anything else goes through serde.
fn parse_options(value: &JsValue) -> Result<CaptureOptions, AppError> {
    if value.is_undefined() || value.is_null() {
        return Ok(CaptureOptions::default());
    }
    let json = js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| AppError::ValidationError("options are not serializable".to_string()))?;
    CaptureOptions::from_json(&json)
        .map_err(|e| AppError::ValidationError(format!("invalid capture options: {}", e)))
}

/// Capture the element `element_id` and save it as `{prefix}-{timestamp}.png`.
/// Shared by the JS API and the dashboard's screenshot button.
pub async fn capture_to_file(
    element_id: &str,
    prefix: &str,
    options: &CaptureOptions,
) -> CaptureOutcome<Filename> {
    let surface = DomSurface::by_id(element_id).map_err(unavailable)?;
    let rasterizer = CanvasRasterizer::from_window().map_err(unavailable)?;
    let host = BrowserDownloadHost::from_window()?;
    let mut service = ScreenshotService::new(rasterizer, host);
    service
        .capture_and_download(&surface, options, &IgnoreMarked, prefix)
        .await
}

/// Resolves with a `data:image/...;base64,` string.
#[wasm_bindgen(js_name = captureElement)]
pub fn capture_element(element_id: String, options: JsValue) -> Promise {
    let options = parse_options(&options);
    future_to_promise(async move {
        let options = options.map_err(to_js)?;
        let surface = DomSurface::by_id(&element_id)
            .map_err(unavailable)
            .map_err(to_js)?;
        let rasterizer = CanvasRasterizer::from_window()
            .map_err(unavailable)
            .map_err(to_js)?;
        let result = CaptureEngine::new(rasterizer)
            .capture(&surface, &options, &IgnoreMarked)
            .await
            .map_err(to_js)?;
        Ok(JsValue::from_str(&result.into_string()))
    })
}

#[wasm_bindgen(js_name = synthesizeFilename)]
pub fn synthesize_filename(prefix: Option<String>) -> String {
    synthesize(prefix.as_deref().unwrap_or(DEFAULT_PREFIX)).into()
}

/// Save a payload previously returned by `captureElement`. Download
/// failures are logged only; a malformed payload is rejected.
#[wasm_bindgen(js_name = triggerDownload)]
pub fn trigger_download(payload: String, filename: Option<String>) -> Result<(), JsValue> {
    let payload = CaptureResult::from_data_url(payload).map_err(to_js)?;
    let host = BrowserDownloadHost::from_window().map_err(to_js)?;
    let filename = filename.map(Filename::new);
    trigger(&host, &payload, filename.as_ref());
    Ok(())
}

/// Resolves with the file name handed to the browser.
#[wasm_bindgen(js_name = captureAndDownload)]
pub fn capture_and_download(
    element_id: String,
    prefix: Option<String>,
    options: JsValue,
) -> Promise {
    let options = parse_options(&options);
    future_to_promise(async move {
        let options = options.map_err(to_js)?;
        let prefix = prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let filename = capture_to_file(&element_id, &prefix, &options)
            .await
            .map_err(to_js)?;
        Ok(JsValue::from_str(filename.as_str()))
    })
}

/// Seeded candles as a JSON array, for pages that chart without Leptos.
#[wasm_bindgen(js_name = generateMockCandles)]
pub fn generate_mock_candles(
    seed: u32,
    count: usize,
    start_price: f64,
    start_ms: f64,
) -> Result<String, JsValue> {
    let candles = MockCandleGenerator::new(u64::from(seed), start_price, TimeInterval::OneHour)
        .generate(count, start_ms.max(0.0) as u64);
    serde_json::to_string(&candles).map_err(|e| to_js(AppError::ValidationError(e.to_string())))
}

#![cfg(target_arch = "wasm32")]

use trade_dashboard_wasm::application::{CaptureEngine, trigger_with};
use trade_dashboard_wasm::domain::capture::{
    CAPTURE_IGNORE_ATTRIBUTE, CaptureOptions, CaptureResult, CaptureSurface, Filename,
    IgnoreMarked, ImageFormat, build_display_list,
};
use trade_dashboard_wasm::domain::errors::{AppError, CAPTURE_FAILED_MESSAGE};
use trade_dashboard_wasm::infrastructure::{BrowserDownloadHost, CanvasRasterizer, DomSurface};
use trade_dashboard_wasm::presentation::capture_to_file;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(id: &str, html: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    host.set_id(id);
    host.set_attribute(
        "style",
        concat!(
            "position: absolute; left: 0; top: 0; width: 400px; height: 300px; ",
            "overflow: auto; background: #ffffff",
        ),
    )
    .unwrap();
    host.set_inner_html(html);
    document.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
async fn captures_at_twice_the_scroll_size() {
    let host = mount(
        "dom-capture-size",
        r#"<div style="width: 400px; height: 500px; background: #3366ff"></div>"#,
    );
    let surface = DomSurface::by_id("dom-capture-size").unwrap();
    let mut engine = CaptureEngine::new(CanvasRasterizer::from_window().unwrap());

    let expected_width = host.scroll_width() as u32 * 2;
    let result = engine
        .capture(&surface, &CaptureOptions::default(), &IgnoreMarked)
        .await
        .unwrap();
    host.remove();

    assert!(result.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(result.width(), expected_width);
    assert_eq!(result.height(), 1000);
}

#[wasm_bindgen_test]
async fn jpeg_output_respects_quality() {
    let host = mount(
        "dom-capture-jpeg",
        r#"<p style="font: 14px sans-serif">AAPL 187.32 ▲ 1.2%</p><p>MSFT 402.10 ▼ 0.4%</p>"#,
    );
    let surface = DomSurface::by_id("dom-capture-jpeg").unwrap();
    let mut engine = CaptureEngine::new(CanvasRasterizer::from_window().unwrap());
    let jpeg = CaptureOptions::default().with_format(ImageFormat::Jpeg);

    let low = engine
        .capture(&surface, &jpeg.clone().with_quality(0.5), &IgnoreMarked)
        .await
        .unwrap();
    let high = engine
        .capture(&surface, &jpeg.with_quality(0.95), &IgnoreMarked)
        .await
        .unwrap();
    host.remove();

    assert!(low.as_str().starts_with("data:image/jpeg;base64,"));
    assert_ne!(low.as_str(), high.as_str());
    assert!(high.as_str().len() >= low.as_str().len());
}

#[wasm_bindgen_test]
fn marked_elements_are_excluded_from_the_walk() {
    let host = mount(
        "dom-capture-ignore",
        &format!(
            r#"<button {}="">Screenshot</button><span>kept</span>"#,
            CAPTURE_IGNORE_ATTRIBUTE
        ),
    );
    let surface = DomSurface::by_id("dom-capture-ignore").unwrap();
    let list = build_display_list(surface.root().unwrap(), &IgnoreMarked);
    host.remove();

    assert_eq!(list.excluded, 1);
    assert_eq!(list.visited, 3);
}

#[wasm_bindgen_test]
async fn detached_element_fails_opaquely() {
    let host = mount("dom-capture-detached", "<p>gone</p>");
    let surface = DomSurface::new(host.clone().into());
    host.remove();

    let mut engine = CaptureEngine::new(CanvasRasterizer::from_window().unwrap());
    let err = engine
        .capture(&surface, &CaptureOptions::default(), &IgnoreMarked)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::CaptureFailed);
}

#[wasm_bindgen_test]
async fn unknown_element_fails_with_the_retry_message() {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    let before = body.child_element_count();

    let err = capture_to_file("dom-capture-missing", "portfolio", &CaptureOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err, AppError::CaptureFailed);
    assert_eq!(err.to_string(), CAPTURE_FAILED_MESSAGE);
    assert_eq!(body.child_element_count(), before);
}

#[wasm_bindgen_test]
fn download_leaves_body_unchanged() {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    let before = body.child_element_count();

    let host = BrowserDownloadHost::from_window().unwrap();
    let payload = CaptureResult::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
    trigger_with(&host, &payload, &Filename::default()).unwrap();

    assert_eq!(body.child_element_count(), before);
}

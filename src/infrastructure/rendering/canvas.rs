use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use crate::domain::{
    capture::{
        CrossOriginPolicy, EncodedImage, ImageAccess, ImageFormat, RasterError, Rasterizer, Rect,
        Rgba, SurfaceSpec, TextRun,
    },
    logging::LogComponent,
};
use crate::log_debug;

fn js_error(context: &'static str) -> impl Fn(JsValue) -> RasterError {
    move |err| RasterError::Renderer(format!("{}: {:?}", context, err))
}

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

/// Offscreen `<canvas>` rasterizer. The canvas is never attached to the
/// document and its backing store is dropped as soon as encoding finishes.
pub struct CanvasRasterizer {
    document: Document,
    surface: Option<CanvasSurface>,
    verbose: bool,
}

impl CanvasRasterizer {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            surface: None,
            verbose: false,
        }
    }

    pub fn from_window() -> Result<Self, RasterError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RasterError::ContextUnavailable("no document".to_string()))?;
        Ok(Self::new(document))
    }

    fn context(&self) -> Result<&CanvasRenderingContext2d, RasterError> {
        self.surface
            .as_ref()
            .map(|s| &s.context)
            .ok_or(RasterError::NotStarted)
    }
}

impl Rasterizer for CanvasRasterizer {
    type Image = HtmlImageElement;

    fn begin(&mut self, spec: SurfaceSpec) -> Result<(), RasterError> {
        let SurfaceSpec {
            width,
            height,
            scale,
            background,
            verbose,
        } = spec;
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(js_error("create canvas"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RasterError::ContextUnavailable("element is not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(js_error("get 2d context"))?
            .ok_or_else(|| RasterError::ContextUnavailable("2d context refused".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RasterError::ContextUnavailable("not a 2d context".to_string()))?;

        context.scale(scale, scale).map_err(js_error("scale"))?;
        context.set_text_baseline("top");
        if !background.is_transparent() {
            context.set_fill_style_str(&background.to_css());
            context.fill_rect(0.0, 0.0, width as f64 / scale, height as f64 / scale);
        }

        self.surface = Some(CanvasSurface { canvas, context });
        self.verbose = verbose;
        Ok(())
    }

    fn check_image<'a>(
        &'a self,
        image: &'a HtmlImageElement,
        policy: CrossOriginPolicy,
    ) -> LocalBoxFuture<'a, ImageAccess<HtmlImageElement>> {
        Box::pin(async move {
            let source = image.current_src();
            if !image.complete() || image.natural_width() == 0 {
                return ImageAccess::Unavailable { source };
            }
            // Loaded with a crossorigin attribute means the server granted it.
            if is_same_origin(&source) || image.cross_origin().is_some() {
                return ImageAccess::Readable(image.clone());
            }
            if !policy.use_cors {
                return ImageAccess::Tainted { source };
            }
            match load_anonymous(&source).await {
                Ok(reloaded) => ImageAccess::Readable(reloaded),
                Err(err) => {
                    if self.verbose {
                        log_debug!(
                            LogComponent::Infrastructure("CanvasRasterizer"),
                            "CORS reload of {} failed: {:?}",
                            source,
                            err
                        );
                    }
                    ImageAccess::Tainted { source }
                }
            }
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<(), RasterError> {
        let context = self.context()?;
        context.set_fill_style_str(&color.to_css());
        context.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) -> Result<(), RasterError> {
        let context = self.context()?;
        let half = width / 2.0;
        context.set_stroke_style_str(&color.to_css());
        context.set_line_width(width);
        // Inset so the stroke stays inside the border box.
        context.stroke_rect(rect.x + half, rect.y + half, rect.width - width, rect.height - width);
        Ok(())
    }

    fn fill_text(&mut self, run: &TextRun) -> Result<(), RasterError> {
        let context = self.context()?;
        context.set_font(&run.font);
        context.set_fill_style_str(&run.color.to_css());
        context
            .fill_text(&run.text, run.bounds.x, run.bounds.y)
            .map_err(js_error("fill text"))
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Rect) -> Result<(), RasterError> {
        self.context()?
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )
            .map_err(js_error("draw image"))
    }

    fn finish(&mut self, format: ImageFormat, quality: f64) -> Result<EncodedImage, RasterError> {
        let CanvasSurface { canvas, .. } = self.surface.take().ok_or(RasterError::NotStarted)?;
        let (width, height) = (canvas.width(), canvas.height());
        let quality = JsValue::from_f64(quality);
        let encoded = canvas
            .to_data_url_with_type_and_encoder_options(format.mime_type(), &quality)
            .map_err(|e| RasterError::Encoding(format!("{:?}", e)));
        release_canvas(&canvas);

        let data_url = encoded?;
        // Browsers fall back to PNG for types they cannot encode.
        if !data_url.starts_with(&format!("data:{};base64,", format.mime_type())) {
            return Err(RasterError::Encoding(format!(
                "browser produced {} instead of {}",
                data_url.split(',').next().unwrap_or_default(),
                format.mime_type()
            )));
        }
        Ok(EncodedImage { data_url, width, height, format })
    }

    fn release(&mut self) {
        if let Some(surface) = self.surface.take() {
            release_canvas(&surface.canvas);
        }
    }
}

/// Shrinking to zero frees the backing store without waiting for GC.
fn release_canvas(canvas: &HtmlCanvasElement) {
    canvas.set_width(0);
    canvas.set_height(0);
}

fn is_same_origin(source: &str) -> bool {
    if source.starts_with("data:") || source.starts_with("blob:") {
        return true;
    }
    let page_origin = web_sys::window().and_then(|w| w.location().origin().ok());
    let image_origin = web_sys::Url::new(source).ok().map(|u| u.origin());
    matches!((page_origin, image_origin), (Some(page), Some(img)) if page == img)
}

async fn load_anonymous(source: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(source);
    JsFuture::from(image.decode()).await?;
    Ok(image)
}

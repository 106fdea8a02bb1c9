use crate::domain::{
    capture::{
        CaptureOptions, CaptureResult, CaptureSurface, ExclusionPredicate, ImageDecision,
        MAX_RASTER_DIMENSION, Paint, RasterError, Rasterizer, SUPERSAMPLING_FACTOR, SurfaceNode,
        SurfaceSpec, build_display_list,
    },
    errors::{AppError, CaptureOutcome},
    logging::LogComponent,
};
use crate::{log_debug, log_error, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("Capture");

/// Rasterizes a [`CaptureSurface`] through a [`Rasterizer`] and encodes the
/// result.
///
/// Failures of any kind are logged with their technical detail and surface
/// to the caller as [`AppError::CaptureFailed`] only.
pub struct CaptureEngine<R: Rasterizer> {
    rasterizer: R,
}

impl<R: Rasterizer> CaptureEngine<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub async fn capture<S>(
        &mut self,
        target: &S,
        options: &CaptureOptions,
        exclude: &dyn ExclusionPredicate,
    ) -> CaptureOutcome<CaptureResult>
    where
        S: CaptureSurface,
        S::Node: SurfaceNode<Image = R::Image>,
    {
        match self.render(target, options, exclude).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.rasterizer.release();
                log_error!(COMPONENT, "❌ capture failed: {}", err);
                Err(AppError::CaptureFailed)
            }
        }
    }

    async fn render<S>(
        &mut self,
        target: &S,
        options: &CaptureOptions,
        exclude: &dyn ExclusionPredicate,
    ) -> Result<CaptureResult, RasterError>
    where
        S: CaptureSurface,
        S::Node: SurfaceNode<Image = R::Image>,
    {
        let verbose = options.logging;
        let background = options
            .background()
            .map_err(|e| RasterError::InvalidBackground(e.to_string()))?;

        let extent = target.extent()?;
        if extent.is_zero() {
            return Err(RasterError::ZeroExtent {
                width: extent.width,
                height: extent.height,
            });
        }

        let (width, height) = extent.raster_size(SUPERSAMPLING_FACTOR);
        if width > MAX_RASTER_DIMENSION || height > MAX_RASTER_DIMENSION {
            return Err(RasterError::SurfaceTooLarge {
                width,
                height,
                limit: MAX_RASTER_DIMENSION,
            });
        }

        let list = build_display_list(target.root()?, exclude);
        if verbose {
            log_debug!(
                COMPONENT,
                "📐 {}x{} css -> {}x{} px, {} nodes ({} excluded), {} paint ops",
                extent.width,
                extent.height,
                width,
                height,
                list.visited,
                list.excluded,
                list.len()
            );
        }

        self.rasterizer.begin(SurfaceSpec {
            width: width as u32,
            height: height as u32,
            scale: SUPERSAMPLING_FACTOR,
            background,
            verbose,
        })?;

        let policy = options.cross_origin;
        for item in list.items {
            match item {
                Paint::Fill { rect, color } => self.rasterizer.fill_rect(rect, color)?,
                Paint::Border { rect, color, width } => {
                    self.rasterizer.stroke_rect(rect, color, width)?
                }
                Paint::Text(run) => self.rasterizer.fill_text(&run)?,
                Paint::Image { rect, image } => {
                    let access = self.rasterizer.check_image(&image, policy).await;
                    match policy.decide(access) {
                        ImageDecision::Draw(readable) => {
                            self.rasterizer.draw_image(&readable, rect)?
                        }
                        ImageDecision::Blank { reason } => {
                            if verbose {
                                log_warn!(COMPONENT, "⚠️ {}", reason);
                            }
                        }
                        ImageDecision::Abort(err) => return Err(err),
                    }
                }
            }
        }

        let encoded = self.rasterizer.finish(options.format, options.quality())?;
        if verbose {
            log_debug!(
                COMPONENT,
                "✅ encoded {} ({} bytes)",
                encoded.format.mime_type(),
                encoded.data_url.len()
            );
        }
        Ok(CaptureResult::from(encoded))
    }
}

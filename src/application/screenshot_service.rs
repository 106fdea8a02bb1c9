use super::capture_service::CaptureEngine;
use super::download::{DownloadHost, trigger_with};
use crate::domain::{
    capture::{
        CaptureOptions, CaptureSurface, ExclusionPredicate, Filename, Rasterizer, SurfaceNode,
        synthesize,
    },
    errors::CaptureOutcome,
    logging::LogComponent,
};
use crate::log_info;

/// Capture, name, save: the flow behind the dashboard's screenshot button.
pub struct ScreenshotService<R: Rasterizer, H: DownloadHost> {
    engine: CaptureEngine<R>,
    host: H,
}

impl<R: Rasterizer, H: DownloadHost> ScreenshotService<R, H> {
    pub fn new(rasterizer: R, host: H) -> Self {
        Self {
            engine: CaptureEngine::new(rasterizer),
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the file name handed to the host.
    pub async fn capture_and_download<S>(
        &mut self,
        target: &S,
        options: &CaptureOptions,
        exclude: &dyn ExclusionPredicate,
        prefix: &str,
    ) -> CaptureOutcome<Filename>
    where
        S: CaptureSurface,
        S::Node: SurfaceNode<Image = R::Image>,
    {
        let payload = self.engine.capture(target, options, exclude).await?;
        let filename = synthesize(prefix);
        trigger_with(&self.host, &payload, &filename)?;
        log_info!(
            LogComponent::Application("Screenshot"),
            "📸 saved {}x{} capture as {}",
            payload.width(),
            payload.height(),
            filename
        );
        Ok(filename)
    }
}

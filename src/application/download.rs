use crate::domain::{
    capture::{CaptureResult, Filename},
    errors::AppError,
    logging::LogComponent,
};
use crate::{log_debug, log_error};

/// Document operations needed to hand a payload to the host's "save as".
pub trait DownloadHost {
    type Artifact;

    /// Build a hidden download link for `href`, not yet in the document.
    fn create_artifact(&self, href: &str, filename: &str) -> Result<Self::Artifact, AppError>;

    fn attach(&self, artifact: &Self::Artifact) -> Result<(), AppError>;

    fn activate(&self, artifact: &Self::Artifact) -> Result<(), AppError>;

    fn detach(&self, artifact: &Self::Artifact);
}

/// An artifact that is in the document for as long as this value lives.
struct AttachedArtifact<'h, H: DownloadHost> {
    host: &'h H,
    artifact: H::Artifact,
}

impl<'h, H: DownloadHost> AttachedArtifact<'h, H> {
    fn attach(host: &'h H, artifact: H::Artifact) -> Result<Self, AppError> {
        host.attach(&artifact)?;
        Ok(Self { host, artifact })
    }
}

impl<H: DownloadHost> Drop for AttachedArtifact<'_, H> {
    fn drop(&mut self) {
        self.host.detach(&self.artifact);
    }
}

/// Insert, click once, remove. The artifact is removed on every exit path,
/// including an activation error or a panic during activation.
pub fn trigger_with<H: DownloadHost>(
    host: &H,
    payload: &CaptureResult,
    filename: &Filename,
) -> Result<(), AppError> {
    let artifact = host.create_artifact(payload.as_str(), filename.as_str())?;
    let attached = AttachedArtifact::attach(host, artifact)?;
    host.activate(&attached.artifact)?;
    log_debug!(
        LogComponent::Application("Download"),
        "💾 download triggered: {}",
        filename
    );
    Ok(())
}

/// Fire-and-forget variant: failures are logged, not returned.
pub fn trigger<H: DownloadHost>(host: &H, payload: &CaptureResult, filename: Option<&Filename>) {
    let default_name = Filename::default();
    let filename = filename.unwrap_or(&default_name);
    if let Err(err) = trigger_with(host, payload, filename) {
        log_error!(
            LogComponent::Application("Download"),
            "❌ could not trigger download of {}: {}",
            filename,
            err
        );
    }
}

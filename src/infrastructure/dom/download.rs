use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

use crate::application::download::DownloadHost;
use crate::domain::errors::AppError;

/// Saves payloads through a hidden `<a download>` in the page body.
pub struct BrowserDownloadHost {
    document: Document,
}

impl BrowserDownloadHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self, AppError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| AppError::DownloadError("document not available".to_string()))
    }
}

impl DownloadHost for BrowserDownloadHost {
    type Artifact = HtmlAnchorElement;

    fn create_artifact(&self, href: &str, filename: &str) -> Result<HtmlAnchorElement, AppError> {
        let anchor = self
            .document
            .create_element("a")
            .map_err(|e| AppError::DownloadError(format!("create anchor: {:?}", e)))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| AppError::DownloadError("element is not an anchor".to_string()))?;
        anchor.set_href(href);
        anchor.set_download(filename);
        anchor
            .set_attribute("style", "display: none")
            .map_err(|e| AppError::DownloadError(format!("hide anchor: {:?}", e)))?;
        Ok(anchor)
    }

    fn attach(&self, artifact: &HtmlAnchorElement) -> Result<(), AppError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| AppError::DownloadError("document has no body".to_string()))?;
        body.append_child(artifact)
            .map_err(|e| AppError::DownloadError(format!("attach anchor: {:?}", e)))?;
        Ok(())
    }

    fn activate(&self, artifact: &HtmlAnchorElement) -> Result<(), AppError> {
        artifact.click();
        Ok(())
    }

    fn detach(&self, artifact: &HtmlAnchorElement) {
        artifact.remove();
    }
}

pub mod canvas;
pub mod scene;
pub mod software;

// Re-exports for convenient access
pub use canvas::CanvasRasterizer;
pub use scene::{ImageOrigin, SceneImage, SceneNode, SceneNodeBuilder, SceneSurface};
pub use software::SoftwareRasterizer;

//! In-memory visual surfaces.
//!
//! A [`SceneSurface`] is a retained tree of boxes that captures exactly like
//! a DOM subtree does, without a browser. Dashboard exports and the test
//! suite build scenes directly; [`SoftwareRasterizer`] renders them.
//!
//! [`SoftwareRasterizer`]: super::software::SoftwareRasterizer

use image::RgbaImage;
use std::rc::Rc;

use crate::domain::capture::{
    CaptureSurface, Extent, NodeDescriptor, Paint, RasterError, Rect, Rgba, SurfaceNode, TextRun,
};

/// Where a scene image came from, for cross-origin decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    Local,
    /// Served by another origin; `cors` tells whether it allows anonymous reads.
    Foreign { url: String, cors: bool },
}

#[derive(Debug, Clone)]
pub struct SceneImage {
    pub bitmap: Rc<RgbaImage>,
    pub origin: ImageOrigin,
}

impl SceneImage {
    pub fn local(bitmap: RgbaImage) -> Self {
        Self { bitmap: Rc::new(bitmap), origin: ImageOrigin::Local }
    }

    pub fn foreign(url: impl Into<String>, bitmap: RgbaImage, cors: bool) -> Self {
        Self {
            bitmap: Rc::new(bitmap),
            origin: ImageOrigin::Foreign { url: url.into(), cors },
        }
    }

    pub fn source(&self) -> &str {
        match &self.origin {
            ImageOrigin::Local => "local",
            ImageOrigin::Foreign { url, .. } => url,
        }
    }
}

#[derive(Debug)]
struct SceneNodeData {
    descriptor: NodeDescriptor,
    rect: Rect,
    background: Option<Rgba>,
    border: Option<(Rgba, f64)>,
    image: Option<SceneImage>,
    text: Option<TextRun>,
    children: Vec<SceneNode>,
}

/// Cheaply clonable handle to an immutable scene node.
#[derive(Debug, Clone)]
pub struct SceneNode(Rc<SceneNodeData>);

impl SceneNode {
    pub fn builder(tag: &str) -> SceneNodeBuilder {
        SceneNodeBuilder {
            data: SceneNodeData {
                descriptor: NodeDescriptor::new(tag),
                rect: Rect::default(),
                background: None,
                border: None,
                image: None,
                text: None,
                children: Vec::new(),
            },
        }
    }

    pub fn rect(&self) -> Rect {
        self.0.rect
    }

    /// Right/bottom edge of this node and everything below it.
    fn content_bounds(&self) -> (f64, f64) {
        self.0.children.iter().map(SceneNode::content_bounds).fold(
            (self.0.rect.right(), self.0.rect.bottom()),
            |(r, b), (cr, cb)| (r.max(cr), b.max(cb)),
        )
    }
}

pub struct SceneNodeBuilder {
    data: SceneNodeData,
}

impl SceneNodeBuilder {
    pub fn id(mut self, id: &str) -> Self {
        self.data.descriptor = self.data.descriptor.with_id(id);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.data.descriptor = self.data.descriptor.with_class(class);
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.data.descriptor = self.data.descriptor.with_attribute(name, value);
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.data.rect = Rect::new(x, y, width, height);
        self
    }

    pub fn background(mut self, color: Rgba) -> Self {
        self.data.background = Some(color);
        self
    }

    pub fn border(mut self, color: Rgba, width: f64) -> Self {
        self.data.border = Some((color, width));
        self
    }

    pub fn image(mut self, image: SceneImage) -> Self {
        self.data.image = Some(image);
        self
    }

    /// Text laid out at the node's top-left corner.
    pub fn text(mut self, text: &str, font: &str, color: Rgba) -> Self {
        self.data.text = Some(TextRun {
            text: text.to_string(),
            bounds: Rect::default(),
            font: font.to_string(),
            color,
        });
        self
    }

    pub fn child(mut self, child: SceneNode) -> Self {
        self.data.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.data.children.extend(children);
        self
    }

    pub fn build(mut self) -> SceneNode {
        if let Some(run) = self.data.text.as_mut() {
            run.bounds = self.data.rect;
        }
        SceneNode(Rc::new(self.data))
    }
}

impl SurfaceNode for SceneNode {
    type Image = SceneImage;

    fn descriptor(&self) -> NodeDescriptor {
        self.0.descriptor.clone()
    }

    fn paint(&self) -> Vec<Paint<SceneImage>> {
        let data = &self.0;
        let mut ops = Vec::new();
        if let Some(color) = data.background.filter(|c| !c.is_transparent()) {
            ops.push(Paint::Fill { rect: data.rect, color });
        }
        if let Some((color, width)) = data.border.filter(|(_, w)| *w > 0.0) {
            ops.push(Paint::Border { rect: data.rect, color, width });
        }
        if let Some(image) = &data.image {
            ops.push(Paint::Image { rect: data.rect, image: image.clone() });
        }
        if let Some(run) = &data.text {
            ops.push(Paint::Text(run.clone()));
        }
        ops
    }

    fn children(&self) -> Vec<SceneNode> {
        self.0.children.clone()
    }
}

/// A scene rooted at the origin. Its extent covers all overflowing content,
/// like an element's scroll size.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    root: SceneNode,
    extent: Extent,
    attached: bool,
}

impl SceneSurface {
    pub fn new(root: SceneNode) -> Self {
        let (right, bottom) = root.content_bounds();
        let origin = root.rect();
        let extent = Extent::new((right - origin.x).max(0.0), (bottom - origin.y).max(0.0));
        Self { root, extent, attached: true }
    }

    /// A surface that has been removed from its document.
    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }
}

impl CaptureSurface for SceneSurface {
    type Node = SceneNode;

    fn extent(&self) -> Result<Extent, RasterError> {
        if !self.attached {
            return Err(RasterError::DetachedSurface);
        }
        Ok(self.extent)
    }

    fn root(&self) -> Result<SceneNode, RasterError> {
        if !self.attached {
            return Err(RasterError::DetachedSurface);
        }
        Ok(self.root.clone())
    }
}

//! Traversal of a visual surface into a flat display list.
//!
//! A surface is any tree of [`SurfaceNode`]s: the live DOM in the browser or
//! an in-memory scene. The exclusion predicate is consulted exactly once per
//! node, in document order, and an excluded node takes its subtree with it.

use super::color::Rgba;
use super::geometry::{Extent, Rect};
use super::raster::RasterError;

/// Marker attribute hiding a node (typically the capture button itself)
/// from the output of its own capture.
pub const CAPTURE_IGNORE_ATTRIBUTE: &str = "data-capture-ignore";

/// Identity of a node as seen by an [`ExclusionPredicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl NodeDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Decides whether a node is left out of the raster.
pub trait ExclusionPredicate {
    fn excludes(&self, node: &NodeDescriptor) -> bool;
}

impl<F> ExclusionPredicate for F
where
    F: Fn(&NodeDescriptor) -> bool,
{
    fn excludes(&self, node: &NodeDescriptor) -> bool {
        self(node)
    }
}

/// Keeps every node.
pub struct NoExclusions;

impl ExclusionPredicate for NoExclusions {
    fn excludes(&self, _node: &NodeDescriptor) -> bool {
        false
    }
}

/// Excludes nodes carrying [`CAPTURE_IGNORE_ATTRIBUTE`].
pub struct IgnoreMarked;

impl ExclusionPredicate for IgnoreMarked {
    fn excludes(&self, node: &NodeDescriptor) -> bool {
        node.attribute(CAPTURE_IGNORE_ATTRIBUTE).is_some()
    }
}

/// A run of text positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bounds: Rect,
    pub font: String,
    pub color: Rgba,
}

/// One drawing instruction, in root-relative CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint<I> {
    Fill { rect: Rect, color: Rgba },
    Border { rect: Rect, color: Rgba, width: f64 },
    Text(TextRun),
    Image { rect: Rect, image: I },
}

pub trait SurfaceNode: Sized {
    type Image;

    fn descriptor(&self) -> NodeDescriptor;

    /// Paint operations for this node alone, children excluded.
    fn paint(&self) -> Vec<Paint<Self::Image>>;

    fn children(&self) -> Vec<Self>;
}

/// A capturable region: the root node plus its full scrollable size.
pub trait CaptureSurface {
    type Node: SurfaceNode;

    /// Scroll extent of the region; fails if the surface is not rendered.
    fn extent(&self) -> Result<Extent, RasterError>;

    fn root(&self) -> Result<Self::Node, RasterError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList<I> {
    pub items: Vec<Paint<I>>,
    pub visited: usize,
    pub excluded: usize,
}

impl<I> DisplayList<I> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pre-order walk of `root`, painting parents beneath their children.
pub fn build_display_list<N: SurfaceNode>(
    root: N,
    exclude: &dyn ExclusionPredicate,
) -> DisplayList<N::Image> {
    let mut items = Vec::new();
    let mut visited = 0;
    let mut excluded = 0;
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        visited += 1;
        if exclude.excludes(&node.descriptor()) {
            excluded += 1;
            continue;
        }
        items.extend(node.paint());

        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }

    DisplayList { items, visited, excluded }
}

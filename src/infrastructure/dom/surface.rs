use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, DomRect, Element, HtmlImageElement, Node, Window};

use crate::domain::capture::{
    CaptureSurface, Extent, NodeDescriptor, Paint, RasterError, Rect, Rgba, SurfaceNode, TextRun,
};

/// A live DOM element as a capture target.
#[derive(Debug, Clone)]
pub struct DomSurface {
    root: Element,
}

impl DomSurface {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn by_id(id: &str) -> Result<Self, RasterError> {
        gloo::utils::document()
            .get_element_by_id(id)
            .map(Self::new)
            .ok_or_else(|| RasterError::TargetNotFound(id.to_string()))
    }

    pub fn element(&self) -> &Element {
        &self.root
    }
}

impl CaptureSurface for DomSurface {
    type Node = DomNode;

    fn extent(&self) -> Result<Extent, RasterError> {
        if !self.root.is_connected() {
            return Err(RasterError::DetachedSurface);
        }
        Ok(Extent::new(
            self.root.scroll_width() as f64,
            self.root.scroll_height() as f64,
        ))
    }

    fn root(&self) -> Result<DomNode, RasterError> {
        let window = web_sys::window()
            .ok_or_else(|| RasterError::ContextUnavailable("no window".to_string()))?;
        let rect = self.root.get_bounding_client_rect();
        // Content scrolled out of view still lands inside the raster.
        let origin = (
            rect.left() - self.root.scroll_left() as f64,
            rect.top() - self.root.scroll_top() as f64,
        );
        Ok(DomNode {
            element: self.root.clone(),
            window,
            origin,
            is_root: true,
        })
    }
}

/// One element of the captured subtree, positioned relative to the root.
#[derive(Debug, Clone)]
pub struct DomNode {
    element: Element,
    window: Window,
    origin: (f64, f64),
    is_root: bool,
}

impl DomNode {
    fn relative(&self, rect: &DomRect) -> Rect {
        Rect::new(
            rect.left() - self.origin.0,
            rect.top() - self.origin.1,
            rect.width(),
            rect.height(),
        )
    }

    fn border_box(&self) -> Rect {
        if self.is_root {
            Rect::new(
                0.0,
                0.0,
                self.element.scroll_width() as f64,
                self.element.scroll_height() as f64,
            )
        } else {
            self.relative(&self.element.get_bounding_client_rect())
        }
    }

    fn text_runs(&self, style: &CssStyleDeclaration) -> Vec<TextRun> {
        let Some(document) = self.element.owner_document() else {
            return Vec::new();
        };
        let font = font_shorthand(style);
        let color = color_property(style, "color").unwrap_or(Rgba::BLACK);
        let nodes = self.element.child_nodes();

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter(|node| node.node_type() == Node::TEXT_NODE)
            .filter_map(|node| {
                let text = collapse_whitespace(&node.text_content()?);
                if text.is_empty() {
                    return None;
                }
                let range = document.create_range().ok()?;
                range.select_node_contents(&node).ok()?;
                let bounds = self.relative(&range.get_bounding_client_rect());
                (!bounds.is_empty()).then(|| TextRun {
                    text,
                    bounds,
                    font: font.clone(),
                    color,
                })
            })
            .collect()
    }
}

impl SurfaceNode for DomNode {
    type Image = HtmlImageElement;

    fn descriptor(&self) -> NodeDescriptor {
        let el = &self.element;
        let mut descriptor = NodeDescriptor::new(el.tag_name());
        let id = el.id();
        if !id.is_empty() {
            descriptor = descriptor.with_id(id);
        }

        let classes = el.class_list();
        for class in (0..classes.length()).filter_map(|i| classes.item(i)) {
            descriptor = descriptor.with_class(class);
        }

        for name in el.get_attribute_names().iter().filter_map(|n| n.as_string()) {
            let value = el.get_attribute(&name).unwrap_or_default();
            descriptor = descriptor.with_attribute(name, value);
        }
        descriptor
    }

    fn paint(&self) -> Vec<Paint<HtmlImageElement>> {
        let Ok(Some(style)) = self.window.get_computed_style(&self.element) else {
            return Vec::new();
        };
        if property(&style, "display") == "none" || property(&style, "visibility") == "hidden" {
            return Vec::new();
        }
        let rect = self.border_box();
        if rect.is_empty() {
            return Vec::new();
        }

        let mut ops = Vec::new();
        let background = color_property(&style, "background-color");
        if let Some(color) = background.filter(|c| !c.is_transparent()) {
            ops.push(Paint::Fill { rect, color });
        }

        let border_width = px_property(&style, "border-top-width");
        if border_width > 0.0 && property(&style, "border-top-style") != "none" {
            if let Some(color) = color_property(&style, "border-top-color") {
                ops.push(Paint::Border { rect, color, width: border_width });
            }
        }

        if let Some(image) = self.element.dyn_ref::<HtmlImageElement>() {
            ops.push(Paint::Image { rect, image: image.clone() });
        }

        ops.extend(self.text_runs(&style).into_iter().map(Paint::Text));
        ops
    }

    fn children(&self) -> Vec<DomNode> {
        let children = self.element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(|element| DomNode {
                element,
                window: self.window.clone(),
                origin: self.origin,
                is_root: false,
            })
            .collect()
    }
}

fn property(style: &CssStyleDeclaration, name: &str) -> String {
    style.get_property_value(name).unwrap_or_default()
}

fn color_property(style: &CssStyleDeclaration, name: &str) -> Option<Rgba> {
    property(style, name).parse().ok()
}

fn px_property(style: &CssStyleDeclaration, name: &str) -> f64 {
    property(style, name)
        .trim_end_matches("px")
        .parse()
        .unwrap_or(0.0)
}

fn font_shorthand(style: &CssStyleDeclaration) -> String {
    format!(
        "{} {} {} {}",
        property(style, "font-style"),
        property(style, "font-weight"),
        property(style, "font-size"),
        property(style, "font-family")
    )
    .trim()
    .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

use std::cell::RefCell;
use trade_dashboard_wasm::domain::capture::{
    CAPTURE_IGNORE_ATTRIBUTE, ExclusionPredicate, IgnoreMarked, NodeDescriptor, Paint, Rgba,
    build_display_list,
};
use trade_dashboard_wasm::infrastructure::rendering::{SceneImage, SceneNode};

fn leaf(id: &str, color: Rgba) -> SceneNode {
    SceneNode::builder("div")
        .id(id)
        .rect(0.0, 0.0, 10.0, 10.0)
        .background(color)
        .build()
}

fn tree() -> SceneNode {
    SceneNode::builder("main")
        .id("root")
        .rect(0.0, 0.0, 100.0, 100.0)
        .child(
            SceneNode::builder("section")
                .id("a")
                .child(leaf("a1", Rgba::BLACK))
                .child(leaf("a2", Rgba::BLACK))
                .build(),
        )
        .child(
            SceneNode::builder("aside")
                .id("b")
                .attribute(CAPTURE_IGNORE_ATTRIBUTE, "true")
                .child(leaf("b1", Rgba::BLACK))
                .build(),
        )
        .child(leaf("c", Rgba::BLACK))
        .build()
}

#[test]
fn predicate_sees_each_node_once_in_document_order() {
    let seen = RefCell::new(Vec::new());
    let record = |node: &NodeDescriptor| {
        seen.borrow_mut().push(node.id.clone().unwrap_or_default());
        false
    };
    let list = build_display_list(tree(), &record);

    assert_eq!(*seen.borrow(), ["root", "a", "a1", "a2", "b", "b1", "c"]);
    assert_eq!(list.visited, 7);
    assert_eq!(list.excluded, 0);
}

#[test]
fn excluded_subtree_is_never_visited() {
    let seen = RefCell::new(Vec::new());
    let predicate = |node: &NodeDescriptor| {
        seen.borrow_mut().push(node.id.clone().unwrap_or_default());
        IgnoreMarked.excludes(node)
    };
    let list = build_display_list(tree(), &predicate);

    assert_eq!(*seen.borrow(), ["root", "a", "a1", "a2", "b", "c"]);
    assert_eq!(list.excluded, 1);
    // a1, a2 and c carry a fill each.
    assert_eq!(list.len(), 3);
}

#[test]
fn excluded_root_yields_an_empty_list() {
    let list = build_display_list(tree(), &|_: &NodeDescriptor| true);
    assert!(list.is_empty());
    assert_eq!((list.visited, list.excluded), (1, 1));
}

#[test]
fn paint_order_is_background_border_image_text() {
    let node = SceneNode::builder("figure")
        .rect(0.0, 0.0, 20.0, 20.0)
        .background(Rgba::WHITE)
        .border(Rgba::BLACK, 1.0)
        .image(SceneImage::local(image::RgbaImage::new(2, 2)))
        .text("AAPL", "12px sans-serif", Rgba::BLACK)
        .build();
    let list = build_display_list(node, &IgnoreMarked);

    let kinds: Vec<&str> = list
        .items
        .iter()
        .map(|item| match item {
            Paint::Fill { .. } => "fill",
            Paint::Border { .. } => "border",
            Paint::Image { .. } => "image",
            Paint::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, ["fill", "border", "image", "text"]);
}

#[test]
fn classes_and_ids_are_visible_to_predicates() {
    let node = SceneNode::builder("DIV").id("toolbar").class("no-print").build();
    let by_class = |n: &NodeDescriptor| n.has_class("no-print");
    let list = build_display_list(node, &by_class);
    assert_eq!(list.excluded, 1);

    let descriptor = NodeDescriptor::new("DIV").with_attribute("Data-Capture-Ignore", "");
    assert_eq!(descriptor.tag, "div");
    assert_eq!(descriptor.attribute(CAPTURE_IGNORE_ATTRIBUTE), Some(""));
}

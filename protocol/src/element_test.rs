use super::*;

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ElementKind::Pencil).expect("serialize"), "\"pencil\"");
    assert_eq!(
        serde_json::to_string(&ElementKind::Rectangle).expect("serialize"),
        "\"rectangle\""
    );
}

#[test]
fn freehand_kinds_are_pencil_and_eraser() {
    assert!(ElementKind::Pencil.is_freehand());
    assert!(ElementKind::Eraser.is_freehand());
    assert!(!ElementKind::Line.is_freehand());
    assert!(!ElementKind::Rectangle.is_freehand());
}

#[test]
fn begin_assigns_fresh_id_and_one_point_path() {
    let a = DrawingElement::begin(ElementKind::Pencil, (3.0, 4.0), "#ff0000");
    let b = DrawingElement::begin(ElementKind::Pencil, (3.0, 4.0), "#ff0000");

    assert_ne!(a.id, b.id);
    assert_eq!(a.path, vec![(3.0, 4.0)]);
    assert_eq!(a.offset_x, 3.0);
    assert_eq!(a.offset_y, 4.0);
    assert!(a.width.is_none());
    assert!(a.height.is_none());
}

#[test]
fn extend_appends_to_freehand_path() {
    let mut el = DrawingElement::begin(ElementKind::Eraser, (0.0, 0.0), "#000");
    el.extend((1.0, 1.0));
    el.extend((2.0, 3.0));

    assert_eq!(el.path, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 3.0)]);
    assert!(el.width.is_none());
}

#[test]
fn extend_resizes_shape_extents_with_sign() {
    let mut el = DrawingElement::begin(ElementKind::Rectangle, (100.0, 50.0), "#000");
    el.extend((60.0, 80.0));

    // Dragging up-left yields negative width, positive height.
    assert_eq!(el.width, Some(-40.0));
    assert_eq!(el.height, Some(30.0));
    assert_eq!(el.path.len(), 1);
}

#[test]
fn element_wire_shape_uses_type_and_camel_case() {
    let el = DrawingElement::begin(ElementKind::Line, (1.0, 2.0), "#123456");
    let value = serde_json::to_value(&el).expect("serialize");

    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("line"));
    assert!(value.get("offsetX").is_some());
    assert!(value.get("offsetY").is_some());
    // Unfinalized extents are omitted, not null.
    assert!(value.get("width").is_none());
}

#[test]
fn element_round_trips_through_json() {
    let mut el = DrawingElement::begin(ElementKind::Rectangle, (5.0, 6.0), "#abcdef");
    el.extend((25.0, 36.0));

    let text = serde_json::to_string(&el).expect("serialize");
    let back: DrawingElement = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, el);
}

#[test]
fn element_without_path_defaults_to_empty() {
    let text = format!(
        "{{\"id\":\"{}\",\"type\":\"line\",\"offsetX\":1.0,\"offsetY\":2.0,\"stroke\":\"#000\",\"width\":3.0,\"height\":4.0}}",
        uuid::Uuid::new_v4()
    );
    let el: DrawingElement = serde_json::from_str(&text).expect("deserialize");
    assert!(el.path.is_empty());
    assert_eq!(el.width, Some(3.0));
}

#![forbid(unsafe_code)]

//! Thin DOM helpers. Lookups that miss return `None`/empty and log at debug;
//! callers turn that into a disabled unit.

use folio_core::geometry::{Bounds, Point, Size};
use folio_fx::style::{ClassToggle, StyleDecl, Transform};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, HtmlElement, MouseEvent, SvgElement, Window,
};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub(crate) fn body() -> Option<HtmlElement> {
    document().ok()?.body()
}

pub(crate) fn query(selector: &str) -> Option<Element> {
    let found = document()
        .ok()
        .and_then(|doc| doc.query_selector(selector).ok().flatten());
    if found.is_none() {
        tracing::debug!(selector, "target missing");
    }
    found
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Ok(list) = document().and_then(|doc| doc.query_selector_all(selector)) else {
        return Vec::new();
    };
    let found: Vec<Element> = (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    if found.is_empty() {
        tracing::debug!(selector, "no targets");
    }
    found
}

/// Inline style of an HTML or SVG element.
pub(crate) fn style_of(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    el.dyn_ref::<SvgElement>().map(SvgElement::style)
}

pub(crate) fn apply_styles(el: &Element, decls: &[StyleDecl]) {
    let Some(style) = style_of(el) else {
        return;
    };
    for decl in decls {
        if let Err(err) = style.set_property(decl.property, &decl.value) {
            tracing::debug!(property = decl.property, error = ?err, "style rejected");
        }
    }
}

pub(crate) fn set_transform(el: &Element, transform: &Transform) {
    apply_styles(el, &[StyleDecl::transform(transform)]);
}

pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        tracing::debug!(class, error = ?err, "class toggle rejected");
    }
}

pub(crate) fn apply_class(el: &Element, toggle: ClassToggle) {
    set_class(el, toggle.class, toggle.on);
}

pub(crate) fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub(crate) fn bounds_of(el: &Element) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn js_f64(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

pub(crate) fn viewport() -> Size {
    match window() {
        Ok(w) => Size::new(js_f64(w.inner_width()), js_f64(w.inner_height())),
        Err(_) => Size::new(0.0, 0.0),
    }
}

pub(crate) fn scroll_top() -> f64 {
    window().and_then(|w| w.scroll_y()).unwrap_or(0.0)
}

pub(crate) fn document_height() -> f64 {
    body().map_or(0.0, |b| f64::from(b.offset_height()))
}

/// Client coordinates of a mouse event.
pub(crate) fn client_point(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|m| Point::new(f64::from(m.client_x()), f64::from(m.client_y())))
}

pub(crate) fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

pub(crate) fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

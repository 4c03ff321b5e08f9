//! Browser implementation of the theme's page capability.

use gloo_timers::callback::Timeout;
use shared::effect::{self, DomEvent, Effect};
use shared::error::{Error, Result};
use shared::page::Dom;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window,
};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Live document of the current window. Cheap to clone: both fields are JS handles.
#[derive(Clone, Debug)]
pub struct WebDom {
    window: Window,
    document: Document,
}

fn js_error(operation: &'static str) -> impl Fn(JsValue) -> Error {
    move |err| Error::dom(operation, format!("{err:?}"))
}

impl WebDom {
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn collect(list: web_sys::HtmlCollection) -> Vec<Element> {
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, scope: Option<&Element>, class: &str) -> Vec<Element> {
        // HtmlCollection is live; snapshot it before any mutation
        match scope {
            Some(scope) => Self::collect(scope.get_elements_by_class_name(class)),
            None => Self::collect(self.document.get_elements_by_class_name(class)),
        }
    }

    fn elements_by_tag(&self, scope: Option<&Element>, tags: &[&str]) -> Vec<Element> {
        let selector = tags.join(", ");
        let found = match scope {
            Some(scope) => scope.query_selector_all(&selector),
            None => self.document.query_selector_all(&selector),
        };
        let Ok(list) = found else {
            log::warn!("Invalid selector {selector:?}");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn create_element(&mut self, tag: &str) -> Result<Element> {
        self.document
            .create_element(tag)
            .map_err(js_error("create_element"))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(js_error("append_child"))
    }

    fn append_text(&mut self, parent: &Element, text: &str) -> Result<()> {
        let node = self.document.create_text_node(text);
        parent
            .append_child(&node)
            .map(|_| ())
            .map_err(js_error("append_text"))
    }

    fn clear_children(&mut self, node: &Element) -> Result<()> {
        node.set_text_content(None);
        Ok(())
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<()> {
        node.class_list().add_1(class).map_err(js_error("add_class"))
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<()> {
        node.class_list()
            .remove_1(class)
            .map_err(js_error("remove_class"))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value)
            .map_err(js_error("set_attribute"))
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<()> {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return Err(Error::dom("set_style", format!("<{}> has no inline style", node.tag_name())));
        };
        html.style()
            .set_property(property, value)
            .map_err(js_error("set_style"))
    }

    fn listen(&mut self, node: &Element, event: DomEvent, effect: Effect<Element>) -> Result<()> {
        let mut dom = self.clone();
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Err(e) = effect::apply(&mut dom, &effect) {
                log::warn!("{event} handler failed: {e}");
            }
        });
        node.add_event_listener_with_callback(event.as_str(), handler.as_ref().unchecked_ref())
            .map_err(js_error("listen"))?;
        // Listeners live as long as the page
        handler.forget();
        Ok(())
    }

    fn schedule(&mut self, delay_ms: u32, effect: Effect<Element>) -> Result<()> {
        let mut dom = self.clone();
        Timeout::new(delay_ms, move || {
            if let Err(e) = effect::apply(&mut dom, &effect) {
                log::warn!("Scheduled effect failed: {e}");
            }
        })
        .forget();
        Ok(())
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .or_else(|| {
                self.document
                    .document_element()
                    .map(|root| f64::from(root.client_width()))
            })
            .unwrap_or(0.0)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}

//! In-memory [`Dom`] for headless tests.
//!
//! Elements live in an arena indexed by [`NodeId`]. Listeners are recorded and
//! run by [`MemoryDom::dispatch`]; timers are recorded and run by
//! [`MemoryDom::advance`], so staggered reveals can be checked step by step.
//!
//! ```rust
//! use shared::page::Dom;
//! use shared::page::memory::MemoryDom;
//!
//! let mut dom = MemoryDom::with_viewport(800.0, false);
//! let body = dom.body().unwrap();
//! let card = dom.insert(&body, "div", &[("class", "card fade-in"), ("id", "first")]);
//!
//! assert_eq!(dom.element_by_id("first"), Some(card));
//! assert!(dom.has_class(&card, "fade-in"));
//! ```

use std::collections::BTreeMap;

use crate::effect::{self, DomEvent, Effect};
use crate::error::{Error, Result};
use crate::page::Dom;

/// Handle to an element of a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<Child>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    value: String,
    listeners: Vec<(DomEvent, Effect<NodeId>)>,
}

#[derive(Debug)]
struct Timer {
    due_ms: u64,
    seq: usize,
    effect: Effect<NodeId>,
}

/// Arena-backed document with a single `body` root.
#[derive(Debug)]
pub struct MemoryDom {
    elements: Vec<Element>,
    body: NodeId,
    viewport_width: f64,
    reduced_motion: bool,
    now_ms: u64,
    timers: Vec<Timer>,
    timer_seq: usize,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document on a 1280px viewport with no motion preference.
    pub fn new() -> Self {
        Self::with_viewport(1280.0, false)
    }

    pub fn with_viewport(width: f64, reduced_motion: bool) -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        Self {
            elements: vec![body],
            body: NodeId(0),
            viewport_width: width,
            reduced_motion,
            now_ms: 0,
            timers: Vec::new(),
            timer_seq: 0,
        }
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Create `tag` under `parent` with the given attributes (`class` is split into classes).
    pub fn insert(&mut self, parent: &NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.new_element(tag);
        for (name, value) in attributes {
            self.write_attribute(node, name, value);
        }
        self.attach(*parent, node);
        node
    }

    /// Simulate the user typing into a field.
    pub fn set_value(&mut self, node: &NodeId, value: &str) {
        self.element_mut(*node).value = value.to_string();
    }

    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.element(*node).styles.get(property).cloned()
    }

    /// Element children of `node`, in order.
    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.element(*node)
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Element(id) => Some(*id),
                Child::Text(_) => None,
            })
            .collect()
    }

    pub fn listener_count(&self, node: &NodeId, event: DomEvent) -> usize {
        self.element(*node)
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == event)
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Fire `event` on `node`, applying every registered effect in registration order.
    pub fn dispatch(&mut self, node: &NodeId, event: DomEvent) -> Result<()> {
        let effects: Vec<Effect<NodeId>> = self
            .element(*node)
            .listeners
            .iter()
            .filter(|(registered, _)| *registered == event)
            .map(|(_, effect)| effect.clone())
            .collect();
        for effect in &effects {
            effect::apply(self, effect)?;
        }
        Ok(())
    }

    /// Move the clock forward and run every timer that became due, earliest first.
    pub fn advance(&mut self, ms: u64) -> Result<usize> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due_ms <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.due_ms, t.seq));
        for timer in &due {
            effect::apply(self, &timer.effect)?;
        }
        Ok(due.len())
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }

    fn new_element(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        NodeId(self.elements.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.element(child).parent {
            self.element_mut(old)
                .children
                .retain(|c| !matches!(c, Child::Element(id) if *id == child));
        }
        self.element_mut(child).parent = Some(parent);
        self.element_mut(parent).children.push(Child::Element(child));
    }

    fn write_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let element = self.element_mut(node);
        match name {
            "class" => {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "value" => {
                element.value = value.to_string();
                element.attributes.insert(name.to_string(), value.to_string());
            }
            _ => {
                element.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Descendants of `scope` (or of `body`) in document order, excluding the scope itself.
    fn descendants(&self, scope: Option<&NodeId>) -> Vec<NodeId> {
        let root = scope.copied().unwrap_or(self.body);
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(&root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(&node).into_iter().rev());
        }
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for child in &self.element(node).children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(id) => self.collect_text(*id, out),
            }
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(None)
            .into_iter()
            .find(|node| self.element(*node).attributes.get("id").map(String::as_str) == Some(id))
    }

    fn elements_by_class(&self, scope: Option<&NodeId>, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.has_class(node, class))
            .collect()
    }

    fn elements_by_tag(&self, scope: Option<&NodeId>, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| tags.iter().any(|tag| tag.eq_ignore_ascii_case(&self.element(*node).tag)))
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.element(*node).parent
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node).tag.clone()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let element = self.element(*node);
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attributes.get(name).cloned()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node).classes.iter().any(|c| c == class)
    }

    fn value(&self, node: &NodeId) -> String {
        self.element(*node).value.clone()
    }

    fn text_content(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.collect_text(*node, &mut out);
        out
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::dom("create_element", format!("invalid tag name {tag:?}")));
        }
        Ok(self.new_element(tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let mut cursor = Some(*parent);
        while let Some(ancestor) = cursor {
            if ancestor == *child {
                return Err(Error::dom("append_child", "node cannot contain itself or an ancestor"));
            }
            cursor = self.element(ancestor).parent;
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn append_text(&mut self, parent: &NodeId, text: &str) -> Result<()> {
        self.element_mut(*parent).children.push(Child::Text(text.to_string()));
        Ok(())
    }

    fn clear_children(&mut self, node: &NodeId) -> Result<()> {
        let removed = std::mem::take(&mut self.element_mut(*node).children);
        for child in removed {
            if let Child::Element(id) = child {
                self.element_mut(id).parent = None;
            }
        }
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<()> {
        let element = self.element_mut(*node);
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<()> {
        self.element_mut(*node).classes.retain(|c| c != class);
        Ok(())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        self.write_attribute(*node, name, value);
        Ok(())
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<()> {
        self.element_mut(*node)
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn listen(&mut self, node: &NodeId, event: DomEvent, effect: Effect<NodeId>) -> Result<()> {
        self.element_mut(*node).listeners.push((event, effect));
        Ok(())
    }

    fn schedule(&mut self, delay_ms: u32, effect: Effect<NodeId>) -> Result<()> {
        self.timers.push(Timer {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.timer_seq,
            effect,
        });
        self.timer_seq += 1;
        Ok(())
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let outer = dom.insert(&body, "div", &[("class", "x")]);
        let inner = dom.insert(&outer, "span", &[("class", "x")]);
        let after = dom.insert(&body, "p", &[("class", "x")]);

        assert_eq!(dom.elements_by_class(None, "x"), vec![outer, inner, after]);
        assert_eq!(dom.elements_by_class(Some(&outer), "x"), vec![inner]);
    }

    #[test]
    fn test_clear_children_detaches() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let container = dom.insert(&body, "div", &[]);
        let child = dom.insert(&container, "a", &[("id", "gone")]);
        dom.append_text(&container, "hello").unwrap();

        dom.clear_children(&container).unwrap();

        assert!(dom.children(&container).is_empty());
        assert_eq!(dom.text_content(&container), "");
        assert_eq!(dom.parent(&child), None);
        assert_eq!(dom.element_by_id("gone"), None);
    }

    #[test]
    fn test_timers_run_when_due() {
        let mut dom = MemoryDom::new();
        let node = dom.create_element("div").unwrap();
        dom.schedule(200, Effect::add_class(node, "late")).unwrap();
        dom.schedule(0, Effect::add_class(node, "early")).unwrap();

        assert_eq!(dom.advance(0).unwrap(), 1);
        assert!(dom.has_class(&node, "early"));
        assert!(!dom.has_class(&node, "late"));

        assert_eq!(dom.advance(200).unwrap(), 1);
        assert!(dom.has_class(&node, "late"));
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let outer = dom.insert(&body, "div", &[("class", "x")]);
        let inner = dom.insert(&outer, "span", &[("class", "x")]);

        assert!(dom.append_child(&inner, &inner).is_err());
        assert!(dom.append_child(&inner, &outer).is_err());
        assert!(dom.append_child(&inner, &body).is_err());
        assert_eq!(dom.parent(&outer), Some(body));
        assert_eq!(dom.elements_by_class(None, "x"), vec![outer, inner]);

        // Moving a node under a sibling subtree is still allowed.
        let other = dom.insert(&body, "p", &[]);
        dom.append_child(&other, &inner).unwrap();
        assert_eq!(dom.parent(&inner), Some(other));
    }

    #[test]
    fn test_rejects_invalid_tag() {
        let mut dom = MemoryDom::new();
        assert!(dom.create_element("not a tag").is_err());
    }

    #[test]
    fn test_class_attribute_round_trip() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let node = dom.insert(&body, "div", &[("class", "a  b")]);
        assert_eq!(dom.attribute(&node, "class").as_deref(), Some("a b"));
        dom.remove_class(&node, "a").unwrap();
        assert_eq!(dom.attribute(&node, "class").as_deref(), Some("b"));
    }
}

//! # Page Abstraction
//!
//! [`Dom`] is the only way the enhancements touch the page. The browser crate
//! implements it over `web-sys`; [`memory::MemoryDom`] implements it in
//! memory so every behavior can be exercised by plain `cargo test`.
//!
//! Lookups return `Option`/`Vec` because a missing element is an expected,
//! silent no-op. Writes return [`Result`] so a rejected DOM call can be logged.

pub mod memory;

use std::fmt::Debug;

use crate::effect::{DomEvent, Effect};
use crate::error::Result;

/// Document and viewport capability injected into every enhancement.
pub trait Dom {
    /// Handle to an element. Cheap to clone and compare.
    type Node: Clone + PartialEq + Debug + 'static;

    // -- Lookup
    fn body(&self) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Elements carrying `class`, in document order, below `scope` (or the whole document).
    fn elements_by_class(&self, scope: Option<&Self::Node>, class: &str) -> Vec<Self::Node>;
    /// Elements whose tag is any of `tags`, in document order, below `scope`.
    fn elements_by_tag(&self, scope: Option<&Self::Node>, tags: &[&str]) -> Vec<Self::Node>;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn first_by_class(&self, scope: Option<&Self::Node>, class: &str) -> Option<Self::Node> {
        self.elements_by_class(scope, class).into_iter().next()
    }

    // -- Reads
    /// Lower-case tag name.
    fn tag_name(&self, node: &Self::Node) -> String;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Current value of a form field; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;
    fn text_content(&self, node: &Self::Node) -> String;

    // -- Writes
    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;
    /// Append `text` as a text node, never parsed as markup.
    fn append_text(&mut self, parent: &Self::Node, text: &str) -> Result<()>;
    fn clear_children(&mut self, node: &Self::Node) -> Result<()>;
    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<()>;
    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<()>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()>;
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str) -> Result<()>;

    fn set_styles(&mut self, node: &Self::Node, styles: &[(&str, &str)]) -> Result<()> {
        for (property, value) in styles {
            self.set_style(node, property, value)?;
        }
        Ok(())
    }

    // -- Wiring
    /// Attach an additive listener applying `effect` every time `event` fires on `node`.
    fn listen(&mut self, node: &Self::Node, event: DomEvent, effect: Effect<Self::Node>) -> Result<()>;
    /// Apply `effect` once after `delay_ms`. Fire-and-forget.
    fn schedule(&mut self, delay_ms: u32, effect: Effect<Self::Node>) -> Result<()>;

    // -- Environment
    fn viewport_width(&self) -> f64;
    /// `false` when the media-query capability is unavailable.
    fn prefers_reduced_motion(&self) -> bool;
}

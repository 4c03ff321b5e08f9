//! # Declarative DOM Effects
//!
//! Listeners and timers never run arbitrary code. Each one carries an
//! [`Effect`] value describing the mutation to perform, and the page
//! implementation calls [`apply`] when the event fires. This keeps the
//! enhancement logic a plain table of [`Binding`]s that can be inspected in
//! tests without a browser.

use std::fmt;

use crate::error::Result;
use crate::page::Dom;

/// Events the enhancements listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Focus,
    Blur,
    MouseEnter,
    MouseLeave,
    Click,
}

impl DomEvent {
    /// Name used by `addEventListener`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomEvent::Focus => "focus",
            DomEvent::Blur => "blur",
            DomEvent::MouseEnter => "mouseenter",
            DomEvent::MouseLeave => "mouseleave",
            DomEvent::Click => "click",
        }
    }
}

impl fmt::Display for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single DOM mutation, parameterised over the page's node handle.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<N> {
    AddClass { node: N, class: String },
    RemoveClass { node: N, class: String },
    /// Remove `class` from `node` only when `field` currently has an empty value.
    RemoveClassIfEmpty { field: N, node: N, class: String },
    SetStyle { node: N, property: &'static str, value: String },
    Batch(Vec<Effect<N>>),
}

impl<N> Effect<N> {
    pub fn add_class(node: N, class: impl Into<String>) -> Self {
        Effect::AddClass { node, class: class.into() }
    }

    pub fn remove_class(node: N, class: impl Into<String>) -> Self {
        Effect::RemoveClass { node, class: class.into() }
    }

    pub fn set_style(node: N, property: &'static str, value: impl Into<String>) -> Self {
        Effect::SetStyle { node, property, value: value.into() }
    }
}

/// One row of a listener table: when `event` fires on `node`, apply `effect`.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding<N> {
    pub node: N,
    pub event: DomEvent,
    pub effect: Effect<N>,
}

impl<N> Binding<N> {
    pub fn new(node: N, event: DomEvent, effect: Effect<N>) -> Self {
        Self { node, event, effect }
    }
}

/// Attach every binding in `table` to the page.
pub fn attach<D: Dom>(dom: &mut D, table: Vec<Binding<D::Node>>) -> Result<usize> {
    let count = table.len();
    for binding in table {
        dom.listen(&binding.node, binding.event, binding.effect)?;
    }
    Ok(count)
}

/// Execute `effect` against the page.
pub fn apply<D: Dom>(dom: &mut D, effect: &Effect<D::Node>) -> Result<()> {
    match effect {
        Effect::AddClass { node, class } => dom.add_class(node, class),
        Effect::RemoveClass { node, class } => dom.remove_class(node, class),
        Effect::RemoveClassIfEmpty { field, node, class } => {
            if dom.value(field).is_empty() {
                dom.remove_class(node, class)
            } else {
                Ok(())
            }
        }
        Effect::SetStyle { node, property, value } => dom.set_style(node, property, value),
        Effect::Batch(effects) => {
            for inner in effects {
                apply(dom, inner)?;
            }
            Ok(())
        }
    }
}

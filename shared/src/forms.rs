//! # Form Field Enhancements
//!
//! Cosmetic focus styling for the site's forms, expressed as a listener table
//! ([`bindings`]) so the wiring can be checked without firing real events.
//!
//! - every text-like field toggles `input-focused` on its parent while focused
//! - inside a `form-group`, the label is raised while the field is focused and
//!   stays raised after blur when the field holds a value

use crate::config::CelestialConfig;
use crate::effect::{self, Binding, DomEvent, Effect};
use crate::error::Result;
use crate::page::Dom;

const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];
const SKIPPED_INPUT_TYPES: &[&str] = &["checkbox", "radio"];

/// What [`enhance`] attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormReport {
    pub fields: usize,
    pub groups: usize,
    /// Labels raised at setup because their field was pre-filled.
    pub prefilled: usize,
}

/// Text-like fields: inputs other than checkboxes and radios, text areas, selects.
pub fn text_fields<D: Dom>(dom: &D, scope: Option<&D::Node>) -> Vec<D::Node> {
    dom.elements_by_tag(scope, FIELD_TAGS)
        .into_iter()
        .filter(|node| !is_toggle_input(dom, node))
        .collect()
}

fn is_toggle_input<D: Dom>(dom: &D, node: &D::Node) -> bool {
    dom.tag_name(node) == "input"
        && dom
            .attribute(node, "type")
            .map(|kind| SKIPPED_INPUT_TYPES.iter().any(|skip| kind.eq_ignore_ascii_case(skip)))
            .unwrap_or(false)
}

/// A form group's first field and first label, if it has both.
pub fn group_parts<D: Dom>(dom: &D, group: &D::Node) -> Option<(D::Node, D::Node)> {
    let field = dom.elements_by_tag(Some(group), FIELD_TAGS).into_iter().next()?;
    let label = dom.elements_by_tag(Some(group), &["label"]).into_iter().next()?;
    Some((field, label))
}

/// Listener table for every field and form group on the page.
pub fn bindings<D: Dom>(dom: &D, config: &CelestialConfig) -> Vec<Binding<D::Node>> {
    let mut table = Vec::new();

    for field in text_fields(dom, None) {
        let Some(parent) = dom.parent(&field) else {
            continue;
        };
        table.push(Binding::new(
            field.clone(),
            DomEvent::Focus,
            Effect::add_class(parent.clone(), &config.input_focused_class),
        ));
        table.push(Binding::new(
            field,
            DomEvent::Blur,
            Effect::remove_class(parent, &config.input_focused_class),
        ));
    }

    for group in dom.elements_by_class(None, &config.form_group_class) {
        let Some((field, label)) = group_parts(dom, &group) else {
            continue;
        };
        table.push(Binding::new(
            field.clone(),
            DomEvent::Focus,
            Effect::add_class(label.clone(), &config.label_focused_class),
        ));
        table.push(Binding::new(
            field.clone(),
            DomEvent::Blur,
            Effect::RemoveClassIfEmpty {
                field,
                node: label,
                class: config.label_focused_class.clone(),
            },
        ));
    }

    table
}

/// Attach the listener table and raise labels of pre-filled fields.
pub fn enhance<D: Dom>(dom: &mut D, config: &CelestialConfig) -> Result<FormReport> {
    let table = bindings(&*dom, config);
    let fields = table
        .iter()
        .filter(|b| matches!(&b.effect, Effect::AddClass { class, .. } if *class == config.input_focused_class))
        .count();
    effect::attach(dom, table)?;

    let mut report = FormReport { fields, ..FormReport::default() };
    for group in dom.elements_by_class(None, &config.form_group_class) {
        let Some((field, label)) = group_parts(dom, &group) else {
            continue;
        };
        report.groups += 1;
        if !dom.value(&field).is_empty() {
            dom.add_class(&label, &config.label_focused_class)?;
            report.prefilled += 1;
        }
    }

    log::debug!(
        "Enhanced {} fields and {} form groups ({} pre-filled)",
        report.fields,
        report.groups,
        report.prefilled
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::{MemoryDom, NodeId};

    struct Group {
        wrapper: NodeId,
        label: NodeId,
        input: NodeId,
    }

    fn form_group(dom: &mut MemoryDom, value: &str) -> Group {
        let body = dom.body().unwrap();
        let wrapper = dom.insert(&body, "div", &[("class", "form-group")]);
        let label = dom.insert(&wrapper, "label", &[("for", "name")]);
        let input = dom.insert(&wrapper, "input", &[("type", "text"), ("id", "name"), ("value", value)]);
        Group { wrapper, label, input }
    }

    #[test]
    fn test_skips_checkboxes_and_radios() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let text = dom.insert(&body, "input", &[("type", "text")]);
        dom.insert(&body, "input", &[("type", "checkbox")]);
        dom.insert(&body, "input", &[("type", "RADIO")]);
        let area = dom.insert(&body, "textarea", &[]);
        let select = dom.insert(&body, "select", &[]);
        let untyped = dom.insert(&body, "input", &[]);

        assert_eq!(text_fields(&dom, None), vec![text, area, select, untyped]);
    }

    #[test]
    fn test_focus_marks_parent() {
        let mut dom = MemoryDom::new();
        let group = form_group(&mut dom, "");
        let config = CelestialConfig::default();
        enhance(&mut dom, &config).unwrap();

        dom.dispatch(&group.input, DomEvent::Focus).unwrap();
        assert!(dom.has_class(&group.wrapper, "input-focused"));
        assert!(dom.has_class(&group.label, "label-focused"));

        dom.dispatch(&group.input, DomEvent::Blur).unwrap();
        assert!(!dom.has_class(&group.wrapper, "input-focused"));
        assert!(!dom.has_class(&group.label, "label-focused"));
    }

    #[test]
    fn test_prefilled_label_raised_without_focus() {
        let mut dom = MemoryDom::new();
        let group = form_group(&mut dom, "Jane");
        let report = enhance(&mut dom, &CelestialConfig::default()).unwrap();

        assert!(dom.has_class(&group.label, "label-focused"));
        assert_eq!(report.prefilled, 1);
    }

    #[test]
    fn test_filled_field_keeps_label_after_blur() {
        let mut dom = MemoryDom::new();
        let group = form_group(&mut dom, "");
        enhance(&mut dom, &CelestialConfig::default()).unwrap();

        dom.dispatch(&group.input, DomEvent::Focus).unwrap();
        dom.set_value(&group.input, "X");
        dom.dispatch(&group.input, DomEvent::Blur).unwrap();

        assert!(dom.has_class(&group.label, "label-focused"));
        assert!(!dom.has_class(&group.wrapper, "input-focused"));
    }

    #[test]
    fn test_group_without_label_is_skipped() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let wrapper = dom.insert(&body, "div", &[("class", "form-group")]);
        dom.insert(&wrapper, "textarea", &[]);

        let report = enhance(&mut dom, &CelestialConfig::default()).unwrap();
        assert_eq!(report, FormReport { fields: 1, groups: 0, prefilled: 0 });
    }

    #[test]
    fn test_binding_table_shape() {
        let mut dom = MemoryDom::new();
        let group = form_group(&mut dom, "");
        let table = bindings(&dom, &CelestialConfig::default());

        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|b| b.node == group.input));
        assert_eq!(
            table[3].effect,
            Effect::RemoveClassIfEmpty {
                field: group.input,
                node: group.label,
                class: "label-focused".to_string(),
            }
        );
    }

    #[test]
    fn test_listeners_are_additive() {
        let mut dom = MemoryDom::new();
        let group = form_group(&mut dom, "");
        dom.listen(&group.input, DomEvent::Focus, Effect::add_class(group.input, "existing"))
            .unwrap();

        enhance(&mut dom, &CelestialConfig::default()).unwrap();

        assert_eq!(dom.listener_count(&group.input, DomEvent::Focus), 3);
        dom.dispatch(&group.input, DomEvent::Focus).unwrap();
        assert!(dom.has_class(&group.input, "existing"));
    }
}

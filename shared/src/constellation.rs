//! # Constellation View
//!
//! Alternate presentation of the memorial listing: each record rendered in the
//! page markup becomes a gold point scattered over the constellation container,
//! with a tooltip revealed on hover.
//!
//! ## State
//!
//! The view is a two-state machine held explicitly in [`ConstellationView`]:
//!
//! ```text
//! Standard ──toggle──▶ Constellation   (hide list, show container, repopulate)
//!     ▲                      │
//!     └───────toggle─────────┘          (show list, hide container, keep markers)
//! ```
//!
//! [`transition`] is pure: it maps the current mode to the next mode plus the
//! effects to apply, so the state machine is testable without a page. Every
//! entry into the constellation clears the container and places every marker
//! again at fresh random positions.

use crate::config::CelestialConfig;
use crate::effect::{self, Binding, DomEvent, Effect};
use crate::error::Result;
use crate::page::Dom;
use crate::random::RandomSource;

const MARKER_SIZE: &str = "12px";
const MARKER_GLOW: &str = "0 0 10px rgba(212, 175, 55, 0.6)";
const MARKER_GLOW_HOVER: &str = "0 0 20px rgba(212, 175, 55, 0.9)";
const TOOLTIP_REST: &str = "translateX(-50%) translateY(15px)";
const TOOLTIP_HOVER: &str = "translateX(-50%) translateY(10px)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Standard,
    Constellation,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Standard => ViewMode::Constellation,
            ViewMode::Constellation => ViewMode::Standard,
        }
    }
}

/// Content of the toggle control: an icon and a caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLabel {
    pub icon_class: &'static str,
    pub text: &'static str,
}

/// Shown while the constellation is visible.
pub const BACK_TO_STANDARD: ToggleLabel = ToggleLabel {
    icon_class: "fas fa-th-large mr-2",
    text: "Standard View",
};

/// Shown while the standard list is visible.
pub const TO_CONSTELLATION: ToggleLabel = ToggleLabel {
    icon_class: "fas fa-stars mr-2",
    text: "Constellation View",
};

/// The three elements the view needs. All must exist for the view to work.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNodes<N> {
    pub standard: N,
    pub constellation: N,
    pub toggle: N,
}

impl<N> ViewNodes<N> {
    pub fn resolve<D: Dom<Node = N>>(dom: &D, config: &CelestialConfig) -> Option<Self> {
        Some(Self {
            standard: dom.element_by_id(&config.standard_view_id)?,
            constellation: dom.element_by_id(&config.constellation_view_id)?,
            toggle: dom.element_by_id(&config.view_toggle_id)?,
        })
    }
}

/// Result of one toggle: the next mode and what must change on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<N> {
    pub next: ViewMode,
    pub effects: Vec<Effect<N>>,
    pub label: ToggleLabel,
    /// Whether the constellation container must be cleared and refilled.
    pub repopulate: bool,
}

pub fn transition<N: Clone>(mode: ViewMode, nodes: &ViewNodes<N>, config: &CelestialConfig) -> Transition<N> {
    let hidden = &config.hidden_class;
    match mode {
        ViewMode::Standard => Transition {
            next: mode.toggled(),
            effects: vec![
                Effect::add_class(nodes.standard.clone(), hidden),
                Effect::remove_class(nodes.constellation.clone(), hidden),
            ],
            label: BACK_TO_STANDARD,
            repopulate: true,
        },
        ViewMode::Constellation => Transition {
            next: mode.toggled(),
            effects: vec![
                Effect::remove_class(nodes.standard.clone(), hidden),
                Effect::add_class(nodes.constellation.clone(), hidden),
            ],
            label: TO_CONSTELLATION,
            repopulate: false,
        },
    }
}

/// A memorial as exposed by the listing markup through `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorialRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub year: Option<String>,
}

impl MemorialRecord {
    pub fn from_element<D: Dom>(dom: &D, node: &D::Node) -> Self {
        Self {
            id: dom.attribute(node, "data-id").unwrap_or_default(),
            name: dom.attribute(node, "data-name").unwrap_or_default(),
            url: dom.attribute(node, "data-url").unwrap_or_else(|| "#".to_string()),
            year: dom
                .attribute(node, "data-year")
                .filter(|year| !year.trim().is_empty()),
        }
    }
}

/// Every memorial record in the page, in document order.
pub fn collect_records<D: Dom>(dom: &D, config: &CelestialConfig) -> Vec<MemorialRecord> {
    dom.elements_by_class(None, &config.memorial_data_class)
        .iter()
        .map(|node| MemorialRecord::from_element(dom, node))
        .collect()
}

/// Marker position in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub x: f64,
    pub y: f64,
}

impl MarkerPosition {
    /// Uniform position keeping `margin` percent clear of every edge.
    pub fn random(rng: &mut impl RandomSource, margin: f64) -> Self {
        let x = rng.range(margin, 100.0 - margin);
        let y = rng.range(margin, 100.0 - margin);
        Self { x, y }
    }
}

fn hover_bindings<N: Clone>(marker: &N, tooltip: &N) -> [Binding<N>; 2] {
    let enter = Effect::Batch(vec![
        Effect::set_style(marker.clone(), "transform", "scale(1.8)"),
        Effect::set_style(marker.clone(), "box-shadow", MARKER_GLOW_HOVER),
        Effect::set_style(tooltip.clone(), "opacity", "1"),
        Effect::set_style(tooltip.clone(), "transform", TOOLTIP_HOVER),
    ]);
    let leave = Effect::Batch(vec![
        Effect::set_style(marker.clone(), "transform", "scale(1)"),
        Effect::set_style(marker.clone(), "box-shadow", MARKER_GLOW),
        Effect::set_style(tooltip.clone(), "opacity", "0"),
        Effect::set_style(tooltip.clone(), "transform", TOOLTIP_REST),
    ]);
    [
        Binding::new(marker.clone(), DomEvent::MouseEnter, enter),
        Binding::new(marker.clone(), DomEvent::MouseLeave, leave),
    ]
}

fn build_tooltip<D: Dom>(dom: &mut D, record: &MemorialRecord, config: &CelestialConfig) -> Result<D::Node> {
    let tooltip = dom.create_element("div")?;
    dom.add_class(&tooltip, &config.tooltip_class)?;
    dom.set_styles(
        &tooltip,
        &[
            ("position", "absolute"),
            ("background", "rgba(18, 23, 56, 0.9)"),
            ("padding", "8px 15px"),
            ("border-radius", "8px"),
            ("color", "#fffff0"),
            ("width", "150px"),
            ("left", "50%"),
            ("transform", TOOLTIP_REST),
            ("opacity", "0"),
            ("pointer-events", "none"),
            ("transition", "all 0.3s ease"),
            ("z-index", "10"),
            ("border", "1px solid rgba(212, 175, 55, 0.3)"),
        ],
    )?;

    dom.append_text(&tooltip, &record.name)?;
    if let Some(year) = &record.year {
        let line_break = dom.create_element("br")?;
        dom.append_child(&tooltip, &line_break)?;
        let year_line = dom.create_element("span")?;
        dom.set_styles(&year_line, &[("font-size", "0.8rem"), ("color", "#e6e6fa")])?;
        dom.append_text(&year_line, year)?;
        dom.append_child(&tooltip, &year_line)?;
    }
    Ok(tooltip)
}

/// Create one marker anchor, with its tooltip and hover listeners, under `container`.
pub fn place_marker<D: Dom>(
    dom: &mut D,
    container: &D::Node,
    record: &MemorialRecord,
    position: MarkerPosition,
    config: &CelestialConfig,
) -> Result<D::Node> {
    let marker = dom.create_element("a")?;
    dom.set_attribute(&marker, "href", &record.url)?;
    dom.set_attribute(&marker, "data-id", &record.id)?;
    dom.add_class(&marker, &config.marker_class)?;

    let left = format!("{}%", position.x);
    let top = format!("{}%", position.y);
    dom.set_styles(
        &marker,
        &[
            ("position", "absolute"),
            ("left", left.as_str()),
            ("top", top.as_str()),
            ("width", MARKER_SIZE),
            ("height", MARKER_SIZE),
            ("background", "rgba(212, 175, 55, 0.8)"),
            ("border-radius", "50%"),
            ("box-shadow", MARKER_GLOW),
            ("transform", "scale(1)"),
            ("transition", "all 0.3s ease"),
        ],
    )?;

    let tooltip = build_tooltip(dom, record, config)?;
    dom.append_child(&marker, &tooltip)?;
    effect::attach(dom, hover_bindings(&marker, &tooltip).into())?;

    dom.append_child(container, &marker)?;
    Ok(marker)
}

/// Clear `container` and scatter one marker per memorial record over it.
pub fn populate<D: Dom>(
    dom: &mut D,
    container: &D::Node,
    rng: &mut impl RandomSource,
    config: &CelestialConfig,
) -> Result<usize> {
    dom.clear_children(container)?;
    let records = collect_records(&*dom, config);
    for record in &records {
        let position = MarkerPosition::random(rng, config.constellation_margin_pct);
        place_marker(dom, container, record, position, config)?;
    }
    log::debug!("Constellation populated with {} memorials", records.len());
    Ok(records.len())
}

/// Replace the toggle control's content with `label`.
pub fn relabel<D: Dom>(dom: &mut D, toggle: &D::Node, label: ToggleLabel) -> Result<()> {
    dom.clear_children(toggle)?;
    let icon = dom.create_element("i")?;
    dom.set_attribute(&icon, "class", label.icon_class)?;
    dom.append_child(toggle, &icon)?;
    dom.append_text(toggle, &format!(" {}", label.text))
}

/// Toggle controller for one page.
#[derive(Debug, Clone)]
pub struct ConstellationView<N> {
    nodes: ViewNodes<N>,
    mode: ViewMode,
    config: CelestialConfig,
}

impl<N: Clone + PartialEq + std::fmt::Debug + 'static> ConstellationView<N> {
    /// Resolve the view's elements. `None` when any is missing, making toggling a no-op.
    ///
    /// The starting mode is read once from the container's hidden class, so a
    /// page rendered with the constellation already visible toggles back first.
    pub fn attach<D: Dom<Node = N>>(dom: &D, config: &CelestialConfig) -> Option<Self> {
        let nodes = ViewNodes::resolve(dom, config)?;
        let mode = if dom.has_class(&nodes.constellation, &config.hidden_class) {
            ViewMode::Standard
        } else {
            ViewMode::Constellation
        };
        Some(Self {
            nodes,
            mode,
            config: config.clone(),
        })
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn nodes(&self) -> &ViewNodes<N> {
        &self.nodes
    }

    /// Switch to the other mode and return it.
    ///
    /// The mode follows the page as soon as visibility and label are switched.
    /// A failed repopulation is logged and leaves the container partly filled;
    /// the next toggle still returns to the standard view.
    pub fn toggle<D: Dom<Node = N>>(&mut self, dom: &mut D, rng: &mut impl RandomSource) -> Result<ViewMode> {
        let step = transition(self.mode, &self.nodes, &self.config);
        for change in &step.effects {
            effect::apply(dom, change)?;
        }
        relabel(dom, &self.nodes.toggle, step.label)?;
        self.mode = step.next;
        log::info!("View switched to {:?}", self.mode);

        if step.repopulate {
            if let Err(e) = populate(dom, &self.nodes.constellation, rng, &self.config) {
                log::warn!("Constellation markers could not be placed: {e}");
            }
        }
        Ok(self.mode)
    }
}

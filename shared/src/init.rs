//! Page start-up sequence.
//!
//! Runs once when the document is ready. Each behavior is independent: a
//! failure in one is logged and the next still runs.

use crate::config::CelestialConfig;
use crate::constellation::ConstellationView;
use crate::effect::Effect;
use crate::error::Result;
use crate::forms::{self, FormReport};
use crate::page::Dom;
use crate::random::RandomSource;
use crate::starfield::{self, StarfieldOutcome};

/// Summary of what [`initialize`] set up.
#[derive(Debug, Clone)]
pub struct InitReport<N> {
    pub faded: usize,
    pub starfield: Option<StarfieldOutcome>,
    pub forms: Option<FormReport>,
    /// Dormant toggle controller, present when the listing page has both views.
    pub constellation: Option<ConstellationView<N>>,
}

/// Schedule the staggered reveal of every fade-in element: element `i` appears after `step × i` ms.
pub fn schedule_fade_in<D: Dom>(dom: &mut D, config: &CelestialConfig) -> Result<usize> {
    let elements = dom.elements_by_class(None, &config.fade_in_class);
    for (index, element) in elements.iter().enumerate() {
        let delay = config.fade_step_ms.saturating_mul(index as u32);
        dom.schedule(delay, Effect::set_style(element.clone(), "opacity", "1"))?;
    }
    Ok(elements.len())
}

pub fn initialize<D: Dom>(
    dom: &mut D,
    rng: &mut impl RandomSource,
    config: &CelestialConfig,
) -> InitReport<D::Node> {
    let faded = schedule_fade_in(dom, config).unwrap_or_else(|e| {
        log::warn!("Fade-in setup failed: {e}");
        0
    });

    let starfield = starfield::create_starfield(dom, rng, config)
        .map_err(|e| log::warn!("Starfield setup failed: {e}"))
        .ok();

    let forms = forms::enhance(dom, config)
        .map_err(|e| log::warn!("Form enhancement failed: {e}"))
        .ok();

    let constellation = ConstellationView::attach(&*dom, config);
    if constellation.is_none() {
        log::debug!("No constellation view on this page");
    }

    log::info!(
        "Celestial theme ready: {faded} fade-ins, starfield {:?}, constellation {}",
        starfield,
        if constellation.is_some() { "available" } else { "absent" }
    );

    InitReport {
        faded,
        starfield,
        forms,
        constellation,
    }
}

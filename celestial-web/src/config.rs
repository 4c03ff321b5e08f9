//! Page-level theme overrides
//!
//! A template may embed
//! `<script type="application/json" id="celestial-config">{ ... }</script>`
//! to override any field of [`CelestialConfig`]. Invalid blocks are logged and ignored.

use shared::page::Dom;
use shared::CelestialConfig;

pub const CONFIG_ELEMENT_ID: &str = "celestial-config";

pub fn load<D: Dom>(dom: &D) -> CelestialConfig {
    let Some(block) = dom.element_by_id(CONFIG_ELEMENT_ID) else {
        return CelestialConfig::default();
    };
    match CelestialConfig::from_json(&dom.text_content(&block)) {
        Ok(config) => {
            log::info!("Loaded theme overrides from #{CONFIG_ELEMENT_ID}");
            config
        }
        Err(e) => {
            log::warn!("Ignoring #{CONFIG_ELEMENT_ID}: {e}");
            CelestialConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::page::memory::MemoryDom;

    #[test]
    fn test_defaults_without_block() {
        let dom = MemoryDom::new();
        assert_eq!(load(&dom), CelestialConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let block = dom.insert(&body, "script", &[("id", CONFIG_ELEMENT_ID)]);
        dom.append_text(&block, r#"{ "fade_step_ms": 250 }"#).unwrap();

        assert_eq!(load(&dom).fade_step_ms, 250);
    }

    #[test]
    fn test_invalid_block_falls_back() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let block = dom.insert(&body, "script", &[("id", CONFIG_ELEMENT_ID)]);
        dom.append_text(&block, r#"{ "reduced_motion_factor": 4 }"#).unwrap();

        assert_eq!(load(&dom), CelestialConfig::default());
    }
}

//! # Theme Configuration
//!
//! Class names, element ids and tuning values shared by every enhancement.
//! [`CelestialConfig::default`] matches the markup rendered by the memorial
//! site templates; a page may override any subset of fields with a JSON
//! block, which is parsed by [`CelestialConfig::from_json`].
//!
//! ```rust
//! use shared::config::CelestialConfig;
//!
//! let config = CelestialConfig::from_json(r#"{ "fade_step_ms": 50 }"#).unwrap();
//! assert_eq!(config.fade_step_ms, 50);
//! assert_eq!(config.starfield_class, "star-field");
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

/// Theme configuration. Missing JSON fields take their default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CelestialConfig {
    // -- Fade-in
    pub fade_in_class: String,
    /// Delay between consecutive reveals, in milliseconds.
    pub fade_step_ms: u32,

    // -- Starfield
    pub starfield_class: String,
    /// Viewports narrower than this get [`small_star_count`](Self::small_star_count).
    pub small_breakpoint_px: f64,
    /// Viewports narrower than this (and not small) get [`medium_star_count`](Self::medium_star_count).
    pub medium_breakpoint_px: f64,
    pub small_star_count: u32,
    pub medium_star_count: u32,
    pub large_star_count: u32,
    /// Multiplier applied to the star count under a reduced-motion preference.
    pub reduced_motion_factor: f64,

    // -- Form fields
    pub input_focused_class: String,
    pub form_group_class: String,
    pub label_focused_class: String,

    // -- Constellation view
    pub standard_view_id: String,
    pub constellation_view_id: String,
    pub view_toggle_id: String,
    pub hidden_class: String,
    pub memorial_data_class: String,
    pub marker_class: String,
    pub tooltip_class: String,
    /// Distance kept between markers and the container edges, in percent.
    pub constellation_margin_pct: f64,
}

impl Default for CelestialConfig {
    fn default() -> Self {
        Self {
            fade_in_class: "fade-in".to_string(),
            fade_step_ms: 100,

            starfield_class: "star-field".to_string(),
            small_breakpoint_px: 640.0,
            medium_breakpoint_px: 1024.0,
            small_star_count: 45,
            medium_star_count: 70,
            large_star_count: 100,
            reduced_motion_factor: 0.6,

            input_focused_class: "input-focused".to_string(),
            form_group_class: "form-group".to_string(),
            label_focused_class: "label-focused".to_string(),

            standard_view_id: "standard-view".to_string(),
            constellation_view_id: "constellation-view".to_string(),
            view_toggle_id: "view-toggle".to_string(),
            hidden_class: "hidden".to_string(),
            memorial_data_class: "memorial-data".to_string(),
            marker_class: "memorial-star".to_string(),
            tooltip_class: "tooltip".to_string(),
            constellation_margin_pct: 10.0,
        }
    }
}

impl CelestialConfig {
    /// Parse a JSON override block and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("fade_in_class", &self.fade_in_class),
            ("starfield_class", &self.starfield_class),
            ("input_focused_class", &self.input_focused_class),
            ("form_group_class", &self.form_group_class),
            ("label_focused_class", &self.label_focused_class),
            ("standard_view_id", &self.standard_view_id),
            ("constellation_view_id", &self.constellation_view_id),
            ("view_toggle_id", &self.view_toggle_id),
            ("hidden_class", &self.hidden_class),
            ("memorial_data_class", &self.memorial_data_class),
            ("marker_class", &self.marker_class),
            ("tooltip_class", &self.tooltip_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!("{field} must be a single token, got {value:?}")));
            }
        }

        if !(self.small_breakpoint_px > 0.0 && self.small_breakpoint_px < self.medium_breakpoint_px) {
            return Err(Error::Config(format!(
                "breakpoints must satisfy 0 < small ({}) < medium ({})",
                self.small_breakpoint_px, self.medium_breakpoint_px
            )));
        }

        if !(self.reduced_motion_factor > 0.0 && self.reduced_motion_factor <= 1.0) {
            return Err(Error::Config(format!(
                "reduced_motion_factor must be in (0, 1], got {}",
                self.reduced_motion_factor
            )));
        }

        if !(0.0..50.0).contains(&self.constellation_margin_pct) {
            return Err(Error::Config(format!(
                "constellation_margin_pct must be in [0, 50), got {}",
                self.constellation_margin_pct
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CelestialConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = CelestialConfig::from_json(r#"{ "large_star_count": 150 }"#).unwrap();
        assert_eq!(config.large_star_count, 150);
        assert_eq!(config.medium_star_count, 70);
        assert_eq!(config.hidden_class, "hidden");
    }

    #[test]
    fn test_rejects_empty_class_name() {
        let err = CelestialConfig::from_json(r#"{ "hidden_class": " " }"#).unwrap_err();
        assert!(err.to_string().contains("hidden_class"));
    }

    #[test]
    fn test_rejects_class_name_with_whitespace() {
        for json in [
            r#"{ "hidden_class": "is hidden" }"#,
            r#"{ "marker_class": "memorial-star\t" }"#,
            r#"{ "view_toggle_id": "view toggle" }"#,
        ] {
            let result = CelestialConfig::from_json(json);
            assert!(matches!(result, Err(Error::Config(ref msg)) if msg.contains("single token")), "{json}");
        }
    }

    #[test]
    fn test_rejects_inverted_breakpoints() {
        let result = CelestialConfig::from_json(
            r#"{ "small_breakpoint_px": 1200, "medium_breakpoint_px": 800 }"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_factor_and_margin() {
        assert!(CelestialConfig::from_json(r#"{ "reduced_motion_factor": 0 }"#).is_err());
        assert!(CelestialConfig::from_json(r#"{ "constellation_margin_pct": 50 }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = CelestialConfig::from_json("{ not json");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }
}

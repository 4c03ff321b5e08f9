//! Starfield Background
//! Fills a fixed, click-through overlay behind the page with twinkling stars.

use crate::config::CelestialConfig;
use crate::error::Result;
use crate::page::Dom;
use crate::random::RandomSource;

const OVERLAY_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
    ("opacity", "0.7"),
];

/// One decorative dot. Positions are percentages of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Diameter in px.
    pub size: f64,
    pub opacity: f64,
    /// Twinkle period in seconds, absent under reduced motion.
    pub twinkle_secs: Option<f64>,
}

impl Star {
    pub fn generate(rng: &mut impl RandomSource, animate: bool) -> Self {
        let x = rng.range(0.0, 100.0);
        let y = rng.range(0.0, 100.0);
        let size = rng.range(0.6, 2.4);
        let opacity = rng.range(0.25, 0.65);
        let twinkle_secs = animate.then(|| rng.range(3.0, 8.0));
        Self { x, y, size, opacity, twinkle_secs }
    }

    pub fn glow(&self) -> f64 {
        self.size * 2.0
    }

    /// Inline style declarations for this star.
    pub fn styles(&self) -> Vec<(&'static str, String)> {
        let mut styles = vec![
            ("position", "absolute".to_string()),
            ("top", format!("{}%", self.y)),
            ("left", format!("{}%", self.x)),
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
            ("background-color", format!("rgba(255, 255, 255, {})", self.opacity)),
            ("border-radius", "50%".to_string()),
            ("box-shadow", format!("0 0 {}px rgba(255, 255, 255, 0.8)", self.glow())),
        ];
        if let Some(secs) = self.twinkle_secs {
            styles.push(("animation", format!("twinkle {secs}s infinite alternate")));
        }
        styles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarfieldOutcome {
    Created { stars: u32 },
    AlreadyPresent,
    /// The page has no body to attach to.
    Skipped,
}

/// Number of stars for a viewport `width`, scaled down under reduced motion.
pub fn star_count(width: f64, reduced_motion: bool, config: &CelestialConfig) -> u32 {
    let count = if width < config.small_breakpoint_px {
        config.small_star_count
    } else if width < config.medium_breakpoint_px {
        config.medium_star_count
    } else {
        config.large_star_count
    };

    if reduced_motion {
        (f64::from(count) * config.reduced_motion_factor).floor() as u32
    } else {
        count
    }
}

/// Insert the starfield overlay unless one already exists.
pub fn create_starfield<D: Dom>(
    dom: &mut D,
    rng: &mut impl RandomSource,
    config: &CelestialConfig,
) -> Result<StarfieldOutcome> {
    if dom.first_by_class(None, &config.starfield_class).is_some() {
        log::debug!("Starfield already present, skipping");
        return Ok(StarfieldOutcome::AlreadyPresent);
    }
    let Some(body) = dom.body() else {
        return Ok(StarfieldOutcome::Skipped);
    };

    let reduced = dom.prefers_reduced_motion();
    let count = star_count(dom.viewport_width(), reduced, config);

    let field = dom.create_element("div")?;
    dom.add_class(&field, &config.starfield_class)?;
    dom.set_styles(&field, OVERLAY_STYLES)?;

    for _ in 0..count {
        let star = Star::generate(rng, !reduced);
        let node = dom.create_element("div")?;
        for (property, value) in star.styles() {
            dom.set_style(&node, property, &value)?;
        }
        dom.append_child(&field, &node)?;
    }

    dom.append_child(&body, &field)?;
    log::debug!("Starfield created with {count} stars (reduced motion: {reduced})");
    Ok(StarfieldOutcome::Created { stars: count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryDom;
    use crate::random::{RngSource, SequenceSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_star_count_breakpoints() {
        let config = CelestialConfig::default();
        assert_eq!(star_count(320.0, false, &config), 45);
        assert_eq!(star_count(639.9, false, &config), 45);
        assert_eq!(star_count(640.0, false, &config), 70);
        assert_eq!(star_count(800.0, false, &config), 70);
        assert_eq!(star_count(1024.0, false, &config), 100);
        assert_eq!(star_count(1920.0, false, &config), 100);
    }

    #[test]
    fn test_star_count_reduced_motion() {
        let config = CelestialConfig::default();
        assert_eq!(star_count(800.0, true, &config), 42);
        assert_eq!(star_count(320.0, true, &config), 27);
        assert_eq!(star_count(1280.0, true, &config), 60);
    }

    #[test]
    fn test_star_ranges() {
        let mut rng = RngSource(StdRng::seed_from_u64(42));
        for _ in 0..500 {
            let star = Star::generate(&mut rng, true);
            assert!((0.0..100.0).contains(&star.x));
            assert!((0.0..100.0).contains(&star.y));
            assert!((0.6..2.4).contains(&star.size));
            assert!((0.25..0.65).contains(&star.opacity));
            let secs = star.twinkle_secs.unwrap();
            assert!((3.0..8.0).contains(&secs));
        }
    }

    #[test]
    fn test_star_exact_values() {
        let mut rng = SequenceSource::new(vec![0.5, 0.25, 0.0, 0.5, 0.2]);
        let star = Star::generate(&mut rng, true);
        assert_eq!(star.x, 50.0);
        assert_eq!(star.y, 25.0);
        assert_eq!(star.size, 0.6);
        assert_eq!(star.glow(), 1.2);
        assert!((star.opacity - 0.45).abs() < 1e-9);
        assert!((star.twinkle_secs.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_animation_under_reduced_motion() {
        let mut rng = SequenceSource::new(vec![0.3]);
        let star = Star::generate(&mut rng, false);
        assert_eq!(star.twinkle_secs, None);
        assert!(star.styles().iter().all(|(property, _)| *property != "animation"));
    }

    #[test]
    fn test_creates_overlay_with_count() {
        let mut dom = MemoryDom::with_viewport(800.0, false);
        let mut rng = RngSource(StdRng::seed_from_u64(1));
        let config = CelestialConfig::default();

        let outcome = create_starfield(&mut dom, &mut rng, &config).unwrap();

        assert_eq!(outcome, StarfieldOutcome::Created { stars: 70 });
        let fields = dom.elements_by_class(None, "star-field");
        assert_eq!(fields.len(), 1);
        let field = fields[0];
        assert_eq!(dom.children(&field).len(), 70);
        assert_eq!(dom.style(&field, "pointer-events").as_deref(), Some("none"));
        assert_eq!(dom.style(&field, "position").as_deref(), Some("fixed"));
        let star = dom.children(&field)[0];
        assert!(dom.style(&star, "animation").unwrap().ends_with("infinite alternate"));
    }

    #[test]
    fn test_reduced_motion_stars_are_static() {
        let mut dom = MemoryDom::with_viewport(800.0, true);
        let mut rng = RngSource(StdRng::seed_from_u64(2));
        let config = CelestialConfig::default();

        create_starfield(&mut dom, &mut rng, &config).unwrap();

        let field = dom.first_by_class(None, "star-field").unwrap();
        let stars = dom.children(&field);
        assert_eq!(stars.len(), 42);
        assert!(stars.iter().all(|star| dom.style(star, "animation").is_none()));
    }

    #[test]
    fn test_second_call_is_noop() {
        let mut dom = MemoryDom::new();
        let mut rng = RngSource(StdRng::seed_from_u64(3));
        let config = CelestialConfig::default();

        create_starfield(&mut dom, &mut rng, &config).unwrap();
        let second = create_starfield(&mut dom, &mut rng, &config).unwrap();

        assert_eq!(second, StarfieldOutcome::AlreadyPresent);
        assert_eq!(dom.elements_by_class(None, "star-field").len(), 1);
    }
}

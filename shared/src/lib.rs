//! # Celestial Theme Library
//!
//! Decorative behavior for the memorial site's "celestial" theme, written
//! against an injected page capability so it runs the same in the browser
//! (`celestial-web`) and in headless tests.
//!
//! ## Structure
//!
//! - **[`page`]**: the [`Dom`](page::Dom) trait and the in-memory
//!   [`MemoryDom`](page::memory::MemoryDom) used by tests
//! - **[`effect`]**: declarative mutations applied by listeners and timers
//! - **[`random`]**: injectable randomness
//! - **[`starfield`]**: animated background of twinkling stars
//! - **[`forms`]**: focus/blur styling for form fields and labels
//! - **[`constellation`]**: toggle between the memorial list and the constellation view
//! - **[`init`]**: the start-up sequence run when the document is ready
//! - **[`config`]** / **[`error`]**: theme configuration and the error type
//!
//! ## Usage
//!
//! ```rust
//! use shared::config::CelestialConfig;
//! use shared::init::initialize;
//! use shared::page::memory::MemoryDom;
//! use shared::random::SequenceSource;
//!
//! let mut dom = MemoryDom::with_viewport(800.0, false);
//! let mut rng = SequenceSource::new(vec![0.1, 0.7, 0.4]);
//! let report = initialize(&mut dom, &mut rng, &CelestialConfig::default());
//!
//! assert!(report.constellation.is_none());
//! ```

pub mod config;
pub mod constellation;
pub mod effect;
pub mod error;
pub mod forms;
pub mod init;
pub mod page;
pub mod random;
pub mod starfield;

pub use config::CelestialConfig;
pub use error::{Error, Result};
pub use page::Dom;

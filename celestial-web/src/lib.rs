//! Celestial theme for the memorial site, compiled to WebAssembly.
//!
//! Loaded by every page of the site after the server-rendered markup. On
//! document ready it staggers the fade-in elements, draws the starfield,
//! enhances form fields and, on listing pages, arms the constellation toggle.

use std::cell::RefCell;

use shared::constellation::ConstellationView;
use shared::init::initialize;
use shared::page::Dom;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

mod config;
mod dom;
mod random;

use dom::WebDom;
use random::MathRandom;

/// Page state kept alive between the start-up run and later toggle clicks.
struct Theme {
    dom: WebDom,
    rng: MathRandom,
    view: Option<ConstellationView<Element>>,
}

thread_local! {
    static THEME: RefCell<Option<Theme>> = const { RefCell::new(None) };
}

/// Global name site templates call from the toggle's `onclick`.
const TOGGLE_GLOBAL: &str = "toggleView";

/// How clicks on the toggle control reach [`toggle_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToggleWiring {
    /// The template calls `toggleView()` inline, through the window global.
    Inline,
    /// A click listener is bound on the control.
    Listener,
}

fn toggle_wiring<D: Dom>(dom: &D, toggle: &D::Node) -> ToggleWiring {
    match dom.attribute(toggle, "onclick") {
        Some(handler) if handler.contains(TOGGLE_GLOBAL) => ToggleWiring::Inline,
        _ => ToggleWiring::Listener,
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Celestial theme loading");

    let Some(dom) = WebDom::from_window() else {
        log::warn!("No window/document available, theme disabled");
        return;
    };
    publish_toggle(dom.window());

    if dom.document().ready_state() == "loading" {
        let on_ready = Closure::once_into_js(start);
        if let Err(e) = dom
            .document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::warn!("Could not wait for DOMContentLoaded: {e:?}");
        }
    } else {
        start();
    }
}

fn start() {
    let Some(mut dom) = WebDom::from_window() else {
        return;
    };
    let config = config::load(&dom);
    let mut rng = MathRandom;

    let report = initialize(&mut dom, &mut rng, &config);
    if let Some(view) = &report.constellation {
        let toggle = &view.nodes().toggle;
        match toggle_wiring(&dom, toggle) {
            ToggleWiring::Inline => log::debug!("Toggle control calls {TOGGLE_GLOBAL}() inline"),
            ToggleWiring::Listener => bind_toggle(toggle),
        }
    }

    THEME.with(|theme| {
        *theme.borrow_mut() = Some(Theme {
            dom,
            rng,
            view: report.constellation,
        });
    });
}

/// Expose [`toggle_view`] as `window.toggleView` for inline `onclick` handlers.
///
/// The wasm-bindgen export alone only lives on the module, which inline
/// handlers cannot see.
fn publish_toggle(window: &web_sys::Window) {
    let handler = Closure::<dyn FnMut()>::new(toggle_view).into_js_value();
    match js_sys::Reflect::set(window, &JsValue::from_str(TOGGLE_GLOBAL), &handler) {
        Ok(true) => {}
        Ok(false) => log::warn!("window.{TOGGLE_GLOBAL} is read-only, inline toggles will not work"),
        Err(e) => log::warn!("Could not publish window.{TOGGLE_GLOBAL}: {e:?}"),
    }
}

fn bind_toggle(toggle: &Element) {
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(|_event: web_sys::Event| toggle_view());
    match toggle.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
        Ok(()) => handler.forget(),
        Err(e) => log::warn!("Could not bind view toggle: {e:?}"),
    }
}

/// Switch between the standard list and the constellation view.
///
/// Also reachable as `window.toggleView()` once the module has started. A
/// no-op on pages without both views.
#[wasm_bindgen(js_name = toggleView)]
pub fn toggle_view() {
    THEME.with(|theme| {
        let mut theme = theme.borrow_mut();
        let Some(Theme { dom, rng, view: Some(view) }) = theme.as_mut() else {
            log::debug!("toggleView called without a constellation view");
            return;
        };
        if let Err(e) = view.toggle(dom, rng) {
            log::warn!("View toggle failed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::page::memory::MemoryDom;

    #[test]
    fn test_inline_toggle_is_not_double_bound() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let inline = dom.insert(&body, "button", &[("onclick", "toggleView()")]);
        let plain = dom.insert(&body, "button", &[]);

        assert_eq!(toggle_wiring(&dom, &inline), ToggleWiring::Inline);
        assert_eq!(toggle_wiring(&dom, &plain), ToggleWiring::Listener);
    }

    #[test]
    fn test_unrelated_onclick_still_gets_listener() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let tracked = dom.insert(&body, "button", &[("onclick", "track('view')")]);

        assert_eq!(toggle_wiring(&dom, &tracked), ToggleWiring::Listener);
    }

    #[test]
    fn test_toggle_before_start_is_noop() {
        toggle_view();
        THEME.with(|theme| assert!(theme.borrow().is_none()));
    }
}

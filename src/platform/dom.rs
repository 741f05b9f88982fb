//! Browser bindings
//!
//! Particle containers, intersection observers, timers and the parallax
//! scroll handler. Missing anchors are skipped silently (debug log only).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::ambient::{ParticleId, ParticleSink, Pose, SpawnStyle, Viewport};
use crate::consts::VISIBLE_CLASS;
use crate::parallax;
use crate::reveal::{CardId, ObserverSpec, RevealBoard, SequenceReveal, SequenceSpec, parse_delay};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Attribute linking a card element to its `RevealBoard` slot
const CARD_ID_ATTR: &str = "data-reveal-id";
const DELAY_ATTR: &str = "data-delay";

/// Current viewport, falling back to the default size
pub fn viewport(window: &Window) -> Viewport {
    let fallback = Viewport::default();
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    Viewport::new(
        width.map_or(fallback.width, |w| w as f32),
        height.map_or(fallback.height, |h| h as f32),
    )
}

/// High-resolution page clock in ms (same timebase as rAF timestamps)
pub fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Run `f` once after `delay_ms`
pub fn set_timeout(window: &Window, delay_ms: u32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    let delay = delay_ms.min(i32::MAX as u32) as i32;
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay);
}

/// Particle container: one element per live particle, recycled on retire
pub struct DomContainer {
    document: Document,
    container: Element,
    elements: HashMap<ParticleId, HtmlElement>,
    pool: Vec<HtmlElement>,
}

impl DomContainer {
    /// Bind to the element with `id`, if the page has one
    pub fn find(document: &Document, id: &str) -> Option<Self> {
        let container = document.get_element_by_id(id)?;
        Some(Self {
            document: document.clone(),
            container,
            elements: HashMap::new(),
            pool: Vec::new(),
        })
    }

    fn take_element(&mut self) -> Option<HtmlElement> {
        if let Some(el) = self.pool.pop() {
            return Some(el);
        }
        self.document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

fn set_origin(el: &HtmlElement, origin: Vec2) {
    let style = el.style();
    let _ = style.set_property("left", &format!("{:.2}px", origin.x));
    let _ = style.set_property("top", &format!("{:.2}px", origin.y));
}

impl ParticleSink for DomContainer {
    fn spawn(&mut self, id: ParticleId, spawn: &SpawnStyle) {
        let Some(el) = self.take_element() else {
            log::warn!("Could not create particle element");
            return;
        };
        el.set_class_name(spawn.class_name);
        set_origin(&el, spawn.origin);
        let style = el.style();
        let _ = style.set_property("transform", &spawn.transform_css());
        let _ = style.remove_property("opacity");
        let _ = self.container.append_child(&el);
        self.elements.insert(id, el);
    }

    fn update(&mut self, id: ParticleId, pose: &Pose) {
        if let Some(el) = self.elements.get(&id) {
            let style = el.style();
            let _ = style.set_property("transform", &pose.transform_css());
            if let Some(opacity) = pose.opacity {
                let _ = style.set_property("opacity", &format!("{:.3}", opacity));
            }
        }
    }

    fn retire(&mut self, id: ParticleId) {
        if let Some(el) = self.elements.remove(&id) {
            el.remove();
            self.pool.push(el);
        }
    }

    fn reposition(&mut self, id: ParticleId, origin: Vec2) {
        if let Some(el) = self.elements.get(&id) {
            set_origin(el, origin);
        }
    }
}

fn new_observer(
    callback: &ObserverCallback,
    threshold: f64,
    root_margin: Option<&str>,
) -> Option<IntersectionObserver> {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => Some(observer),
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            None
        }
    }
}

fn intersecting(entries: &js_sys::Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    entries
        .iter()
        .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
        .filter(|entry| entry.is_intersecting())
}

fn elements(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn explicit_delay(el: &Element) -> Option<u32> {
    el.get_attribute(DELAY_ATTR).as_deref().and_then(parse_delay)
}

/// Observe every card group of `spec` with one observer
pub fn watch_cards(
    window: &Window,
    document: &Document,
    board: &Rc<RefCell<RevealBoard>>,
    spec: &ObserverSpec,
) -> Option<IntersectionObserver> {
    let callback: ObserverCallback = {
        let board = board.clone();
        let window = window.clone();
        Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in intersecting(&entries) {
                let target = entry.target();
                let Some(id) = target
                    .get_attribute(CARD_ID_ATTR)
                    .and_then(|raw| raw.parse().ok())
                    .map(CardId)
                else {
                    continue;
                };
                let Some(delay) = board.borrow_mut().on_intersect(id) else {
                    continue;
                };
                let board = board.clone();
                set_timeout(&window, delay, move || {
                    if board.borrow_mut().reveal(id) {
                        let _ = target.class_list().add_1(VISIBLE_CLASS);
                    }
                });
            }
        })
    };
    let observer = new_observer(&callback, spec.threshold, Some(spec.root_margin))?;
    callback.forget();

    for group in spec.groups {
        let cards = elements(document, group.selector);
        if cards.is_empty() {
            log::debug!("No {} cards on page", group.selector);
            continue;
        }
        for (index, card) in cards.iter().enumerate() {
            let id = board
                .borrow_mut()
                .register(group, index, explicit_delay(card));
            let _ = card.set_attribute(CARD_ID_ATTR, &id.0.to_string());
            if let Some(css) = group.transition_delay_css(index) {
                let _ = card.style().set_property("transition-delay", &css);
            }
            observer.observe(card);
        }
    }

    Some(observer)
}

/// One-shot line-by-line reveal
pub fn watch_sequence(window: &Window, document: &Document, spec: SequenceSpec) -> Option<IntersectionObserver> {
    let Some(container) = document.query_selector(spec.container_selector).ok().flatten() else {
        log::debug!("No {} on page, skipping", spec.container_selector);
        return None;
    };
    let lines = elements(document, spec.line_selector);
    let mut sequence = SequenceReveal::new(spec, lines.iter().map(|l| explicit_delay(l)).collect())?;

    let callback: ObserverCallback = {
        let window = window.clone();
        let container = container.clone();
        Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in intersecting(&entries) {
                observer.unobserve(&entry.target());
                let Some(plan) = sequence.trigger() else {
                    continue;
                };
                log::info!("Sequence reveal: {} lines", plan.line_delays.len());

                for (line, delay) in lines.iter().zip(plan.line_delays) {
                    let line = line.clone();
                    set_timeout(&window, delay, move || {
                        let _ = line.class_list().add_1(VISIBLE_CLASS);
                    });
                }

                let container = container.clone();
                let finale = sequence.spec().finale_class;
                set_timeout(&window, plan.finale_delay_ms, move || {
                    let _ = container.class_list().add_1(finale);
                });
            }
        })
    };
    let observer = new_observer(&callback, spec.threshold, None)?;
    callback.forget();
    observer.observe(&container);
    Some(observer)
}

/// Call `on_enter` every time the element with `id` intersects
pub fn watch_section(
    document: &Document,
    id: &str,
    threshold: f64,
    mut on_enter: impl FnMut() + 'static,
) -> Option<IntersectionObserver> {
    let Some(section) = document.get_element_by_id(id) else {
        log::debug!("No #{} on page, skipping", id);
        return None;
    };
    let callback: ObserverCallback =
        Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for _ in intersecting(&entries) {
                on_enter();
            }
        });
    let observer = new_observer(&callback, threshold, None)?;
    callback.forget();
    observer.observe(&section);
    Some(observer)
}

/// Scroll-linked hero layers
pub fn bind_parallax(window: &Window, document: &Document) {
    let Some(hero) = document.get_element_by_id("hero") else {
        log::debug!("No #hero on page, parallax off");
        return;
    };
    let win = window.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let scrolled = win.scroll_y().unwrap_or(0.0) as f32;
        let Ok(layers) = hero.query_selector_all(".parallax-layer") else {
            return;
        };
        for i in 0..layers.length() {
            if let Some(layer) = layers.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                let css = parallax::layer_transform_css(scrolled, i as usize);
                let _ = layer.style().set_property("transform", &css);
            }
        }
    });
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

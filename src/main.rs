//! Yozakura FX entry point
//!
//! On the web: binds every effect and observer to the page and runs the
//! animation-frame loop. Natively: runs the scene headless and logs counts.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, IntersectionObserver, Window};

    use yozakura_fx::ambient::{AmbientScene, EffectKind, Viewport};
    use yozakura_fx::platform::dom::{self, DomContainer};
    use yozakura_fx::reveal::{HAIKU, OBSERVERS, RevealBoard};
    use yozakura_fx::Settings;

    /// Intersection threshold for the gallery petal burst
    const GALLERY_THRESHOLD: f64 = 0.2;

    /// Page instance holding all state
    struct Page {
        scene: AmbientScene<DomContainer>,
        viewport: Viewport,
        /// Gallery petals per burst at the page's density
        burst_count: usize,
        /// Kept alive for the page lifetime
        observers: Vec<IntersectionObserver>,
    }

    impl Page {
        fn new(seed: u64, viewport: Viewport, burst_count: usize) -> Self {
            Self {
                scene: AmbientScene::new(seed),
                viewport,
                burst_count,
                observers: Vec::new(),
            }
        }

        /// Spawn every enabled effect whose container exists
        fn init_effects(&mut self, document: &Document, settings: &Settings, now: f64) {
            for kind in EffectKind::ALL {
                let Some(config) = settings.effect_config(kind) else {
                    log::info!("{}: disabled", kind.as_str());
                    continue;
                };
                match DomContainer::find(document, config.container_id) {
                    Some(container) => self.scene.add(config, container, now, self.viewport),
                    None => log::debug!("{}: no #{}, skipping", kind.as_str(), config.container_id),
                }
            }
        }

        fn frame(&mut self, time: f64) {
            self.scene.tick(time, self.viewport);
        }

        fn resize(&mut self, viewport: Viewport) {
            self.viewport = viewport;
            self.scene.resize(viewport);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Yozakura FX starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let viewport = dom::viewport(&window);
        let page = Rc::new(RefCell::new(Page::new(seed, viewport, settings.gallery_burst_count())));

        log::info!(
            "Scene seed: {} ({} quality, {}x{})",
            seed,
            settings.quality.as_str(),
            viewport.width,
            viewport.height
        );

        page.borrow_mut()
            .init_effects(&document, &settings, dom::now(&window));

        if settings.parallax {
            dom::bind_parallax(&window, &document);
        }

        setup_reveals(&window, &document, page.clone());
        setup_gallery_petals(&window, &document, page.clone());
        setup_resize(&window, page.clone());

        log::info!(
            "{} particles across {} effects",
            page.borrow().scene.total_population(),
            page.borrow().scene.layers().len()
        );

        request_animation_frame(page);
    }

    fn setup_reveals(window: &Window, document: &Document, page: Rc<RefCell<Page>>) {
        let board = Rc::new(RefCell::new(RevealBoard::new()));
        let mut observers: Vec<IntersectionObserver> = OBSERVERS
            .iter()
            .filter_map(|spec| dom::watch_cards(window, document, &board, spec))
            .collect();
        observers.extend(dom::watch_sequence(window, document, HAIKU));

        log::info!("Watching {} cards", board.borrow().len());
        page.borrow_mut().observers.extend(observers);
    }

    fn setup_gallery_petals(window: &Window, document: &Document, page: Rc<RefCell<Page>>) {
        if !page.borrow().scene.contains(EffectKind::GalleryPetals) {
            return;
        }
        let window = window.clone();
        let target = page.clone();
        let observer = dom::watch_section(document, "gallery", GALLERY_THRESHOLD, move || {
            let now = dom::now(&window);
            let mut p = target.borrow_mut();
            let (viewport, count) = (p.viewport, p.burst_count);
            p.scene.burst(EffectKind::GalleryPetals, count, now, viewport);
        });
        page.borrow_mut().observers.extend(observer);
    }

    fn setup_resize(window: &Window, page: Rc<RefCell<Page>>) {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            page.borrow_mut().resize(dom::viewport(&win));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            page_loop(page, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn page_loop(page: Rc<RefCell<Page>>, time: f64) {
        page.borrow_mut().frame(time);
        request_animation_frame(page);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use yozakura_fx::ambient::{AmbientScene, EffectKind, Viewport};
    use yozakura_fx::consts::NATIVE_SEED;
    use yozakura_fx::platform::HeadlessSink;
    use yozakura_fx::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Yozakura FX (native) starting...");
    log::info!("Native mode runs the scene headless - serve the wasm build for the page");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(NATIVE_SEED);
    let viewport = Viewport::default();
    let mut scene: AmbientScene<HeadlessSink> = AmbientScene::new(seed);

    for kind in EffectKind::ALL {
        if let Some(config) = settings.effect_config(kind) {
            scene.add(config, HeadlessSink::default(), 0.0, viewport);
        }
    }

    // One minute at 60 fps, gallery scrolled into view at 5s
    const FRAME_MS: f64 = 1000.0 / 60.0;
    for frame in 0..3600u32 {
        let now = f64::from(frame) * FRAME_MS;
        if frame == 300 {
            scene.burst(EffectKind::GalleryPetals, settings.gallery_burst_count(), now, viewport);
        }
        scene.tick(now, viewport);

        if frame % 600 == 0 {
            log::info!("t={:>5.1}s live={}", now / 1000.0, scene.total_population());
        }
    }

    for layer in scene.layers() {
        let e = &layer.emitter;
        println!(
            "{:<15} live={:>3} spawned={:>5} retired={:>5}",
            e.kind().as_str(),
            e.population(),
            e.spawned(),
            e.retired()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

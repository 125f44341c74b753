//! Ball Drop entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
        MouseEvent,
    };

    use ball_drop::history::format_timestamp;
    use ball_drop::renderer::{RenderState, VertexBatch};
    use ball_drop::sim::{PointerEvent, SimState, handle_pointer};
    use ball_drop::{RenderLoop, SearchHistory, Settings};

    /// Session state shared by the frame loop and event handlers
    struct App {
        state: SimState,
        render_loop: RenderLoop,
        batch: VertexBatch,
        render_state: Option<RenderState>,
    }

    impl App {
        fn new(state: SimState) -> Self {
            let batch = VertexBatch::new(state.width(), state.height());
            Self {
                state,
                render_loop: RenderLoop::start(),
                batch,
                render_state: None,
            }
        }

        fn frame(&mut self, time: f64) {
            let settled = self.render_loop.frame(&mut self.state, &mut self.batch, time);
            if settled > 0 {
                log::debug!(
                    "{} of {} balls resting",
                    self.state.field.resting_count(),
                    self.state.field.len()
                );
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn pointer(&mut self, event: PointerEvent) {
            handle_pointer(&mut self.state, event);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Ball Drop starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Search history panel works even if the canvas does not
        setup_search_panel(Rc::new(RefCell::new(SearchHistory::load())));

        let Some(canvas) = document
            .get_element_by_id("animationCanvas")
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #animationCanvas element");
            return;
        };

        // Simulation runs in CSS pixels; the backing store is scaled by DPR
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        // Query overrides are remembered for later visits
        if let Ok(query) = window.location().search() {
            if settings.apply_query(&query) > 0 {
                settings.save();
            }
        }
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let state = SimState::new(
            &settings.field_config(),
            client_w as f32,
            client_h as f32,
            seed,
        );
        log::info!(
            "Field of {} balls on {}x{} surface, seed {}",
            state.field.len(),
            client_w,
            client_h,
            seed
        );
        let app = Rc::new(RefCell::new(App::new(state)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No suitable GPU adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_pointer_handlers(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Ball Drop running!");
    }

    /// Pointer position relative to the canvas' top-left corner
    fn surface_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pointer down: grab only over the canvas
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                let point = surface_point(&canvas_clone, &event);
                let primary = event.is_primary();
                if let Some(down) = PointerEvent::from_dom(&event.type_(), point, primary) {
                    app.borrow_mut().pointer(down);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move: tracked on the window so a drag can leave the canvas
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                let mut a = app.borrow_mut();
                if !a.state.pointer.is_dragging() {
                    return;
                }
                let point = surface_point(&canvas_clone, &event);
                if let Some(motion) =
                    PointerEvent::from_dom(&event.type_(), point, event.is_primary())
                {
                    a.pointer(motion);
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up/cancel: release wherever the pointer is
        for name in ["pointerup", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                if let Some(up) = PointerEvent::from_dom(name, Vec2::ZERO, event.is_primary()) {
                    app.borrow_mut().pointer(up);
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }

    // ========================================================================
    // SEARCH HISTORY PANEL
    // ========================================================================

    fn setup_search_panel(history: Rc<RefCell<SearchHistory>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let input = document
            .get_element_by_id("search-input")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
        let button = document
            .get_element_by_id("search-button")
            .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
        let (Some(input), Some(button)) = (input, button) else {
            log::warn!("Search panel not found, skipping");
            return;
        };

        // Search button
        {
            let history = history.clone();
            let input_clone = input.clone();
            let button_clone = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let query = input_clone.value().trim().to_string();
                if query.is_empty() {
                    return;
                }
                {
                    let mut h = history.borrow_mut();
                    h.add(&query, js_sys::Date::now());
                    h.save();
                }
                refresh_history(&history.borrow());
                perform_search(&button_clone, &query);
                input_clone.set_value("");
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter in the input acts as the button
        {
            let button_clone = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    button_clone.click();
                }
            });
            let _ = input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clear history (confirmed)
        if let Some(clear) = document.get_element_by_id("clear-history") {
            let history = history.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Are you sure you want to clear your entire search history?",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    let mut h = history.borrow_mut();
                    h.clear();
                    h.save();
                    refresh_history(&h);
                }
            });
            let _ = clear.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Row clicks, delegated from the list: delete icon or search again
        if let Some(list) = document.get_element_by_id("search-history") {
            let history = history.clone();
            let button_clone = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                else {
                    return;
                };
                let Some(index) = target
                    .closest("li[data-index]")
                    .ok()
                    .flatten()
                    .and_then(|li| li.get_attribute("data-index"))
                    .and_then(|i| i.parse::<usize>().ok())
                else {
                    return;
                };

                if target.closest(".delete-icon").ok().flatten().is_some() {
                    let mut h = history.borrow_mut();
                    if let Some(entry) = h.remove(index) {
                        log::info!("Deleted search {:?}", entry.query);
                        h.save();
                        refresh_history(&h);
                    }
                } else if target.closest(".history-query").ok().flatten().is_some() {
                    let query = history.borrow().entries.get(index).map(|e| e.query.clone());
                    if let Some(query) = query {
                        perform_search(&button_clone, &query);
                    }
                }
            });
            let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        refresh_history(&history.borrow());
    }

    fn refresh_history(history: &SearchHistory) {
        if let Err(e) = render_history(history) {
            log::warn!("Failed to render search history: {:?}", e);
        }
    }

    fn render_history(history: &SearchHistory) -> Result<(), JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(());
        };
        let Some(list) = document.get_element_by_id("search-history") else {
            return Ok(());
        };
        list.set_inner_html("");

        if history.is_empty() {
            let li = document.create_element("li")?;
            li.set_text_content(Some("No search history."));
            li.set_attribute("style", "text-align: center; color: #888888")?;
            list.append_child(&li)?;
            return Ok(());
        }

        for (index, entry) in history.entries.iter().enumerate() {
            let li = document.create_element("li")?;
            li.set_attribute("data-index", &index.to_string())?;

            let query = document.create_element("div")?;
            query.class_list().add_1("history-query")?;
            query.set_text_content(Some(&entry.query));
            query.set_attribute("title", "Click to search again")?;

            let timestamp = document.create_element("span")?;
            timestamp.class_list().add_1("timestamp")?;
            timestamp.set_text_content(Some(&format_timestamp(&entry.timestamp)));

            let delete = document.create_element("i")?;
            delete
                .class_list()
                .add_3("fas", "fa-trash-alt", "delete-icon")?;
            delete.set_attribute("title", "Delete this entry")?;

            let left = document.create_element("div")?;
            left.set_attribute("style", "display: flex; flex-direction: column; flex: 1")?;
            left.append_child(&query)?;
            left.append_child(&timestamp)?;

            let right = document.create_element("div")?;
            right.append_child(&delete)?;

            li.append_child(&left)?;
            li.append_child(&right)?;
            list.append_child(&li)?;
        }
        Ok(())
    }

    /// Stand-in search: busy button for a second, then report the query
    fn perform_search(button: &HtmlButtonElement, query: &str) {
        log::info!("Searching for: {}", query);
        button.set_inner_html(r#"<i class="fas fa-spinner fa-spin"></i> Searching..."#);
        button.set_disabled(true);

        let Some(window) = web_sys::window() else {
            return;
        };
        let button = button.clone();
        let message = format!("You searched for: \"{}\"", query);
        let callback = Closure::once_into_js(move || {
            button.set_inner_html(r#"<i class="fas fa-arrow-right"></i> Search"#);
            button.set_disabled(false);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            1000,
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_drop::renderer::VertexBatch;
    use ball_drop::sim::SimState;
    use ball_drop::{RenderLoop, Settings};

    env_logger::init();
    log::info!("Ball Drop (native) starting...");
    log::info!("Native mode renders headless - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed_or(ball_drop::now_ms() as u64);
    let (width, height) = (800.0, 600.0);
    let mut state = SimState::new(&settings.field_config(), width, height, seed);
    let mut batch = VertexBatch::new(width, height);
    let mut render_loop = RenderLoop::start();

    log::info!("Field of {} balls, seed {}", state.field.len(), seed);

    // Same cadence as requestAnimationFrame, without waiting
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 10_000;
    let all_resting = render_loop.run_until_resting(&mut state, &mut batch, FRAME_MS, MAX_FRAMES);
    if !all_resting {
        log::warn!("Stopped at the {} frame cap before everything settled", MAX_FRAMES);
    }

    println!(
        "{} of {} balls resting after {} frames ({} vertices in last frame)",
        state.field.resting_count(),
        state.field.len(),
        state.frame,
        batch.vertices().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

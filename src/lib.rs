#![cfg(target_arch = "wasm32")]
use pack_core::viewport::pixel_ratio;
use pack_core::{FrameClock, InstantClock, SceneConfig, Session, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod mips;
mod render;
mod textures;

use constants::{CANVAS_ARIA_LABEL, CANVAS_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pack-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn build_session() -> anyhow::Result<Session> {
    let (width, height) = dom::viewport_css_size();
    let config = SceneConfig {
        // Fresh scatter every page load
        seed: rand::random::<u64>(),
        ..SceneConfig::default()
    };
    let session = Session::new(&config, Viewport::new(width, height))?;
    log::info!(
        "[scene] {} cards, {} textures, {:?} layout",
        session.cards.len(),
        session.textures.len(),
        session.class()
    );
    Ok(session)
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::prepare_canvas(&canvas, CANVAS_ARIA_LABEL);

    let session = Rc::new(RefCell::new(build_session()?));
    {
        let class = session.borrow().class();
        dom::sync_canvas_backing_size(&canvas, pixel_ratio(dom::device_pixel_ratio(), class));
    }

    // Images stream in while the scene is already running on placeholders
    let uploads: textures::UploadQueue = Rc::new(RefCell::new(Vec::new()));
    textures::spawn_loads(&session.borrow().textures, &uploads);

    let gpu = frame::init_gpu(&canvas, &session).await;

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
        touch: Rc::new(RefCell::new(input::TouchGesture::default())),
    });
    events::wire_ui_buttons(&document, &session);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        gpu,
        canvas,
        document,
        uploads,
        frames: FrameClock::new(InstantClock::default()),
        cursor_pointer: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

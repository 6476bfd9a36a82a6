use crate::dom;
use crate::render;
use crate::textures::UploadQueue;
use pack_core::viewport::pixel_ratio;
use pack_core::{FrameClock, InstantClock, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<Session>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub uploads: UploadQueue,

    pub frames: FrameClock<InstantClock>,
    pub cursor_pointer: bool,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let dt = self.frames.delta();
        let state = self.session.borrow_mut().step(dt);

        let want_pointer = state.hovered.is_some();
        if want_pointer != self.cursor_pointer {
            dom::set_cursor_pointer(&self.document, want_pointer);
            self.cursor_pointer = want_pointer;
        }

        let Some(g) = &mut self.gpu else {
            return;
        };
        // Drain into a local first so a load finishing mid-frame never
        // observes the queue borrowed.
        let ready: Vec<_> = self.uploads.borrow_mut().drain(..).collect();
        for tex in ready {
            g.upload_texture(tex);
        }

        let class = self.session.borrow().class();
        let ratio = pixel_ratio(dom::device_pixel_ratio(), class);
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas, ratio);
        g.resize_if_needed(w, h);

        let session = self.session.borrow();
        match g.render(&session) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    session: &RefCell<Session>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, session).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

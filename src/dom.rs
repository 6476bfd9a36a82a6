use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = wasm_bindgen::closure::Closure::wrap(
                Box::new(move || handler()) as Box<dyn FnMut()>
            );
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{}; control not wired", element_id),
    }
}

/// Window inner size in CSS pixels; `(1, 1)` if unavailable.
pub fn viewport_css_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    (read(w.inner_width()), read(w.inner_height()))
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Match the canvas backing store to its CSS size times `pixel_ratio`.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, pixel_ratio: f32) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    let ratio = pixel_ratio as f64;
    let w_px = ((rect.width() * ratio) as u32).max(1);
    let h_px = ((rect.height() * ratio) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Canvas bounding rectangle as `[left, top, width, height]` in CSS pixels.
#[inline]
pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> [f32; 4] {
    let r = canvas.get_bounding_client_rect();
    [
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    ]
}

pub fn set_cursor_pointer(document: &web::Document, pointer: bool) {
    if let Some(body) = document.body() {
        _ = body
            .style()
            .set_property("cursor", if pointer { "pointer" } else { "default" });
    }
}

pub fn prepare_canvas(canvas: &web::HtmlCanvasElement, aria_label: &str) {
    _ = canvas.style().set_property("touch-action", "none");
    _ = canvas.set_attribute("aria-label", aria_label);
}

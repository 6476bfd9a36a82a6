use crate::constants::{OPEN_BUTTON_ID, RESET_BUTTON_ID, WHEEL_NOTCH_PX};
use crate::dom;
use crate::input::{self, DragMode};
use glam::Vec2;
use pack_core::interaction::pointer_to_ndc;
use pack_core::{ClickIntent, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<Session>>,
    pub drag: Rc<RefCell<input::DragState>>,
    pub touch: Rc<RefCell<input::TouchGesture>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
    wire_click(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
    wire_resize(&w);
}

fn on_canvas<T: ?Sized>(canvas: &web::HtmlCanvasElement, event: &str, closure: Closure<T>) {
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
fn is_touch(ev: &web::PointerEvent) -> bool {
    ev.pointer_type() == "touch"
}

fn update_pointer(w: &InputWiring, ev: &web::PointerEvent) {
    let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
    let ndc = pointer_to_ndc(client, dom::canvas_rect(&w.canvas));
    w.session.borrow_mut().set_pointer(Some(ndc));
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        update_pointer(&w, &ev);

        if is_touch(&ev) && w.touch.borrow().is_pinching() {
            let step = w
                .touch
                .borrow_mut()
                .moved(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
            if let Some(step) = step {
                let height = dom::canvas_rect(&w.canvas)[3];
                let mut guard = w.session.borrow_mut();
                let s = &mut *guard;
                s.controls.dolly(step.scale);
                s.controls.pan(&s.camera, step.pan[0], step.pan[1], height);
            }
            return;
        }

        let moved = w
            .drag
            .borrow_mut()
            .moved(ev.client_x() as f32, ev.client_y() as f32);
        let Some((mode, dx, dy)) = moved else {
            return;
        };
        let height = dom::canvas_rect(&w.canvas)[3];
        let mut guard = w.session.borrow_mut();
        let s = &mut *guard;
        match mode {
            DragMode::Rotate => s.controls.rotate(dx, dy, height),
            DragMode::Pan => s.controls.pan(&s.camera, dx, dy, height),
        }
    }) as Box<dyn FnMut(_)>);
    on_canvas(&canvas, "pointermove", closure);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Touch taps may not send a move first
        update_pointer(&w, &ev);
        if is_touch(&ev) {
            let mut touch = w.touch.borrow_mut();
            touch.down(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
            if touch.is_pinching() {
                // Second finger turns the rotate drag into a pinch
                w.drag.borrow_mut().end();
                _ = w.canvas.set_pointer_capture(ev.pointer_id());
                return;
            }
        }
        let modifier = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
        let mode = input::drag_mode_for(ev.button(), modifier);
        w.drag
            .borrow_mut()
            .begin(mode, ev.client_x() as f32, ev.client_y() as f32);
        if mode.is_some() {
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);
    on_canvas(&canvas, "pointerdown", closure);
}

fn wire_pointerup(w: &InputWiring) {
    for name in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let canvas = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            w.drag.borrow_mut().end();
            w.touch.borrow_mut().up(ev.pointer_id());
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        on_canvas(&canvas, name, closure);
    }
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if w.drag.borrow().mode.is_none() {
            w.session.borrow_mut().set_pointer(None);
        }
    }) as Box<dyn FnMut(_)>);
    on_canvas(&canvas, "pointerleave", closure);
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        // Resolve at the click's own position; a finished touch has
        // already cleared the tracked pointer.
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let ndc = pointer_to_ndc(client, dom::canvas_rect(&w.canvas));
        let intent = w.session.borrow_mut().click_at(ndc);
        if intent == ClickIntent::None {
            log::debug!("[click] nothing under pointer");
        }
    }) as Box<dyn FnMut(_)>);
    on_canvas(&canvas, "click", closure);
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let px = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        let notches = input::wheel_notches(px, WHEEL_NOTCH_PX);
        if notches != 0.0 {
            w.session.borrow_mut().controls.zoom(notches);
        }
    }) as Box<dyn FnMut(_)>);
    // Non-passive so the page does not scroll under the canvas
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    on_canvas(&w.canvas, "contextmenu", closure);
}

fn wire_resize(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::viewport_css_size();
        w.session.borrow_mut().resize(width, height);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Hook the "open" and "reset" buttons, if the page has them.
pub fn wire_ui_buttons(document: &web::Document, session: &Rc<RefCell<Session>>) {
    {
        let session = session.clone();
        dom::add_click_listener(document, OPEN_BUTTON_ID, move || {
            session.borrow_mut().open_pack();
        });
    }
    {
        let session = session.clone();
        dom::add_click_listener(document, RESET_BUTTON_ID, move || {
            session.borrow_mut().reset();
        });
    }
}

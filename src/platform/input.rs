//! DOM input listeners
//!
//! Every source (keys, on-screen buttons, the runner's play area, the
//! joystick) feeds the one `InputState` owned by the host. Missing elements
//! are skipped.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, KeyboardEvent, TouchEvent, Window,
};

use crate::sim::{Button, InputState, KeyMap, VirtualJoystick};

/// What the listeners need from the host
pub trait InputSink: 'static {
    fn key_map(&self) -> KeyMap;
    fn is_running(&self) -> bool;
    fn input_mut(&mut self) -> &mut InputState;
    fn joystick_mut(&mut self) -> &mut VirtualJoystick;

    /// The player asked to (re)start from a start or game-over screen
    fn request_start(handle: &Rc<RefCell<Self>>)
    where
        Self: Sized;
}

/// On-screen buttons and the input each one holds
pub const TOUCH_BUTTONS: [(&str, Button); 5] = [
    ("btn-up", Button::Up),
    ("btn-down", Button::Down),
    ("btn-left", Button::Left),
    ("btn-right", Button::Right),
    ("btn-shoot", Button::Action),
];

const ACTIVE: &str = "active";

fn listen<F>(target: &EventTarget, kind: &str, passive: Option<bool>, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    let _ = match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
        }
        None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
    };
    closure.forget();
}

/// Press begins a run when none is active, otherwise holds `button`
fn press<T: InputSink>(game: &Rc<RefCell<T>>, button: Button) {
    let running = game.borrow().is_running();
    if button == Button::Action && !running {
        T::request_start(game);
        return;
    }
    game.borrow_mut().input_mut().touch_down(button);
}

fn release<T: InputSink>(game: &Rc<RefCell<T>>, button: Button) {
    game.borrow_mut().input_mut().touch_up(button);
}

/// Arrow keys and Space on the document
pub fn attach_keyboard<T: InputSink>(document: &Document, game: Rc<RefCell<T>>) {
    {
        let game = game.clone();
        listen(document, "keydown", None, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let map = game.borrow().key_map();
            let Some(button) = map.button_for(&event.code()) else {
                return;
            };
            event.prevent_default();

            let running = game.borrow().is_running();
            if button == Button::Action && !running {
                T::request_start(&game);
                return;
            }
            game.borrow_mut().input_mut().key_down(map, &event.code());
        });
    }

    listen(document, "keyup", None, move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mut g = game.borrow_mut();
        let map = g.key_map();
        g.input_mut().key_up(map, &event.code());
    });
}

/// Touch/mouse press and release on an element, holding `button`
fn attach_hold<T: InputSink>(el: &Element, button: Button, game: Rc<RefCell<T>>, highlight: bool) {
    for kind in ["touchstart", "mousedown"] {
        let game = game.clone();
        let el_clone = el.clone();
        listen(el, kind, Some(false), move |event| {
            event.prevent_default();
            if highlight {
                let _ = el_clone.class_list().add_1(ACTIVE);
            }
            press(&game, button);
        });
    }

    for kind in ["touchend", "mouseup", "mouseleave"] {
        let game = game.clone();
        let el_clone = el.clone();
        listen(el, kind, Some(false), move |event| {
            event.prevent_default();
            if highlight {
                let _ = el_clone.class_list().remove_1(ACTIVE);
            }
            release(&game, button);
        });
    }
}

/// Direction and fire buttons for the shooter
pub fn attach_touch_buttons<T: InputSink>(document: &Document, game: Rc<RefCell<T>>) {
    for (id, button) in TOUCH_BUTTONS {
        if let Some(el) = document.get_element_by_id(id) {
            attach_hold(&el, button, game.clone(), true);
        }
    }
}

/// The runner's whole play area acts as the jump button
pub fn attach_play_area<T: InputSink>(document: &Document, game: Rc<RefCell<T>>) {
    if let Some(el) = document.get_element_by_id("game-container") {
        attach_hold(&el, Button::Action, game, false);
    }
}

fn element_center(el: &Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        (rect.left() + rect.width() / 2.0) as f32,
        (rect.top() + rect.height() / 2.0) as f32,
    )
}

fn first_touch(event: &web_sys::Event) -> Option<Vec2> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

/// Virtual joystick; hidden and inert when `visible` is false
pub fn attach_joystick<T: InputSink>(document: &Document, game: Rc<RefCell<T>>, visible: bool) {
    let Some(el) = document.get_element_by_id("joystick") else {
        return;
    };
    if !visible {
        let _ = el.class_list().add_1("hidden");
        return;
    }

    {
        let game = game.clone();
        let el_clone = el.clone();
        listen(&el, "touchstart", Some(false), move |event| {
            event.prevent_default();
            let Some(point) = first_touch(&event) else {
                return;
            };
            let mut g = game.borrow_mut();
            let stick = g.joystick_mut().begin(element_center(&el_clone), point);
            g.input_mut().set_stick(stick);
        });
    }

    {
        let game = game.clone();
        listen(&el, "touchmove", Some(false), move |event| {
            event.prevent_default();
            let Some(point) = first_touch(&event) else {
                return;
            };
            let mut g = game.borrow_mut();
            if g.joystick_mut().is_active() {
                let stick = g.joystick_mut().drag(point);
                g.input_mut().set_stick(stick);
            }
        });
    }

    for kind in ["touchend", "touchcancel"] {
        let game = game.clone();
        listen(&el, kind, Some(false), move |event| {
            event.prevent_default();
            let mut g = game.borrow_mut();
            let stick = g.joystick_mut().end();
            g.input_mut().set_stick(stick);
        });
    }
}

/// Losing focus drops every held input so nothing stays stuck
pub fn attach_blur<T: InputSink>(window: &Window, game: Rc<RefCell<T>>) {
    listen(window, "blur", None, move |_event| {
        let mut g = game.borrow_mut();
        g.joystick_mut().end();
        g.input_mut().release_all();
        log::debug!("Window blurred, inputs released");
    });
}

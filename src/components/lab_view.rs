use super::lab_settings::LabSettings;
use crate::state::{
    Board, InputEvent, InteractionController, LabConfig, Mode, Point, PointerId, StickyTracking,
};
use crate::util::{clog, now_ms};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

type Shared<T> = Rc<RefCell<T>>;

// Runs one event through the controller and paints the result onto the board.
fn feed(
    ctl: &Shared<InteractionController>,
    board: &Shared<Board>,
    redraw: &UseForceUpdateHandle,
    event: InputEvent,
) {
    let mut c = ctl.borrow_mut();
    let before = c.mode();
    let mutation = c.dispatch(&*board.borrow(), event);
    let changed_mode = c.mode() != before;
    drop(c);
    if let Some(m) = mutation {
        board.borrow_mut().apply(m);
    }
    if mutation.is_some() || changed_mode {
        redraw.force_update();
    }
}

// Each changed touch becomes its own pointer event.
fn each_changed_touch(e: &TouchEvent, mut f: impl FnMut(PointerId, Point)) {
    let touches = e.changed_touches();
    for i in 0..touches.length() {
        if let Some(t) = touches.item(i) {
            f(
                PointerId::Touch(t.identifier()),
                Point::new(t.client_x() as f64, t.client_y() as f64),
            );
        }
    }
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// DOM listeners owned by the lab; removed again when dropped.
struct Listeners {
    registered: Vec<(EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl Listeners {
    fn add<E: JsCast + 'static>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) {
        let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        }) as Box<dyn FnMut(_)>);
        if target
            .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
            .is_ok()
        {
            self.registered.push((target.clone(), kind, cb));
        } else {
            clog(&format!("could not listen for {}", kind));
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (target, kind, cb) in &self.registered {
            let _ = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
        }
    }
}

fn install_listeners(
    surface: &HtmlElement,
    ctl: &Shared<InteractionController>,
    board: &Shared<Board>,
    redraw: &UseForceUpdateHandle,
) -> Option<Listeners> {
    let window: EventTarget = web_sys::window()?.into();
    let surface: EventTarget = surface.clone().into();
    let mut l = Listeners {
        registered: Vec::new(),
    };

    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&surface, "mousedown", move |e: MouseEvent| {
        if e.button() == 0 {
            let ev = InputEvent::PointerDown {
                pointer: PointerId::Mouse,
                at: mouse_point(&e),
                time_ms: now_ms(),
            };
            feed(&c, &b, &r, ev);
        }
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "mousemove", move |e: MouseEvent| {
        let ev = InputEvent::PointerMove {
            pointer: PointerId::Mouse,
            at: mouse_point(&e),
        };
        feed(&c, &b, &r, ev);
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "mouseup", move |e: MouseEvent| {
        if e.button() == 0 {
            feed(&c, &b, &r, InputEvent::PointerUp { pointer: PointerId::Mouse });
        }
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&surface, "dblclick", move |e: MouseEvent| {
        feed(&c, &b, &r, InputEvent::DoubleActivate { at: mouse_point(&e) });
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&surface, "wheel", move |e: WheelEvent| {
        e.prevent_default();
        let ev = InputEvent::Wheel {
            at: Point::new(e.client_x() as f64, e.client_y() as f64),
            delta_y: e.delta_y(),
        };
        feed(&c, &b, &r, ev);
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&surface, "touchstart", move |e: TouchEvent| {
        // keep the browser from synthesising mouse events for the tap
        e.prevent_default();
        let time_ms = now_ms();
        each_changed_touch(&e, |pointer, at| {
            feed(&c, &b, &r, InputEvent::PointerDown { pointer, at, time_ms });
        });
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "touchmove", move |e: TouchEvent| {
        each_changed_touch(&e, |pointer, at| {
            feed(&c, &b, &r, InputEvent::PointerMove { pointer, at });
        });
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "touchend", move |e: TouchEvent| {
        each_changed_touch(&e, |pointer, _| {
            feed(&c, &b, &r, InputEvent::PointerUp { pointer });
        });
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "touchcancel", move |e: TouchEvent| {
        each_changed_touch(&e, |pointer, _| {
            feed(&c, &b, &r, InputEvent::PointerCancel { pointer });
        });
    });
    let (c, b, r) = (ctl.clone(), board.clone(), redraw.clone());
    l.add(&window, "keydown", move |e: KeyboardEvent| {
        feed(&c, &b, &r, InputEvent::Key { key: e.key() });
    });
    Some(l)
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Idle => "idle",
        Mode::Dragging => "dragging",
        Mode::Sticky => "sticky (double click / double tap or tap its center to drop)",
        Mode::Resizing => "resizing",
        Mode::Scaling => "scaling",
    }
}

#[function_component(LabView)]
pub fn lab_view() -> Html {
    let surface_ref = use_node_ref();
    let config = use_state(LabConfig::load);
    let controller = use_mut_ref(|| InteractionController::new((*config).clone()));
    let board = use_mut_ref(|| Board::with_defaults(config.handle_size));
    let redraw = use_force_update();
    let show_settings = use_state(|| false);

    // Input wiring lives as long as the lab is mounted
    {
        let surface_ref = surface_ref.clone();
        let controller = controller.clone();
        let board = board.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let listeners = surface_ref
                .cast::<HtmlElement>()
                .and_then(|el| install_listeners(&el, &controller, &board, &redraw));
            move || drop(listeners)
        });
    }
    // Persist config changes & hand them to the controller
    {
        let controller = controller.clone();
        let board = board.clone();
        use_effect_with((*config).clone(), move |cfg| {
            cfg.save();
            controller.borrow_mut().set_config(cfg.clone());
            board.borrow_mut().handle_size = cfg.handle_size;
            || ()
        });
    }

    let on_config = {
        let config = config.clone();
        Callback::from(move |cfg: LabConfig| config.set(cfg))
    };
    let on_reset_board = {
        let controller = controller.clone();
        let board = board.clone();
        let config = config.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            controller.borrow_mut().reset();
            *board.borrow_mut() = Board::with_defaults(config.handle_size);
            redraw.force_update();
        })
    };
    let reset_click = {
        let cb = on_reset_board.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    let (mode, target, touches) = {
        let c = controller.borrow();
        (c.mode(), c.session().map(|s| s.target.0), c.active_touches())
    };
    let handle_px = config.handle_size;
    let boxes = board.borrow().items.iter().map(|b| {
        let r = b.rect;
        html! {
            <div key={b.id.0.to_string()} class="target"
                style={format!("position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; background-color:{}; cursor:move; user-select:none;",
                    r.left, r.top, r.width, r.height, b.indicator.color())}>
                <div class="resize-handle"
                    style={format!("position:absolute; right:0; bottom:0; width:{}px; height:{}px; background:#fff; border:1px solid #333; box-sizing:border-box; cursor:nwse-resize;", handle_px, handle_px)}></div>
            </div>
        }
    }).collect::<Html>();
    let tracking = match config.sticky_tracking {
        StickyTracking::Offset => "offset",
        StickyTracking::TopLeft => "top-left",
        StickyTracking::Center => "center",
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh;">
            <div ref={surface_ref} style="position:fixed; inset:0; overflow:hidden; touch-action:none; background:#0d1117;">
                { boxes }
            </div>
            <div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:220px; display:flex; flex-direction:column; gap:6px; font-size:12px;">
                <div>{ format!("Mode: {}", mode_label(mode)) }</div>
                if let Some(id) = target {
                    <div>{ format!("Box: #{}", id + 1) }</div>
                }
                <div style="opacity:0.7;">{ format!("Sticky tracking: {} | touches: {}", tracking, touches) }</div>
                <button onclick={open_settings}>{"Settings"}</button>
                <button onclick={reset_click}>{"Reset Boxes"}</button>
                <div style="font-size:11px; opacity:0.7;">{"Drag to move, corner to resize, Esc to cancel, wheel or pinch to scale."}</div>
            </div>
            <LabSettings
                show={*show_settings}
                config={(*config).clone()}
                on_change={on_config}
                on_reset_board={on_reset_board}
                on_close={close_settings}
            />
        </div>
    }
}

// Drag / resize / scale state machine driving the lab boxes.
//
// The controller owns the only session. Every input goes through `dispatch`,
// which returns at most one mutation for the surface to apply.
use super::board::{BoxId, Hit, Indicator, Mutation, Surface};
use super::config::{LabConfig, ScaleMode, StickyTracking};
use super::geometry::{Point, Rect, clamp_size};
use super::touch::{ActivePointers, PointerId};
use crate::util::clog;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pointer: PointerId, at: Point, time_ms: f64 },
    PointerMove { pointer: PointerId, at: Point },
    PointerUp { pointer: PointerId },
    /// The host aborted a pointer (e.g. `touchcancel`).
    PointerCancel { pointer: PointerId },
    /// Mouse double click.
    DoubleActivate { at: Point },
    Wheel { at: Point, delta_y: f64 },
    Key { key: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Dragging,
    Sticky,
    Resizing,
    Scaling,
}

/// What a live session is doing. Idle is the absence of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Dragging,
    Sticky,
    Resizing,
    Scaling,
}

impl From<Gesture> for Mode {
    fn from(g: Gesture) -> Self {
        match g {
            Gesture::Dragging => Mode::Dragging,
            Gesture::Sticky => Mode::Sticky,
            Gesture::Resizing => Mode::Resizing,
            Gesture::Scaling => Mode::Scaling,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBaseline {
    /// The second touch taking part in the gesture.
    pub other: i32,
    pub distance: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionSession {
    pub target: BoxId,
    pub gesture: Gesture,
    /// Pointer that started the session; only it may end a drag or resize.
    pub pointer: PointerId,
    /// Geometry at session start, used to restore on cancel.
    pub origin: Rect,
    pub origin_indicator: Indicator,
    /// Press position minus the box's top-left at press time.
    pub offset: Point,
    /// Pointer position when a resize started.
    pub resize_start: Point,
    pub scale: Option<ScaleBaseline>,
}

impl InteractionSession {
    fn start(target: BoxId, gesture: Gesture, pointer: PointerId, origin: Rect, indicator: Indicator, at: Point) -> Self {
        Self {
            target,
            gesture,
            pointer,
            origin,
            origin_indicator: indicator,
            offset: Point::new(at.x - origin.left, at.y - origin.top),
            resize_start: at,
            scale: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    config: LabConfig,
    session: Option<InteractionSession>,
    pointers: ActivePointers,
    /// Last touch press on a box body, for double-tap detection.
    last_press: Option<(BoxId, f64)>,
}

impl InteractionController {
    pub fn new(config: LabConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn set_config(&mut self, config: LabConfig) {
        self.config = config;
    }

    pub fn mode(&self) -> Mode {
        self.session.as_ref().map(|s| s.gesture.into()).unwrap_or_default()
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    pub fn active_touches(&self) -> usize {
        self.pointers.count()
    }

    /// Drop every piece of transient state without touching the surface.
    pub fn reset(&mut self) {
        self.session = None;
        self.pointers.clear();
        self.last_press = None;
    }

    pub fn dispatch<S: Surface>(&mut self, surface: &S, event: InputEvent) -> Option<Mutation> {
        match event {
            InputEvent::PointerDown { pointer, at, time_ms } => self.pointer_down(surface, pointer, at, time_ms),
            InputEvent::PointerMove { pointer, at } => self.pointer_move(surface, pointer, at),
            InputEvent::PointerUp { pointer } => self.pointer_up(pointer),
            InputEvent::PointerCancel { pointer } => self.pointer_cancel(pointer),
            InputEvent::DoubleActivate { at } => self.double_activate(surface, at),
            InputEvent::Wheel { at, delta_y } => self.wheel(surface, at, delta_y),
            InputEvent::Key { key } => {
                if key == "Escape" {
                    self.cancel()
                } else {
                    None
                }
            }
        }
    }

    fn pointer_down<S: Surface>(&mut self, surface: &S, pointer: PointerId, at: Point, time_ms: f64) -> Option<Mutation> {
        if let PointerId::Touch(id) = pointer {
            self.pointers.press(id, at);
        }
        let hit = surface.hit_test(at);
        let quick_repeat = self.note_press(pointer, hit, time_ms);

        let Some(session) = self.session.as_mut() else {
            return self.begin(surface, pointer, hit?, at, quick_repeat);
        };

        match session.gesture {
            Gesture::Sticky => {
                // taps only: a mouse press here is the first half of a dblclick
                let near_center = pointer.is_touch()
                    && surface.bounds(session.target).is_some_and(|r| {
                        let c = r.center();
                        (at.x - c.x).abs() <= self.config.center_tolerance
                            && (at.y - c.y).abs() <= self.config.center_tolerance
                    });
                if near_center || quick_repeat == Some(session.target) {
                    self.exit_sticky()
                } else {
                    None
                }
            }
            Gesture::Dragging if pointer != session.pointer => {
                match (pointer, session.pointer) {
                    (PointerId::Touch(second), PointerId::Touch(first)) if self.config.two_finger_scale => {
                        let distance = self.pointers.distance(first, second)?;
                        let rect = surface.bounds(session.target)?;
                        session.gesture = Gesture::Scaling;
                        session.scale = Some(ScaleBaseline {
                            other: second,
                            distance,
                            width: rect.width,
                            height: rect.height,
                        });
                        clog(&format!("scale start on box {} (baseline {:.1}px)", session.target.0, distance));
                        None
                    }
                    _ => self.cancel(),
                }
            }
            _ => None,
        }
    }

    // Remembers touch presses on box bodies and reports a quick repeat on the same box.
    fn note_press(&mut self, pointer: PointerId, hit: Option<Hit>, time_ms: f64) -> Option<BoxId> {
        if !pointer.is_touch() {
            return None;
        }
        let Some(Hit::Body(id)) = hit else {
            return None;
        };
        let repeat = match self.last_press {
            Some((prev, t)) if prev == id && time_ms - t < self.config.double_activation_ms => Some(id),
            _ => None,
        };
        self.last_press = if repeat.is_some() { None } else { Some((id, time_ms)) };
        repeat
    }

    fn begin<S: Surface>(
        &mut self,
        surface: &S,
        pointer: PointerId,
        hit: Hit,
        at: Point,
        quick_repeat: Option<BoxId>,
    ) -> Option<Mutation> {
        let id = hit.id();
        let origin = surface.bounds(id)?;
        let indicator = surface.indicator(id).unwrap_or_default();
        match hit {
            Hit::Handle(_) => {
                self.session = Some(InteractionSession::start(id, Gesture::Resizing, pointer, origin, indicator, at));
                None
            }
            Hit::Body(_) if quick_repeat == Some(id) => self.enter_sticky(id, pointer, origin, indicator, at),
            Hit::Body(_) => {
                self.session = Some(InteractionSession::start(id, Gesture::Dragging, pointer, origin, indicator, at));
                None
            }
        }
    }

    fn enter_sticky(&mut self, id: BoxId, pointer: PointerId, origin: Rect, indicator: Indicator, at: Point) -> Option<Mutation> {
        self.session = Some(InteractionSession::start(id, Gesture::Sticky, pointer, origin, indicator, at));
        clog(&format!("sticky on for box {}", id.0));
        Some(Mutation::Indicator {
            id,
            indicator: Indicator::Sticky,
        })
    }

    fn exit_sticky(&mut self) -> Option<Mutation> {
        let session = self.session.take()?;
        // the tap that released the box must not pair with the next one
        self.last_press = None;
        clog(&format!("sticky off for box {}", session.target.0));
        Some(Mutation::Indicator {
            id: session.target,
            indicator: session.origin_indicator,
        })
    }

    fn pointer_move<S: Surface>(&mut self, surface: &S, pointer: PointerId, at: Point) -> Option<Mutation> {
        if let PointerId::Touch(id) = pointer {
            self.pointers.update(id, at);
        }
        let session = self.session.as_ref()?;
        let id = session.target;
        match session.gesture {
            Gesture::Sticky => {
                let (left, top) = match self.config.sticky_tracking {
                    StickyTracking::Offset => (at.x - session.offset.x, at.y - session.offset.y),
                    StickyTracking::TopLeft => (at.x, at.y),
                    StickyTracking::Center => {
                        let r = surface.bounds(id)?;
                        (at.x - r.width / 2.0, at.y - r.height / 2.0)
                    }
                };
                Some(Mutation::Move { id, left, top })
            }
            Gesture::Dragging if pointer == session.pointer => Some(Mutation::Move {
                id,
                left: at.x - session.offset.x,
                top: at.y - session.offset.y,
            }),
            Gesture::Resizing if pointer == session.pointer => {
                let (min, max) = (self.config.min_size, self.config.max_size);
                Some(Mutation::Resize {
                    id,
                    width: clamp_size(session.origin.width + (at.x - session.resize_start.x), min, max),
                    height: clamp_size(session.origin.height + (at.y - session.resize_start.y), min, max),
                })
            }
            Gesture::Scaling => {
                let base = session.scale?;
                let PointerId::Touch(first) = session.pointer else {
                    return None;
                };
                if base.distance <= 0.0 || !base.distance.is_finite() {
                    return None;
                }
                let factor = self.pointers.distance(first, base.other)? / base.distance;
                let (width, height) = self.scaled_size(base, factor);
                Some(Mutation::Resize { id, width, height })
            }
            Gesture::Dragging | Gesture::Resizing => None,
        }
    }

    fn scaled_size(&self, base: ScaleBaseline, factor: f64) -> (f64, f64) {
        let (min, max) = (self.config.min_size, self.config.max_size);
        let width = clamp_size(base.width * factor, min, max);
        let height = match self.config.scale_mode {
            ScaleMode::PreserveAspect if base.width > 0.0 => clamp_size(width * base.height / base.width, min, max),
            _ => clamp_size(base.height * factor, min, max),
        };
        (width, height)
    }

    fn pointer_up(&mut self, pointer: PointerId) -> Option<Mutation> {
        if let PointerId::Touch(id) = pointer {
            self.pointers.release(id);
        }
        let session = self.session.as_ref()?;
        let ends = match session.gesture {
            Gesture::Dragging | Gesture::Resizing => pointer == session.pointer,
            Gesture::Scaling => {
                pointer == session.pointer
                    || matches!((pointer, session.scale), (PointerId::Touch(id), Some(base)) if id == base.other)
            }
            Gesture::Sticky => false,
        };
        if ends {
            self.session = None;
        }
        None
    }

    fn pointer_cancel(&mut self, pointer: PointerId) -> Option<Mutation> {
        let drives = self
            .session
            .as_ref()
            .is_some_and(|s| s.gesture == Gesture::Dragging && s.pointer == pointer);
        if drives {
            if let PointerId::Touch(id) = pointer {
                self.pointers.release(id);
            }
            return self.cancel();
        }
        self.pointer_up(pointer)
    }

    fn double_activate<S: Surface>(&mut self, surface: &S, at: Point) -> Option<Mutation> {
        match self.session.as_ref().map(|s| s.gesture) {
            Some(Gesture::Sticky) => self.exit_sticky(),
            None => {
                let id = surface.hit_test(at)?.id();
                let origin = surface.bounds(id)?;
                let indicator = surface.indicator(id).unwrap_or_default();
                self.enter_sticky(id, PointerId::Mouse, origin, indicator, at)
            }
            Some(_) => None,
        }
    }

    fn wheel<S: Surface>(&mut self, surface: &S, at: Point, delta_y: f64) -> Option<Mutation> {
        if !self.config.wheel_resize || delta_y == 0.0 || !delta_y.is_finite() {
            return None;
        }
        let id = surface.hit_test(at)?.id();
        let r = surface.bounds(id)?;
        let step = if delta_y > 0.0 {
            self.config.wheel_shrink
        } else {
            self.config.wheel_grow
        };
        let (min, max) = (self.config.min_size, self.config.max_size);
        Some(Mutation::Resize {
            id,
            width: clamp_size(r.width * step, min, max),
            height: clamp_size(r.height * step, min, max),
        })
    }

    /// Abort the current session, putting the box back where the session found it.
    pub fn cancel(&mut self) -> Option<Mutation> {
        let session = self.session.take()?;
        clog(&format!("cancel on box {}", session.target.0));
        Some(Mutation::Restore {
            id: session.target,
            left: session.origin.left,
            top: session.origin.top,
            indicator: session.origin_indicator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::board::Board;

    fn down(pointer: PointerId, x: f64, y: f64, time_ms: f64) -> InputEvent {
        InputEvent::PointerDown { pointer, at: Point::new(x, y), time_ms }
    }

    fn mv(pointer: PointerId, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { pointer, at: Point::new(x, y) }
    }

    fn up(pointer: PointerId) -> InputEvent {
        InputEvent::PointerUp { pointer }
    }

    fn escape() -> InputEvent {
        InputEvent::Key { key: "Escape".into() }
    }

    // Feeds events through the controller, applying each mutation to the board.
    fn run(ctl: &mut InteractionController, board: &mut Board, events: Vec<InputEvent>) -> Vec<Mutation> {
        let mut out = Vec::new();
        for ev in events {
            if let Some(m) = ctl.dispatch(&*board, ev) {
                board.apply(m);
                out.push(m);
            }
        }
        out
    }

    fn setup() -> (InteractionController, Board) {
        (InteractionController::new(LabConfig::default()), Board::with_defaults(12.0))
    }

    fn rect_of(board: &Board, id: u32) -> Rect {
        board.get(BoxId(id)).unwrap().rect
    }

    const M: PointerId = PointerId::Mouse;
    const T1: PointerId = PointerId::Touch(1);
    const T2: PointerId = PointerId::Touch(2);

    #[test]
    fn drag_keeps_press_offset() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0)]);
        let s = ctl.session().unwrap();
        assert_eq!(s.gesture, Gesture::Dragging);
        assert_eq!(s.offset, Point::new(20.0, 30.0));

        let out = run(&mut ctl, &mut board, vec![mv(M, 200.0, 250.0)]);
        assert_eq!(out, vec![Mutation::Move { id: BoxId(0), left: 180.0, top: 220.0 }]);
        assert_eq!((rect_of(&board, 0).left, rect_of(&board, 0).top), (180.0, 220.0));
    }

    #[test]
    fn first_move_matches_offset_formula_for_many_presses() {
        for (px, py) in [(100.0, 100.0), (150.0, 160.0), (185.0, 110.0), (101.5, 187.0)] {
            let (mut ctl, mut board) = setup();
            let out = run(&mut ctl, &mut board, vec![down(M, px, py, 0.0), mv(M, 400.0, 20.0)]);
            assert_eq!(
                out,
                vec![Mutation::Move { id: BoxId(0), left: 400.0 - (px - 100.0), top: 20.0 - (py - 100.0) }]
            );
        }
    }

    #[test]
    fn release_ends_drag_and_keeps_position() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0), mv(M, 200.0, 250.0), up(M)]);
        assert_eq!(ctl.mode(), Mode::Idle);
        assert!(run(&mut ctl, &mut board, vec![mv(M, 0.0, 0.0)]).is_empty());
        assert_eq!((rect_of(&board, 0).left, rect_of(&board, 0).top), (180.0, 220.0));
    }

    #[test]
    fn press_on_nothing_and_stray_moves_are_noops() {
        let (mut ctl, mut board) = setup();
        let before = board.clone();
        let out = run(&mut ctl, &mut board, vec![mv(M, 10.0, 10.0), down(M, 250.0, 250.0, 0.0), mv(M, 260.0, 260.0), up(M)]);
        assert!(out.is_empty());
        assert_eq!(ctl.mode(), Mode::Idle);
        assert_eq!(board, before);
    }

    #[test]
    fn escape_restores_snapshot_and_is_idempotent() {
        let (mut ctl, mut board) = setup();
        let out = run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0), mv(M, 400.0, 400.0), escape()]);
        assert_eq!(
            out.last(),
            Some(&Mutation::Restore { id: BoxId(0), left: 100.0, top: 100.0, indicator: Indicator::Idle })
        );
        assert_eq!((rect_of(&board, 0).left, rect_of(&board, 0).top), (100.0, 100.0));
        assert_eq!(ctl.mode(), Mode::Idle);

        let snapshot = board.clone();
        assert!(run(&mut ctl, &mut board, vec![escape()]).is_empty());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn other_keys_do_nothing() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0)]);
        let out = run(&mut ctl, &mut board, vec![InputEvent::Key { key: "Enter".into() }]);
        assert!(out.is_empty());
        assert_eq!(ctl.mode(), Mode::Dragging);
    }

    #[test]
    fn second_finger_cancels_when_scaling_disabled() {
        let mut ctl = InteractionController::new(LabConfig { two_finger_scale: false, ..Default::default() });
        let mut board = Board::with_defaults(12.0);
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 120.0, 130.0, 0.0), mv(T1, 300.0, 30.0), down(T2, 500.0, 30.0, 10.0)],
        );
        assert_eq!(
            out.last(),
            Some(&Mutation::Restore { id: BoxId(0), left: 100.0, top: 100.0, indicator: Indicator::Idle })
        );
        assert_eq!(ctl.mode(), Mode::Idle);
    }

    #[test]
    fn mouse_drag_interrupted_by_touch_cancels() {
        let (mut ctl, mut board) = setup();
        let out = run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0), mv(M, 150.0, 150.0), down(T1, 600.0, 10.0, 5.0)]);
        assert!(matches!(out.last(), Some(Mutation::Restore { .. })));
        assert_eq!(ctl.mode(), Mode::Idle);
    }

    #[test]
    fn releasing_a_foreign_pointer_keeps_the_drag() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(T1, 120.0, 130.0, 0.0)]);
        let out = run(&mut ctl, &mut board, vec![up(PointerId::Touch(9)), up(M), mv(T1, 220.0, 230.0)]);
        assert_eq!(ctl.mode(), Mode::Dragging);
        assert_eq!(out, vec![Mutation::Move { id: BoxId(0), left: 200.0, top: 200.0 }]);
    }

    #[test]
    fn moves_from_a_foreign_pointer_are_ignored() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(T1, 120.0, 130.0, 0.0)]);
        assert!(run(&mut ctl, &mut board, vec![mv(T2, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn touchcancel_on_driver_restores() {
        let (mut ctl, mut board) = setup();
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 120.0, 130.0, 0.0), mv(T1, 150.0, 150.0), InputEvent::PointerCancel { pointer: T1 }],
        );
        assert!(matches!(out.last(), Some(Mutation::Restore { left, top, .. }) if *left == 100.0 && *top == 100.0));
        assert_eq!(ctl.active_touches(), 0);
    }

    #[test]
    fn handle_resize_scenario() {
        let mut ctl = InteractionController::new(LabConfig::default());
        let mut board = Board::new(12.0);
        let id = board.add_box(100.0, 100.0, 200.0, 150.0);
        // bottom-right handle of a 200x150 box at (100,100)
        run(&mut ctl, &mut board, vec![down(M, 295.0, 245.0, 0.0)]);
        assert_eq!(ctl.mode(), Mode::Resizing);
        let out = run(&mut ctl, &mut board, vec![mv(M, 345.0, 275.0)]);
        assert_eq!(out, vec![Mutation::Resize { id, width: 250.0, height: 180.0 }]);
        run(&mut ctl, &mut board, vec![up(M)]);
        assert_eq!(ctl.mode(), Mode::Idle);
        assert_eq!(board.get(id).unwrap().rect.left, 100.0);
    }

    #[test]
    fn handle_resize_is_always_clamped() {
        for (dx, dy) in [(10_000.0, 10_000.0), (-10_000.0, -10_000.0), (1e9, -1e9), (0.0, 0.0)] {
            let (mut ctl, mut board) = setup();
            run(&mut ctl, &mut board, vec![down(M, 195.0, 195.0, 0.0), mv(M, 195.0 + dx, 195.0 + dy)]);
            let r = rect_of(&board, 0);
            assert!((20.0..=300.0).contains(&r.width), "width {}", r.width);
            assert!((20.0..=300.0).contains(&r.height), "height {}", r.height);
        }
    }

    #[test]
    fn two_finger_scale_scenario() {
        let (mut ctl, mut board) = setup();
        let out = run(
            &mut ctl,
            &mut board,
            vec![
                down(T1, 120.0, 150.0, 0.0),
                down(T2, 220.0, 150.0, 1000.0),
                mv(T2, 270.0, 150.0),
            ],
        );
        assert_eq!(ctl.mode(), Mode::Scaling);
        assert_eq!(out, vec![Mutation::Resize { id: BoxId(0), width: 150.0, height: 150.0 }]);
    }

    #[test]
    fn unit_scale_factor_keeps_size() {
        let (mut ctl, mut board) = setup();
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 120.0, 150.0, 0.0), down(T2, 220.0, 150.0, 1000.0), mv(T1, 120.0, 150.0)],
        );
        assert_eq!(out, vec![Mutation::Resize { id: BoxId(0), width: 100.0, height: 100.0 }]);
    }

    #[test]
    fn scale_is_clamped_and_can_preserve_aspect() {
        let mut ctl = InteractionController::new(LabConfig { scale_mode: ScaleMode::PreserveAspect, ..Default::default() });
        let mut board = Board::new(12.0);
        let id = board.add_box(0.0, 0.0, 200.0, 100.0);
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 10.0, 10.0, 0.0), down(T2, 110.0, 10.0, 1000.0), mv(T2, 310.0, 10.0)],
        );
        // factor 3: width hits the ceiling, height follows the 2:1 ratio
        assert_eq!(out, vec![Mutation::Resize { id, width: 300.0, height: 150.0 }]);
    }

    #[test]
    fn zero_baseline_scale_is_a_noop() {
        let (mut ctl, mut board) = setup();
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 120.0, 150.0, 0.0), down(T2, 120.0, 150.0, 1000.0), mv(T2, 200.0, 150.0)],
        );
        assert!(out.is_empty());
        assert_eq!(rect_of(&board, 0).width, 100.0);
    }

    #[test]
    fn lifting_either_scale_finger_ends_gesture() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(T1, 120.0, 150.0, 0.0), down(T2, 220.0, 150.0, 1000.0), mv(T2, 270.0, 150.0), up(T2)]);
        assert_eq!(ctl.mode(), Mode::Idle);
        assert_eq!(rect_of(&board, 0).width, 150.0);
        assert!(run(&mut ctl, &mut board, vec![mv(T1, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn double_tap_enters_sticky_and_chases_pointer() {
        let (mut ctl, mut board) = setup();
        let out = run(&mut ctl, &mut board, vec![down(T1, 120.0, 130.0, 0.0), up(T1), down(T1, 120.0, 130.0, 200.0)]);
        assert_eq!(out, vec![Mutation::Indicator { id: BoxId(0), indicator: Indicator::Sticky }]);
        assert_eq!(ctl.mode(), Mode::Sticky);

        // finger lifted, box keeps following
        let out = run(&mut ctl, &mut board, vec![up(T1), mv(M, 400.0, 410.0)]);
        assert_eq!(out, vec![Mutation::Move { id: BoxId(0), left: 400.0, top: 410.0 }]);
        assert_eq!(ctl.mode(), Mode::Sticky);
    }

    #[test]
    fn slow_second_tap_is_a_plain_drag() {
        let (mut ctl, mut board) = setup();
        let out = run(&mut ctl, &mut board, vec![down(T1, 120.0, 130.0, 0.0), up(T1), down(T1, 120.0, 130.0, 300.0)]);
        assert!(out.is_empty());
        assert_eq!(ctl.mode(), Mode::Dragging);
    }

    #[test]
    fn mouse_presses_never_trigger_sticky_by_timing() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(M, 120.0, 130.0, 0.0), up(M), down(M, 120.0, 130.0, 50.0)]);
        assert_eq!(ctl.mode(), Mode::Dragging);
    }

    #[test]
    fn double_click_toggles_sticky_and_restores_indicator() {
        let (mut ctl, mut board) = setup();
        let dbl = |x: f64, y: f64| InputEvent::DoubleActivate { at: Point::new(x, y) };
        run(&mut ctl, &mut board, vec![dbl(120.0, 130.0)]);
        assert_eq!(ctl.mode(), Mode::Sticky);
        assert_eq!(board.get(BoxId(0)).unwrap().indicator, Indicator::Sticky);

        run(&mut ctl, &mut board, vec![mv(M, 250.0, 260.0), dbl(250.0, 260.0)]);
        assert_eq!(ctl.mode(), Mode::Idle);
        let b = board.get(BoxId(0)).unwrap();
        assert_eq!(b.indicator, Indicator::Idle);
        assert_eq!((b.rect.left, b.rect.top), (250.0, 260.0));
    }

    #[test]
    fn double_click_on_empty_space_does_nothing() {
        let (mut ctl, mut board) = setup();
        assert!(run(&mut ctl, &mut board, vec![InputEvent::DoubleActivate { at: Point::new(250.0, 250.0) }]).is_empty());
        assert_eq!(ctl.mode(), Mode::Idle);
    }

    #[test]
    fn sticky_tracking_policies() {
        let cases = [
            (StickyTracking::Offset, (380.0, 370.0)),
            (StickyTracking::TopLeft, (400.0, 400.0)),
            (StickyTracking::Center, (350.0, 350.0)),
        ];
        for (tracking, expected) in cases {
            let mut ctl = InteractionController::new(LabConfig { sticky_tracking: tracking, ..Default::default() });
            let mut board = Board::with_defaults(12.0);
            let out = run(
                &mut ctl,
                &mut board,
                vec![InputEvent::DoubleActivate { at: Point::new(120.0, 130.0) }, mv(M, 400.0, 400.0)],
            );
            assert_eq!(
                out.last(),
                Some(&Mutation::Move { id: BoxId(0), left: expected.0, top: expected.1 }),
                "{:?}",
                tracking
            );
        }
    }

    #[test]
    fn tap_on_sticky_center_releases() {
        let mut ctl = InteractionController::new(LabConfig { sticky_tracking: StickyTracking::Offset, ..Default::default() });
        let mut board = Board::with_defaults(12.0);
        run(&mut ctl, &mut board, vec![InputEvent::DoubleActivate { at: Point::new(120.0, 130.0) }]);
        // a press off-center is swallowed
        assert!(run(&mut ctl, &mut board, vec![down(T1, 110.0, 110.0, 5000.0), up(T1)]).is_empty());
        assert_eq!(ctl.mode(), Mode::Sticky);
        let out = run(&mut ctl, &mut board, vec![down(T1, 154.0, 146.0, 9000.0)]);
        assert_eq!(out, vec![Mutation::Indicator { id: BoxId(0), indicator: Indicator::Idle }]);
        assert_eq!(ctl.mode(), Mode::Idle);
    }

    // What the browser delivers for one mouse double click.
    fn double_click(x: f64, y: f64, t: f64) -> Vec<InputEvent> {
        vec![
            down(M, x, y, t),
            up(M),
            down(M, x, y, t + 80.0),
            up(M),
            InputEvent::DoubleActivate { at: Point::new(x, y) },
        ]
    }

    #[test]
    fn browser_double_click_toggles_sticky_for_every_policy() {
        let cases = [
            (StickyTracking::Offset, Point::new(150.0, 150.0)),
            (StickyTracking::Offset, Point::new(120.0, 130.0)),
            (StickyTracking::TopLeft, Point::new(120.0, 130.0)),
            (StickyTracking::Center, Point::new(150.0, 150.0)),
            (StickyTracking::Center, Point::new(120.0, 130.0)),
        ];
        for (tracking, press) in cases {
            let mut ctl = InteractionController::new(LabConfig { sticky_tracking: tracking, ..Default::default() });
            let mut board = Board::with_defaults(12.0);
            run(&mut ctl, &mut board, double_click(press.x, press.y, 0.0));
            assert_eq!(ctl.mode(), Mode::Sticky, "{:?} enter", tracking);
            assert_eq!(board.get(BoxId(0)).unwrap().indicator, Indicator::Sticky);

            run(&mut ctl, &mut board, vec![mv(M, 400.0, 400.0)]);
            let placed = rect_of(&board, 0);
            let mut events = double_click(400.0, 400.0, 5000.0);
            events.push(mv(M, 600.0, 20.0));
            run(&mut ctl, &mut board, events);

            assert_eq!(ctl.mode(), Mode::Idle, "{:?} exit", tracking);
            let b = board.get(BoxId(0)).unwrap();
            assert_eq!(b.indicator, Indicator::Idle, "{:?}", tracking);
            assert_eq!(b.rect, placed, "{:?}", tracking);
        }
    }

    #[test]
    fn touch_double_tap_on_center_leaves_sticky() {
        let mut ctl = InteractionController::new(LabConfig { sticky_tracking: StickyTracking::Center, ..Default::default() });
        let mut board = Board::with_defaults(12.0);
        run(&mut ctl, &mut board, vec![down(T1, 150.0, 150.0, 0.0), up(T1), down(T1, 150.0, 150.0, 100.0)]);
        assert_eq!(ctl.mode(), Mode::Sticky);
        run(&mut ctl, &mut board, vec![mv(T1, 700.0, 150.0), up(T1)]);

        // first tap lands on the center and releases; the second must not re-enter
        let out = run(
            &mut ctl,
            &mut board,
            vec![down(T1, 700.0, 150.0, 5000.0), up(T1), down(T1, 700.0, 150.0, 5100.0), up(T1)],
        );
        assert_eq!(out, vec![Mutation::Indicator { id: BoxId(0), indicator: Indicator::Idle }]);
        assert_eq!(ctl.mode(), Mode::Idle);
        assert_eq!((rect_of(&board, 0).left, rect_of(&board, 0).top), (650.0, 100.0));
    }

    #[test]
    fn mouse_press_on_sticky_center_is_swallowed() {
        let mut ctl = InteractionController::new(LabConfig { sticky_tracking: StickyTracking::Center, ..Default::default() });
        let mut board = Board::with_defaults(12.0);
        run(&mut ctl, &mut board, double_click(150.0, 150.0, 0.0));
        assert!(run(&mut ctl, &mut board, vec![down(M, 150.0, 150.0, 2000.0), up(M)]).is_empty());
        assert_eq!(ctl.mode(), Mode::Sticky);
    }

    #[test]
    fn second_finger_does_not_cancel_sticky() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![InputEvent::DoubleActivate { at: Point::new(120.0, 130.0) }]);
        let out = run(&mut ctl, &mut board, vec![down(T1, 600.0, 20.0, 0.0), down(T2, 650.0, 20.0, 10.0)]);
        assert!(out.is_empty());
        assert_eq!(ctl.mode(), Mode::Sticky);
    }

    #[test]
    fn escape_in_sticky_restores_origin_and_indicator() {
        let (mut ctl, mut board) = setup();
        run(
            &mut ctl,
            &mut board,
            vec![InputEvent::DoubleActivate { at: Point::new(120.0, 130.0) }, mv(M, 500.0, 20.0), escape()],
        );
        let b = board.get(BoxId(0)).unwrap();
        assert_eq!((b.rect.left, b.rect.top), (100.0, 100.0));
        assert_eq!(b.indicator, Indicator::Idle);
        assert_eq!(ctl.mode(), Mode::Idle);
    }

    #[test]
    fn wheel_nudges_size_within_bounds() {
        let (mut ctl, mut board) = setup();
        let wheel = |dy: f64| InputEvent::Wheel { at: Point::new(105.0, 105.0), delta_y: dy };
        let out = run(&mut ctl, &mut board, vec![wheel(100.0)]);
        assert_eq!(out, vec![Mutation::Resize { id: BoxId(0), width: 90.0, height: 90.0 }]);

        run(&mut ctl, &mut board, (0..60).map(|_| wheel(100.0)).collect());
        assert_eq!(rect_of(&board, 0).width, 20.0);

        let mut big = Board::new(12.0);
        big.add_box(100.0, 100.0, 100.0, 100.0);
        run(&mut ctl, &mut big, (0..60).map(|_| wheel(-100.0)).collect());
        assert_eq!(rect_of(&big, 0).width, 300.0);
    }

    #[test]
    fn wheel_is_ignored_when_disabled_or_off_target() {
        let mut ctl = InteractionController::new(LabConfig { wheel_resize: false, ..Default::default() });
        let board = Board::with_defaults(12.0);
        assert_eq!(ctl.dispatch(&board, InputEvent::Wheel { at: Point::new(150.0, 150.0), delta_y: 1.0 }), None);

        let mut ctl = InteractionController::new(LabConfig::default());
        assert_eq!(ctl.dispatch(&board, InputEvent::Wheel { at: Point::new(250.0, 250.0), delta_y: 1.0 }), None);
        assert_eq!(ctl.dispatch(&board, InputEvent::Wheel { at: Point::new(150.0, 150.0), delta_y: 0.0 }), None);
    }

    #[test]
    fn reset_forgets_session_and_touches() {
        let (mut ctl, mut board) = setup();
        run(&mut ctl, &mut board, vec![down(T1, 120.0, 130.0, 0.0)]);
        ctl.reset();
        assert_eq!(ctl.mode(), Mode::Idle);
        assert_eq!(ctl.active_touches(), 0);
        assert_eq!(ctl.cancel(), None);
    }
}

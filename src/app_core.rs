use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kyubu_core::{CubeSession, CubeletTransform, Face};

use crate::input::{classify_key, classify_slice_drag, KeyCommand, VIEW_ROTATE_SPEED};
use crate::scene::ViewInput;

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

const VIEW_YAW_DEFAULT: f32 = 0.62;
const VIEW_PITCH_DEFAULT: f32 = 0.45;
const CUBE_SCALE_DEFAULT: f32 = 1.0;

#[derive(Clone, Copy, Debug)]
struct ViewState {
    yaw: f32,
    pitch: f32,
    scale: f32,
}

#[derive(Clone, Copy, Debug)]
enum PointerMode {
    Idle,
    RotateView {
        last_x: f32,
        last_y: f32,
    },
    DragSlice {
        start_x: f32,
        start_y: f32,
        cubelet: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct UiState {
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub queued: usize,
    pub animating: bool,
}

pub(crate) struct AppCore {
    session: RefCell<CubeSession>,
    view: RefCell<ViewState>,
    pointer: RefCell<PointerMode>,
    dirty: Cell<bool>,
    ui_state: Cell<UiState>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl AppCore {
    pub(crate) fn new() -> Rc<Self> {
        let core = Rc::new(Self {
            session: RefCell::new(CubeSession::new()),
            view: RefCell::new(ViewState {
                yaw: VIEW_YAW_DEFAULT,
                pitch: VIEW_PITCH_DEFAULT,
                scale: CUBE_SCALE_DEFAULT,
            }),
            pointer: RefCell::new(PointerMode::Idle),
            dirty: Cell::new(true),
            ui_state: Cell::new(UiState::default()),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        });
        core.ui_state.set(core.current_ui_state());
        core
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify_subscribers(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    fn current_ui_state(&self) -> UiState {
        let session = self.session.borrow();
        UiState {
            undo_depth: session.history().undo_depth(),
            redo_depth: session.history().redo_depth(),
            queued: session.queued(),
            animating: session.animating(),
        }
    }

    fn publish_ui_state(&self) {
        let next = self.current_ui_state();
        if next != self.ui_state.get() {
            self.ui_state.set(next);
            self.notify_subscribers();
        }
    }

    pub(crate) fn ui_state(&self) -> UiState {
        self.ui_state.get()
    }

    pub(crate) fn frame(&self, now_ms: f64) -> bool {
        let animating_before = self.session.borrow().animating();
        if let Err(err) = self.session.borrow_mut().tick(now_ms) {
            gloo::console::error!("rotation aborted:", err.to_string());
        }
        let animating_after = self.session.borrow().animating();
        self.publish_ui_state();
        self.dirty.take() || animating_before || animating_after
    }

    pub(crate) fn render_snapshot(&self) -> (Vec<CubeletTransform>, ViewInput) {
        let view = *self.view.borrow();
        (
            self.session.borrow().transforms(),
            ViewInput {
                yaw: view.yaw,
                pitch: view.pitch,
                scale: view.scale,
            },
        )
    }

    pub(crate) fn pointer_down(&self, x: f32, y: f32, hit: Option<usize>) {
        if self.session.borrow().animating() {
            return;
        }
        *self.pointer.borrow_mut() = match hit {
            Some(cubelet) => PointerMode::DragSlice {
                start_x: x,
                start_y: y,
                cubelet,
            },
            None => PointerMode::RotateView {
                last_x: x,
                last_y: y,
            },
        };
    }

    pub(crate) fn pointer_move(&self, x: f32, y: f32) {
        let mut pointer = self.pointer.borrow_mut();
        if let PointerMode::RotateView { last_x, last_y } = &mut *pointer {
            let dx = x - *last_x;
            let dy = y - *last_y;
            *last_x = x;
            *last_y = y;
            let mut view = self.view.borrow_mut();
            view.yaw += dx * VIEW_ROTATE_SPEED;
            view.pitch += dy * VIEW_ROTATE_SPEED;
            self.dirty.set(true);
        }
    }

    pub(crate) fn pointer_up(&self, x: f32, y: f32) {
        let mode = std::mem::replace(&mut *self.pointer.borrow_mut(), PointerMode::Idle);
        if let PointerMode::DragSlice {
            start_x,
            start_y,
            cubelet,
        } = mode
        {
            let lattice = self.session.borrow().grid().cubelets()[cubelet].lattice();
            if let Some(descriptor) = classify_slice_drag(x - start_x, y - start_y, lattice) {
                self.session.borrow_mut().enqueue(descriptor);
                self.publish_ui_state();
            }
        }
    }

    pub(crate) fn key_down(&self, key: &str, shift: bool, ctrl: bool) -> bool {
        match classify_key(key, shift, ctrl) {
            Some(KeyCommand::Turn { face, reverse }) => {
                self.enqueue_face(face, reverse);
                true
            }
            Some(KeyCommand::Undo) => {
                self.request_undo();
                true
            }
            Some(KeyCommand::Redo) => {
                self.request_redo();
                true
            }
            None => false,
        }
    }

    pub(crate) fn enqueue_face(&self, face: Face, reverse: bool) {
        self.session.borrow_mut().enqueue_face(face, reverse);
        self.publish_ui_state();
    }

    pub(crate) fn request_undo(&self) {
        self.session.borrow_mut().request_undo();
        self.publish_ui_state();
    }

    pub(crate) fn request_redo(&self) {
        self.session.borrow_mut().request_redo();
        self.publish_ui_state();
    }

    pub(crate) fn scramble(&self, seed: u32) {
        if !self.session.borrow_mut().scramble(seed) {
            gloo::console::log!("scramble ignored: moves still in flight");
            return;
        }
        self.publish_ui_state();
    }

    pub(crate) fn set_scale(&self, scale: f32) {
        self.view.borrow_mut().scale = scale;
        self.dirty.set(true);
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        if let Some(index) = subscribers
            .iter()
            .position(|entry| Rc::ptr_eq(entry, &self.subscriber))
        {
            subscribers.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyubu_core::ROTATION_MS;

    fn settle(core: &AppCore, clock: &mut f64) {
        loop {
            *clock += 16.0;
            core.frame(*clock);
            let ui = core.ui_state();
            if !ui.animating && ui.queued == 0 {
                break;
            }
        }
    }

    #[test]
    fn background_drag_rotates_the_view() {
        let core = AppCore::new();
        core.pointer_down(100.0, 100.0, None);
        core.pointer_move(140.0, 90.0);
        core.pointer_up(140.0, 90.0);
        let (_, view) = core.render_snapshot();
        assert!((view.yaw - (VIEW_YAW_DEFAULT + 40.0 * VIEW_ROTATE_SPEED)).abs() < 1e-6);
        assert!((view.pitch - (VIEW_PITCH_DEFAULT - 10.0 * VIEW_ROTATE_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn cubelet_drag_enqueues_a_turn() {
        let core = AppCore::new();
        core.pointer_down(100.0, 100.0, Some(14));
        core.pointer_up(180.0, 105.0);
        assert_eq!(core.ui_state().queued, 1);

        core.pointer_down(100.0, 100.0, Some(14));
        core.pointer_up(104.0, 101.0);
        assert_eq!(core.ui_state().queued, 1);
    }

    #[test]
    fn pointer_down_is_ignored_mid_animation() {
        let core = AppCore::new();
        let mut clock = 0.0;
        core.enqueue_face(Face::R, false);
        core.frame(clock);
        assert!(core.ui_state().animating);

        core.pointer_down(10.0, 10.0, Some(0));
        core.pointer_up(90.0, 10.0);
        assert_eq!(core.ui_state().queued, 0);

        clock += ROTATION_MS;
        settle(&core, &mut clock);
        assert_eq!(core.ui_state().undo_depth, 1);
    }

    #[test]
    fn keyboard_path_reaches_the_session() {
        let core = AppCore::new();
        let mut clock = 0.0;
        assert!(core.key_down("r", false, false));
        assert!(!core.key_down("x", false, false));
        settle(&core, &mut clock);
        assert_eq!(core.ui_state().undo_depth, 1);

        assert!(core.key_down("z", false, true));
        settle(&core, &mut clock);
        assert_eq!(core.ui_state().undo_depth, 0);
        assert_eq!(core.ui_state().redo_depth, 1);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent};

use crate::app_core::AppCore;
use crate::scene::{pick, project_scene, FaceQuad};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const STICKER_STROKE: &str = "#10101a";
const STICKER_STROKE_WIDTH: &str = "2";

pub(crate) struct SvgView {
    core: Rc<AppCore>,
    root: Element,
    svg: Element,
    document: Document,
    polygons: RefCell<Vec<Element>>,
    quads: RefCell<Vec<FaceQuad>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl SvgView {
    pub(crate) fn mount(core: Rc<AppCore>, root: Element) -> Rc<Self> {
        let document = root.owner_document().expect("root element in a document");
        let svg = document
            .create_element_ns(Some(SVG_NS), "svg")
            .expect("create svg root");
        let _ = svg.set_attribute("width", "100%");
        let _ = svg.set_attribute("height", "100%");
        let _ = root.append_child(&svg);

        let view = Rc::new(Self {
            core,
            root,
            svg,
            document,
            polygons: RefCell::new(Vec::new()),
            quads: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
        });
        view.install_listeners();
        view.schedule_frame();
        view
    }

    pub(crate) fn unmount(&self) {
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        self.svg.remove();
    }

    fn schedule_frame(self: &Rc<Self>) {
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            view.frame.borrow_mut().take();
            view.on_frame(timestamp);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        if self.core.frame(timestamp) {
            self.render();
        }
        self.schedule_frame();
    }

    fn render(&self) {
        let rect = self.root.get_bounding_client_rect();
        let width = rect.width() as f32;
        let height = rect.height() as f32;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (transforms, view) = self.core.render_snapshot();
        let quads = project_scene(&transforms, view, width, height);

        let mut polygons = self.polygons.borrow_mut();
        while polygons.len() < quads.len() {
            let polygon = self
                .document
                .create_element_ns(Some(SVG_NS), "polygon")
                .expect("create sticker polygon");
            let _ = polygon.set_attribute("stroke", STICKER_STROKE);
            let _ = polygon.set_attribute("stroke-width", STICKER_STROKE_WIDTH);
            let _ = polygon.set_attribute("stroke-linejoin", "round");
            let _ = self.svg.append_child(&polygon);
            polygons.push(polygon);
        }
        while polygons.len() > quads.len() {
            if let Some(polygon) = polygons.pop() {
                polygon.remove();
            }
        }
        for (polygon, quad) in polygons.iter().zip(&quads) {
            let points = quad
                .points
                .iter()
                .map(|p| format!("{:.2},{:.2}", p[0], p[1]))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = polygon.set_attribute("points", &points);
            let _ = polygon.set_attribute("fill", quad.color);
        }
        *self.quads.borrow_mut() = quads;
    }

    fn local_coords(&self, event: &MouseEvent) -> (f32, f32) {
        let rect = self.svg.get_bounding_client_rect();
        (
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let view = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.svg,
            "mousedown",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = view.local_coords(event);
                let hit = pick(&view.quads.borrow(), x, y);
                view.core.pointer_down(x, y, hit);
            },
        ));

        // Move/up on the document so drags survive leaving the svg.
        let view = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.document,
            "mousemove",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = view.local_coords(event);
                view.core.pointer_move(x, y);
            },
        ));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.document,
            "mouseup",
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = view.local_coords(event);
                view.core.pointer_up(x, y);
            },
        ));

        let view = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.document,
            "keydown",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if view
                    .core
                    .key_down(&event.key(), event.shift_key(), event.ctrl_key())
                {
                    event.prevent_default();
                }
            },
        ));

        *self.listeners.borrow_mut() = listeners;
    }
}

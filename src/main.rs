use std::rc::Rc;

use js_sys::Date;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::svg_view::SvgView;

mod app_core;
mod input;
mod scene;
mod svg_view;

const SIZE_SLIDER_MIN: &str = "50";
const SIZE_SLIDER_MAX: &str = "300";
const SIZE_SLIDER_DEFAULT: &str = "200";
const SIZE_SLIDER_UNIT: f32 = 200.0;

#[function_component(App)]
fn app() -> Html {
    let core = use_memo((), |_| AppCore::new());
    let core: Rc<AppCore> = (*core).clone();
    let cube_area = use_node_ref();
    let modal_open = use_state(|| false);
    let size_value = use_state(|| SIZE_SLIDER_DEFAULT.to_string());
    let update = use_force_update();

    {
        let core = Rc::clone(&core);
        let cube_area = cube_area.clone();
        use_effect_with((), move |_| {
            let element = cube_area.cast::<Element>().expect("cube area mounted");
            let view = SvgView::mount(core, element);
            move || view.unmount()
        });
    }

    {
        let core = Rc::clone(&core);
        let update = update.clone();
        use_effect_with((), move |_| {
            let subscription = core.subscribe(Rc::new(move || update.force_update()));
            move || drop(subscription)
        });
    }

    let ui = core.ui_state();

    let on_scramble = {
        let core = Rc::clone(&core);
        Callback::from(move |_| core.scramble(Date::now() as u32))
    };
    let on_undo = {
        let core = Rc::clone(&core);
        Callback::from(move |_| core.request_undo())
    };
    let on_redo = {
        let core = Rc::clone(&core);
        Callback::from(move |_| core.request_redo())
    };
    let on_size = {
        let core = Rc::clone(&core);
        let size_value = size_value.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let raw = input.value();
            if let Ok(value) = raw.parse::<f32>() {
                core.set_scale(value / SIZE_SLIDER_UNIT);
            }
            size_value.set(raw);
        })
    };
    let on_open_controls = {
        let modal_open = modal_open.clone();
        Callback::from(move |_| modal_open.set(true))
    };
    let on_close_controls = {
        let modal_open = modal_open.clone();
        Callback::from(move |_| modal_open.set(false))
    };

    html! {
        <div class="app">
            <header class="top-bar">
                <h1>{ "kyubu" }</h1>
                <div class="toolbar">
                    <button onclick={on_scramble}>{ "Scramble" }</button>
                    <button onclick={on_undo} disabled={ui.undo_depth == 0}>{ "Undo" }</button>
                    <button onclick={on_redo} disabled={ui.redo_depth == 0}>{ "Redo" }</button>
                    <button onclick={on_open_controls}>{ "Controls" }</button>
                </div>
            </header>
            <div id="cube-area" ref={cube_area}></div>
            <div class="size-control">
                <label>
                    { "Cube size" }
                    <input
                        type="range"
                        min={SIZE_SLIDER_MIN}
                        max={SIZE_SLIDER_MAX}
                        value={(*size_value).clone()}
                        oninput={on_size}
                    />
                </label>
            </div>
            if *modal_open {
                <div class="controls-modal">
                    <div class="controls-body">
                        <button class="close-btn" onclick={on_close_controls}>{ "×" }</button>
                        <h2>{ "Controls" }</h2>
                        <ul>
                            <li>{ "R / L / U / D / F / B: turn a face (Shift reverses)" }</li>
                            <li>{ "Drag a cubelet: turn its row or column" }</li>
                            <li>{ "Drag the background: rotate the view" }</li>
                            <li>{ "Ctrl+Z: undo, Ctrl+Y or Ctrl+Shift+Z: redo" }</li>
                        </ul>
                    </div>
                </div>
            }
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

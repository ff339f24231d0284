//! DOM board view
//!
//! Eyes are appended before tubes so the tubes paint on top of them. Styles
//! are only written when a position actually changed, letting the CSS
//! transition animate each move.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::consts::{EYE_SIZE, TUBE_BORDER, TUBE_SIZE};
use crate::sim::{EyeKind, GameState, Rect, layout};

/// Listener bound to one tube element
pub type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

struct EyeElement {
    el: HtmlElement,
    /// Last position written to the element
    pos: Option<Vec2>,
}

/// Elements for the current level
pub struct BoardView {
    document: Document,
    root: HtmlElement,
    eyes: HashMap<u32, EyeElement>,
    tubes: Vec<HtmlElement>,
    handlers: Vec<ClickHandler>,
    timer: Option<HtmlElement>,
    timer_width: Option<f32>,
}

impl BoardView {
    /// Attach to `document.body`; `timed` adds the countdown bar
    pub fn new(document: Document, timed: bool) -> Result<Self, JsValue> {
        let root = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        set_styles(&root, &[("background", "#237")])?;

        let timer = if timed {
            let el = create(&document, "b")?;
            set_styles(&el, &[("position", "fixed"), ("background", "#fff")])?;
            root.append_child(&el)?;
            Some(el)
        } else {
            None
        };

        Ok(Self {
            document,
            root,
            eyes: HashMap::new(),
            tubes: Vec::new(),
            handlers: Vec::new(),
            timer,
            timer_width: None,
        })
    }

    /// Replace all eye and tube elements with ones for the current board
    ///
    /// `handlers[i]` becomes the click listener of tube `i`.
    pub fn rebuild(&mut self, state: &GameState, handlers: Vec<ClickHandler>) -> Result<(), JsValue> {
        self.clear();

        for eye in state.tubes.iter().flat_map(|t| t.eyes.iter()) {
            let el = create_eye(&self.document, eye.kind)?;
            self.root.append_child(&el)?;
            self.eyes.insert(eye.id, EyeElement { el, pos: None });
        }

        let count = state.tube_count();
        for (index, handler) in handlers.into_iter().enumerate().take(count) {
            let el = create_tube(&self.document, layout::tube_rect(index, count))?;
            el.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
            self.root.append_child(&el)?;
            self.tubes.push(el);
            self.handlers.push(handler);
        }

        log::debug!("Board rebuilt: {} tubes, {} eyes", self.tubes.len(), self.eyes.len());
        self.sync(state)
    }

    /// Write changed eye positions and the countdown bar
    pub fn sync(&mut self, state: &GameState) -> Result<(), JsValue> {
        let floating = state.floating.iter().map(|f| &f.eye);
        for eye in state.tubes.iter().flat_map(|t| t.eyes.iter()).chain(floating) {
            if let Some(view) = self.eyes.get_mut(&eye.id) {
                if view.pos != Some(eye.pos) {
                    place(&view.el, eye.pos)?;
                    view.pos = Some(eye.pos);
                }
            }
        }

        if let Some(timer) = &self.timer {
            let bar = layout::timer_bar(state.time_remaining_ms);
            if self.timer_width != Some(bar.size.x) {
                set_rect(timer, bar)?;
                self.timer_width = Some(bar.size.x);
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        for (_, eye) in self.eyes.drain() {
            eye.el.remove();
        }
        for tube in self.tubes.drain(..) {
            tube.remove();
        }
        self.handlers.clear();
    }
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = el.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

fn px(v: f32) -> String {
    format!("{}px", v)
}

/// Position relative to the viewport centre
fn place(el: &HtmlElement, pos: Vec2) -> Result<(), JsValue> {
    let left = format!("calc(50% + {}px)", pos.x);
    let top = format!("calc(50% + {}px)", pos.y);
    set_styles(el, &[("left", left.as_str()), ("top", top.as_str())])
}

fn set_rect(el: &HtmlElement, rect: Rect) -> Result<(), JsValue> {
    place(el, rect.pos)?;
    let width = px(rect.size.x);
    let height = px(rect.size.y);
    set_styles(el, &[("width", width.as_str()), ("height", height.as_str())])
}

fn create_eye(document: &Document, kind: EyeKind) -> Result<HtmlElement, JsValue> {
    let el = create(document, "b")?;
    let size = px(EYE_SIZE);
    set_styles(
        &el,
        &[
            ("position", "fixed"),
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("border-radius", size.as_str()),
            ("transition", "all .2s"),
            ("background", kind.background()),
        ],
    )?;
    Ok(el)
}

fn create_tube(document: &Document, rect: Rect) -> Result<HtmlElement, JsValue> {
    let el = create(document, "button")?;
    let border = format!("#fff solid {}", px(TUBE_BORDER));
    let radius = format!("0 0 {0} {0}", px(TUBE_SIZE));
    set_styles(
        &el,
        &[
            ("position", "fixed"),
            ("box-sizing", "border-box"),
            ("padding", "0"),
            ("border", border.as_str()),
            ("border-top", "0"),
            ("border-radius", radius.as_str()),
            ("background", "#fff1"),
            ("cursor", "pointer"),
        ],
    )?;
    set_rect(&el, rect)?;
    Ok(el)
}

#![forbid(unsafe_code)]

//! DOM wiring for [`DragScroll`]: listeners in, scroll/class/capture out.
//!
//! Every listener closure is owned by the binding (never `forget()`-ed) so
//! detaching can unregister exactly what attaching registered. Handlers use
//! `try_borrow_mut` on the shared controller; a re-entrant dispatch is
//! dropped instead of panicking inside a browser callback.

use std::cell::RefCell;
use std::rc::Rc;

use dragscroll_core::{
    ClickDisposition, DragScroll, GestureDispatch, GestureEnd, IgnoreZone, PointerCapture,
    PointerDown, PointerId, PointerMove, ScrollSurface, SelectionStyle,
};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, MouseEvent, Node,
    PointerEvent, Window,
};

use crate::dom_input::{
    BindingOptions, DEFAULT_SELECTION_PROPERTY, GestureEvent, pointer_button_from_dom,
    pointer_kind_from_dom,
};
use crate::error::AttachError;

/// Host capabilities backed by a live DOM element and its document.
#[derive(Debug, Clone)]
pub struct DomHost {
    element: HtmlElement,
    document: Document,
}

impl DomHost {
    #[must_use]
    pub fn new(element: HtmlElement, document: Document) -> Self {
        Self { element, document }
    }

    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl ScrollSurface for DomHost {
    type Target = Element;

    fn scroll_offset(&self) -> f64 {
        f64::from(self.element.scroll_top())
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.element.set_scroll_top(offset.round() as i32);
    }

    fn add_marker(&mut self, marker: &str) {
        let _ = self.element.class_list().add_1(marker);
    }

    fn remove_marker(&mut self, marker: &str) {
        let _ = self.element.class_list().remove_1(marker);
    }

    fn target_matches(&self, target: &Element, selector: &str) -> bool {
        match target.closest(selector) {
            Ok(Some(found)) => {
                let found: &Node = &found;
                self.element.contains(Some(found))
            }
            _ => false,
        }
    }
}

impl PointerCapture for DomHost {
    fn request_capture(&mut self, pointer_id: PointerId) -> bool {
        let id = pointer_id.get();
        self.element.set_pointer_capture(id).is_ok() && self.element.has_pointer_capture(id)
    }

    fn release_capture(&mut self, pointer_id: PointerId) -> bool {
        let id = pointer_id.get();
        self.element.has_pointer_capture(id) && self.element.release_pointer_capture(id).is_ok()
    }
}

impl SelectionStyle for DomHost {
    fn selection_mode(&self) -> Option<String> {
        let body = self.document.body()?;
        body.style()
            .get_property_value(DEFAULT_SELECTION_PROPERTY)
            .ok()
            .filter(|mode| !mode.is_empty())
    }

    fn set_selection_mode(&mut self, mode: Option<&str>) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let _ = match mode {
            Some(mode) => style.set_property(DEFAULT_SELECTION_PROPERTY, mode),
            None => style.remove_property(DEFAULT_SELECTION_PROPERTY).map(drop),
        };
    }
}

type SharedController = Rc<RefCell<DragScroll<DomHost>>>;
type ClickVetoListener = Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Drag-to-scroll attached to one DOM element.
///
/// Dropping the binding detaches it.
pub struct DragScrollBinding {
    controller: SharedController,
    window: Window,
    listeners: Vec<Listener>,
    click_veto: ClickVetoListener,
}

impl std::fmt::Debug for DragScrollBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragScrollBinding")
            .field("listeners", &self.listeners.len())
            .field("controller", &self.controller.try_borrow().ok())
            .finish()
    }
}

impl DragScrollBinding {
    /// Attach to `element`, registering pointer listeners on it and a blur
    /// listener on the window.
    pub fn attach(element: HtmlElement, options: &BindingOptions) -> Result<Self, AttachError> {
        let window = web_sys::window().ok_or(AttachError::NoWindow)?;
        let document = window.document().ok_or(AttachError::NoDocument)?;
        let config = options.to_config()?;

        let mut controller = DragScroll::new(DomHost::new(element.clone(), document), config)?;
        if let Some(selector) = options.ignore_selector() {
            controller = controller.with_ignore_zone(IgnoreZone::selector(selector));
        }

        let mut binding = Self {
            controller: Rc::new(RefCell::new(controller)),
            window,
            listeners: Vec::with_capacity(GestureEvent::ALL.len() + 1),
            click_veto: Rc::new(RefCell::new(None)),
        };

        let container: EventTarget = element.into();
        for kind in GestureEvent::ALL {
            let callback = binding.pointer_callback(kind);
            binding.listen(container.clone(), kind.dom_name(), callback)?;
        }
        let blur = {
            let controller = Rc::clone(&binding.controller);
            Closure::wrap(Box::new(move |_event: Event| {
                if let Ok(mut ds) = controller.try_borrow_mut() {
                    ds.blur();
                }
            }) as Box<dyn FnMut(Event)>)
        };
        let window_target: EventTarget = binding.window.clone().into();
        binding.listen(window_target, "blur", blur)?;

        debug!(listeners = binding.listeners.len(), "drag-scroll attached");
        Ok(binding)
    }

    /// Whether a drag is currently moving the container.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|ds| ds.is_dragging())
    }

    /// Run teardown and unregister every listener.
    pub fn detach(self) {
        drop(self);
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), AttachError> {
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|error| AttachError::Listener {
                event,
                message: format!("{error:?}"),
            })?;
        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }

    fn pointer_callback(&self, kind: GestureEvent) -> Closure<dyn FnMut(Event)> {
        let controller = Rc::clone(&self.controller);
        let click_veto = Rc::clone(&self.click_veto);
        let window = self.window.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let Some(dispatch) = dispatch_pointer(&controller, kind, event) else {
                return;
            };
            if dispatch.consume_default {
                event.prevent_default();
            }
            if dispatch.click_veto_armed {
                install_click_veto(&window, &controller, &click_veto);
            }
        }) as Box<dyn FnMut(Event)>)
    }
}

impl Drop for DragScrollBinding {
    fn drop(&mut self) {
        if let Ok(mut ds) = self.controller.try_borrow_mut() {
            let dispatch = ds.detach();
            trace!(outcome = ?dispatch.outcome, "drag-scroll teardown");
        }
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        remove_click_veto(&self.window, &self.click_veto);
        debug!("drag-scroll detached");
    }
}

fn dispatch_pointer(
    controller: &SharedController,
    kind: GestureEvent,
    event: &PointerEvent,
) -> Option<GestureDispatch> {
    let mut ds = controller.try_borrow_mut().ok()?;
    let pointer_id = PointerId(event.pointer_id());
    let dispatch = match kind {
        GestureEvent::PointerDown => ds.pointer_down(&PointerDown {
            pointer_id,
            kind: pointer_kind_from_dom(&event.pointer_type()),
            button: pointer_button_from_dom(event.button()),
            y: f64::from(event.client_y()),
            target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
        }),
        GestureEvent::PointerMove => {
            ds.pointer_move(&PointerMove::new(pointer_id, f64::from(event.client_y())))
        }
        GestureEvent::PointerUp => ds.end(pointer_id, GestureEnd::Up),
        GestureEvent::PointerLeave => ds.end(pointer_id, GestureEnd::Leave),
        GestureEvent::PointerCancel => ds.end(pointer_id, GestureEnd::Cancel),
        GestureEvent::LostPointerCapture => ds.end(pointer_id, GestureEnd::LostCapture),
    };
    Some(dispatch)
}

/// Register a capturing, run-once `click` listener on the window that asks
/// the controller whether to cancel the click.
fn install_click_veto(window: &Window, controller: &SharedController, slot: &ClickVetoListener) {
    let controller = Rc::clone(controller);
    let callback = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Ok(mut ds) = controller.try_borrow_mut() else {
            return;
        };
        if ds.click() == ClickDisposition::Cancel {
            event.prevent_default();
            event.stop_propagation();
        }
    }) as Box<dyn FnMut(MouseEvent)>);

    let options = AddEventListenerOptions::new();
    options.set_capture(true);
    options.set_once(true);
    if window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .is_err()
    {
        return;
    }
    remove_click_veto(window, slot);
    *slot.borrow_mut() = Some(callback);
    trace!("drag-scroll click veto installed");
}

fn remove_click_veto(window: &Window, slot: &ClickVetoListener) {
    if let Some(previous) = slot.borrow_mut().take() {
        let _ = window.remove_event_listener_with_callback_and_bool(
            "click",
            previous.as_ref().unchecked_ref(),
            true,
        );
    }
}

/// JS-facing handle: `new DragScrollHandle(element, ignoreSelector, activeClass)`.
#[wasm_bindgen]
pub struct DragScrollHandle {
    binding: Option<DragScrollBinding>,
}

#[wasm_bindgen]
impl DragScrollHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlElement,
        ignore_selector: Option<String>,
        active_class: Option<String>,
    ) -> Result<DragScrollHandle, JsValue> {
        let options = BindingOptions {
            ignore_selector,
            active_class,
            drag_threshold: None,
        };
        let binding = DragScrollBinding::attach(element, &options)?;
        Ok(Self {
            binding: Some(binding),
        })
    }

    /// Tear down the binding; later calls are no-ops.
    pub fn detach(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.detach();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(DragScrollBinding::is_dragging)
    }
}

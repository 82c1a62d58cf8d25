//! Browser binding. Registers capture-phase `click` and `submit` listeners
//! on the document, then resolves any pending claim from before the reload.

use crate::config::ToastConfig;
use crate::errors::HostError;
use crate::guard::ClaimGuard;
use crate::host::{CancelableEvent, Clock, FormFields, LocalStore, PageDocument, PageNode, Scheduler};
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlButtonElement, HtmlFormElement,
    HtmlInputElement, Node, Storage, Window,
};

fn dom_err(err: JsValue) -> HostError {
    HostError::Dom(format!("{err:?}"))
}

#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn from_window() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoDocument)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn storage(&self) -> Result<Storage, HostError> {
        self.window
            .local_storage()
            .ok()
            .flatten()
            .ok_or(HostError::StorageUnavailable)
    }
}

#[derive(Clone)]
pub struct WebNode(Element);

impl PageDocument for WebHost {
    type Node = WebNode;

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        self.document.get_element_by_id(id).map(WebNode)
    }

    fn create_element(&self, tag: &str) -> Result<WebNode, HostError> {
        self.document.create_element(tag).map(WebNode).map_err(dom_err)
    }

    fn append_to_head(&self, node: &WebNode) -> Result<(), HostError> {
        let head = self.document.head().ok_or(HostError::NoDocument)?;
        head.append_child(&node.0).map(drop).map_err(dom_err)
    }

    fn append_to_body(&self, node: &WebNode) -> Result<(), HostError> {
        let body = self.document.body().ok_or(HostError::NoDocument)?;
        body.append_child(&node.0).map(drop).map_err(dom_err)
    }
}

impl LocalStore for WebHost {
    fn get_item(&self, key: &str) -> Result<Option<String>, HostError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| HostError::Storage(format!("{err:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| HostError::Storage(format!("{err:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), HostError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| HostError::Storage(format!("{err:?}")))
    }
}

impl Clock for WebHost {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

impl Scheduler for WebHost {
    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            warn!(?err, "requestAnimationFrame failed");
        }
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms,
            )
        {
            warn!(?err, "setTimeout failed");
        }
    }
}

impl PageNode for WebNode {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.0.set_attribute(name, value).map_err(dom_err)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) -> Result<(), HostError> {
        self.0.class_list().add_1(class).map_err(dom_err)
    }

    fn remove_class(&self, class: &str) -> Result<(), HostError> {
        self.0.class_list().remove_1(class).map_err(dom_err)
    }

    fn set_class_name(&self, value: &str) -> Result<(), HostError> {
        self.0.set_class_name(value);
        Ok(())
    }

    fn set_text(&self, text: &str) -> Result<(), HostError> {
        self.0.set_text_content(Some(text));
        Ok(())
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(WebNode)
    }

    fn resolved_href(&self) -> Option<String> {
        self.0
            .dyn_ref::<HtmlAnchorElement>()
            .map(HtmlAnchorElement::href)
    }

    fn form_action(&self) -> Option<String> {
        let explicit = self.0.has_attribute("formaction");
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            return if explicit {
                Some(button.form_action())
            } else {
                button.form().map(|form| form.action())
            };
        }
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return if explicit {
                Some(input.form_action())
            } else {
                input.form().map(|form| form.action())
            };
        }
        None
    }

    fn inspect_form(&self) -> Result<FormFields, HostError> {
        let form = self.0.dyn_ref::<HtmlFormElement>().ok_or_else(|| {
            HostError::FormInspection(format!("<{}> is not a form", self.tag_name()))
        })?;
        Ok(FormFields {
            method: form.method(),
            action: form.action(),
        })
    }
}

struct WebEvent<'a>(&'a Event);

impl CancelableEvent for WebEvent<'_> {
    fn cancel(&self) {
        self.0.prevent_default();
        self.0.stop_propagation();
    }
}

/// Element the event was aimed at; text-node targets map to their parent.
fn event_element(event: &Event) -> Option<WebNode> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(element) => Some(WebNode(element)),
        Err(other) => other
            .dyn_into::<Node>()
            .ok()
            .and_then(|node| node.parent_element())
            .map(WebNode),
    }
}

type Handler = fn(&ClaimGuard<WebHost>, &Event);

fn listen(guard: &Rc<ClaimGuard<WebHost>>, kind: &str, handler: Handler) -> Result<(), HostError> {
    let captured = Rc::clone(guard);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&captured, &event));
    guard
        .host()
        .document
        .add_event_listener_with_callback_and_bool(kind, closure.as_ref().unchecked_ref(), true)
        .map_err(dom_err)?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Boots the toast layer against the current page.
pub fn install(config: ToastConfig) -> Result<(), HostError> {
    let host = WebHost::from_window()?;
    let Some(guard) = ClaimGuard::boot(host, config) else {
        return Ok(());
    };
    let guard = Rc::new(guard);

    listen(&guard, "click", |guard, event| {
        let target = event_element(event);
        guard.on_click(target.as_ref(), &WebEvent(event));
    })?;
    listen(&guard, "submit", |guard, event| {
        let form = event_element(event);
        guard.on_submit(form.as_ref(), &WebEvent(event));
    })?;

    guard.resolve_after_redirect();
    Ok(())
}

/// Routes panics and `tracing` events to the browser console. Safe to call
/// more than once.
fn init_diagnostics() {
    console_error_panic_hook::set_once();
    // A subscriber installed by the embedding page takes precedence.
    let _ = tracing_wasm::try_set_as_global_default();
}

#[wasm_bindgen(start)]
pub fn start() {
    init_diagnostics();
    if let Err(err) = install(ToastConfig::default()) {
        warn!(%err, "sign-in toast layer not installed");
    }
}

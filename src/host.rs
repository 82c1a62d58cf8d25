//! Seams between the toast layer and the page it runs in.
//!
//! The browser binding lives in `web` (feature `hydrate`); `headless` is an
//! in-memory page used by tests and embedders.

use crate::errors::HostError;
use std::time::Duration;

/// Method and action of a form that is being submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub method: String,
    pub action: String,
}

pub trait PageNode: Clone + 'static {
    /// Lower-case tag name.
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError>;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str) -> Result<(), HostError>;
    fn remove_class(&self, class: &str) -> Result<(), HostError>;
    fn set_class_name(&self, value: &str) -> Result<(), HostError>;
    fn set_text(&self, text: &str) -> Result<(), HostError>;
    fn parent(&self) -> Option<Self>;

    /// Absolute `href` of an anchor, `None` for other elements.
    fn resolved_href(&self) -> Option<String>;

    /// Absolute URL a button or input would submit to.
    fn form_action(&self) -> Option<String>;

    /// Method and resolved action of this node read as a `<form>`.
    fn inspect_form(&self) -> Result<FormFields, HostError>;

    /// This node or its nearest ancestor satisfying `predicate`.
    fn closest(&self, predicate: impl Fn(&Self) -> bool) -> Option<Self> {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if predicate(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

pub trait PageDocument {
    type Node: PageNode;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn create_element(&self, tag: &str) -> Result<Self::Node, HostError>;
    fn append_to_head(&self, node: &Self::Node) -> Result<(), HostError>;
    fn append_to_body(&self, node: &Self::Node) -> Result<(), HostError>;
}

/// Durable key-value storage scoped to the page's origin.
pub trait LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HostError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError>;
    fn remove_item(&self, key: &str) -> Result<(), HostError>;
}

pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Deferred callbacks on the page's event loop. Neither kind is cancellable.
pub trait Scheduler {
    fn next_frame(&self, task: Box<dyn FnOnce()>);
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

pub trait CancelableEvent {
    /// Prevent the default action and stop further propagation.
    fn cancel(&self);
}

pub trait Host: PageDocument + LocalStore + Clock + Scheduler {}

impl<T> Host for T where T: PageDocument + LocalStore + Clock + Scheduler {}

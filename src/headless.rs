//! In-memory page: a small node tree, map-backed storage, a manual clock and
//! virtual frame/timer queues. Nothing runs until the owner drives it with
//! [`HeadlessPage::run_frames`] or [`HeadlessPage::advance`].

use crate::errors::HostError;
use crate::host::{CancelableEvent, Clock, FormFields, LocalStore, PageDocument, PageNode, Scheduler};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;
use url::Url;

const HTML: usize = 0;
const HEAD: usize = 1;
const BODY: usize = 2;

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
    base: Option<Url>,
}

impl Tree {
    fn new(base: Option<Url>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            base,
        };
        tree.push("html", None);
        tree.push("head", Some(HTML));
        tree.push("body", Some(HTML));
        tree
    }

    fn push(&mut self, tag: &str, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            parent,
            ..NodeData::default()
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        index
    }

    fn attach(&mut self, parent: usize, child: usize) -> Result<(), HostError> {
        if self.ancestors(parent).any(|index| index == child) {
            return Err(HostError::Dom(format!(
                "node {child} cannot be placed inside its own subtree"
            )));
        }
        if let Some(old) = self.nodes[child].parent.take() {
            self.nodes[old].children.retain(|&index| index != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// `index` itself, then each parent up to the root.
    fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(index), |&current| self.nodes[current].parent)
    }

    fn is_connected(&self, mut index: usize) -> bool {
        loop {
            if index == HTML {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn connected_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = usize> + 'a {
        (0..self.nodes.len()).filter(move |&index| {
            self.nodes[index].attrs.get("id").map(String::as_str) == Some(id)
                && self.is_connected(index)
        })
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        self.base.as_ref()?.join(reference).ok().map(String::from)
    }
}

type Task = Box<dyn FnOnce()>;

struct Timers {
    now_ms: i64,
    seq: u64,
    frames: Vec<Task>,
    timeouts: Vec<(i64, u64, Task)>,
}

impl Timers {
    fn starting_at(now_ms: i64) -> Self {
        Self {
            now_ms,
            seq: 0,
            frames: Vec::new(),
            timeouts: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct HeadlessPage {
    tree: Rc<RefCell<Tree>>,
    storage: Rc<RefCell<BTreeMap<String, String>>>,
    timers: Rc<RefCell<Timers>>,
}

#[derive(Clone)]
pub struct HeadlessNode {
    tree: Rc<RefCell<Tree>>,
    index: usize,
}

impl HeadlessPage {
    /// An empty page at `url`. Relative links on a page whose URL does not
    /// parse never resolve.
    pub fn new(url: &str) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new(Url::parse(url).ok()))),
            storage: Rc::new(RefCell::new(BTreeMap::new())),
            timers: Rc::new(RefCell::new(Timers::starting_at(0))),
        }
    }

    /// Navigates to a fresh page at `url`. Local storage and the clock carry
    /// over; pending frames and timers are dropped.
    pub fn navigate(&self, url: &str) -> Self {
        let now_ms = self.timers.borrow().now_ms;
        Self {
            tree: Rc::new(RefCell::new(Tree::new(Url::parse(url).ok()))),
            storage: Rc::clone(&self.storage),
            timers: Rc::new(RefCell::new(Timers::starting_at(now_ms))),
        }
    }

    pub fn url(&self) -> Option<String> {
        self.tree.borrow().base.as_ref().map(Url::to_string)
    }

    pub fn append_child(&self, parent: &HeadlessNode, child: &HeadlessNode) -> Result<(), HostError> {
        self.tree.borrow_mut().attach(parent.index, child.index)
    }

    pub fn count_by_id(&self, id: &str) -> usize {
        self.tree.borrow().connected_with_id(id).count()
    }

    pub fn text_of(&self, node: &HeadlessNode) -> String {
        node.tree.borrow().nodes[node.index].text.clone()
    }

    /// Text of the toast element, if one has been created.
    pub fn toast_text(&self) -> Option<String> {
        self.element_by_id("signin-toast")
            .map(|node| self.text_of(&node))
    }

    pub fn set_now(&self, now_ms: i64) {
        self.timers.borrow_mut().now_ms = now_ms;
    }

    /// Runs every frame callback queued so far.
    pub fn run_frames(&self) {
        let frames = std::mem::take(&mut self.timers.borrow_mut().frames);
        for frame in frames {
            frame();
        }
    }

    /// Moves the clock forward, firing due timers in order.
    pub fn advance(&self, by: Duration) {
        let by_ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        let target = self.timers.borrow().now_ms.saturating_add(by_ms);
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .timeouts
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(position, _)| position);
                due.map(|position| {
                    let (at, _, task) = timers.timeouts.remove(position);
                    timers.now_ms = at;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.timers.borrow_mut().now_ms = target;
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().timeouts.len()
    }
}

impl PageDocument for HeadlessPage {
    type Node = HeadlessNode;

    fn element_by_id(&self, id: &str) -> Option<HeadlessNode> {
        let index = self.tree.borrow().connected_with_id(id).next()?;
        Some(HeadlessNode {
            tree: Rc::clone(&self.tree),
            index,
        })
    }

    fn create_element(&self, tag: &str) -> Result<HeadlessNode, HostError> {
        if tag.is_empty() || !tag.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(HostError::Dom(format!("invalid tag name {tag:?}")));
        }
        let index = self.tree.borrow_mut().push(tag, None);
        Ok(HeadlessNode {
            tree: Rc::clone(&self.tree),
            index,
        })
    }

    fn append_to_head(&self, node: &HeadlessNode) -> Result<(), HostError> {
        self.tree.borrow_mut().attach(HEAD, node.index)
    }

    fn append_to_body(&self, node: &HeadlessNode) -> Result<(), HostError> {
        self.tree.borrow_mut().attach(BODY, node.index)
    }
}

impl LocalStore for HeadlessPage {
    fn get_item(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.storage.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), HostError> {
        self.storage.borrow_mut().remove(key);
        Ok(())
    }
}

impl Clock for HeadlessPage {
    fn now_millis(&self) -> i64 {
        self.timers.borrow().now_ms
    }
}

impl Scheduler for HeadlessPage {
    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        self.timers.borrow_mut().frames.push(task);
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut timers = self.timers.borrow_mut();
        let delay_ms = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
        let at = timers.now_ms.saturating_add(delay_ms);
        let seq = timers.seq;
        timers.seq += 1;
        timers.timeouts.push((at, seq, task));
    }
}

impl HeadlessNode {
    fn with<R>(&self, f: impl FnOnce(&NodeData) -> R) -> R {
        f(&self.tree.borrow().nodes[self.index])
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut NodeData) -> R) -> R {
        f(&mut self.tree.borrow_mut().nodes[self.index])
    }

    fn classes(&self) -> Vec<String> {
        self.with(|node| {
            node.attrs
                .get("class")
                .map(|value| value.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        })
    }

    fn write_classes(&self, classes: &[String]) {
        self.with_mut(|node| {
            node.attrs.insert("class".to_string(), classes.join(" "));
        });
    }

    fn owning_form(&self) -> Option<HeadlessNode> {
        self.parent()?.closest(|node| node.tag_name() == "form")
    }
}

impl PageNode for HeadlessNode {
    fn tag_name(&self) -> String {
        self.with(|node| node.tag.clone())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.with(|node| node.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(HostError::Dom(format!("invalid attribute name {name:?}")));
        }
        self.with_mut(|node| {
            node.attrs
                .insert(name.to_ascii_lowercase(), value.to_string());
        });
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|existing| existing == class)
    }

    fn add_class(&self, class: &str) -> Result<(), HostError> {
        let mut classes = self.classes();
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
            self.write_classes(&classes);
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), HostError> {
        let mut classes = self.classes();
        classes.retain(|existing| existing != class);
        self.write_classes(&classes);
        Ok(())
    }

    fn set_class_name(&self, value: &str) -> Result<(), HostError> {
        self.set_attribute("class", value)
    }

    fn set_text(&self, text: &str) -> Result<(), HostError> {
        self.with_mut(|node| node.text = text.to_string());
        Ok(())
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.with(|node| node.parent)?;
        Some(HeadlessNode {
            tree: Rc::clone(&self.tree),
            index: parent,
        })
    }

    fn resolved_href(&self) -> Option<String> {
        if self.tag_name() != "a" {
            return None;
        }
        let href = self.attribute("href")?;
        self.tree.borrow().resolve(&href)
    }

    fn form_action(&self) -> Option<String> {
        if let Some(action) = self.attribute("formaction") {
            return self.tree.borrow().resolve(&action);
        }
        self.owning_form()?.inspect_form().ok().map(|fields| fields.action)
    }

    fn inspect_form(&self) -> Result<FormFields, HostError> {
        if self.tag_name() != "form" {
            return Err(HostError::FormInspection(format!(
                "<{}> is not a form",
                self.tag_name()
            )));
        }
        let method = self
            .attribute("method")
            .map(|method| method.to_ascii_lowercase())
            .unwrap_or_else(|| "get".to_string());
        let tree = self.tree.borrow();
        let action = match self.with(|node| node.attrs.get("action").cloned()) {
            Some(action) if !action.trim().is_empty() => tree.resolve(action.trim()),
            _ => tree.base.as_ref().map(Url::to_string),
        }
        .ok_or_else(|| HostError::FormInspection("action does not resolve".to_string()))?;
        Ok(FormFields { method, action })
    }
}

/// Event stand-in that remembers whether it was cancelled.
#[derive(Debug, Default)]
pub struct HeadlessEvent {
    cancelled: Cell<bool>,
}

impl HeadlessEvent {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl CancelableEvent for HeadlessEvent {
    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_nodes_are_not_found_by_id() {
        let page = HeadlessPage::new("https://example.test/");
        let node = page.create_element("div").unwrap();
        node.set_attribute("id", "floating").unwrap();
        assert!(page.element_by_id("floating").is_none());

        page.append_to_body(&node).unwrap();
        assert!(page.element_by_id("floating").is_some());
    }

    #[test]
    fn node_cannot_be_moved_under_its_descendant() {
        let page = HeadlessPage::new("https://example.test/");
        let outer = page.create_element("section").unwrap();
        let inner = page.create_element("div").unwrap();
        page.append_child(&outer, &inner).unwrap();
        page.append_to_body(&outer).unwrap();

        let err = page.append_child(&inner, &outer).unwrap_err();
        assert!(matches!(err, HostError::Dom(_)));
        assert!(page.append_child(&inner, &inner).is_err());

        outer.set_attribute("id", "outer").unwrap();
        inner.set_attribute("id", "inner").unwrap();
        assert!(page.element_by_id("outer").is_some());
        assert_eq!(inner.parent().map(|node| node.tag_name()).as_deref(), Some("section"));
    }

    #[test]
    fn timers_fire_in_due_order() {
        let page = HeadlessPage::new("https://example.test/");
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = Rc::clone(&log);
            page.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }
        page.advance(Duration::from_millis(250));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(page.now_millis(), 250);
        assert_eq!(page.pending_timers(), 1);
    }

    #[test]
    fn navigate_keeps_storage_and_clock() {
        let page = HeadlessPage::new("https://example.test/signin_reward/claim/");
        page.set_item("k", "v").unwrap();
        page.set_now(9_000);
        page.set_timeout(Duration::from_millis(10), Box::new(|| {}));

        let next = page.navigate("https://example.test/signin_reward/");
        assert_eq!(next.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(next.now_millis(), 9_000);
        assert_eq!(next.pending_timers(), 0);
        assert_eq!(next.url().as_deref(), Some("https://example.test/signin_reward/"));
    }

    #[test]
    fn form_without_action_submits_to_the_page() {
        let page = HeadlessPage::new("https://example.test/signin_reward/claim/");
        let form = page.create_element("form").unwrap();
        let fields = form.inspect_form().unwrap();
        assert_eq!(fields.method, "get");
        assert_eq!(fields.action, "https://example.test/signin_reward/claim/");
    }
}

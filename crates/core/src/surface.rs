//! Render-surface model: a host-agnostic element tree.
//!
//! The host runtime owns real rendering; controls only ever see a container
//! element whose children they create once and mutate in place. Elements
//! carry a tag, an ordered attribute map, a current value, text content,
//! children, and input listeners addressable by handler id. Handles are
//! `Rc`-shared within the host's single-threaded event loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A discrete user edit delivered to input listeners.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// The element's value at the time of the edit.
    pub value: String,
}

/// Identifies one registered input listener so it can be disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

type InputHandler = Rc<dyn Fn(&InputEvent)>;

struct ElementInner {
    tag: String,
    attributes: BTreeMap<String, String>,
    value: String,
    text: String,
    children: Vec<Element>,
    handlers: Vec<(HandlerId, InputHandler)>,
    next_handler: u64,
}

/// Shared handle to one element in the surface tree.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementInner>>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementInner {
                tag: tag.to_string(),
                attributes: BTreeMap::new(),
                value: String::new(),
                text: String::new(),
                children: Vec::new(),
                handlers: Vec::new(),
                next_handler: 0,
            })),
        }
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.inner.borrow_mut().attributes.remove(name);
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    /// Snapshot of the full attribute set, in name order.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.inner.borrow().attributes.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.inner.borrow_mut().value = value.to_string();
    }

    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn append_child(&self, child: Element) {
        self.inner.borrow_mut().children.push(child);
    }

    /// Replace all children at once. Used for per-update rebuilds such as
    /// datalist option sets.
    pub fn set_children(&self, children: Vec<Element>) {
        self.inner.borrow_mut().children = children;
    }

    pub fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }

    /// Depth-first search for the first descendant with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<Element> {
        for child in self.children() {
            if child.tag() == tag {
                return Some(child);
            }
            if let Some(found) = child.find_by_tag(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Register an input listener; returns the id needed to disconnect it.
    pub fn connect_input<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&InputEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = HandlerId(inner.next_handler);
        inner.next_handler += 1;
        inner.handlers.push((id, Rc::new(handler)));
        id
    }

    /// Remove a listener. Unknown ids are ignored, so disconnecting twice
    /// (or after a partially failed init) is safe.
    pub fn disconnect(&self, id: HandlerId) {
        self.inner.borrow_mut().handlers.retain(|(h, _)| *h != id);
    }

    /// Set the element's value and deliver one input event to every
    /// connected listener. This is how the host (or a test) simulates a
    /// discrete user edit.
    pub fn emit_input(&self, value: &str) {
        // Clone handlers out so a listener may mutate the tree.
        let handlers: Vec<InputHandler> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.to_string();
            inner.handlers.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        let event = InputEvent {
            value: value.to_string(),
        };
        for handler in handlers {
            handler(&event);
        }
    }

    /// Render the subtree as an indented debug listing.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let inner = self.inner.borrow();
        out.push_str(&"  ".repeat(depth));
        out.push('<');
        out.push_str(&inner.tag);
        for (name, value) in &inner.attributes {
            out.push_str(&format!(" {}={:?}", name, value));
        }
        out.push('>');
        if !inner.text.is_empty() {
            out.push_str(&format!(" {:?}", inner.text));
        }
        out.push('\n');
        for child in &inner.children {
            child.dump_into(out, depth + 1);
        }
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &inner.tag)
            .field("attributes", &inner.attributes)
            .field("children", &inner.children.len())
            .finish()
    }
}

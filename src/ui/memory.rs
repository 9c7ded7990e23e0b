//! In-memory implementations of the UI capabilities.
//!
//! [`MemorySurface`] is a small element tree with templates, ids, classes,
//! text, input values and per-element listeners. Events are fired with
//! [`MemorySurface::dispatch`] and go to the target element only; they do not
//! bubble.

use crate::error::{Result, TrackerError};
use crate::ui::surface::{
    Alert, DomEvent, DragEffect, EventHandler, EventKind, InsertPosition, NodeId, Surface,
    TransferChannel,
};
use std::{cell::RefCell, collections::HashMap};

/// Declarative element description used to build trees and templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<Markup>,
}

impl Markup {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<(EventKind, EventHandler)>,
}

impl Node {
    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

/// Slot storage for nodes. Released slots are reused by later allocations.
#[derive(Default)]
struct Arena {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
}

impl Arena {
    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn get(&self, node: NodeId) -> Option<&Node> {
        self.slots.get(node.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(node.0).and_then(Option::as_mut)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Frees `node` and its whole subtree, handing the removed nodes back
    fn release_subtree(&mut self, node: NodeId, released: &mut Vec<Node>) {
        let Some(mut removed) = self.slots.get_mut(node.0).and_then(Option::take) else {
            return;
        };
        self.free.push(node.0);
        for child in std::mem::take(&mut removed.children) {
            self.release_subtree(child, released);
        }
        released.push(removed);
    }

    fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl std::ops::Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, node: NodeId) -> &Node {
        match &self.slots[node.0] {
            Some(entry) => entry,
            None => panic!("{} has been released", node),
        }
    }
}

impl std::ops::IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, node: NodeId) -> &mut Node {
        match &mut self.slots[node.0] {
            Some(entry) => entry,
            None => panic!("{} has been released", node),
        }
    }
}

/// Element tree held in memory.
///
/// Children removed with [`Surface::clear_children`] are released and their
/// slots reused, so handles to them must not be used afterwards.
pub struct MemorySurface {
    nodes: RefCell<Arena>,
    templates: RefCell<HashMap<String, NodeId>>,
    root: NodeId,
}

impl MemorySurface {
    /// Creates a surface containing only an empty `body` root
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.alloc(Node {
            tag: "body".to_string(),
            ..Node::default()
        });
        Self {
            nodes: RefCell::new(arena),
            templates: RefCell::new(HashMap::new()),
            root,
        }
    }

    /// Creates a surface with the tracker page: a `#app` host plus the input
    /// form, project list and single project templates.
    pub fn with_tracker_templates() -> Self {
        let surface = Self::new();
        surface.append_markup(surface.root, &Markup::new("div").id("app"));

        surface.register_template(
            "project-input",
            Markup::new("form")
                .child(
                    Markup::new("div")
                        .class("form-control")
                        .child(Markup::new("label").text("Title"))
                        .child(Markup::new("input").id("title")),
                )
                .child(
                    Markup::new("div")
                        .class("form-control")
                        .child(Markup::new("label").text("Description"))
                        .child(Markup::new("textarea").id("description")),
                )
                .child(
                    Markup::new("div")
                        .class("form-control")
                        .child(Markup::new("label").text("People"))
                        .child(Markup::new("input").id("people")),
                )
                .child(Markup::new("button").text("ADD PROJECT")),
        );
        surface.register_template(
            "project-list",
            Markup::new("section")
                .class("projects")
                .child(Markup::new("header").child(Markup::new("h2")))
                .child(Markup::new("ul")),
        );
        surface.register_template(
            "single-project",
            Markup::new("li")
                .child(Markup::new("h2"))
                .child(Markup::new("h3"))
                .child(Markup::new("p")),
        );
        surface
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Registers `content` as the single element of template `template_id`
    pub fn register_template(&self, template_id: &str, content: Markup) {
        let template = self.create_element("template");
        self.build(Some(template), &content);
        self.templates
            .borrow_mut()
            .insert(template_id.to_string(), template);
    }

    /// Registers a template with no element content
    pub fn register_empty_template(&self, template_id: &str) {
        let template = self.create_element("template");
        self.templates
            .borrow_mut()
            .insert(template_id.to_string(), template);
    }

    /// Creates a detached element
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.nodes.borrow_mut().alloc(Node {
            tag: tag.to_string(),
            ..Node::default()
        })
    }

    /// Number of live nodes, templates included
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().live()
    }

    /// Builds `markup` and appends it as the last child of `parent`
    pub fn append_markup(&self, parent: NodeId, markup: &Markup) -> NodeId {
        self.build(Some(parent), markup)
    }

    /// Fires `kind` at `node`, returning whether a handler prevented the default
    pub fn dispatch(
        &self,
        node: NodeId,
        kind: EventKind,
        transfer: Option<&mut dyn TransferChannel>,
    ) -> bool {
        let handlers: Vec<EventHandler> = match self.nodes.borrow().get(node) {
            Some(n) => n
                .listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, handler)| handler.clone())
                .collect(),
            None => return false,
        };

        let mut event = DomEvent::new(kind, transfer);
        for handler in handlers {
            handler(&mut event);
        }
        event.is_default_prevented()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node).map(|n| n.tag.clone())
    }

    pub fn id_of(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node).and_then(|n| n.id.clone())
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node).map(|n| n.text.clone())
    }

    /// Text of the first descendant of `node` matching `selector`
    pub fn text_of(&self, node: NodeId, selector: &str) -> Option<String> {
        self.query(node, selector).and_then(|found| self.text(found))
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Whether `node` is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn build(&self, parent: Option<NodeId>, markup: &Markup) -> NodeId {
        let node = self.create_element(&markup.tag);
        {
            let mut nodes = self.nodes.borrow_mut();
            let entry = &mut nodes[node];
            entry.id = markup.id.clone();
            entry.classes = markup.classes.clone();
            entry.text = markup.text.clone();
            entry.parent = parent;
            if let Some(parent) = parent {
                nodes[parent].children.push(node);
            }
        }
        for child in &markup.children {
            self.build(Some(node), child);
        }
        node
    }

    fn deep_copy(&self, source: NodeId, parent: Option<NodeId>) -> NodeId {
        let (tag, id, classes, text, children) = {
            let nodes = self.nodes.borrow();
            let n = &nodes[source];
            (
                n.tag.clone(),
                n.id.clone(),
                n.classes.clone(),
                n.text.clone(),
                n.children.clone(),
            )
        };
        let copy = self.create_element(&tag);
        {
            let mut nodes = self.nodes.borrow_mut();
            let entry = &mut nodes[copy];
            entry.id = id;
            entry.classes = classes;
            entry.text = text;
            entry.parent = parent;
            if let Some(parent) = parent {
                nodes[parent].children.push(copy);
            }
        }
        for child in children {
            self.deep_copy(child, Some(copy));
        }
        copy
    }

    fn find_descendant(&self, start: NodeId, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack: Vec<NodeId> = nodes.get(start)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let node = &nodes[current];
            if predicate(node) {
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn with_node<T>(&self, node: NodeId, f: impl FnOnce(&mut Node) -> T) -> Result<T> {
        let mut nodes = self.nodes.borrow_mut();
        let entry = nodes
            .get_mut(node)
            .ok_or(TrackerError::UnknownNode(node.0))?;
        Ok(f(entry))
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn clone_template(&self, template_id: &str) -> Result<NodeId> {
        let template = self
            .templates
            .borrow()
            .get(template_id)
            .copied()
            .ok_or_else(|| TrackerError::TemplateNotFound(template_id.to_string()))?;
        let first = self
            .children(template)
            .first()
            .copied()
            .ok_or_else(|| TrackerError::EmptyTemplate(template_id.to_string()))?;
        Ok(self.deep_copy(first, None))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if self.id_of(self.root).as_deref() == Some(id) {
            return Some(self.root);
        }
        self.find_descendant(self.root, |n| n.id.as_deref() == Some(id))
    }

    fn query(&self, parent: NodeId, selector: &str) -> Option<NodeId> {
        self.find_descendant(parent, |n| n.matches(selector))
    }

    fn insert(&self, host: NodeId, node: NodeId, position: InsertPosition) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        for handle in [host, node] {
            if !nodes.contains(handle) {
                return Err(TrackerError::UnknownNode(handle.0));
            }
        }

        if let Some(old_parent) = nodes[node].parent.take() {
            nodes[old_parent].children.retain(|child| *child != node);
        }
        nodes[node].parent = Some(host);
        let children = &mut nodes[host].children;
        match position {
            InsertPosition::AtStart => children.insert(0, node),
            InsertPosition::AtEnd => children.push(node),
        }
        Ok(())
    }

    fn set_id(&self, node: NodeId, id: &str) -> Result<()> {
        self.with_node(node, |n| n.id = Some(id.to_string()))
    }

    fn set_text(&self, node: NodeId, text: &str) -> Result<()> {
        self.with_node(node, |n| n.text = text.to_string())
    }

    fn value(&self, node: NodeId) -> Result<String> {
        self.with_node(node, |n| n.value.clone())
    }

    fn set_value(&self, node: NodeId, value: &str) -> Result<()> {
        self.with_node(node, |n| n.value = value.to_string())
    }

    fn add_class(&self, node: NodeId, class: &str) -> Result<()> {
        self.with_node(node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        })
    }

    fn remove_class(&self, node: NodeId, class: &str) -> Result<()> {
        self.with_node(node, |n| n.classes.retain(|c| c != class))
    }

    fn clear_children(&self, node: NodeId) -> Result<()> {
        let mut released = Vec::new();
        {
            let mut nodes = self.nodes.borrow_mut();
            let children = std::mem::take(
                &mut nodes
                    .get_mut(node)
                    .ok_or(TrackerError::UnknownNode(node.0))?
                    .children,
            );
            for child in children {
                nodes.release_subtree(child, &mut released);
            }
        }
        // Handlers are dropped outside the borrow
        drop(released);
        Ok(())
    }

    fn add_listener(&self, node: NodeId, kind: EventKind, handler: EventHandler) -> Result<()> {
        self.with_node(node, |n| n.listeners.push((kind, handler)))
    }
}

/// Drag payload held in memory, standing in for a browser data transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DragEffect,
}

impl MemoryTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfer pre-filled with one entry
    pub fn with_data(key: &str, value: &str) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(key, value);
        transfer
    }
}

impl TransferChannel for MemoryTransfer {
    fn set_data(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    fn get_data(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn types(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn effect_allowed(&self) -> DragEffect {
        self.effect_allowed
    }

    fn set_effect_allowed(&mut self, effect: DragEffect) {
        self.effect_allowed = effect;
    }
}

/// Alert that records messages instead of blocking
#[derive(Debug, Default)]
pub struct RecordingAlert {
    messages: RefCell<Vec<String>>,
}

impl RecordingAlert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

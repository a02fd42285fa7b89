//! Minimal host model: nodes, selector widgets, and change listeners.
//!
//! A [`Node`] owns named [`SelectorWidget`]s and, per widget, an ordered list
//! of change listeners. Setting a value through [`Node::set_value`] notifies
//! that widget's listeners in registration order. Everything runs on the
//! caller's thread; listeners are plain boxed closures.

use std::collections::HashMap;
use std::rc::Rc;

/// Redraw signal exposed by the graph a node lives in.
pub trait Graph {
    fn set_dirty_canvas(&self, dirty: bool);
}

/// A dropdown: current value plus the ordered values it may take.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorWidget {
    pub name: String,
    pub value: String,
    pub values: Vec<String>,
}

impl SelectorWidget {
    pub fn new<S: Into<String>>(name: &str, value: &str, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// The widgets of one node, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct Widgets(Vec<SelectorWidget>);

impl Widgets {
    pub fn get(&self, name: &str) -> Option<&SelectorWidget> {
        self.0.iter().find(|w| w.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SelectorWidget> {
        self.0.iter_mut().find(|w| w.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectorWidget> {
        self.0.iter()
    }

    fn push(&mut self, widget: SelectorWidget) {
        match self.get_mut(&widget.name) {
            Some(existing) => *existing = widget,
            None => self.0.push(widget),
        }
    }
}

/// What a listener sees when the widget it watches changes.
pub struct ChangeEvent<'a> {
    /// Name of the widget that changed.
    pub widget: &'a str,
    /// Its new value.
    pub value: &'a str,
    /// All widgets of the node, writable.
    pub widgets: &'a mut Widgets,
    /// The node's graph, if it is in one.
    pub graph: Option<&'a dyn Graph>,
}

/// Callback fired after a widget's value changes.
pub type ChangeHook = Box<dyn FnMut(&mut ChangeEvent<'_>)>;

struct Listener {
    tag: Option<String>,
    hook: ChangeHook,
}

/// A node instance in the editor.
pub struct Node {
    type_name: String,
    widgets: Widgets,
    listeners: HashMap<String, Vec<Listener>>,
    graph: Option<Rc<dyn Graph>>,
}

impl Node {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            widgets: Widgets::default(),
            listeners: HashMap::new(),
            graph: None,
        }
    }

    /// Adds a widget, replacing any widget with the same name.
    pub fn with_widget(mut self, widget: SelectorWidget) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn with_graph(mut self, graph: Rc<dyn Graph>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn widget(&self, name: &str) -> Option<&SelectorWidget> {
        self.widgets.get(name)
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    /// Widget access without notifying listeners.
    pub fn widgets_mut(&mut self) -> &mut Widgets {
        &mut self.widgets
    }

    /// Sets a widget's value and notifies its listeners in registration order.
    ///
    /// Returns `false` if the node has no such widget.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let Some(widget) = self.widgets.get_mut(name) else {
            return false;
        };
        widget.value = value.to_string();

        if let Some(listeners) = self.listeners.get_mut(name) {
            let mut event = ChangeEvent {
                widget: name,
                value,
                widgets: &mut self.widgets,
                graph: self.graph.as_deref(),
            };
            for listener in listeners.iter_mut() {
                (listener.hook)(&mut event);
            }
        }
        true
    }

    /// Appends a listener to `widget`.
    ///
    /// A tagged listener is registered at most once per widget: subscribing
    /// with a tag already present swaps in the new hook at the old position.
    /// Returns `true` only when a listener was added.
    pub fn subscribe(&mut self, widget: &str, tag: Option<&str>, hook: ChangeHook) -> bool {
        if self.widgets.get(widget).is_none() {
            return false;
        }
        let listeners = self.listeners.entry(widget.to_string()).or_default();
        if let Some(tag) = tag {
            if let Some(existing) = listeners.iter_mut().find(|l| l.tag.as_deref() == Some(tag)) {
                existing.hook = hook;
                return false;
            }
        }
        listeners.push(Listener {
            tag: tag.map(str::to_string),
            hook,
        });
        true
    }

    #[allow(dead_code)]
    pub fn has_listener(&self, widget: &str, tag: &str) -> bool {
        self.listeners
            .get(widget)
            .is_some_and(|ls| ls.iter().any(|l| l.tag.as_deref() == Some(tag)))
    }

    pub fn listener_count(&self, widget: &str) -> usize {
        self.listeners.get(widget).map_or(0, Vec::len)
    }
}

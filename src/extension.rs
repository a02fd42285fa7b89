//! Node types, their creation hooks, and the extension that binds selectors.
//!
//! A [`NodeType`] builds nodes from a [`NodeDefinition`] and then runs its
//! creation hooks in order. Extensions add hooks while a node type is being
//! registered; adding one never replaces hooks that are already there.

use std::rc::Rc;

use crate::binder::{self, BindingSpec};
use crate::catalog::ProviderCatalog;
use crate::widget::{Graph, Node, SelectorWidget};

/// Declared choices and default for one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDef {
    pub name: String,
    pub choices: Vec<String>,
    pub default: String,
}

/// Static description of a node type's selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefinition {
    pub name: String,
    pub widgets: Vec<WidgetDef>,
}

impl NodeDefinition {
    /// Declares a node whose selectors can hold anything the catalog offers.
    ///
    /// Each role accepts every model listed for it by any provider, plus its
    /// placeholder, so saved selections stay valid whatever the provider.
    /// Defaults follow the default provider.
    pub fn from_catalog(name: &str, catalog: &ProviderCatalog, spec: &BindingSpec) -> Self {
        let default_provider = if catalog.contains(&spec.default_provider) {
            spec.default_provider.as_str()
        } else {
            catalog.default_provider()
        };
        let default_entry = catalog.get(default_provider);

        let mut widgets = vec![WidgetDef {
            name: spec.provider_widget.clone(),
            choices: catalog.provider_names().map(str::to_string).collect(),
            default: default_provider.to_string(),
        }];
        for role in &spec.roles {
            let mut choices = catalog.all_models(role.field.as_deref());
            choices.push(role.placeholder.clone());
            let default = binder::models_for(default_entry, role)
                .first()
                .cloned()
                .unwrap_or_else(|| role.placeholder.clone());
            widgets.push(WidgetDef {
                name: role.widget.clone(),
                choices,
                default,
            });
        }

        Self {
            name: name.to_string(),
            widgets,
        }
    }
}

/// Hook run on every freshly built node of a type.
pub type CreatedHook = Box<dyn Fn(&mut Node)>;

/// A registered node type.
pub struct NodeType {
    definition: NodeDefinition,
    on_created: Vec<CreatedHook>,
}

impl NodeType {
    pub fn new(definition: NodeDefinition) -> Self {
        Self {
            definition,
            on_created: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Appends a creation hook; earlier hooks keep running first.
    pub fn on_node_created(&mut self, hook: CreatedHook) {
        self.on_created.push(hook);
    }

    /// Builds a node with default widget values and runs the creation hooks.
    pub fn instantiate(&self, graph: Option<Rc<dyn Graph>>) -> Node {
        let mut node = self.definition.widgets.iter().fold(
            Node::new(&self.definition.name),
            |node, def| node.with_widget(SelectorWidget::new(&def.name, &def.default, def.choices.clone())),
        );
        if let Some(graph) = graph {
            node = node.with_graph(graph);
        }
        for hook in &self.on_created {
            hook(&mut node);
        }
        node
    }
}

/// Something that adjusts node types as they are registered.
pub trait Extension {
    fn name(&self) -> &str;

    fn before_register_node_def(&self, node_type: &mut NodeType);
}

/// Binds provider and model selectors on the node types it knows about.
#[derive(Default)]
pub struct ModelSelectorExtension {
    bindings: Vec<(String, Rc<ProviderCatalog>, BindingSpec)>,
}

impl ModelSelectorExtension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds nodes of `node_type` using `catalog` and `spec`.
    pub fn bind(mut self, node_type: &str, catalog: Rc<ProviderCatalog>, spec: BindingSpec) -> Self {
        self.bindings.push((node_type.to_string(), catalog, spec));
        self
    }
}

impl Extension for ModelSelectorExtension {
    fn name(&self) -> &str {
        "modelsel.ModelSelector"
    }

    fn before_register_node_def(&self, node_type: &mut NodeType) {
        for (name, catalog, spec) in &self.bindings {
            if name != node_type.name() {
                continue;
            }
            let catalog = Rc::clone(catalog);
            let spec = spec.clone();
            node_type.on_node_created(Box::new(move |node: &mut Node| {
                binder::attach(node, Rc::clone(&catalog), &spec);
            }));
            tracing::debug!(node_type = %name, "provider/model binding registered");
        }
    }
}

/// Node types plus the extensions applied to them.
#[derive(Default)]
pub struct Registry {
    extensions: Vec<Box<dyn Extension>>,
    node_types: Vec<NodeType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extensions only see node types registered after them.
    pub fn register_extension(&mut self, extension: Box<dyn Extension>) {
        tracing::debug!(extension = extension.name(), "extension registered");
        self.extensions.push(extension);
    }

    pub fn register_node_type(&mut self, definition: NodeDefinition) {
        let mut node_type = NodeType::new(definition);
        for extension in &self.extensions {
            extension.before_register_node_def(&mut node_type);
        }
        self.node_types.retain(|t| t.name() != node_type.name());
        self.node_types.push(node_type);
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.iter().find(|t| t.name() == name)
    }

    pub fn create_node(&self, name: &str, graph: Option<Rc<dyn Graph>>) -> Option<Node> {
        self.node_type(name).map(|t| t.instantiate(graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProviderEntry, Variant};
    use crate::constants::{API_LOADER_NODE, NO_TI2T_MODELS_PLACEHOLDER, NO_T2T_MODELS_PLACEHOLDER};
    use std::cell::RefCell;

    fn catalog() -> Rc<ProviderCatalog> {
        Rc::new(
            ProviderCatalog::new(
                "P",
                vec![
                    ProviderEntry::with_roles("P", [("t2t_models", vec!["a", "b"]), ("ti2t_models", vec![])]),
                    ProviderEntry::with_roles("Q", [("t2t_models", vec!["b", "c"]), ("ti2t_models", vec!["v"])]),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_definition_from_catalog() {
        let def = NodeDefinition::from_catalog("Loader", &catalog(), &BindingSpec::api_loader("P"));
        assert_eq!(def.widgets.len(), 3);
        assert_eq!(def.widgets[0].choices, ["P", "Q"]);
        assert_eq!(def.widgets[0].default, "P");
        assert_eq!(def.widgets[1].choices, ["a", "b", "c", NO_T2T_MODELS_PLACEHOLDER]);
        assert_eq!(def.widgets[1].default, "a");
        assert_eq!(def.widgets[2].choices, ["v", NO_TI2T_MODELS_PLACEHOLDER]);
        assert_eq!(def.widgets[2].default, NO_TI2T_MODELS_PLACEHOLDER);
    }

    #[test]
    fn test_definition_unknown_default_uses_catalog_default() {
        let def = NodeDefinition::from_catalog("Loader", &catalog(), &BindingSpec::api_loader("nope"));
        assert_eq!(def.widgets[0].default, "P");
    }

    #[test]
    fn test_creation_hooks_chain_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let spec = BindingSpec::api_loader("P");
        let mut registry = Registry::new();

        // a hook that was there before the binder
        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl Extension for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }
            fn before_register_node_def(&self, node_type: &mut NodeType) {
                let log = self.0.clone();
                node_type.on_node_created(Box::new(move |node: &mut Node| {
                    let t2t = node.widget("t2t_model").map(|w| w.values.len()).unwrap_or(0);
                    log.borrow_mut().push(format!("recorder:{t2t}"));
                }));
            }
        }

        registry.register_extension(Box::new(Recorder(log.clone())));
        registry.register_extension(Box::new(
            ModelSelectorExtension::new().bind("Loader", catalog(), spec.clone()),
        ));
        registry.register_node_type(NodeDefinition::from_catalog("Loader", &catalog(), &spec));

        let node = registry.create_node("Loader", None).unwrap();
        // recorder saw the full declared list, the binder narrowed it afterwards
        assert_eq!(*log.borrow(), ["recorder:4"]);
        assert_eq!(node.widget("t2t_model").unwrap().values, ["a", "b"]);
        assert!(node.has_listener("provider", crate::constants::BINDER_LISTENER_TAG));
    }

    #[test]
    fn test_other_node_types_untouched() {
        let spec = BindingSpec::api_loader("P");
        let mut registry = Registry::new();
        registry.register_extension(Box::new(
            ModelSelectorExtension::new().bind("Loader", catalog(), spec.clone()),
        ));
        registry.register_node_type(NodeDefinition::from_catalog("Other", &catalog(), &spec));

        let node = registry.create_node("Other", None).unwrap();
        assert_eq!(node.listener_count("provider"), 0);
        assert_eq!(node.widget("t2t_model").unwrap().values.len(), 4);
        assert!(registry.create_node("Missing", None).is_none());
    }

    #[test]
    fn test_builtin_api_loader_node() {
        let catalog = Rc::new(Variant::ApiLoader.builtin_catalog().unwrap());
        let spec = BindingSpec::for_variant(Variant::ApiLoader, catalog.default_provider());
        let mut registry = Registry::new();
        registry.register_extension(Box::new(
            ModelSelectorExtension::new().bind(API_LOADER_NODE, catalog.clone(), spec.clone()),
        ));
        registry.register_node_type(NodeDefinition::from_catalog(API_LOADER_NODE, &catalog, &spec));

        let mut node = registry.create_node(API_LOADER_NODE, None).unwrap();
        assert_eq!(node.widget("provider").unwrap().value, "DeepSeek (Official)");
        assert_eq!(node.widget("t2t_model").unwrap().value, "deepseek-chat");

        node.set_value("provider", "Qwen (Aliyun)");
        assert_eq!(node.widget("t2t_model").unwrap().value, "qwen3-max");
        assert_eq!(node.widget("ti2t_model").unwrap().value, "qwen3-vl-flash");
    }
}

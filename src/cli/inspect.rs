//! Node simulation and terminal output for the CLI.
//!
//! A [`Simulation`] registers the active node type with the selector
//! extension, builds one node inside a redraw-counting graph, and prints its
//! widgets as the CLI drives it.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::binder::BindingSpec;
use crate::catalog::ProviderCatalog;
use crate::config::Config;
use crate::constants::PROVIDER_WIDGET;
use crate::extension::{ModelSelectorExtension, NodeDefinition, Registry};
use crate::widget::{Graph, Node};

/// Graph that only counts redraw requests.
#[derive(Default)]
struct RedrawCounter {
    count: Cell<usize>,
}

impl Graph for RedrawCounter {
    fn set_dirty_canvas(&self, dirty: bool) {
        if dirty {
            self.count.set(self.count.get() + 1);
            tracing::trace!(redraws = self.count.get(), "canvas marked dirty");
        }
    }
}

/// One bound node, driven from the command line.
pub(crate) struct Simulation {
    node: Node,
    graph: Rc<RedrawCounter>,
    spec: BindingSpec,
}

impl Simulation {
    pub(crate) fn new(config: &Config, catalog: &Rc<ProviderCatalog>, spec: &BindingSpec) -> Result<Self> {
        let node_type = config.variant().node_type();
        let mut registry = Registry::new();
        registry.register_extension(Box::new(ModelSelectorExtension::new().bind(
            node_type,
            Rc::clone(catalog),
            spec.clone(),
        )));
        registry.register_node_type(NodeDefinition::from_catalog(node_type, catalog, spec));

        let graph = Rc::new(RedrawCounter::default());
        let canvas: Rc<dyn Graph> = graph.clone();
        let node = registry
            .create_node(node_type, Some(canvas))
            .with_context(|| format!("Node type '{node_type}' is not registered"))?;
        Ok(Self {
            node,
            graph,
            spec: spec.clone(),
        })
    }

    /// Sets a widget the way a user would, firing its listeners.
    pub(crate) fn set(&mut self, widget: &str, value: &str) -> Result<()> {
        if !self.node.set_value(widget, value) {
            let known: Vec<_> = self.node.widgets().iter().map(|w| w.name.as_str()).collect();
            anyhow::bail!(
                "Node '{}' has no widget '{}'. Widgets: {}",
                self.node.type_name(),
                widget,
                known.join(", ")
            );
        }
        Ok(())
    }

    pub(crate) fn provider(&self) -> String {
        self.node
            .widget(PROVIDER_WIDGET)
            .map(|w| w.value.clone())
            .unwrap_or_default()
    }

    /// Current value of each role widget, in binding order.
    pub(crate) fn selected_models(&self) -> Vec<String> {
        self.spec
            .roles
            .iter()
            .filter_map(|role| self.node.widget(&role.widget))
            .map(|w| w.value.clone())
            .collect()
    }

    pub(crate) fn redraws(&self) -> usize {
        self.graph.count.get()
    }

    /// Prints every widget's value and option count under a step heading.
    pub(crate) fn print_step(&self, label: &str) {
        println!("{} {}", "▸".cyan().bold(), label.bold());
        for widget in self.node.widgets().iter() {
            println!(
                "    {:<12} {} {}",
                widget.name,
                widget.value.yellow(),
                format!("({} options)", widget.values.len()).dimmed()
            );
        }
        println!();
    }

    /// Prints each role's full option list, marking the selection.
    pub(crate) fn print_roles(&self) {
        println!("{} {}", "provider:".bold(), self.provider().cyan());
        for role in &self.spec.roles {
            let Some(widget) = self.node.widget(&role.widget) else {
                continue;
            };
            println!("\n  {}:", role.widget);
            for value in &widget.values {
                if *value == widget.value {
                    println!("    {} {}", value.green(), "(selected)".dimmed());
                } else {
                    println!("    {value}");
                }
            }
        }
    }
}

/// Lists providers with their endpoint and per-role model counts.
pub(crate) fn print_providers(catalog: &ProviderCatalog, spec: &BindingSpec) {
    println!("Providers:\n");
    for entry in catalog.entries() {
        let marker = if entry.name == spec.default_provider {
            " (default)"
        } else {
            ""
        };
        let counts: Vec<String> = spec
            .roles
            .iter()
            .map(|role| {
                let n = entry.models.models_for(role.field.as_deref()).len();
                format!("{}: {n}", role.widget)
            })
            .collect();
        println!("  {}{}", entry.name.bold(), marker.green());
        println!("    {}", counts.join(", ").dimmed());
        if let Some(ref url) = entry.base_url {
            println!("    {}", url.dimmed());
        }
    }
}

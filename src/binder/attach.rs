//! Attaching a binder to a node.

use std::rc::Rc;

use super::resolve::resolve;
use super::spec::BindingSpec;
use crate::catalog::ProviderCatalog;
use crate::constants::BINDER_LISTENER_TAG;
use crate::widget::{ChangeEvent, Node, Widgets};

/// Per-node binding state: the catalog and spec the provider listener uses.
///
/// Owned by the listener closure, so it lives exactly as long as the node.
struct Binding {
    catalog: Rc<ProviderCatalog>,
    spec: BindingSpec,
}

impl Binding {
    fn sync(&self, widgets: &mut Widgets, provider: &str) {
        sync_roles(widgets, &self.catalog, &self.spec, provider);
    }
}

/// Rewrites every role widget of `spec` for `provider`.
pub fn sync_roles(widgets: &mut Widgets, catalog: &ProviderCatalog, spec: &BindingSpec, provider: &str) {
    let resolved = resolve(catalog, spec, provider, |name| {
        widgets.get(name).map(|w| w.value.clone())
    });
    for (role, options) in resolved {
        if let Some(widget) = widgets.get_mut(&role.widget) {
            tracing::trace!(
                widget = %role.widget,
                provider,
                selected = %options.selected,
                count = options.values.len(),
                "repopulated model selector"
            );
            widget.values = options.values;
            widget.value = options.selected;
        }
    }
}

/// Links the node's provider selector to its model selectors.
///
/// Populates the model selectors for the current provider right away, then
/// listens for provider changes and repopulates after any listeners that
/// were already registered, requesting a redraw afterwards.
///
/// Returns `false` without touching the node when any widget named by
/// `spec` is missing. Attaching again refreshes the selectors and swaps the
/// catalog and spec the listener uses, keeping a single listener in its
/// original slot.
pub fn attach(node: &mut Node, catalog: Rc<ProviderCatalog>, spec: &BindingSpec) -> bool {
    if let Some(missing) = spec.required_widgets().find(|w| node.widget(w).is_none()) {
        tracing::debug!(node = node.type_name(), widget = missing, "widget missing, not binding");
        return false;
    }

    let binding = Binding {
        catalog,
        spec: spec.clone(),
    };

    let provider = node
        .widget(&spec.provider_widget)
        .map(|w| w.value.clone())
        .unwrap_or_default();
    binding.sync(node.widgets_mut(), &provider);

    let fresh = node.subscribe(
        &spec.provider_widget,
        Some(BINDER_LISTENER_TAG),
        Box::new(move |event: &mut ChangeEvent<'_>| {
            tracing::trace!(widget = event.widget, provider = event.value, "provider changed");
            binding.sync(event.widgets, event.value);
            if let Some(graph) = event.graph {
                graph.set_dirty_canvas(true);
            }
        }),
    );
    if !fresh {
        tracing::debug!(
            node = node.type_name(),
            listeners = node.listener_count(&spec.provider_widget),
            "already bound, listener rebound"
        );
    }
    true
}

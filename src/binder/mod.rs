//! Provider → model selector binding.
//!
//! When a node's provider changes, every dependent model selector is
//! repopulated from the catalog and pointed at a valid model. Unknown
//! providers fall back to the binding's default provider; providers with no
//! models for a role get that role's placeholder. Nothing here fails.

mod attach;
mod resolve;
mod spec;

pub use attach::{attach, sync_roles};
#[allow(unused_imports)]
pub use resolve::{models_for, resolve, resolve_entry, role_options, RoleOptions};
pub use spec::BindingSpec;
#[allow(unused_imports)]
pub use spec::RoleBinding;

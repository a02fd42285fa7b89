//! Provider catalogs: which models each provider offers.
//!
//! A [`ProviderCatalog`] is an ordered, read-only table from provider name to
//! a [`ModelList`]. Catalogs come from the embedded tables of a [`Variant`]
//! or from a user-supplied TOML file.

mod builtin;
mod parse;
mod types;

pub use builtin::Variant;
#[allow(unused_imports)]
pub use types::ModelList;
pub use types::{ProviderCatalog, ProviderEntry};

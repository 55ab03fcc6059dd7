//! Item catalog and configuration loaders.
//!
//! The catalog is the boundary where item names coming from the world get
//! their [`ItemCategory`](hunter_core::ItemCategory) tag. Nothing downstream
//! inspects item names to decide what an item is.
//!
//! - [`ItemCatalog`] resolves names and ids to tagged [`ItemKind`](hunter_core::ItemKind)s
//! - [`ItemLoader`] reads catalogs from RON
//! - [`ConfigLoader`] reads [`AgentConfig`](hunter_core::AgentConfig) from TOML

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ItemCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ItemLoader, LoadResult};

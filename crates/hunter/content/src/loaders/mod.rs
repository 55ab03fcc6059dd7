//! Readers for the catalog and policy files.

pub mod config;
pub mod item;

pub use config::ConfigLoader;
pub use item::ItemLoader;

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

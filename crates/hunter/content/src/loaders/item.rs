//! Item catalog loader.
//!
//! Catalog files group item names by category. Ids are assigned in file
//! order starting at 1; a group may restart numbering with `first_id`:
//!
//! ```ron
//! (
//!     groups: [
//!         (category: Food, items: ["bread", "cooked_beef"]),
//!         (category: Weapon(Sword), first_id: Some(700), items: ["iron_sword"]),
//!     ],
//! )
//! ```

use std::path::Path;

use hunter_core::{ItemCategory, ItemKind};
use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    groups: Vec<ItemGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemGroup {
    category: ItemCategory,
    #[serde(default)]
    first_id: Option<u32>,
    items: Vec<String>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut next_id = 1;
        let mut items = Vec::new();
        for group in file.groups {
            if let Some(first) = group.first_id {
                next_id = first;
            }
            for name in group.items {
                items.push(ItemKind::new(next_id, name, group.category));
                next_id += 1;
            }
        }

        Ok(ItemCatalog::new(items))
    }
}

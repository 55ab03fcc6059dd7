use std::collections::HashMap;

use hunter_core::{ItemCategory, ItemKind, ItemStack};

/// Name-indexed set of known item kinds.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: Vec<ItemKind>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<u32, usize>,
}

impl ItemCatalog {
    /// Builds a catalog. Later duplicates of a name or id replace earlier ones.
    pub fn new(items: Vec<ItemKind>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// The vanilla item families shipped with the crate.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::LoadResult<Self> {
        crate::ItemLoader::parse(include_str!("../data/items.ron"))
    }

    pub fn insert(&mut self, item: ItemKind) {
        let index = match self.by_name.get(&item.name).or(self.by_id.get(&item.id)) {
            Some(&index) => {
                let old = std::mem::replace(&mut self.items[index], item);
                self.by_name.remove(&old.name);
                self.by_id.remove(&old.id);
                index
            }
            None => {
                self.items.push(item);
                self.items.len() - 1
            }
        };
        let item = &self.items[index];
        self.by_name.insert(item.name.clone(), index);
        self.by_id.insert(item.id, index);
    }

    pub fn resolve(&self, name: &str) -> Option<&ItemKind> {
        self.by_name.get(name).map(|&i| &self.items[i])
    }

    pub fn get(&self, id: u32) -> Option<&ItemKind> {
        self.by_id.get(&id).map(|&i| &self.items[i])
    }

    /// Tags a raw `(id, name)` pair, falling back to [`ItemCategory::Other`].
    pub fn kind_of(&self, id: u32, name: &str) -> ItemKind {
        self.get(id)
            .filter(|kind| kind.name == name)
            .cloned()
            .unwrap_or_else(|| ItemKind::new(id, name, ItemCategory::Other))
    }

    /// Stack of a named item, or `None` when the name is unknown.
    pub fn stack(&self, slot: u16, name: &str, count: u32) -> Option<ItemStack> {
        self.resolve(name)
            .map(|kind| ItemStack::new(slot, kind.clone(), count))
    }

    pub fn food_kinds(&self) -> impl Iterator<Item = &ItemKind> {
        self.iter().filter(|kind| kind.category.is_food())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemKind> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_core::WeaponClass;

    #[test]
    fn insert_replaces_by_name() {
        let mut catalog = ItemCatalog::new(vec![
            ItemKind::new(1, "iron_sword", ItemCategory::Other),
            ItemKind::new(2, "bread", ItemCategory::Food),
        ]);
        catalog.insert(ItemKind::new(1, "iron_sword", ItemCategory::Weapon(WeaponClass::Sword)));

        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("iron_sword").unwrap().category.is_weapon());
        assert_eq!(catalog.get(2).unwrap().name, "bread");
    }

    #[test]
    fn unknown_items_are_other() {
        let catalog = ItemCatalog::default();
        assert_eq!(catalog.kind_of(99, "mystery").category, ItemCategory::Other);
        assert!(catalog.stack(0, "mystery", 1).is_none());
    }
}

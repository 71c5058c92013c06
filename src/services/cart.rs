use anyhow::Result;

use crate::models::{Item, Totals};
use crate::services::storage::{load_vec, save_vec, SharedStore};

/// Result of a quantity change on a cart line.
#[derive(Clone, PartialEq, Debug)]
pub enum QuantityChange {
    Updated(u32),
    Removed(Item),
    /// The index or title did not address a line.
    Missing,
}

/// The cart line items, persisted in full under `key` on every mutation.
pub struct CartStore {
    store: SharedStore,
    key: String,
    items: Vec<Item>,
}

impl CartStore {
    pub fn open(store: SharedStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = load_vec(&*store, &key);
        Self { store, key, items }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|i| i.title == title)
    }

    /// Replaces the in-memory lines with whatever storage holds now.
    pub fn reload(&mut self) {
        self.items = load_vec(&*self.store, &self.key);
    }

    pub fn persist(&self) -> Result<()> {
        save_vec(&*self.store, &self.key, &self.items)
    }

    /// Adds one unit of `item`, merging by title. Returns the new quantity.
    ///
    /// Storage is re-read first so an update made by another tab is not
    /// overwritten by a stale in-memory list.
    pub fn add(&mut self, item: Item) -> Result<u32> {
        self.reload();
        let quantity = match self.position(&item.title) {
            Some(index) => {
                let line = &mut self.items[index];
                let quantity = line.quantity().saturating_add(1);
                line.quantity = Some(quantity);
                quantity
            }
            None => {
                self.items.push(item.with_quantity(1));
                1
            }
        };
        self.persist()?;
        Ok(quantity)
    }

    /// Removes the line at `index`; out of range is a no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Result<Option<Item>> {
        if index >= self.items.len() {
            return Ok(None);
        }
        let removed = self.items.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn remove_by_title(&mut self, title: &str) -> Result<Option<Item>> {
        match self.position(title) {
            Some(index) => self.remove(index),
            None => Ok(None),
        }
    }

    /// Shifts the quantity at `index` by `delta`; dropping below 1 removes the line.
    pub fn set_quantity(&mut self, index: usize, delta: i32) -> Result<QuantityChange> {
        let Some(line) = self.items.get_mut(index) else {
            return Ok(QuantityChange::Missing);
        };
        let new_quantity = i64::from(line.quantity()) + i64::from(delta);
        if new_quantity < 1 {
            return Ok(match self.remove(index)? {
                Some(item) => QuantityChange::Removed(item),
                None => QuantityChange::Missing,
            });
        }
        let new_quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        line.quantity = Some(new_quantity);
        self.persist()?;
        Ok(QuantityChange::Updated(new_quantity))
    }

    pub fn change_quantity_by_title(&mut self, title: &str, delta: i32) -> Result<QuantityChange> {
        match self.position(title) {
            Some(index) => self.set_quantity(index, delta),
            None => Ok(QuantityChange::Missing),
        }
    }

    /// Empties the cart and drops its storage key.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.store.remove_item(&self.key)
    }

    pub fn total_count(&self) -> u32 {
        self.items.iter().map(Item::quantity).fold(0, u32::saturating_add)
    }

    pub fn compute_totals(&self, tax_rate: f64) -> Totals {
        Totals::compute(&self.items, tax_rate)
    }
}

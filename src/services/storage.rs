use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::window;

/// Origin-scoped string key-value storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Rc<dyn KeyValueStore>;

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Option<Self> {
        let window = window()?;
        let storage = window.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage.setItem({}) failed: {:?}", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage.removeItem({}) failed: {:?}", key, e))
    }
}

/// Session-only storage used when `localStorage` is unavailable, and by tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Opens `localStorage`, falling back to memory for the session.
pub fn browser_store() -> SharedStore {
    match LocalStorage::open() {
        Some(storage) => Rc::new(storage),
        None => {
            console_warn!("localStorage unavailable, cart and wishlist will not survive a reload");
            Rc::new(MemoryStorage::default())
        }
    }
}

/// Reads a JSON array; a missing key or malformed data yields an empty list.
pub fn load_vec<T: for<'de> Deserialize<'de>>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let Some(json) = store.get_item(key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<T>>>(&json) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            console_warn!("Discarding malformed {:?} data: {}", key, e);
            Vec::new()
        }
    }
}

pub fn save_vec<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    store.set_item(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn missing_and_malformed_data_load_as_empty() {
        let store = MemoryStorage::default();
        assert!(load_vec::<Item>(&store, "cart").is_empty());

        store.set_item("cart", "{broken").unwrap();
        assert!(load_vec::<Item>(&store, "cart").is_empty());

        store.set_item("cart", "null").unwrap();
        assert!(load_vec::<Item>(&store, "cart").is_empty());

        store.set_item("cart", r#"{"title":"not a list"}"#).unwrap();
        assert!(load_vec::<Item>(&store, "cart").is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let store = MemoryStorage::default();
        let items = vec![
            Item::new("Kettle", "$30.00").with_quantity(2),
            Item::new("Apron", "$12.00").with_image_class("img-apron"),
            Item::new("Spoon", "$1.50").with_description("Wooden"),
        ];
        save_vec(&store, "cart", &items).unwrap();
        assert_eq!(load_vec::<Item>(&store, "cart"), items);
    }

    #[test]
    fn remove_clears_the_key() {
        let store = MemoryStorage::default();
        store.set_item("wishlist", "[]").unwrap();
        store.remove_item("wishlist").unwrap();
        assert_eq!(store.get_item("wishlist"), None);
    }
}

use anyhow::Result;

use crate::models::Item;
use crate::services::cart::CartStore;
use crate::services::storage::{load_vec, save_vec, SharedStore};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    pub fn message(self) -> &'static str {
        match self {
            Toggle::Added => "Added to wishlist!",
            Toggle::Removed => "Removed from wishlist",
        }
    }
}

/// Favorited items, stored without quantities.
pub struct WishlistStore {
    store: SharedStore,
    key: String,
    items: Vec<Item>,
}

impl WishlistStore {
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

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|i| i.title == title)
    }

    pub fn reload(&mut self) {
        self.items = load_vec(&*self.store, &self.key);
    }

    pub fn persist(&self) -> Result<()> {
        save_vec(&*self.store, &self.key, &self.items)
    }

    /// Favorites `item` if its title is absent, un-favorites it otherwise.
    pub fn toggle(&mut self, item: Item) -> Result<Toggle> {
        let outcome = match self.position(&item.title) {
            Some(index) => {
                self.items.remove(index);
                Toggle::Removed
            }
            None => {
                self.items.push(Item { quantity: None, ..item });
                Toggle::Added
            }
        };
        self.persist()?;
        Ok(outcome)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Option<Item>> {
        if index >= self.items.len() {
            return Ok(None);
        }
        let removed = self.items.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn remove_by_title(&mut self, title: &str) -> Result<Option<Item>> {
        match self.position(title) {
            Some(index) => self.remove_at(index),
            None => Ok(None),
        }
    }

    /// Adds the entry at `index` to `cart` with the usual merge rule. The
    /// wishlist itself is left as is. Returns the moved item and its new
    /// cart quantity.
    pub fn move_to_cart(&self, index: usize, cart: &mut CartStore) -> Result<Option<(Item, u32)>> {
        let Some(item) = self.items.get(index).cloned() else {
            return Ok(None);
        };
        let quantity = cart.add(item.clone())?;
        Ok(Some((item, quantity)))
    }

    pub fn move_to_cart_by_title(&self, title: &str, cart: &mut CartStore) -> Result<Option<(Item, u32)>> {
        match self.position(title) {
            Some(index) => self.move_to_cart(index, cart),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{KeyValueStore, MemoryStorage};
    use std::rc::Rc;

    fn stores() -> (Rc<MemoryStorage>, WishlistStore, CartStore) {
        let memory = Rc::new(MemoryStorage::default());
        let wishlist = WishlistStore::open(memory.clone(), "wishlist");
        let cart = CartStore::open(memory.clone(), "cart");
        (memory, wishlist, cart)
    }

    fn lamp() -> Item {
        Item::new("Lamp", "$20.00").with_description("Desk lamp").with_image_class("img-lamp")
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let (_, mut wishlist, _) = stores();
        wishlist.toggle(Item::new("Rug", "$45.00")).unwrap();
        let before = wishlist.items().to_vec();

        assert_eq!(wishlist.toggle(lamp()).unwrap(), Toggle::Added);
        assert!(wishlist.contains("Lamp"));
        assert_eq!(wishlist.toggle(lamp()).unwrap(), Toggle::Removed);
        assert_eq!(wishlist.items(), before.as_slice());
    }

    #[test]
    fn entries_are_stored_without_quantity() {
        let (memory, mut wishlist, _) = stores();
        wishlist.toggle(lamp().with_quantity(3)).unwrap();
        let raw = memory.get_item("wishlist").unwrap();
        assert!(!raw.contains("quantity"));
        assert_eq!(WishlistStore::open(memory, "wishlist").items(), wishlist.items());
    }

    #[test]
    fn toggle_messages() {
        assert_eq!(Toggle::Added.message(), "Added to wishlist!");
        assert_eq!(Toggle::Removed.message(), "Removed from wishlist");
    }

    #[test]
    fn remove_at_is_bounds_checked() {
        let (_, mut wishlist, _) = stores();
        wishlist.toggle(lamp()).unwrap();
        assert_eq!(wishlist.remove_at(3).unwrap(), None);
        assert_eq!(wishlist.items().len(), 1);
        assert_eq!(wishlist.remove_at(0).unwrap().map(|i| i.title), Some("Lamp".to_string()));
        assert!(wishlist.items().is_empty());
    }

    #[test]
    fn move_to_cart_keeps_the_wishlist_and_adds_one() {
        let (_, mut wishlist, mut cart) = stores();
        wishlist.toggle(lamp()).unwrap();
        wishlist.toggle(Item::new("Rug", "$45.00")).unwrap();
        cart.add(Item::new("Tea", "$4.00")).unwrap();

        let (moved, quantity) = wishlist.move_to_cart(0, &mut cart).unwrap().unwrap();
        assert_eq!(moved.title, "Lamp");
        assert_eq!(quantity, 1);
        assert_eq!(wishlist.items().len(), 2);
        assert_eq!(cart.total_count(), 2);

        wishlist.move_to_cart_by_title("Lamp", &mut cart).unwrap();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_count(), 3);
        assert_eq!(cart.items()[1].description, "Desk lamp");
    }

    #[test]
    fn move_to_cart_out_of_range_does_nothing() {
        let (_, wishlist, mut cart) = stores();
        assert_eq!(wishlist.move_to_cart(0, &mut cart).unwrap(), None);
        assert_eq!(wishlist.move_to_cart_by_title("Lamp", &mut cart).unwrap(), None);
        assert!(cart.is_empty());
    }
}

use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use yew::Callback;

use crate::config::ShopConfig;
use crate::models::{Item, Totals};
use crate::services::cart::CartStore;
use crate::services::storage::SharedStore;
use crate::services::wishlist::WishlistStore;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Checkout {
    EmptyCart,
    Proceed,
}

impl Checkout {
    pub fn message(self) -> &'static str {
        match self {
            Checkout::EmptyCart => "Your cart is empty!",
            Checkout::Proceed => "Proceeding to checkout! This would integrate with your payment system.",
        }
    }
}

/// Cart and wishlist over one storage backend.
pub struct Shop {
    pub config: ShopConfig,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
}

impl Shop {
    pub fn open(store: SharedStore, config: ShopConfig) -> Self {
        let cart = CartStore::open(store.clone(), config.cart_key.clone());
        let wishlist = WishlistStore::open(store, config.wishlist_key.clone());
        Self { config, cart, wishlist }
    }

    /// Re-reads the list stored under `key`, or both lists when `key` is
    /// `None` (storage was cleared). Returns whether anything was reloaded.
    pub fn reload_key(&mut self, key: Option<&str>) -> bool {
        match key {
            Some(k) if k == self.cart.key() => self.cart.reload(),
            Some(k) if k == self.wishlist.key() => self.wishlist.reload(),
            Some(_) => return false,
            None => {
                self.cart.reload();
                self.wishlist.reload();
            }
        }
        true
    }

    pub fn totals(&self) -> Totals {
        self.cart.compute_totals(self.config.tax_rate)
    }

    pub fn checkout(&self) -> Checkout {
        if self.cart.is_empty() {
            Checkout::EmptyCart
        } else {
            Checkout::Proceed
        }
    }

    pub fn move_to_cart(&mut self, title: &str) -> Result<Option<(Item, u32)>> {
        self.wishlist.move_to_cart_by_title(title, &mut self.cart)
    }
}

/// Shared handle to the [`Shop`] with change subscriptions.
///
/// Every [`ShopHandle::update`] notifies subscribers once the shop borrow
/// is released, so callbacks are free to read the shop again.
#[derive(Clone)]
pub struct ShopHandle {
    shop: Rc<RefCell<Shop>>,
    listeners: Rc<RefCell<Vec<(usize, Callback<()>)>>>,
    next_id: Rc<Cell<usize>>,
}

impl PartialEq for ShopHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shop, &other.shop)
    }
}

impl ShopHandle {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop: Rc::new(RefCell::new(shop)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Shop) -> R) -> R {
        f(&self.shop.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Shop) -> R) -> R {
        let result = f(&mut self.shop.borrow_mut());
        self.notify();
        result
    }

    /// Like [`ShopHandle::update`], but notifies only when `f` reports a change.
    pub fn update_if_changed(&self, f: impl FnOnce(&mut Shop) -> bool) -> bool {
        let changed = f(&mut self.shop.borrow_mut());
        if changed {
            self.notify();
        }
        changed
    }

    pub fn subscribe(&self, callback: Callback<()>) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, callback));
        id
    }

    pub fn unsubscribe(&self, id: usize) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }

    pub fn notify(&self) {
        let listeners: Vec<Callback<()>> = self.listeners.borrow().iter().map(|(_, cb)| cb.clone()).collect();
        for cb in listeners {
            cb.emit(());
        }
    }
}

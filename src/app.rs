use anyhow::Result;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, StorageEvent, Window};
use yew::Callback;

use crate::components::{
    cart_items::{CartItems, CartItemsProps},
    wishlist_items::{WishlistItems, WishlistItemsProps},
};
use crate::config::ShopConfig;
use crate::models::Item;
use crate::services::cart::QuantityChange;
use crate::services::notification::{
    added_to_cart_message, show_toast, show_tooltip, ToastStyle, REMOVED_FROM_CART_MESSAGE,
};
use crate::services::page::{self, CART_ITEMS_ID, WISHLIST_ITEMS_ID};
use crate::services::shop::{Shop, ShopHandle};
use crate::services::storage::browser_store;

const CLEAR_CART_PROMPT: &str = "Are you sure you want to clear your entire cart?";

/// User-facing actions: mutate the shop, then give feedback.
#[derive(Clone, PartialEq)]
pub struct Storefront {
    pub shop: ShopHandle,
}

impl Storefront {
    fn config(&self) -> ShopConfig {
        self.shop.read(|shop| shop.config.clone())
    }

    fn confirm_added(&self, title: &str) {
        show_toast(&self.config(), &added_to_cart_message(title), ToastStyle::Confirmation);
    }

    fn confirm_removed(&self) {
        show_toast(&self.config(), REMOVED_FROM_CART_MESSAGE, ToastStyle::Removal);
    }

    pub fn add_to_cart(&self, item: Item) {
        let title = item.title.clone();
        match self.shop.update(|shop| shop.cart.add(item)) {
            Ok(quantity) => {
                console_log!("Cart: {} x{}", title, quantity);
                self.confirm_added(&title);
            }
            Err(e) => console_error!("Could not save cart: {:#}", e),
        }
    }

    /// `addToCart(button)`: adds the product card enclosing `button`.
    pub fn add_card_to_cart(&self, button: &Element) {
        match page::read_product_card(button) {
            Some(item) => self.add_to_cart(item),
            None => console_warn!("addToCart: button is not inside a complete .dealCards card"),
        }
    }

    fn after_removal(&self, result: Result<Option<Item>>) {
        match result {
            Ok(Some(_)) => self.confirm_removed(),
            Ok(None) => {}
            Err(e) => console_error!("Could not save cart: {:#}", e),
        }
    }

    fn after_quantity_change(&self, result: Result<QuantityChange>) {
        match result {
            Ok(QuantityChange::Removed(_)) => self.confirm_removed(),
            Ok(_) => {}
            Err(e) => console_error!("Could not save cart: {:#}", e),
        }
    }

    pub fn remove_from_cart(&self, index: usize) {
        let result = self.shop.update(|shop| shop.cart.remove(index));
        self.after_removal(result);
    }

    pub fn remove_line(&self, title: &str) {
        let result = self.shop.update(|shop| shop.cart.remove_by_title(title));
        self.after_removal(result);
    }

    pub fn update_quantity(&self, index: usize, delta: i32) {
        let result = self.shop.update(|shop| shop.cart.set_quantity(index, delta));
        self.after_quantity_change(result);
    }

    pub fn change_line(&self, title: &str, delta: i32) {
        let result = self.shop.update(|shop| shop.cart.change_quantity_by_title(title, delta));
        self.after_quantity_change(result);
    }

    pub fn clear_cart(&self) {
        let Some(window) = web_sys::window() else { return };
        if !window.confirm_with_message(CLEAR_CART_PROMPT).unwrap_or(false) {
            return;
        }
        match self.shop.update(|shop| shop.cart.clear()) {
            Ok(()) => self.confirm_removed(),
            Err(e) => console_error!("Could not clear cart: {:#}", e),
        }
    }

    pub fn checkout(&self) {
        let outcome = self.shop.read(|shop| shop.checkout());
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(outcome.message());
        }
    }

    /// Favorite-button handler: toggles the enclosing card in the wishlist.
    pub fn toggle_favorite(&self, button: &Element) {
        let Some(item) = page::read_product_card(button) else { return };
        match self.shop.update(|shop| shop.wishlist.toggle(item)) {
            Ok(outcome) => show_tooltip(&self.config(), button, outcome.message()),
            Err(e) => console_error!("Could not save wishlist: {:#}", e),
        }
    }

    pub fn wishlist_to_cart(&self, title: &str) {
        match self.shop.update(|shop| shop.move_to_cart(title)) {
            Ok(Some((item, _))) => self.confirm_added(&item.title),
            Ok(None) => {}
            Err(e) => console_error!("Could not save cart: {:#}", e),
        }
    }

    pub fn wishlist_remove(&self, title: &str) {
        if let Err(e) = self.shop.update(|shop| shop.wishlist.remove_by_title(title)) {
            console_error!("Could not save wishlist: {:#}", e);
        }
    }

    /// Another tab wrote to storage; `key` is `None` when it was cleared.
    pub fn reload_from_storage(&self, key: Option<String>) {
        if self.shop.update_if_changed(|shop| shop.reload_key(key.as_deref())) {
            console_log!("Reloaded {} after a change in another tab", key.as_deref().unwrap_or("all lists"));
        }
    }
}

/// Wires the widgets into the page.
pub fn start() {
    let config = ShopConfig::load();
    let shop = ShopHandle::new(Shop::open(browser_store(), config));
    let storefront = Storefront { shop: shop.clone() };

    {
        let chrome = shop.clone();
        shop.subscribe(Callback::from(move |_| chrome.read(page::refresh_chrome)));
    }

    if let Some(root) = page::element_by_id(CART_ITEMS_ID) {
        yew::Renderer::<CartItems>::with_root_and_props(root, CartItemsProps { storefront: storefront.clone() })
            .render();
    }
    if let Some(root) = page::element_by_id(WISHLIST_ITEMS_ID) {
        yew::Renderer::<WishlistItems>::with_root_and_props(root, WishlistItemsProps { storefront: storefront.clone() })
            .render();
    }

    bind_card_buttons(&storefront);
    listen_for_other_tabs(&storefront);
    if let Err(e) = install_globals(&storefront) {
        console_error!("Could not install page entry points: {:?}", e);
    }

    shop.read(page::refresh_chrome);
    shop.read(|s| {
        console_log!(
            "Storefront ready: {} cart line(s), {} wishlist item(s)",
            s.cart.items().len(),
            s.wishlist.items().len()
        )
    });
}

fn on_click(button: &Element, handler: impl Fn(&Element) + 'static) {
    let closure = Closure::<dyn Fn(Event)>::new(move |e: Event| {
        if let Some(target) = e.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
            handler(&target);
        }
    });
    if button
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .is_ok()
    {
        closure.forget();
    }
}

fn bind_card_buttons(storefront: &Storefront) {
    let Some(root) = page::document().and_then(|d| d.document_element()) else { return };

    page::for_each_match(&root, ".add-to-cart-btn", |button| {
        let storefront = storefront.clone();
        on_click(&button, move |target| storefront.add_card_to_cart(target));
    });
    page::for_each_match(&root, ".favorite-btn", |button| {
        let storefront = storefront.clone();
        on_click(&button, move |target| storefront.toggle_favorite(target));
    });
}

fn listen_for_other_tabs(storefront: &Storefront) {
    let Some(window) = web_sys::window() else { return };
    let storefront = storefront.clone();
    let closure = Closure::<dyn Fn(StorageEvent)>::new(move |e: StorageEvent| {
        storefront.reload_from_storage(e.key());
    });
    if window
        .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
        .is_ok()
    {
        closure.forget();
    }
}

fn install<T: ?Sized + WasmClosure>(window: &Window, name: &str, closure: Closure<T>) -> Result<(), JsValue> {
    js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())?;
    closure.forget();
    Ok(())
}

/// Exposes the page's inline-handler entry points on `window`.
fn install_globals(storefront: &Storefront) -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else { return Ok(()) };

    let s = storefront.clone();
    install(&window, "addToCart", Closure::<dyn Fn(JsValue)>::new(move |button: JsValue| {
        if let Ok(button) = button.dyn_into::<Element>() {
            s.add_card_to_cart(&button);
        }
    }))?;

    let s = storefront.clone();
    install(&window, "removeFromCart", Closure::<dyn Fn(i32)>::new(move |index: i32| {
        if let Ok(index) = usize::try_from(index) {
            s.remove_from_cart(index);
        }
    }))?;

    let s = storefront.clone();
    install(&window, "updateQuantity", Closure::<dyn Fn(i32, i32)>::new(move |index: i32, delta: i32| {
        if let Ok(index) = usize::try_from(index) {
            s.update_quantity(index, delta);
        }
    }))?;

    let s = storefront.clone();
    install(&window, "clearCart", Closure::<dyn Fn()>::new(move || s.clear_cart()))?;

    let s = storefront.clone();
    install(&window, "processCheckout", Closure::<dyn Fn()>::new(move || s.checkout()))?;

    install(&window, "showPage", Closure::<dyn Fn(String)>::new(|page_id: String| page::show_page(&page_id)))?;

    Ok(())
}

//! Reads and writes the storefront markup the widgets are embedded in.

use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

use crate::models::Item;
use crate::services::shop::Shop;

pub const CART_ITEMS_ID: &str = "cart-items";
pub const WISHLIST_ITEMS_ID: &str = "wishlist-items";

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Calls `f` for every element matching `selector` under `root`.
pub fn for_each_match(root: &Element, selector: &str, mut f: impl FnMut(Element)) {
    let Ok(nodes) = root.query_selector_all(selector) else { return };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(el);
        }
    }
}

fn text_of(card: &Element, selector: &str) -> Option<String> {
    let el = card.query_selector(selector).ok()??;
    Some(el.text_content().unwrap_or_default().trim().to_string())
}

/// Builds an item from the `.dealCards` card enclosing `button`.
///
/// Title and price are required; description and image class default to
/// empty strings.
pub fn read_product_card(button: &Element) -> Option<Item> {
    let card = button.closest(".dealCards").ok()??;
    let title = text_of(&card, ".product-title")?;
    let price = text_of(&card, ".product-price")?;
    let description = text_of(&card, ".product-description").unwrap_or_default();
    let image_class = card
        .query_selector(".dealImgs")
        .ok()
        .flatten()
        .and_then(|imgs| imgs.class_list().item(1))
        .unwrap_or_default();
    Some(
        Item::new(title, price)
            .with_description(description)
            .with_image_class(image_class),
    )
}

fn set_display(id: &str, value: &str) {
    if let Some(el) = element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        let _ = el.style().set_property("display", value);
    }
}

fn set_text(id: &str, text: &str) {
    if let Some(el) = element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Updates everything around the two lists: summary figures, the
/// empty-cart toggle, the header badge and favorite button state.
pub fn refresh_chrome(shop: &Shop) {
    let Some(document) = document() else { return };

    if element_by_id(CART_ITEMS_ID).is_some() {
        if shop.cart.is_empty() {
            set_display("empty-cart-message", "block");
            set_display("cart-content", "none");
        } else {
            set_display("empty-cart-message", "none");
            set_display("cart-content", "block");
            let totals = shop.totals();
            set_text("cart-subtotal", &totals.subtotal.to_string());
            set_text("cart-tax", &totals.tax.to_string());
            set_text("cart-total", &totals.total.to_string());
        }
    }

    if let Some(badge) = document
        .query_selector(".cart-badge")
        .ok()
        .flatten()
        .and_then(|b| b.dyn_into::<HtmlElement>().ok())
    {
        let count = shop.cart.total_count();
        badge.set_text_content(Some(&count.to_string()));
        let _ = badge
            .style()
            .set_property("display", if count > 0 { "flex" } else { "none" });
    }

    let Some(root) = document.document_element() else { return };
    for_each_match(&root, ".favorite-btn", |button| {
        let favorited = read_product_card(&button)
            .map(|item| shop.wishlist.contains(&item.title))
            .unwrap_or(false);
        let _ = button.class_list().toggle_with_force("favorited", favorited);
    });
}

/// Shows the `.page` section with id `page_id` and hides the others.
pub fn show_page(page_id: &str) {
    let Some(root) = document().and_then(|d| d.document_element()) else { return };
    for_each_match(&root, ".page", |page| {
        let _ = page.class_list().remove_1("active");
    });
    if let Some(page) = element_by_id(page_id) {
        let _ = page.class_list().add_1("active");
    }
}

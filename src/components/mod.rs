pub mod cart_items;
pub mod wishlist_items;

use yew::prelude::*;

use crate::services::shop::ShopHandle;

/// Re-renders the calling component whenever the shop changes.
#[hook]
pub fn use_shop_updates(shop: &ShopHandle) {
    let trigger = use_force_update();
    use_effect_with(shop.clone(), move |shop| {
        let id = shop.subscribe(Callback::from(move |_| trigger.force_update()));
        let shop = shop.clone();
        move || shop.unsubscribe(id)
    });
}

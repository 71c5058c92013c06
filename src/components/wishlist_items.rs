use yew::prelude::*;

use crate::app::Storefront;
use crate::components::use_shop_updates;
use crate::models::Item;

#[derive(Properties, PartialEq)]
pub struct WishlistItemsProps {
    pub storefront: Storefront,
}

#[function_component(WishlistItems)]
pub fn wishlist_items(props: &WishlistItemsProps) -> Html {
    use_shop_updates(&props.storefront.shop);
    let items: Vec<Item> = props.storefront.shop.read(|shop| shop.wishlist.items().to_vec());

    if items.is_empty() {
        return html! { <p>{ "No items in your wishlist yet!" }</p> };
    }

    html! {
        { for items.iter().map(|item| {
            let on_move = {
                let storefront = props.storefront.clone();
                let title = item.title.clone();
                Callback::from(move |_: MouseEvent| storefront.wishlist_to_cart(&title))
            };
            let on_remove = {
                let storefront = props.storefront.clone();
                let title = item.title.clone();
                Callback::from(move |_: MouseEvent| storefront.wishlist_remove(&title))
            };

            html! {
                <div class="dealCards" key={item.title.clone()}>
                    <div class={classes!("dealImgs", item.image_class.clone())}></div>
                    <div class="product-info">
                        <h5 class="product-title">{ &item.title }</h5>
                        <p class="product-description">{ &item.description }</p>
                        <div class="product-footer">
                            <span class="product-price">{ &item.price }</span>
                            <button class="btn btn-primary wishlist-add-to-cart" onclick={on_move}>{ "Add to Cart" }</button>
                            <button class="btn btn-danger wishlist-remove-btn" onclick={on_remove}>{ "Remove" }</button>
                        </div>
                    </div>
                </div>
            }
        })}
    }
}

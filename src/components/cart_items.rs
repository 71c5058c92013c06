use yew::prelude::*;

use crate::app::Storefront;
use crate::components::use_shop_updates;
use crate::models::Item;

#[derive(Properties, PartialEq)]
pub struct CartItemsProps {
    pub storefront: Storefront,
}

/// Line items rendered into `#cart-items`. Rows act on their item by title,
/// so a re-render between display and click cannot hit the wrong line.
#[function_component(CartItems)]
pub fn cart_items(props: &CartItemsProps) -> Html {
    use_shop_updates(&props.storefront.shop);
    let items: Vec<Item> = props.storefront.shop.read(|shop| shop.cart.items().to_vec());

    html! {
        { for items.iter().map(|item| {
            let on_decrease = {
                let storefront = props.storefront.clone();
                let title = item.title.clone();
                Callback::from(move |_: MouseEvent| storefront.change_line(&title, -1))
            };
            let on_increase = {
                let storefront = props.storefront.clone();
                let title = item.title.clone();
                Callback::from(move |_: MouseEvent| storefront.change_line(&title, 1))
            };
            let on_remove = {
                let storefront = props.storefront.clone();
                let title = item.title.clone();
                Callback::from(move |_: MouseEvent| storefront.remove_line(&title))
            };

            html! {
                <div class="cart-item" key={item.title.clone()} data-title={item.title.clone()}>
                    <div class={classes!("dealImgs", item.image_class.clone())} style="width:100px; height:100px; border-radius:8px; flex-shrink:0;"></div>
                    <div class="cart-item-content">
                        <h6>{ &item.title }</h6>
                        <p>{ &item.description }</p>
                        <div class="quantity-controls">
                            <button class="quantity-btn" onclick={on_decrease}>{ "-" }</button>
                            <span class="quantity">{ item.quantity().to_string() }</span>
                            <button class="quantity-btn" onclick={on_increase}>{ "+" }</button>
                        </div>
                    </div>
                    <div class="cart-item-actions">
                        <div class="price">{ item.line_total().to_string() }</div>
                        <button class="delete-btn" onclick={on_remove} title="Remove item">
                            <svg xmlns="http://www.w3.org/2000/svg" width="14" height="14" fill="currentColor" viewBox="0 0 16 16">
                                <path d="M5.5 5.5A.5.5 0 0 1 6 6v6a.5.5 0 0 1-1 0V6a.5.5 0 0 1 .5-.5m2.5 0a.5.5 0 0 1 .5.5v6a.5.5 0 0 1-1 0V6a.5.5 0 0 1 .5-.5m3 .5a.5.5 0 0 0-1 0v6a.5.5 0 0 0 1 0z"/>
                                <path d="M14.5 3a1 1 0 0 1-1 1H13v9a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V4h-.5a1 1 0 0 1-1-1V2a1 1 0 0 1 1-1H6a1 1 0 0 1 1-1h2a1 1 0 0 1 1 1h3.5a1 1 0 0 1 1 1zM4.118 4 4 4.059V13a1 1 0 0 0 1 1h6a1 1 0 0 0 1-1V4.059L11.882 4zM2.5 3h11V2h-11z"/>
                            </svg>
                        </button>
                    </div>
                </div>
            }
        })}
    }
}

use super::types::{request, response};
use crate::{
    modules::{
        cart::{repository, service as cart_service},
        menu,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let body = payload.body;
    let cart = repository::find_or_create_by_owner_id(&ctx.db_conn.pool, payload.auth.user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateCart)?;

    let contents = if body.quantity == 0 {
        cart_service::remove_item(cart_service::Contents::from(&cart), &body.menu_item_id)
    } else {
        let menu_item = menu::repository::find_by_id(&ctx.db_conn.pool, body.menu_item_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateCart)?
            .ok_or(response::Error::MenuItemNotFound)?;

        if !menu_item.is_orderable() {
            return Err(response::Error::MenuItemUnavailable);
        }

        cart_service::set_item(
            cart_service::Contents::from(&cart),
            cart_service::SetItem {
                menu_item_id: &menu_item.id,
                restaurant_id: &menu_item.restaurant_id,
                quantity: body.quantity,
                replace: body.replace.unwrap_or(false),
            },
        )
        .map_err(|err| match err {
            cart_service::Error::DifferentRestaurant => response::Error::CartHoldsAnotherRestaurant,
            cart_service::Error::InvalidQuantity => response::Error::InvalidQuantity,
            cart_service::Error::UnexpectedError => response::Error::FailedToUpdateCart,
        })?
    };

    repository::update_by_id(
        &ctx.db_conn.pool,
        cart.id,
        repository::UpdateCartPayload {
            restaurant_id: contents.restaurant_id,
            items: contents.items,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateCart)?;

    cart_service::load_priced_cart(&ctx, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateCart)
        .map(|(cart, priced)| response::Success::CartUpdated { id: cart.id, priced })
}

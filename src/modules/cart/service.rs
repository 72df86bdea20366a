use super::repository::{self, Cart, CartItem};
use crate::{
    modules::menu::{self, repository::MenuItem},
    types::Context,
};
use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

pub const MAX_ITEM_QUANTITY: i32 = 50;

#[derive(Debug, PartialEq)]
pub enum Error {
    DifferentRestaurant,
    InvalidQuantity,
    UnexpectedError,
}

/// What a cart holds, independent of where it is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Contents {
    pub restaurant_id: Option<String>,
    pub items: Vec<CartItem>,
}

impl From<&Cart> for Contents {
    fn from(cart: &Cart) -> Self {
        Self {
            restaurant_id: cart.restaurant_id.clone(),
            items: cart.items.0.clone(),
        }
    }
}

pub struct SetItem<'a> {
    pub menu_item_id: &'a str,
    pub restaurant_id: &'a str,
    pub quantity: i32,
    /// Empty the cart first when it holds items of another restaurant.
    pub replace: bool,
}

/// Sets the quantity of one menu item. A quantity of zero removes it and an
/// emptied cart is no longer tied to a restaurant.
pub fn set_item(contents: Contents, change: SetItem) -> Result<Contents, Error> {
    if change.quantity < 0 || change.quantity > MAX_ITEM_QUANTITY {
        return Err(Error::InvalidQuantity);
    }

    let mut contents = contents;
    let holds_other_restaurant = !contents.items.is_empty()
        && contents.restaurant_id.as_deref() != Some(change.restaurant_id);

    if holds_other_restaurant {
        if !change.replace {
            return Err(Error::DifferentRestaurant);
        }
        contents.items.clear();
    }

    match contents
        .items
        .iter()
        .position(|item| item.menu_item_id == change.menu_item_id)
    {
        Some(index) if change.quantity == 0 => {
            contents.items.remove(index);
        }
        Some(index) => contents.items[index].quantity = change.quantity,
        None if change.quantity == 0 => {}
        None => contents.items.push(CartItem {
            menu_item_id: change.menu_item_id.to_string(),
            quantity: change.quantity,
        }),
    }

    contents.restaurant_id = if contents.items.is_empty() {
        None
    } else {
        Some(change.restaurant_id.to_string())
    };

    Ok(contents)
}

/// Drops one entry from the cart. The menu item is not consulted, so entries
/// whose item was deleted or moved can always be removed.
pub fn remove_item(contents: Contents, menu_item_id: &str) -> Contents {
    let mut contents = contents;
    contents
        .items
        .retain(|item| item.menu_item_id != menu_item_id);

    if contents.items.is_empty() {
        contents.restaurant_id = None;
    }

    contents
}

#[derive(Serialize, Clone, Debug)]
pub struct Line {
    pub menu_item: MenuItem,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

#[derive(Serialize, Clone, Debug)]
pub struct PricedCart {
    pub restaurant_id: Option<String>,
    pub lines: Vec<Line>,
    pub sub_total: BigDecimal,
}

impl PricedCart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that can no longer be ordered from the cart's restaurant.
    pub fn unorderable_lines(&self) -> Vec<&Line> {
        self.lines
            .iter()
            .filter(|line| {
                !line.menu_item.is_orderable()
                    || Some(&line.menu_item.restaurant_id) != self.restaurant_id.as_ref()
            })
            .collect()
    }
}

/// Prices the cart at the current menu prices. Entries whose menu item no
/// longer exists are dropped.
pub fn price(contents: &Contents, menu_items: &[MenuItem]) -> PricedCart {
    let lines = contents
        .items
        .iter()
        .filter_map(|item| {
            menu_items
                .iter()
                .find(|menu_item| menu_item.id == item.menu_item_id)
                .map(|menu_item| Line {
                    line_total: (&menu_item.price * BigDecimal::from(item.quantity)).round(2),
                    menu_item: menu_item.clone(),
                    quantity: item.quantity,
                })
        })
        .collect::<Vec<_>>();

    let sub_total = lines
        .iter()
        .fold(BigDecimal::zero(), |acc, line| acc + &line.line_total);

    PricedCart {
        restaurant_id: contents.restaurant_id.clone(),
        lines,
        sub_total,
    }
}

/// Loads the caller's cart priced at the current menu prices.
pub async fn load_priced_cart(ctx: &Context, owner_id: String) -> Result<(Cart, PricedCart), Error> {
    let cart = repository::find_or_create_by_owner_id(&ctx.db_conn.pool, owner_id)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let contents = Contents::from(&cart);
    let ids = contents
        .items
        .iter()
        .map(|item| item.menu_item_id.clone())
        .collect::<Vec<_>>();

    let menu_items = if ids.is_empty() {
        vec![]
    } else {
        menu::repository::find_many_by_ids(&ctx.db_conn.pool, ids)
            .await
            .map_err(|_| Error::UnexpectedError)?
    };

    let priced = price(&contents, &menu_items);
    Ok((cart, priced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::menu::repository::fixtures::menu_item;
    use std::str::FromStr;

    fn empty() -> Contents {
        Contents {
            restaurant_id: None,
            items: vec![],
        }
    }

    fn add<'a>(menu_item_id: &'a str, restaurant_id: &'a str, quantity: i32) -> SetItem<'a> {
        SetItem {
            menu_item_id,
            restaurant_id,
            quantity,
            replace: false,
        }
    }

    #[test]
    fn first_item_binds_the_cart_to_its_restaurant() {
        let contents = set_item(empty(), add("dosa", "r1", 2)).unwrap();

        assert_eq!(contents.restaurant_id.as_deref(), Some("r1"));
        assert_eq!(contents.items.len(), 1);
        assert_eq!(contents.items[0].quantity, 2);
    }

    #[test]
    fn setting_an_existing_item_overwrites_its_quantity() {
        let contents = set_item(empty(), add("dosa", "r1", 2)).unwrap();
        let contents = set_item(contents, add("dosa", "r1", 5)).unwrap();

        assert_eq!(contents.items.len(), 1);
        assert_eq!(contents.items[0].quantity, 5);
    }

    #[test]
    fn items_from_another_restaurant_are_refused() {
        let contents = set_item(empty(), add("dosa", "r1", 1)).unwrap();

        assert_eq!(
            set_item(contents, add("pizza", "r2", 1)),
            Err(Error::DifferentRestaurant)
        );
    }

    #[test]
    fn replace_starts_a_new_cart_for_the_other_restaurant() {
        let contents = set_item(empty(), add("dosa", "r1", 1)).unwrap();
        let contents = set_item(contents, add("idli", "r1", 3)).unwrap();

        let contents = set_item(
            contents,
            SetItem {
                replace: true,
                ..add("pizza", "r2", 1)
            },
        )
        .unwrap();

        assert_eq!(contents.restaurant_id.as_deref(), Some("r2"));
        assert_eq!(
            contents.items,
            vec![CartItem {
                menu_item_id: String::from("pizza"),
                quantity: 1
            }]
        );
    }

    #[test]
    fn removing_the_last_item_unbinds_the_restaurant() {
        let contents = set_item(empty(), add("dosa", "r1", 1)).unwrap();
        let contents = set_item(contents, add("dosa", "r1", 0)).unwrap();

        assert_eq!(contents, empty());

        // Any restaurant is allowed again.
        assert!(set_item(contents, add("pizza", "r2", 1)).is_ok());
    }

    #[test]
    fn quantity_is_bounded() {
        assert_eq!(
            set_item(empty(), add("dosa", "r1", MAX_ITEM_QUANTITY + 1)),
            Err(Error::InvalidQuantity)
        );
        assert_eq!(
            set_item(empty(), add("dosa", "r1", -1)),
            Err(Error::InvalidQuantity)
        );
        assert!(set_item(empty(), add("dosa", "r1", MAX_ITEM_QUANTITY)).is_ok());
    }

    #[test]
    fn prices_lines_at_current_menu_prices() {
        let contents = set_item(empty(), add("dosa", "r1", 3)).unwrap();
        let contents = set_item(contents, add("coffee", "r1", 2)).unwrap();
        let contents = set_item(contents, add("gone", "r1", 1)).unwrap();

        let menu = vec![
            menu_item("dosa", "r1", "89.50"),
            menu_item("coffee", "r1", "40"),
        ];
        let priced = price(&contents, &menu);

        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.lines[0].line_total, BigDecimal::from_str("268.50").unwrap());
        assert_eq!(priced.sub_total, BigDecimal::from_str("348.50").unwrap());
        assert!(priced.unorderable_lines().is_empty());
    }

    #[test]
    fn flags_unavailable_and_foreign_items() {
        let contents = set_item(empty(), add("dosa", "r1", 1)).unwrap();
        let contents = set_item(contents, add("vada", "r1", 1)).unwrap();

        let mut dosa = menu_item("dosa", "r1", "80");
        dosa.is_available = false;
        let moved = menu_item("vada", "r9", "30");

        let priced = price(&contents, &[dosa, moved]);
        assert_eq!(priced.unorderable_lines().len(), 2);
    }

    #[test]
    fn deleted_items_can_still_be_removed() {
        let contents = set_item(empty(), add("dosa", "r1", 2)).unwrap();
        let contents = set_item(contents, add("vada", "r1", 1)).unwrap();

        let dosa = menu_item("dosa", "r1", "80");
        let mut vada = menu_item("vada", "r1", "30");
        vada.deleted_at = Some(chrono::Utc::now().naive_utc());
        let menu = vec![dosa, vada];

        assert_eq!(price(&contents, &menu).unorderable_lines().len(), 1);

        let contents = remove_item(contents, "vada");
        let priced = price(&contents, &menu);

        assert_eq!(contents.restaurant_id.as_deref(), Some("r1"));
        assert!(priced.unorderable_lines().is_empty());
        assert_eq!(priced.sub_total, BigDecimal::from(160));
    }

    #[test]
    fn removing_every_entry_unbinds_the_restaurant() {
        let contents = set_item(empty(), add("dosa", "r1", 1)).unwrap();

        assert_eq!(remove_item(contents.clone(), "unknown"), contents);
        assert_eq!(remove_item(contents, "dosa"), empty());
    }
}

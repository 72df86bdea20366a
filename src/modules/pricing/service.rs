//! Delivery charges, tax and order totals.
//!
//! All money is in INR and every amount leaving this module is rounded to two
//! decimal places.

use crate::{
    modules::{
        cart::{self, repository::Cart, service::PricedCart},
        coupon::{self, repository::Coupon},
        restaurant::{self, repository::Restaurant},
    },
    types::Context,
    utils::{
        geo::{self, Coordinates},
        validation::MONEY_SCALE,
    },
};
use axum::{extract::Json, http::StatusCode, response::IntoResponse};
use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

/// A row of the delivery fee table. `max_km` is inclusive.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct DeliveryTier {
    pub max_km: f64,
    pub fee: u32,
}

pub const DELIVERY_TIERS: [DeliveryTier; 5] = [
    DeliveryTier { max_km: 2.0, fee: 20 },
    DeliveryTier { max_km: 5.0, fee: 30 },
    DeliveryTier { max_km: 8.0, fee: 40 },
    DeliveryTier { max_km: 12.0, fee: 50 },
    DeliveryTier { max_km: 20.0, fee: 70 },
];

pub const FREE_DELIVERY_THRESHOLD: u32 = 500;

/// Tax percentage applied to the discounted subtotal.
pub const TAX_PERCENT: u32 = 5;

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidDistance,
    OutOfRange,
}

pub fn max_delivery_distance_km() -> f64 {
    DELIVERY_TIERS[DELIVERY_TIERS.len() - 1].max_km
}

pub fn delivery_fee_for_distance(distance_km: f64) -> Result<BigDecimal, Error> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::InvalidDistance);
    }

    DELIVERY_TIERS
        .iter()
        .find(|tier| distance_km <= tier.max_km)
        .map(|tier| BigDecimal::from(tier.fee))
        .ok_or(Error::OutOfRange)
}

/// Road distance is approximated by the great-circle distance.
pub fn distance_km(restaurant: &Restaurant, destination: Coordinates) -> f64 {
    geo::haversine_km(restaurant.coordinates(), destination)
}

pub struct QuoteInput {
    pub sub_total: BigDecimal,
    pub distance_km: f64,
    pub discount: BigDecimal,
}

#[derive(Serialize, Clone, Debug)]
pub struct Quote {
    pub sub_total: BigDecimal,
    pub discount: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
    pub distance_km: f64,
}

/// Rounds half-up to paise.
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    let (_, scale) = amount.as_bigint_and_exponent();

    // Fewer significant digits than places past the paisa: the value is below
    // a tenth of a paisa, and `round` would otherwise walk every one of them.
    if scale - amount.digits() as i64 > MONEY_SCALE {
        return BigDecimal::zero().with_scale(MONEY_SCALE);
    }

    amount.round(MONEY_SCALE)
}

pub fn quote(input: QuoteInput) -> Result<Quote, Error> {
    let distance_fee = delivery_fee_for_distance(input.distance_km)?;
    let sub_total = round_money(&input.sub_total);

    let delivery_fee = if sub_total >= BigDecimal::from(FREE_DELIVERY_THRESHOLD) {
        BigDecimal::zero()
    } else {
        distance_fee
    };

    let discount = if input.discount < BigDecimal::zero() {
        BigDecimal::zero()
    } else if input.discount > sub_total {
        sub_total.clone()
    } else {
        round_money(&input.discount)
    };

    let taxable = &sub_total - &discount;
    let tax = round_money(&(&taxable * BigDecimal::from(TAX_PERCENT) / BigDecimal::from(100)));
    let total = round_money(&(&taxable + &delivery_fee + &tax));

    Ok(Quote {
        sub_total,
        discount,
        delivery_fee: round_money(&delivery_fee),
        tax,
        total,
        distance_km: round_distance(input.distance_km),
    })
}

pub fn round_distance(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

#[derive(Debug)]
pub enum CartQuoteError {
    CartEmpty,
    RestaurantNotFound,
    RestaurantClosed,
    ItemsUnavailable(Vec<String>),
    InvalidAddress,
    OutOfRange,
    CouponNotFound,
    CouponNotApplicable(coupon::service::Error),
    UnexpectedError,
}

impl IntoResponse for CartQuoteError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            Self::CartEmpty => (StatusCode::BAD_REQUEST, String::from("Your cart is empty")),
            Self::RestaurantNotFound => {
                (StatusCode::NOT_FOUND, String::from("Restaurant not found"))
            }
            Self::RestaurantClosed => (
                StatusCode::BAD_REQUEST,
                String::from("Restaurant is not accepting orders right now"),
            ),
            Self::ItemsUnavailable(names) => (
                StatusCode::BAD_REQUEST,
                format!("Some items are no longer available: {}", names.join(", ")),
            ),
            Self::InvalidAddress => (
                StatusCode::BAD_REQUEST,
                String::from("Invalid delivery coordinates"),
            ),
            Self::OutOfRange => (
                StatusCode::BAD_REQUEST,
                String::from("Address is outside the delivery area"),
            ),
            Self::CouponNotFound => (StatusCode::NOT_FOUND, String::from("Coupon not found")),
            Self::CouponNotApplicable(err) => (StatusCode::BAD_REQUEST, err.message()),
            Self::UnexpectedError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Failed to price cart"),
            ),
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub struct CartQuote {
    pub cart: Cart,
    pub priced: PricedCart,
    pub restaurant: Restaurant,
    pub coupon: Option<Coupon>,
    pub quote: Quote,
}

/// Prices the user's cart for delivery to `destination` with an optional
/// coupon. Nothing is written.
pub async fn quote_cart(
    ctx: &Context,
    owner_id: String,
    destination: Coordinates,
    coupon_code: Option<String>,
) -> Result<CartQuote, CartQuoteError> {
    if !destination.is_valid() {
        return Err(CartQuoteError::InvalidAddress);
    }

    let (cart, priced) = cart::service::load_priced_cart(ctx, owner_id)
        .await
        .map_err(|_| CartQuoteError::UnexpectedError)?;

    let restaurant_id = match (&priced.restaurant_id, priced.is_empty()) {
        (Some(restaurant_id), false) => restaurant_id.clone(),
        _ => return Err(CartQuoteError::CartEmpty),
    };

    let unavailable = priced
        .unorderable_lines()
        .into_iter()
        .map(|line| line.menu_item.name.clone())
        .collect::<Vec<_>>();
    if !unavailable.is_empty() {
        return Err(CartQuoteError::ItemsUnavailable(unavailable));
    }

    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn.pool, restaurant_id)
        .await
        .map_err(|_| CartQuoteError::UnexpectedError)?
        .ok_or(CartQuoteError::RestaurantNotFound)?;

    if !restaurant.is_open {
        return Err(CartQuoteError::RestaurantClosed);
    }

    let (coupon, discount) = match coupon_code {
        Some(code) if !code.trim().is_empty() => {
            let coupon = coupon::repository::find_by_code(&ctx.db_conn.pool, &code)
                .await
                .map_err(|_| CartQuoteError::UnexpectedError)?
                .ok_or(CartQuoteError::CouponNotFound)?;

            let discount = coupon::service::apply(
                &coupon,
                &coupon::service::Eligibility {
                    sub_total: &priced.sub_total,
                    restaurant_id: &restaurant.id,
                    now: Utc::now().naive_utc(),
                },
            )
            .map_err(CartQuoteError::CouponNotApplicable)?;

            (Some(coupon), discount)
        }
        _ => (None, BigDecimal::zero()),
    };

    let quote = quote(QuoteInput {
        sub_total: priced.sub_total.clone(),
        distance_km: distance_km(&restaurant, destination),
        discount,
    })
    .map_err(|err| match err {
        Error::OutOfRange => CartQuoteError::OutOfRange,
        Error::InvalidDistance => CartQuoteError::InvalidAddress,
    })?;

    Ok(CartQuote {
        cart,
        priced,
        restaurant,
        coupon,
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn measures_from_the_restaurant() {
        let restaurant = crate::modules::restaurant::repository::fixtures::restaurant("r1", "u1");
        let next_door = Coordinates::new(restaurant.latitude, restaurant.longitude);
        assert_eq!(distance_km(&restaurant, next_door), 0.0);

        let across_town = Coordinates::new(12.9352, 77.6245);
        let distance = distance_km(&restaurant, across_town);
        assert!(distance > 4.0 && distance < 6.0, "got {}", distance);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(delivery_fee_for_distance(0.0), Ok(BigDecimal::from(20)));
        assert_eq!(delivery_fee_for_distance(2.0), Ok(BigDecimal::from(20)));
        assert_eq!(delivery_fee_for_distance(2.01), Ok(BigDecimal::from(30)));
        assert_eq!(delivery_fee_for_distance(5.0), Ok(BigDecimal::from(30)));
        assert_eq!(delivery_fee_for_distance(7.5), Ok(BigDecimal::from(40)));
        assert_eq!(delivery_fee_for_distance(12.0), Ok(BigDecimal::from(50)));
        assert_eq!(delivery_fee_for_distance(19.99), Ok(BigDecimal::from(70)));
        assert_eq!(delivery_fee_for_distance(20.0), Ok(BigDecimal::from(70)));
    }

    #[test]
    fn beyond_the_last_tier_is_not_deliverable() {
        assert_eq!(delivery_fee_for_distance(20.01), Err(Error::OutOfRange));
        assert_eq!(max_delivery_distance_km(), 20.0);
    }

    #[test]
    fn negative_or_nan_distances_are_rejected() {
        assert_eq!(delivery_fee_for_distance(-1.0), Err(Error::InvalidDistance));
        assert_eq!(delivery_fee_for_distance(f64::NAN), Err(Error::InvalidDistance));
        assert_eq!(
            delivery_fee_for_distance(f64::INFINITY),
            Err(Error::InvalidDistance)
        );
    }

    #[test]
    fn quote_adds_delivery_fee_and_tax() {
        let quote = quote(QuoteInput {
            sub_total: money("240"),
            distance_km: 3.2,
            discount: BigDecimal::zero(),
        })
        .unwrap();

        assert_eq!(quote.delivery_fee, money("30"));
        assert_eq!(quote.tax, money("12"));
        assert_eq!(quote.total, money("282"));
        assert_eq!(quote.distance_km, 3.2);
    }

    #[test]
    fn tax_is_charged_on_the_discounted_subtotal() {
        let quote = quote(QuoteInput {
            sub_total: money("300"),
            distance_km: 1.0,
            discount: money("45.50"),
        })
        .unwrap();

        // (300 - 45.50) * 5% = 12.725 -> 12.73
        assert_eq!(quote.tax, money("12.73"));
        assert_eq!(quote.total, money("287.23"));
    }

    #[test]
    fn large_orders_get_free_delivery() {
        let quote = quote(QuoteInput {
            sub_total: money("500"),
            distance_km: 15.0,
            discount: BigDecimal::zero(),
        })
        .unwrap();

        assert_eq!(quote.delivery_fee, BigDecimal::zero());
        assert_eq!(quote.total, money("525"));
    }

    #[test]
    fn free_delivery_does_not_lift_the_distance_limit() {
        let result = quote(QuoteInput {
            sub_total: money("900"),
            distance_km: 25.0,
            discount: BigDecimal::zero(),
        });

        assert!(matches!(result, Err(Error::OutOfRange)));
    }

    #[test]
    fn discount_is_clamped_to_the_subtotal() {
        let quote = quote(QuoteInput {
            sub_total: money("80"),
            distance_km: 0.5,
            discount: money("100"),
        })
        .unwrap();

        assert_eq!(quote.discount, money("80"));
        assert_eq!(quote.tax, BigDecimal::zero());
        assert_eq!(quote.total, money("20"));
    }
}

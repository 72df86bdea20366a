//! Coupon eligibility and discount rules.

use super::repository::{Coupon, DiscountType};
use crate::modules::pricing::service::round_money;
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDateTime;

#[derive(Debug, PartialEq)]
pub enum Error {
    Inactive,
    NotYetValid,
    Expired,
    UsageLimitReached,
    NotApplicableToRestaurant,
    BelowMinimumOrderValue(BigDecimal),
}

impl Error {
    pub fn message(&self) -> String {
        match self {
            Self::Inactive => String::from("Coupon is not active"),
            Self::NotYetValid => String::from("Coupon is not valid yet"),
            Self::Expired => String::from("Coupon has expired"),
            Self::UsageLimitReached => String::from("Coupon usage limit has been reached"),
            Self::NotApplicableToRestaurant => {
                String::from("Coupon is not applicable to this restaurant")
            }
            Self::BelowMinimumOrderValue(min_order_value) => format!(
                "Minimum order value of {} is required for this coupon",
                min_order_value
            ),
        }
    }
}

pub struct Eligibility<'a> {
    pub sub_total: &'a BigDecimal,
    pub restaurant_id: &'a str,
    pub now: NaiveDateTime,
}

pub fn validate(coupon: &Coupon, eligibility: &Eligibility) -> Result<(), Error> {
    if !coupon.is_active {
        return Err(Error::Inactive);
    }

    if eligibility.now < coupon.valid_from {
        return Err(Error::NotYetValid);
    }

    if eligibility.now > coupon.valid_until {
        return Err(Error::Expired);
    }

    if let Some(usage_limit) = coupon.usage_limit {
        if coupon.used_count >= usage_limit {
            return Err(Error::UsageLimitReached);
        }
    }

    if let Some(restaurant_id) = &coupon.restaurant_id {
        if restaurant_id != eligibility.restaurant_id {
            return Err(Error::NotApplicableToRestaurant);
        }
    }

    if eligibility.sub_total < &coupon.min_order_value {
        return Err(Error::BelowMinimumOrderValue(coupon.min_order_value.clone()));
    }

    Ok(())
}

pub fn discount_for(coupon: &Coupon, sub_total: &BigDecimal) -> BigDecimal {
    let sub_total = &round_money(sub_total);
    let discount = match coupon.discount_type {
        DiscountType::Percentage => {
            let discount = sub_total * &coupon.value / BigDecimal::from(100);
            match &coupon.max_discount {
                Some(max_discount) if &discount > max_discount => max_discount.clone(),
                _ => discount,
            }
        }
        DiscountType::Fixed => coupon.value.clone(),
    };

    if discount < BigDecimal::zero() {
        BigDecimal::zero()
    } else if &discount > sub_total {
        round_money(sub_total)
    } else {
        round_money(&discount)
    }
}

/// Validates the coupon and returns the discount it is worth.
pub fn apply(coupon: &Coupon, eligibility: &Eligibility) -> Result<BigDecimal, Error> {
    validate(coupon, eligibility)?;
    Ok(discount_for(coupon, eligibility.sub_total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::coupon::repository::fixtures::coupon;
    use chrono::{Duration, Utc};
    use std::str::FromStr;

    fn money(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn eligibility<'a>(sub_total: &'a BigDecimal) -> Eligibility<'a> {
        Eligibility {
            sub_total,
            restaurant_id: "restaurant-1",
            now: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn sub_totals_below_a_paisa_round_away_quickly() {
        let sub_total: BigDecimal = serde_json::from_str("\"1e-999999999\"").unwrap();
        let tenth = coupon("TENTH", DiscountType::Percentage, "10");
        let flat = coupon("FLAT50", DiscountType::Fixed, "50");

        let (sender, receiver) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let discounts = (discount_for(&tenth, &sub_total), discount_for(&flat, &sub_total));
            let _ = sender.send(discounts);
        });

        let (percentage, fixed) = receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("discount_for should return promptly");
        assert_eq!(percentage, BigDecimal::zero());
        assert_eq!(fixed, BigDecimal::zero());
    }

    #[test]
    fn percentage_discount_is_capped() {
        let mut welcome = coupon("WELCOME50", DiscountType::Percentage, "50");
        welcome.max_discount = Some(money("100"));

        assert_eq!(discount_for(&welcome, &money("150")), money("75"));
        assert_eq!(discount_for(&welcome, &money("400")), money("100"));
    }

    #[test]
    fn fixed_discount_never_exceeds_the_subtotal() {
        let flat = coupon("FLAT150", DiscountType::Fixed, "150");

        assert_eq!(discount_for(&flat, &money("400")), money("150"));
        assert_eq!(discount_for(&flat, &money("99.50")), money("99.50"));
    }

    #[test]
    fn percentage_discount_is_rounded_to_paise() {
        let tenth = coupon("TENTH", DiscountType::Percentage, "10");
        assert_eq!(discount_for(&tenth, &money("123.45")), money("12.35"));
    }

    #[test]
    fn inactive_is_reported_before_anything_else() {
        let mut expired_and_inactive = coupon("OLD", DiscountType::Fixed, "10");
        expired_and_inactive.is_active = false;
        expired_and_inactive.valid_until = Utc::now().naive_utc() - Duration::days(1);

        let sub_total = money("100");
        assert_eq!(
            validate(&expired_and_inactive, &eligibility(&sub_total)),
            Err(Error::Inactive)
        );
    }

    #[test]
    fn checks_the_validity_window() {
        let sub_total = money("100");

        let mut upcoming = coupon("SOON", DiscountType::Fixed, "10");
        upcoming.valid_from = Utc::now().naive_utc() + Duration::hours(1);
        assert_eq!(
            validate(&upcoming, &eligibility(&sub_total)),
            Err(Error::NotYetValid)
        );

        let mut expired = coupon("GONE", DiscountType::Fixed, "10");
        expired.valid_until = Utc::now().naive_utc() - Duration::minutes(1);
        assert_eq!(
            validate(&expired, &eligibility(&sub_total)),
            Err(Error::Expired)
        );
    }

    #[test]
    fn exhausted_coupons_are_rejected() {
        let mut limited = coupon("LIMITED", DiscountType::Fixed, "10");
        limited.usage_limit = Some(3);
        limited.used_count = 3;

        let sub_total = money("100");
        assert_eq!(
            validate(&limited, &eligibility(&sub_total)),
            Err(Error::UsageLimitReached)
        );
    }

    #[test]
    fn restaurant_specific_coupons_only_apply_there() {
        let mut local = coupon("DOSA20", DiscountType::Fixed, "20");
        local.restaurant_id = Some(String::from("restaurant-2"));

        let sub_total = money("100");
        assert_eq!(
            validate(&local, &eligibility(&sub_total)),
            Err(Error::NotApplicableToRestaurant)
        );

        local.restaurant_id = Some(String::from("restaurant-1"));
        assert_eq!(validate(&local, &eligibility(&sub_total)), Ok(()));
    }

    #[test]
    fn minimum_order_value_is_enforced() {
        let mut big_spender = coupon("BIG", DiscountType::Fixed, "50");
        big_spender.min_order_value = money("300");

        let below = money("299.99");
        assert_eq!(
            validate(&big_spender, &eligibility(&below)),
            Err(Error::BelowMinimumOrderValue(money("300")))
        );

        let exact = money("300");
        assert_eq!(apply(&big_spender, &eligibility(&exact)), Ok(money("50")));
    }
}

use axum::{http::StatusCode, Json};
use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors })))
}

/// Accepts 24 hour `HH:MM` times such as `08:00` or `21:30`.
pub fn validate_time_of_day(time_str: &str) -> Result<(), ValidationError> {
    let regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time of day regex");
    match regex.is_match(time_str) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_TIME")
            .with_message(Cow::from("Time must be in 24 hour format (e.g: 08:00)"))),
    }
}

/// Coupon codes are 3 to 20 letters or digits; they are stored upper-cased.
pub fn validate_coupon_code(code: &str) -> Result<(), ValidationError> {
    let regex = Regex::new(r"^[A-Za-z0-9]{3,20}$").expect("Invalid coupon code regex");
    match regex.is_match(code.trim()) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_COUPON_CODE").with_message(Cow::from(
            "Coupon code must be 3 to 20 letters or digits",
        ))),
    }
}

/// Decimal places a stored amount may carry.
pub const MONEY_SCALE: i64 = 2;

/// Amounts are stored as `NUMERIC(10, 2)`, which leaves eight integer digits.
const MONEY_INTEGER_DIGITS: u32 = 8;

fn invalid_amount(message: &'static str) -> ValidationError {
    ValidationError::new("INVALID_AMOUNT").with_message(Cow::from(message))
}

/// Accepts non-negative amounts that fit a `NUMERIC(10, 2)` column.
///
/// The scale is checked before any arithmetic: comparing or rounding a value
/// like `1e-999999999` would otherwise rescale it to a billion digits.
pub fn validate_money(amount: &BigDecimal) -> Result<(), ValidationError> {
    let (_, scale) = amount.as_bigint_and_exponent();
    if scale > MONEY_SCALE {
        return Err(invalid_amount("Amount must have at most 2 decimal places"));
    }

    if scale < -(MONEY_INTEGER_DIGITS as i64) {
        return Err(invalid_amount("Amount is too large"));
    }

    if amount < &BigDecimal::zero() {
        return Err(invalid_amount("Amount must not be negative"));
    }

    if amount >= &BigDecimal::from(10u64.pow(MONEY_INTEGER_DIGITS)) {
        return Err(invalid_amount("Amount is too large"));
    }

    Ok(())
}

pub fn validate_positive_amount(amount: &BigDecimal) -> Result<(), ValidationError> {
    validate_money(amount)?;

    match amount > &BigDecimal::zero() {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_AMOUNT")
            .with_message(Cow::from("Amount must be greater than zero"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hour_times() {
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("08:30").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("8:30").is_err());
        assert!(validate_time_of_day("08:60").is_err());
        assert!(validate_time_of_day("0830").is_err());
    }

    #[test]
    fn coupon_codes_are_short_and_alphanumeric() {
        assert!(validate_coupon_code("WELCOME50").is_ok());
        assert!(validate_coupon_code("fb10").is_ok());
        assert!(validate_coupon_code("AB").is_err());
        assert!(validate_coupon_code("SAVE-20").is_err());
        assert!(validate_coupon_code("ABCDEFGHIJKLMNOPQRSTU").is_err());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert!(validate_positive_amount(&BigDecimal::from(1)).is_ok());
        assert!(validate_positive_amount(&BigDecimal::from(0)).is_err());
        assert!(validate_positive_amount(&BigDecimal::from(-5)).is_err());
    }

    fn money(s: &str) -> BigDecimal {
        serde_json::from_str(&format!("\"{}\"", s)).unwrap()
    }

    #[test]
    fn money_fits_a_numeric_10_2_column() {
        assert!(validate_money(&money("0")).is_ok());
        assert!(validate_money(&money("149.50")).is_ok());
        assert!(validate_money(&money("99999999.99")).is_ok());
        assert!(validate_money(&money("1E+2")).is_ok());

        assert!(validate_money(&money("100000000")).is_err());
        assert!(validate_money(&money("12.345")).is_err());
        assert!(validate_money(&money("-0.01")).is_err());
    }

    #[test]
    fn extreme_exponents_are_rejected_without_rescaling() {
        let started = std::time::Instant::now();

        assert!(validate_money(&money("1e-999999999")).is_err());
        assert!(validate_money(&money("1e999999999")).is_err());
        assert!(validate_positive_amount(&money("-1e-999999999")).is_err());

        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}

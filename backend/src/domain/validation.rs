//! Field checks shared by entity drafts and patches.

use rust_decimal::Decimal;
use serde_json::json;

use super::Error;

/// Reject text that is empty once trimmed.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(
            Error::invalid_request(format!("{field} must not be empty"))
                .with_details(json!({ "field": field })),
        );
    }
    Ok(())
}

/// Apply [`require_text`] only when a patch sets the field.
pub(crate) fn require_optional_text(field: &'static str, value: Option<&str>) -> Result<(), Error> {
    value.map_or(Ok(()), |text| require_text(field, text))
}

/// Largest accepted unit price.
///
/// Keeps `price * u32::MAX` and the catalogue and revenue sums far inside
/// the `Decimal` range.
pub(crate) const MAX_PRICE: u64 = 1_000_000_000_000;

/// Reject negative monetary amounts and amounts above [`MAX_PRICE`].
pub(crate) fn require_price(field: &'static str, value: Decimal) -> Result<(), Error> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(
            Error::invalid_request(format!("{field} must not be negative"))
                .with_details(json!({ "field": field, "value": value.to_string() })),
        );
    }
    if value > Decimal::from(MAX_PRICE) {
        return Err(
            Error::invalid_request(format!("{field} must not exceed {MAX_PRICE}"))
                .with_details(json!({ "field": field, "value": value.to_string() })),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_text_is_rejected(#[case] value: &str) {
        let err = require_text("name", value).expect_err("blank text");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "name" })));
    }

    #[rstest]
    fn unset_optional_text_passes() {
        assert!(require_optional_text("sku", None).is_ok());
        assert!(require_optional_text("sku", Some(" ")).is_err());
    }

    #[rstest]
    #[case(Decimal::ZERO, true)]
    #[case(Decimal::new(-0, 2), true)]
    #[case(Decimal::new(1999, 2), true)]
    #[case(Decimal::new(-1, 2), false)]
    #[case(Decimal::from(MAX_PRICE), true)]
    #[case(Decimal::from(MAX_PRICE) + Decimal::new(1, 2), false)]
    #[case(Decimal::MAX, false)]
    fn prices_outside_range_are_rejected(#[case] value: Decimal, #[case] ok: bool) {
        assert_eq!(require_price("price", value).is_ok(), ok);
    }

    #[rstest]
    fn largest_price_times_any_quantity_fits() {
        let product = Decimal::from(MAX_PRICE).checked_mul(Decimal::from(u32::MAX));
        assert!(product.is_some());
    }
}

//! Commission calculator: (role, GMV, product, vertical?, tier?) → quote.
//!
//! Pure and synchronous; safe to call from any handler without coordination.

use crate::domain::{CommissionDetails, Decimal, PartnerRole, Product, Vertical};
use crate::engine::rates::{base_rate, service_partner_incentive, RateSchedule};
use thiserror::Error;

/// Calculation note attached to every service-partner quote.
pub const SERVICE_CALCULATION_NOTE: &str = "Fixed incentive per integration";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("monthly GMV must be non-negative")]
    NegativeGmv,
}

/// Inputs to a commission calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub role: PartnerRole,
    pub monthly_gmv: Decimal,
    pub product: Product,
    pub vertical: Option<Vertical>,
    pub tier: Option<String>,
}

/// A computed commission amount with its rate breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub amount: Decimal,
    pub details: CommissionDetails,
}

/// Compute a commission quote.
///
/// Service partners earn the fixed incentive regardless of the other
/// inputs. Rate-based roles use their schedule's tables:
/// `effective_rate = base_rate * product_multiplier + tier_bonus +
/// vertical_bonus`, `amount = monthly_gmv * effective_rate`. No cap and no
/// rounding; precision is preserved end to end.
///
/// # Errors
/// Returns `QuoteError::NegativeGmv` when the GMV is below zero.
pub fn quote(request: &QuoteRequest) -> Result<Quote, QuoteError> {
    if request.monthly_gmv.is_negative() {
        return Err(QuoteError::NegativeGmv);
    }

    if request.role == PartnerRole::ServicePartner {
        let amount = service_partner_incentive();
        return Ok(Quote {
            amount,
            details: CommissionDetails {
                base_rate: Decimal::zero(),
                product_multiplier: Decimal::from_i64(1),
                tier_bonus: Decimal::zero(),
                vertical_bonus: Decimal::zero(),
                effective_rate: Decimal::zero(),
                tier: request.tier.clone(),
                calculation: SERVICE_CALCULATION_NOTE.to_string(),
            },
        });
    }

    let schedule = RateSchedule::for_role(request.role);
    let base = base_rate(request.role);
    let multiplier = schedule.product_multiplier(request.product);
    let tier_bonus = schedule.tier_bonus(request.tier.as_deref());
    let vertical_bonus = schedule.vertical_bonus(request.vertical);

    let effective_rate = base * multiplier + tier_bonus + vertical_bonus;
    let amount = request.monthly_gmv * effective_rate;

    let calculation = format!(
        "{} base x {} product + {} tier + {} vertical = {} effective on monthly GMV",
        base.to_canonical_string(),
        multiplier.to_canonical_string(),
        tier_bonus.to_canonical_string(),
        vertical_bonus.to_canonical_string(),
        effective_rate.to_canonical_string(),
    );

    Ok(Quote {
        amount,
        details: CommissionDetails {
            base_rate: base,
            product_multiplier: multiplier,
            tier_bonus,
            vertical_bonus,
            effective_rate,
            tier: request.tier.clone(),
            calculation,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmv(value: i64) -> Decimal {
        Decimal::from_i64(value)
    }

    fn request(role: PartnerRole, monthly_gmv: Decimal, product: Product) -> QuoteRequest {
        QuoteRequest {
            role,
            monthly_gmv,
            product,
            vertical: None,
            tier: None,
        }
    }

    #[test]
    fn test_referral_checkout_end_to_end() {
        // 500,000 x (0.03 x 1.2) = 18,000
        let quote = quote(&request(
            PartnerRole::ReferralPartner,
            gmv(500_000),
            Product::Checkout,
        ))
        .unwrap();
        assert_eq!(quote.amount.to_canonical_string(), "18000");
        assert_eq!(quote.details.effective_rate.to_canonical_string(), "0.036");
    }

    #[test]
    fn test_service_partner_is_flat_ten_thousand() {
        for monthly_gmv in [gmv(0), gmv(500_000), gmv(90_000_000)] {
            for product in [Product::Checkout, Product::Rto, Product::Engage, Product::All] {
                let quote =
                    quote(&request(PartnerRole::ServicePartner, monthly_gmv, product)).unwrap();
                assert_eq!(quote.amount, gmv(10_000));
                assert_eq!(quote.details.calculation, SERVICE_CALCULATION_NOTE);
            }
        }
    }

    #[test]
    fn test_reseller_all_products_bundle() {
        // 100,000 x (0.05 x 1.3) = 6,500
        let quote = quote(&request(
            PartnerRole::ResellerPartner,
            gmv(100_000),
            Product::All,
        ))
        .unwrap();
        assert_eq!(quote.amount.to_canonical_string(), "6500");
    }

    #[test]
    fn test_reseller_bonuses_are_additive_after_multiplier() {
        // 0.05 x 1.05 + 0.02 tier + 0.01 vertical = 0.0825
        let mut req = request(PartnerRole::ResellerPartner, gmv(200_000), Product::Engage);
        req.tier = Some("elite".to_string());
        req.vertical = Some(Vertical::Electronics);
        let quote = quote(&req).unwrap();
        assert_eq!(quote.details.effective_rate.to_canonical_string(), "0.0825");
        assert_eq!(quote.amount.to_canonical_string(), "16500");
    }

    #[test]
    fn test_referral_tier_bonus() {
        // 0.03 x 1.1 + 0.02 = 0.053
        let mut req = request(PartnerRole::ReferralPartner, gmv(100_000), Product::Rto);
        req.tier = Some("platinum".to_string());
        let quote = quote(&req).unwrap();
        assert_eq!(quote.details.effective_rate.to_canonical_string(), "0.053");
        assert_eq!(quote.amount.to_canonical_string(), "5300");
    }

    #[test]
    fn test_vertical_bonus_ignored_for_referral_role() {
        let mut req = request(PartnerRole::ReferralPartner, gmv(100_000), Product::Checkout);
        req.vertical = Some(Vertical::Fashion);
        let quote = quote(&req).unwrap();
        assert!(quote.details.vertical_bonus.is_zero());
        assert_eq!(quote.amount.to_canonical_string(), "3600");
    }

    #[test]
    fn test_amount_monotone_in_gmv() {
        let mut last = Decimal::zero();
        for value in [0, 1, 1_000, 250_000, 500_000, 10_000_000] {
            let quote = quote(&request(
                PartnerRole::ResellerPartner,
                gmv(value),
                Product::Checkout,
            ))
            .unwrap();
            assert!(quote.amount >= last, "amount decreased at GMV {}", value);
            last = quote.amount;
        }
    }

    #[test]
    fn test_zero_gmv_yields_zero_amount() {
        let quote = quote(&request(
            PartnerRole::ReferralPartner,
            gmv(0),
            Product::Checkout,
        ))
        .unwrap();
        assert!(quote.amount.is_zero());
    }

    #[test]
    fn test_negative_gmv_rejected() {
        let result = quote(&request(
            PartnerRole::ReferralPartner,
            Decimal::from_i64(-1),
            Product::Checkout,
        ));
        assert_eq!(result.unwrap_err(), QuoteError::NegativeGmv);
    }
}

//! Forecast engine: stage-probability-weighted commission projection.

use crate::domain::{Decimal, PartnerRole, Referral};
use crate::engine::rates::{
    base_rate, forecast_multiplier, service_partner_incentive, stage_probability,
};
use serde::Serialize;

/// Projected commission over the next month, quarter, and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_month: Decimal,
    pub next_quarter: Decimal,
    pub annual: Decimal,
}

/// Project commission for one partner's referral pipeline.
///
/// Each referral contributes independently (forecasts are additive across
/// referrals). The rate-based branch scales the monthly potential by 3 and
/// 12 for the quarter and year; the service-partner branch adds the same
/// undiscounted per-integration potential to all three buckets. The latter
/// asymmetry mirrors the long-standing production behavior and is kept as
/// is.
pub fn project(referrals: &[Referral], role: PartnerRole) -> Forecast {
    let mut forecast = Forecast::default();

    for referral in referrals {
        let probability = stage_probability(referral.stage);

        if role == PartnerRole::ServicePartner {
            let potential = service_partner_incentive() * probability;
            forecast.next_month = forecast.next_month + potential;
            forecast.next_quarter = forecast.next_quarter + potential;
            forecast.annual = forecast.annual + potential;
            continue;
        }

        let potential = referral.monthly_gmv
            * base_rate(role)
            * forecast_multiplier(referral.product)
            * probability;
        forecast.next_month = forecast.next_month + potential;
        forecast.next_quarter = forecast.next_quarter + potential * Decimal::from_i64(3);
        forecast.annual = forecast.annual + potential * Decimal::from_i64(12);
    }

    forecast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PartnerId, Platform, Product, Referral, Stage, TimeMs, Vertical};

    fn referral(gmv: i64, product: Product, stage: Stage) -> Referral {
        let mut referral = Referral::new(
            PartnerId::new("p1".to_string()),
            "Brand".to_string(),
            "Contact".to_string(),
            "contact@brand.test".to_string(),
            Decimal::from_i64(gmv),
            Vertical::Other,
            Platform::Shopify,
            product,
            TimeMs::new(0),
        );
        referral.stage = stage;
        referral
    }

    #[test]
    fn test_go_live_contributes_undiscounted_potential() {
        // 100,000 x 0.03 x 1.2 x 1.0 = 3,600
        let referrals = vec![referral(100_000, Product::Checkout, Stage::GoLive)];
        let forecast = project(&referrals, PartnerRole::ReferralPartner);
        assert_eq!(forecast.next_month.to_canonical_string(), "3600");
        assert_eq!(forecast.next_quarter.to_canonical_string(), "10800");
        assert_eq!(forecast.annual.to_canonical_string(), "43200");
    }

    #[test]
    fn test_prospecting_contributes_ten_percent() {
        let pipeline = vec![referral(100_000, Product::Checkout, Stage::Prospecting)];
        let live = vec![referral(100_000, Product::Checkout, Stage::GoLive)];
        let early = project(&pipeline, PartnerRole::ReferralPartner);
        let closed = project(&live, PartnerRole::ReferralPartner);
        assert_eq!(
            early.next_month,
            closed.next_month * Decimal::from_str_canonical("0.1").unwrap()
        );
    }

    #[test]
    fn test_additive_across_referrals() {
        let a = referral(100_000, Product::Checkout, Stage::Pitch);
        let b = referral(250_000, Product::Rto, Stage::Signed);

        let combined = project(&[a.clone(), b.clone()], PartnerRole::ResellerPartner);
        let only_a = project(&[a], PartnerRole::ResellerPartner);
        let only_b = project(&[b], PartnerRole::ResellerPartner);

        assert_eq!(combined.next_month, only_a.next_month + only_b.next_month);
        assert_eq!(
            combined.next_quarter,
            only_a.next_quarter + only_b.next_quarter
        );
        assert_eq!(combined.annual, only_a.annual + only_b.annual);
    }

    #[test]
    fn test_service_partner_buckets_are_not_scaled() {
        // 10,000 x 0.9 lands in every bucket without the x3/x12 scaling.
        let referrals = vec![referral(999_999, Product::All, Stage::Signed)];
        let forecast = project(&referrals, PartnerRole::ServicePartner);
        assert_eq!(forecast.next_month.to_canonical_string(), "9000");
        assert_eq!(forecast.next_quarter.to_canonical_string(), "9000");
        assert_eq!(forecast.annual.to_canonical_string(), "9000");
    }

    #[test]
    fn test_forecast_ignores_calculator_only_multipliers() {
        // engage carries no boost in the forecast rule even for resellers.
        let referrals = vec![referral(100_000, Product::Engage, Stage::GoLive)];
        let forecast = project(&referrals, PartnerRole::ResellerPartner);
        assert_eq!(forecast.next_month.to_canonical_string(), "5000");
    }

    #[test]
    fn test_empty_pipeline_forecasts_zero() {
        let forecast = project(&[], PartnerRole::ReferralPartner);
        assert!(forecast.next_month.is_zero());
        assert!(forecast.next_quarter.is_zero());
        assert!(forecast.annual.is_zero());
    }
}

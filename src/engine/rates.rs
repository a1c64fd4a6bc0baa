//! Static rate tables: base rates, product multipliers, bonuses, and
//! stage close probabilities. Pure data, no behavior beyond lookups.
//!
//! The referral and reseller call sites historically carried slightly
//! different multiplier and tier tables. They are kept as two named
//! schedules on purpose; do not unify them without product confirmation.

use crate::domain::{Decimal, PartnerRole, Product, Stage, Vertical};

/// Fixed incentive paid to service partners per integration, regardless of
/// GMV or product.
pub fn service_partner_incentive() -> Decimal {
    Decimal::from_i64(10_000)
}

fn rate(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).expect("rate literal is a valid decimal")
}

/// Base commission rate per role.
///
/// Service partners have no rate-based commission; callers branch to the
/// fixed incentive before consulting this table.
pub fn base_rate(role: PartnerRole) -> Decimal {
    match role {
        PartnerRole::ReferralPartner => rate("0.03"),
        PartnerRole::ResellerPartner => rate("0.05"),
        PartnerRole::ServicePartner => Decimal::zero(),
    }
}

/// Which multiplier/bonus table a calculation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSchedule {
    /// Referral-partner table: checkout 1.2, rto 1.1, everything else 1.0;
    /// gold/platinum tier bonuses; no vertical bonus.
    Referral,
    /// Reseller-partner table: checkout 1.2, rto 1.1, engage 1.05, all 1.3;
    /// premium/elite tier bonuses; fashion/beauty/electronics vertical bonus.
    Reseller,
}

impl RateSchedule {
    /// Pick the schedule for a rate-based role.
    pub fn for_role(role: PartnerRole) -> RateSchedule {
        match role {
            PartnerRole::ResellerPartner => RateSchedule::Reseller,
            _ => RateSchedule::Referral,
        }
    }

    /// Product multiplier applied to the base rate.
    pub fn product_multiplier(&self, product: Product) -> Decimal {
        match (self, product) {
            (_, Product::Checkout) => rate("1.2"),
            (_, Product::Rto) => rate("1.1"),
            (RateSchedule::Reseller, Product::Engage) => rate("1.05"),
            (RateSchedule::Reseller, Product::All) => rate("1.3"),
            _ => Decimal::from_i64(1),
        }
    }

    /// Additive tier bonus. Unknown or absent tiers contribute nothing.
    pub fn tier_bonus(&self, tier: Option<&str>) -> Decimal {
        match (self, tier) {
            (RateSchedule::Referral, Some("gold")) => rate("0.01"),
            (RateSchedule::Referral, Some("platinum")) => rate("0.02"),
            (RateSchedule::Reseller, Some("premium")) => rate("0.01"),
            (RateSchedule::Reseller, Some("elite")) => rate("0.02"),
            _ => Decimal::zero(),
        }
    }

    /// Additive vertical bonus; only the reseller table carries one.
    pub fn vertical_bonus(&self, vertical: Option<Vertical>) -> Decimal {
        match (self, vertical) {
            (RateSchedule::Reseller, Some(Vertical::Fashion))
            | (RateSchedule::Reseller, Some(Vertical::Beauty)) => rate("0.005"),
            (RateSchedule::Reseller, Some(Vertical::Electronics)) => rate("0.01"),
            _ => Decimal::zero(),
        }
    }
}

/// Product multiplier used by the forecast projection.
///
/// Deliberately narrower than the calculator schedules: only checkout and
/// rto are boosted, everything else is 1.0.
pub fn forecast_multiplier(product: Product) -> Decimal {
    match product {
        Product::Checkout => rate("1.2"),
        Product::Rto => rate("1.1"),
        _ => Decimal::from_i64(1),
    }
}

/// Probability that a referral at the given stage eventually closes.
pub fn stage_probability(stage: Stage) -> Decimal {
    match stage {
        Stage::Prospecting => rate("0.10"),
        Stage::Pitch => rate("0.30"),
        Stage::Objection => rate("0.50"),
        Stage::BaShared => rate("0.70"),
        Stage::Signed => rate("0.90"),
        Stage::GoLive => Decimal::from_i64(1),
    }
}

//! Referral record, pipeline stage, and the append-only activity log.

use crate::domain::partner::EnumParseError;
use crate::domain::{Decimal, PartnerId, ReferralId, TimeMs};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Merchant vertical of a referred brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Fashion,
    Electronics,
    Beauty,
    Home,
    Sports,
    Other,
}

impl Vertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vertical::Fashion => "fashion",
            Vertical::Electronics => "electronics",
            Vertical::Beauty => "beauty",
            Vertical::Home => "home",
            Vertical::Sports => "sports",
            Vertical::Other => "other",
        }
    }
}

impl FromStr for Vertical {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fashion" => Ok(Vertical::Fashion),
            "electronics" => Ok(Vertical::Electronics),
            "beauty" => Ok(Vertical::Beauty),
            "home" => Ok(Vertical::Home),
            "sports" => Ok(Vertical::Sports),
            "other" => Ok(Vertical::Other),
            other => Err(EnumParseError::new("vertical", other)),
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Commerce platform the referred brand runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
    Woocommerce,
    Magento,
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shopify => "shopify",
            Platform::Woocommerce => "woocommerce",
            Platform::Magento => "magento",
            Platform::Other => "other",
        }
    }
}

impl FromStr for Platform {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shopify" => Ok(Platform::Shopify),
            "woocommerce" => Ok(Platform::Woocommerce),
            "magento" => Ok(Platform::Magento),
            "other" => Ok(Platform::Other),
            other => Err(EnumParseError::new("platform", other)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product line a referral is pitched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Checkout,
    /// Return-to-Origin logistics product.
    Rto,
    Engage,
    All,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Checkout => "checkout",
            Product::Rto => "rto",
            Product::Engage => "engage",
            Product::All => "all",
        }
    }
}

impl FromStr for Product {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkout" => Ok(Product::Checkout),
            "rto" => Ok(Product::Rto),
            "engage" => Ok(Product::Engage),
            "all" => Ok(Product::All),
            other => Err(EnumParseError::new("product", other)),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline stage labels.
///
/// Transitions are free-form: any stage may be set at any time. The labels
/// carry a nominal pipeline order but nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prospecting,
    Pitch,
    Objection,
    BaShared,
    Signed,
    GoLive,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Prospecting => "prospecting",
            Stage::Pitch => "pitch",
            Stage::Objection => "objection",
            Stage::BaShared => "ba_shared",
            Stage::Signed => "signed",
            Stage::GoLive => "go_live",
        }
    }
}

impl FromStr for Stage {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prospecting" => Ok(Stage::Prospecting),
            "pitch" => Ok(Stage::Pitch),
            "objection" => Ok(Stage::Objection),
            "ba_shared" => Ok(Stage::BaShared),
            "signed" => Ok(Stage::Signed),
            "go_live" => Ok(Stage::GoLive),
            other => Err(EnumParseError::new("stage", other)),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a referral's append-only activity log.
///
/// Entries are never deduplicated; setting the same stage twice appends two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub time_ms: TimeMs,
    pub action: String,
    pub actor: String,
}

/// A prospective brand relationship owned by one partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: ReferralId,
    pub partner_id: PartnerId,
    pub brand_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub monthly_gmv: Decimal,
    pub vertical: Vertical,
    pub platform: Platform,
    pub product: Product,
    pub stage: Stage,
    pub stage_updated_at: TimeMs,
    pub earned_commission: Decimal,
    pub pending_commission: Decimal,
    pub created_at: TimeMs,
    /// Ordered oldest-first; populated on single-record reads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity: Vec<ActivityEntry>,
}

impl Referral {
    /// Create a fresh referral with zeroed commission accumulators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        partner_id: PartnerId,
        brand_name: String,
        contact_name: String,
        contact_email: String,
        monthly_gmv: Decimal,
        vertical: Vertical,
        platform: Platform,
        product: Product,
        created_at: TimeMs,
    ) -> Self {
        Referral {
            id: ReferralId::generate(),
            partner_id,
            brand_name,
            contact_name,
            contact_email,
            monthly_gmv,
            vertical,
            platform,
            product,
            stage: Stage::Prospecting,
            stage_updated_at: created_at,
            earned_commission: Decimal::zero(),
            pending_commission: Decimal::zero(),
            created_at,
            activity: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Stage::BaShared).unwrap(),
            "\"ba_shared\""
        );
        assert_eq!(
            serde_json::to_string(&Stage::GoLive).unwrap(),
            "\"go_live\""
        );
    }

    #[test]
    fn test_stage_db_roundtrip() {
        for stage in [
            Stage::Prospecting,
            Stage::Pitch,
            Stage::Objection,
            Stage::BaShared,
            Stage::Signed,
            Stage::GoLive,
        ] {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_new_referral_starts_at_prospecting() {
        let referral = Referral::new(
            PartnerId::new("p1".to_string()),
            "Acme Apparel".to_string(),
            "Dana".to_string(),
            "dana@acme.test".to_string(),
            Decimal::from_i64(250_000),
            Vertical::Fashion,
            Platform::Shopify,
            Product::Checkout,
            TimeMs::new(1_000),
        );
        assert_eq!(referral.stage, Stage::Prospecting);
        assert_eq!(referral.stage_updated_at, TimeMs::new(1_000));
        assert!(referral.earned_commission.is_zero());
        assert!(referral.pending_commission.is_zero());
        assert!(referral.activity.is_empty());
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        assert!("groceries".parse::<Vertical>().is_err());
        assert!("bigcommerce".parse::<Platform>().is_err());
        assert!("payments".parse::<Product>().is_err());
        assert!("closed_won".parse::<Stage>().is_err());
    }
}

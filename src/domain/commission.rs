//! Commission record and its monotonic payment status.

use crate::domain::partner::EnumParseError;
use crate::domain::{CommissionId, Decimal, PartnerId, ReferralId, TimeMs};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment status. Moves pending → processing → paid, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Processing,
    Paid,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Pending => "pending",
            CommissionStatus::Processing => "processing",
            CommissionStatus::Paid => "paid",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CommissionStatus::Pending => 0,
            CommissionStatus::Processing => 1,
            CommissionStatus::Paid => 2,
        }
    }

    /// Whether moving from `self` to `next` respects the monotonic order.
    /// Re-asserting the current status is allowed and is a no-op upstream.
    pub fn can_advance_to(&self, next: CommissionStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl FromStr for CommissionStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommissionStatus::Pending),
            "processing" => Ok(CommissionStatus::Processing),
            "paid" => Ok(CommissionStatus::Paid),
            other => Err(EnumParseError::new("commission status", other)),
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rate inputs captured when the amount was computed, for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionDetails {
    pub base_rate: Decimal,
    pub product_multiplier: Decimal,
    pub tier_bonus: Decimal,
    pub vertical_bonus: Decimal,
    pub effective_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub calculation: String,
}

/// A financial record tied to one referral.
///
/// The amount is computed once at creation from the rate table and never
/// recomputed; later rate changes do not touch existing commissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub id: CommissionId,
    pub referral_id: ReferralId,
    pub partner_id: PartnerId,
    pub amount: Decimal,
    pub status: CommissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<TimeMs>,
    pub details: CommissionDetails,
    pub created_at: TimeMs,
}

impl Commission {
    /// Create a pending commission for a referral.
    pub fn new(
        referral_id: ReferralId,
        partner_id: PartnerId,
        amount: Decimal,
        details: CommissionDetails,
        created_at: TimeMs,
    ) -> Self {
        Commission {
            id: CommissionId::generate(),
            referral_id,
            partner_id,
            amount,
            status: CommissionStatus::Pending,
            paid_at: None,
            details,
            created_at,
        }
    }
}

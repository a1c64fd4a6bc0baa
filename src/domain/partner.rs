//! Partner account type and role enum.

use crate::domain::PartnerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three partner program roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartnerRole {
    /// Refers brands and earns a percentage of their GMV.
    ReferralPartner,
    /// Resells the product suite at a higher base rate.
    ResellerPartner,
    /// Performs integrations for a fixed incentive per integration.
    ServicePartner,
}

impl PartnerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerRole::ReferralPartner => "referralPartner",
            PartnerRole::ResellerPartner => "resellerPartner",
            PartnerRole::ServicePartner => "servicePartner",
        }
    }
}

impl fmt::Display for PartnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unrecognized enum spelling coming from the wire or the DB.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl EnumParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        EnumParseError {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for PartnerRole {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "referralPartner" => Ok(PartnerRole::ReferralPartner),
            "resellerPartner" => Ok(PartnerRole::ResellerPartner),
            "servicePartner" => Ok(PartnerRole::ServicePartner),
            other => Err(EnumParseError::new("partner role", other)),
        }
    }
}

/// A role-bound partner account. Owns referrals and commissions by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub email: String,
    pub role: PartnerRole,
    pub agency: String,
    pub contact: String,
    pub profile_complete: bool,
}

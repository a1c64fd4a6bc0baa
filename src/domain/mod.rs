//! Domain types for the partner portal.
//!
//! This module provides:
//! - Exact money/rate handling via the Decimal wrapper
//! - Primitives: TimeMs, PartnerId, ReferralId, CommissionId
//! - Partner, Referral, and Commission entities with canonical JSON spellings

pub mod commission;
pub mod decimal;
pub mod partner;
pub mod primitives;
pub mod referral;

pub use commission::{Commission, CommissionDetails, CommissionStatus};
pub use decimal::Decimal;
pub use partner::{EnumParseError, Partner, PartnerRole};
pub use primitives::{CommissionId, PartnerId, ReferralId, TimeMs, DAY_MS};
pub use referral::{ActivityEntry, Platform, Product, Referral, Stage, Vertical};

//! Nudge generator: time-since-last-update advisories over a pipeline.
//!
//! Nudges are recomputed on every request and never persisted.

use crate::domain::{Referral, ReferralId, Stage, TimeMs};
use serde::Serialize;

/// Urgency of a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgePriority {
    High,
    Medium,
    Low,
}

/// An advisory reminder about a stalled referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    /// Deterministic per (referral, rule) so repeated reads match.
    pub id: String,
    pub referral_id: ReferralId,
    pub message: String,
    pub priority: NudgePriority,
    pub suggested_action: String,
}

/// Generate nudges for a partner's referrals at the given time.
///
/// Rules are evaluated independently, so one referral can emit several
/// nudges. Thresholds are inclusive and count whole elapsed days.
pub fn generate(referrals: &[Referral], now: TimeMs) -> Vec<Nudge> {
    let mut nudges = Vec::new();

    for referral in referrals {
        let days = now.whole_days_since(referral.stage_updated_at);

        if referral.stage == Stage::Pitch && days >= 3 {
            nudges.push(Nudge {
                id: format!("{}-schedule-demo", referral.id),
                referral_id: referral.id.clone(),
                message: format!(
                    "{} has been in pitch for {} days. A demo keeps the momentum going.",
                    referral.brand_name, days
                ),
                priority: NudgePriority::High,
                suggested_action: "Schedule Demo".to_string(),
            });
        }

        if referral.stage == Stage::BaShared && days >= 5 {
            nudges.push(Nudge {
                id: format!("{}-send-reminder", referral.id),
                referral_id: referral.id.clone(),
                message: format!(
                    "{} received the business agreement {} days ago and has not signed.",
                    referral.brand_name, days
                ),
                priority: NudgePriority::Medium,
                suggested_action: "Send Reminder".to_string(),
            });
        }

        if days >= 7 {
            nudges.push(Nudge {
                id: format!("{}-check-status", referral.id),
                referral_id: referral.id.clone(),
                message: format!(
                    "No movement on {} for {} days.",
                    referral.brand_name, days
                ),
                priority: NudgePriority::Low,
                suggested_action: "Check Status".to_string(),
            });
        }
    }

    nudges
}

//! Startup seed loading.
//!
//! A seed file is a JSON document with mock partners, referrals, and
//! commissions, applied once after the schema is in place. Missing file
//! sections are fine; seeding an already-populated database will fail on
//! duplicate ids rather than silently merging.

use crate::db::Repository;
use crate::domain::{Commission, Partner, Referral};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to write seed records: {0}")]
    Store(#[from] sqlx::Error),
}

/// Contents of a seed file. Referrals may carry inline activity entries.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub referrals: Vec<Referral>,
    #[serde(default)]
    pub commissions: Vec<Commission>,
}

/// Parse a seed file from disk.
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_seed(path: &Path) -> Result<SeedData, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&raw)?;
    Ok(data)
}

/// Insert seed records through the repository.
///
/// # Errors
/// Returns an error on the first failed insert; earlier inserts stay
/// (single-record atomicity only, like every other store operation).
pub async fn apply_seed(repo: &Repository, data: &SeedData) -> Result<(), SeedError> {
    for partner in &data.partners {
        repo.insert_partner(partner).await?;
    }
    for referral in &data.referrals {
        repo.insert_referral(referral).await?;
        for entry in &referral.activity {
            repo.append_activity(&referral.id, entry).await?;
        }
    }
    for commission in &data.commissions {
        repo.insert_commission(commission).await?;
    }

    info!(
        partners = data.partners.len(),
        referrals = data.referrals.len(),
        commissions = data.commissions.len(),
        "Seed data applied"
    );
    Ok(())
}

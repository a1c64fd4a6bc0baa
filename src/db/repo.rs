//! Repository layer for database operations.
//!
//! Handlers compose these single-record operations; there is no cross-record
//! transaction. Concurrent stage updates are last-write-wins.

use crate::domain::{
    ActivityEntry, Commission, CommissionDetails, CommissionId, CommissionStatus, Decimal,
    Partner, PartnerId, PartnerRole, Platform, Product, Referral, ReferralId, Stage, TimeMs,
    Vertical,
};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Insert a partner account.
    ///
    /// # Errors
    /// Returns an error if the insert fails (including duplicate id).
    pub async fn insert_partner(&self, partner: &Partner) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO partners (id, name, email, role, agency, contact, profile_complete, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(partner.id.as_str())
        .bind(&partner.name)
        .bind(&partner.email)
        .bind(partner.role.as_str())
        .bind(&partner.agency)
        .bind(&partner.contact)
        .bind(partner.profile_complete)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a partner by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_partner(&self, id: &PartnerId) -> Result<Option<Partner>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, name, email, role, agency, contact, profile_complete FROM partners WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            let role_str: String = r.get("role");
            Partner {
                id: PartnerId::new(r.get("id")),
                name: r.get("name"),
                email: r.get("email"),
                role: PartnerRole::from_str(&role_str).unwrap_or(PartnerRole::ReferralPartner),
                agency: r.get("agency"),
                contact: r.get("contact"),
                profile_complete: r.get("profile_complete"),
            }
        }))
    }

    /// Insert a referral record. The activity log is stored separately via
    /// [`Repository::append_activity`].
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_referral(&self, referral: &Referral) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO referrals (
                id, partner_id, brand_name, contact_name, contact_email,
                monthly_gmv, vertical, platform, product, stage,
                stage_updated_at, earned_commission, pending_commission, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(referral.id.as_str())
        .bind(referral.partner_id.as_str())
        .bind(&referral.brand_name)
        .bind(&referral.contact_name)
        .bind(&referral.contact_email)
        .bind(referral.monthly_gmv.to_canonical_string())
        .bind(referral.vertical.as_str())
        .bind(referral.platform.as_str())
        .bind(referral.product.as_str())
        .bind(referral.stage.as_str())
        .bind(referral.stage_updated_at.as_ms())
        .bind(referral.earned_commission.to_canonical_string())
        .bind(referral.pending_commission.to_canonical_string())
        .bind(referral.created_at.as_ms())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a partner's referrals, newest first, without activity logs.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_referrals_by_partner(
        &self,
        partner_id: &PartnerId,
    ) -> Result<Vec<Referral>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, partner_id, brand_name, contact_name, contact_email,
                   monthly_gmv, vertical, platform, product, stage,
                   stage_updated_at, earned_commission, pending_commission, created_at
            FROM referrals
            WHERE partner_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(partner_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(referral_from_row).collect())
    }

    /// Get a referral by id, including its full activity log.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_referral(&self, id: &ReferralId) -> Result<Option<Referral>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, partner_id, brand_name, contact_name, contact_email,
                   monthly_gmv, vertical, platform, product, stage,
                   stage_updated_at, earned_commission, pending_commission, created_at
            FROM referrals
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut referral = referral_from_row(&row);
        referral.activity = self.list_activity(id).await?;
        Ok(Some(referral))
    }

    /// Set a referral's stage and refresh its stage timestamp.
    ///
    /// Transitions are free-form; the caller appends the matching activity
    /// entry. Returns false when the referral does not exist.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_referral_stage(
        &self,
        id: &ReferralId,
        stage: Stage,
        at: TimeMs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE referrals SET stage = ?, stage_updated_at = ? WHERE id = ?",
        )
        .bind(stage.as_str())
        .bind(at.as_ms())
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append one entry to a referral's activity log. Entries are never
    /// deduplicated.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn append_activity(
        &self,
        referral_id: &ReferralId,
        entry: &ActivityEntry,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO referral_activity (referral_id, time_ms, action, actor) VALUES (?, ?, ?, ?)",
        )
        .bind(referral_id.as_str())
        .bind(entry.time_ms.as_ms())
        .bind(&entry.action)
        .bind(&entry.actor)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a referral's activity log, oldest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_activity(
        &self,
        referral_id: &ReferralId,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT time_ms, action, actor FROM referral_activity WHERE referral_id = ? ORDER BY seq ASC",
        )
        .bind(referral_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| ActivityEntry {
                time_ms: TimeMs::new(r.get("time_ms")),
                action: r.get("action"),
                actor: r.get("actor"),
            })
            .collect())
    }

    /// Add an amount to a referral's pending-commission accumulator.
    ///
    /// # Errors
    /// Returns an error if the referral is missing or the write fails.
    pub async fn add_pending_commission(
        &self,
        referral_id: &ReferralId,
        amount: Decimal,
    ) -> Result<(), sqlx::Error> {
        let row = sqlx::query("SELECT pending_commission FROM referrals WHERE id = ?")
            .bind(referral_id.as_str())
            .fetch_one(&self.pool)
            .await?;
        let pending_str: String = row.get("pending_commission");
        let pending = Decimal::from_str(&pending_str).unwrap_or_default() + amount;

        sqlx::query("UPDATE referrals SET pending_commission = ? WHERE id = ?")
            .bind(pending.to_canonical_string())
            .bind(referral_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Move an amount from a referral's pending accumulator to earned,
    /// when its commission is paid out.
    ///
    /// # Errors
    /// Returns an error if the referral is missing or the write fails.
    pub async fn settle_commission_amount(
        &self,
        referral_id: &ReferralId,
        amount: Decimal,
    ) -> Result<(), sqlx::Error> {
        let row = sqlx::query(
            "SELECT earned_commission, pending_commission FROM referrals WHERE id = ?",
        )
        .bind(referral_id.as_str())
        .fetch_one(&self.pool)
        .await?;
        let earned_str: String = row.get("earned_commission");
        let pending_str: String = row.get("pending_commission");
        let earned = Decimal::from_str(&earned_str).unwrap_or_default() + amount;
        let pending = Decimal::from_str(&pending_str).unwrap_or_default() - amount;

        sqlx::query(
            "UPDATE referrals SET earned_commission = ?, pending_commission = ? WHERE id = ?",
        )
        .bind(earned.to_canonical_string())
        .bind(pending.to_canonical_string())
        .bind(referral_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a commission record.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_commission(&self, commission: &Commission) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO commissions (
                id, referral_id, partner_id, amount, status, paid_at,
                base_rate, product_multiplier, tier_bonus, vertical_bonus,
                effective_rate, tier, calculation, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(commission.id.as_str())
        .bind(commission.referral_id.as_str())
        .bind(commission.partner_id.as_str())
        .bind(commission.amount.to_canonical_string())
        .bind(commission.status.as_str())
        .bind(commission.paid_at.map(|t| t.as_ms()))
        .bind(commission.details.base_rate.to_canonical_string())
        .bind(commission.details.product_multiplier.to_canonical_string())
        .bind(commission.details.tier_bonus.to_canonical_string())
        .bind(commission.details.vertical_bonus.to_canonical_string())
        .bind(commission.details.effective_rate.to_canonical_string())
        .bind(commission.details.tier.as_deref())
        .bind(&commission.details.calculation)
        .bind(commission.created_at.as_ms())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List a partner's commissions, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_commissions_by_partner(
        &self,
        partner_id: &PartnerId,
    ) -> Result<Vec<Commission>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, referral_id, partner_id, amount, status, paid_at,
                   base_rate, product_multiplier, tier_bonus, vertical_bonus,
                   effective_rate, tier, calculation, created_at
            FROM commissions
            WHERE partner_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(partner_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(commission_from_row).collect())
    }

    /// Get a commission by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_commission(
        &self,
        id: &CommissionId,
    ) -> Result<Option<Commission>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, referral_id, partner_id, amount, status, paid_at,
                   base_rate, product_multiplier, tier_bonus, vertical_bonus,
                   effective_rate, tier, calculation, created_at
            FROM commissions
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(commission_from_row))
    }

    /// Set a commission's status; monotonicity is enforced by the caller.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_commission_status(
        &self,
        id: &CommissionId,
        status: CommissionStatus,
        paid_at: Option<TimeMs>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE commissions SET status = ?, paid_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(paid_at.map(|t| t.as_ms()))
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn referral_from_row(row: &SqliteRow) -> Referral {
    let gmv_str: String = row.get("monthly_gmv");
    let earned_str: String = row.get("earned_commission");
    let pending_str: String = row.get("pending_commission");
    let vertical_str: String = row.get("vertical");
    let platform_str: String = row.get("platform");
    let product_str: String = row.get("product");
    let stage_str: String = row.get("stage");

    Referral {
        id: ReferralId::new(row.get("id")),
        partner_id: PartnerId::new(row.get("partner_id")),
        brand_name: row.get("brand_name"),
        contact_name: row.get("contact_name"),
        contact_email: row.get("contact_email"),
        monthly_gmv: Decimal::from_str(&gmv_str).unwrap_or_default(),
        vertical: Vertical::from_str(&vertical_str).unwrap_or(Vertical::Other),
        platform: Platform::from_str(&platform_str).unwrap_or(Platform::Other),
        product: Product::from_str(&product_str).unwrap_or(Product::Checkout),
        stage: Stage::from_str(&stage_str).unwrap_or(Stage::Prospecting),
        stage_updated_at: TimeMs::new(row.get("stage_updated_at")),
        earned_commission: Decimal::from_str(&earned_str).unwrap_or_default(),
        pending_commission: Decimal::from_str(&pending_str).unwrap_or_default(),
        created_at: TimeMs::new(row.get("created_at")),
        activity: Vec::new(),
    }
}

fn commission_from_row(row: &SqliteRow) -> Commission {
    let amount_str: String = row.get("amount");
    let status_str: String = row.get("status");
    let base_rate_str: String = row.get("base_rate");
    let multiplier_str: String = row.get("product_multiplier");
    let tier_bonus_str: String = row.get("tier_bonus");
    let vertical_bonus_str: String = row.get("vertical_bonus");
    let effective_rate_str: String = row.get("effective_rate");
    let paid_at: Option<i64> = row.get("paid_at");

    Commission {
        id: CommissionId::new(row.get("id")),
        referral_id: ReferralId::new(row.get("referral_id")),
        partner_id: PartnerId::new(row.get("partner_id")),
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        status: CommissionStatus::from_str(&status_str).unwrap_or(CommissionStatus::Pending),
        paid_at: paid_at.map(TimeMs::new),
        details: CommissionDetails {
            base_rate: Decimal::from_str(&base_rate_str).unwrap_or_default(),
            product_multiplier: Decimal::from_str(&multiplier_str).unwrap_or_default(),
            tier_bonus: Decimal::from_str(&tier_bonus_str).unwrap_or_default(),
            vertical_bonus: Decimal::from_str(&vertical_bonus_str).unwrap_or_default(),
            effective_rate: Decimal::from_str(&effective_rate_str).unwrap_or_default(),
            tier: row.get("tier"),
            calculation: row.get("calculation"),
        },
        created_at: TimeMs::new(row.get("created_at")),
    }
}

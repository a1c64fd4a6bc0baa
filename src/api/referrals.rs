use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{
    ActivityEntry, Commission, Decimal, Partner, PartnerId, Platform, Product, Referral,
    ReferralId, Stage, TimeMs, Vertical,
};
use crate::engine::{self, QuoteRequest};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralRequest {
    pub partner_id: String,
    pub brand_name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    pub monthly_gmv: Decimal,
    pub vertical: String,
    pub platform: String,
    pub product: String,
}

pub async fn create_referral(
    State(state): State<AppState>,
    Json(body): Json<CreateReferralRequest>,
) -> Result<(StatusCode, Json<Referral>), AppError> {
    if body.monthly_gmv.is_negative() {
        return Err(AppError::BadRequest(
            "monthly GMV must be non-negative".to_string(),
        ));
    }
    if body.brand_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "brand name must not be empty".to_string(),
        ));
    }

    let vertical = Vertical::from_str(&body.vertical)?;
    let platform = Platform::from_str(&body.platform)?;
    let product = Product::from_str(&body.product)?;

    let partner_id = PartnerId::new(body.partner_id.clone());
    let partner = state
        .repo
        .get_partner(&partner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("partner {}", body.partner_id)))?;

    let now = TimeMs::now();
    let mut referral = Referral::new(
        partner_id,
        body.brand_name,
        body.contact_name,
        body.contact_email,
        body.monthly_gmv,
        vertical,
        platform,
        product,
        now,
    );

    let entry = ActivityEntry {
        time_ms: now,
        action: "Referral created".to_string(),
        actor: partner.name.clone(),
    };
    state.repo.insert_referral(&referral).await?;
    state.repo.append_activity(&referral.id, &entry).await?;
    referral.activity.push(entry);

    tracing::info!(referral = %referral.id, partner = %referral.partner_id, "Referral created");
    Ok((StatusCode::CREATED, Json(referral)))
}

#[derive(Debug, Deserialize)]
pub struct ListReferralsQuery {
    pub partner: String,
}

pub async fn list_referrals(
    Query(params): Query<ListReferralsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Referral>>, AppError> {
    if params.partner.trim().is_empty() {
        return Err(AppError::BadRequest(
            "partner query parameter must not be empty".to_string(),
        ));
    }
    let referrals = state
        .repo
        .list_referrals_by_partner(&PartnerId::new(params.partner))
        .await?;
    Ok(Json(referrals))
}

pub async fn get_referral(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Referral>, AppError> {
    let referral = state
        .repo
        .get_referral(&ReferralId::new(id.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("referral {}", id)))?;
    Ok(Json(referral))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStageRequest {
    pub new_stage: String,
    pub updated_by: Option<String>,
}

pub async fn update_stage(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateStageRequest>,
) -> Result<Json<Referral>, AppError> {
    let new_stage = Stage::from_str(&body.new_stage)?;
    let referral_id = ReferralId::new(id.clone());

    let referral = state
        .repo
        .get_referral(&referral_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("referral {}", id)))?;
    let partner = state
        .repo
        .get_partner(&referral.partner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("partner {}", referral.partner_id)))?;

    let now = TimeMs::now();
    state
        .repo
        .update_referral_stage(&referral_id, new_stage, now)
        .await?;

    let actor = body
        .updated_by
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| partner.name.clone());
    let entry = ActivityEntry {
        time_ms: now,
        action: format!("Stage updated to {}", new_stage),
        actor,
    };
    state.repo.append_activity(&referral_id, &entry).await?;

    if new_stage == Stage::Signed {
        record_signed_commission(&state, &referral, &partner, now).await?;
    }

    let updated = state
        .repo
        .get_referral(&referral_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("referral {}", id)))?;
    tracing::info!(referral = %referral_id, stage = %new_stage, "Stage updated");
    Ok(Json(updated))
}

/// A signed referral triggers a pending commission, priced once from the
/// rate table at signing time.
async fn record_signed_commission(
    state: &AppState,
    referral: &Referral,
    partner: &Partner,
    now: TimeMs,
) -> Result<(), AppError> {
    let quote = engine::quote(&QuoteRequest {
        role: partner.role,
        monthly_gmv: referral.monthly_gmv,
        product: referral.product,
        vertical: Some(referral.vertical),
        tier: None,
    })?;

    let commission = Commission::new(
        referral.id.clone(),
        referral.partner_id.clone(),
        quote.amount,
        quote.details,
        now,
    );
    state.repo.insert_commission(&commission).await?;
    state
        .repo
        .add_pending_commission(&referral.id, commission.amount)
        .await?;

    tracing::info!(
        referral = %referral.id,
        commission = %commission.id,
        amount = %commission.amount,
        "Commission recorded at signing"
    );
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendActivityRequest {
    pub action: String,
    pub actor: Option<String>,
}

pub async fn append_activity(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<AppendActivityRequest>,
) -> Result<Json<Referral>, AppError> {
    if body.action.trim().is_empty() {
        return Err(AppError::BadRequest(
            "action must not be empty".to_string(),
        ));
    }

    let referral_id = ReferralId::new(id.clone());
    let referral = state
        .repo
        .get_referral(&referral_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("referral {}", id)))?;

    let entry = ActivityEntry {
        time_ms: TimeMs::now(),
        action: body.action,
        actor: body
            .actor
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "system".to_string()),
    };
    state.repo.append_activity(&referral.id, &entry).await?;

    let updated = state
        .repo
        .get_referral(&referral_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("referral {}", id)))?;
    Ok(Json(updated))
}

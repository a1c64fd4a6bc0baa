use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{Commission, CommissionId, CommissionStatus, PartnerId, TimeMs};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ListCommissionsQuery {
    pub partner: String,
}

pub async fn list_commissions(
    Query(params): Query<ListCommissionsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Commission>>, AppError> {
    if params.partner.trim().is_empty() {
        return Err(AppError::BadRequest(
            "partner query parameter must not be empty".to_string(),
        ));
    }
    let commissions = state
        .repo
        .list_commissions_by_partner(&PartnerId::new(params.partner))
        .await?;
    Ok(Json(commissions))
}

pub async fn get_commission(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Commission>, AppError> {
    let commission = state
        .repo
        .get_commission(&CommissionId::new(id.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("commission {}", id)))?;
    Ok(Json(commission))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_status(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Commission>, AppError> {
    let next = CommissionStatus::from_str(&body.status)?;
    let commission_id = CommissionId::new(id.clone());

    let commission = state
        .repo
        .get_commission(&commission_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("commission {}", id)))?;

    if !commission.status.can_advance_to(next) {
        return Err(AppError::BadRequest(format!(
            "commission status cannot move from {} to {}",
            commission.status, next
        )));
    }
    if commission.status == next {
        return Ok(Json(commission));
    }

    let paid_at = match next {
        CommissionStatus::Paid => Some(TimeMs::now()),
        _ => commission.paid_at,
    };
    state
        .repo
        .update_commission_status(&commission_id, next, paid_at)
        .await?;

    // Payout moves the amount from the referral's pending accumulator to
    // earned. Two independent single-record writes, last-write-wins.
    if next == CommissionStatus::Paid {
        state
            .repo
            .settle_commission_amount(&commission.referral_id, commission.amount)
            .await?;
    }

    let updated = state
        .repo
        .get_commission(&commission_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("commission {}", id)))?;
    tracing::info!(commission = %commission_id, status = %next, "Commission status updated");
    Ok(Json(updated))
}

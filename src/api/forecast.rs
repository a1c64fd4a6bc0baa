use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::domain::PartnerId;
use crate::engine::{self, Forecast};
use crate::error::AppError;

pub async fn get_forecast(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Forecast>, AppError> {
    let partner_id = PartnerId::new(id.clone());
    let partner = state
        .repo
        .get_partner(&partner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("partner {}", id)))?;

    let referrals = state.repo.list_referrals_by_partner(&partner_id).await?;
    let forecast = engine::project(&referrals, partner.role);
    Ok(Json(forecast))
}

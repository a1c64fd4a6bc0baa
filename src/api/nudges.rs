use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::domain::{PartnerId, TimeMs};
use crate::engine::{self, Nudge};
use crate::error::AppError;

pub async fn get_nudges(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Nudge>>, AppError> {
    let partner_id = PartnerId::new(id.clone());
    state
        .repo
        .get_partner(&partner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("partner {}", id)))?;

    let referrals = state.repo.list_referrals_by_partner(&partner_id).await?;
    let nudges = engine::generate(&referrals, TimeMs::now());
    Ok(Json(nudges))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{Partner, PartnerId, PartnerRole};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub agency: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub profile_complete: bool,
}

pub async fn create_partner(
    State(state): State<AppState>,
    Json(body): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), AppError> {
    let role = PartnerRole::from_str(&body.role)?;
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    let partner = Partner {
        id: PartnerId::new(
            body.id
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        ),
        name: body.name,
        email: body.email,
        role,
        agency: body.agency,
        contact: body.contact,
        profile_complete: body.profile_complete,
    };

    state.repo.insert_partner(&partner).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

pub async fn get_partner(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Partner>, AppError> {
    let partner = state
        .repo
        .get_partner(&PartnerId::new(id.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("partner {}", id)))?;
    Ok(Json(partner))
}

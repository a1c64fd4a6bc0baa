use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{CommissionDetails, Decimal, PartnerRole, Product, Vertical};
use crate::engine::{self, QuoteRequest};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub role: String,
    pub monthly_gmv: Decimal,
    pub product: String,
    pub vertical: Option<String>,
    pub tier: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub amount: Decimal,
    /// Amount rounded to two places for display; the exact value is `amount`.
    pub display_amount: String,
    pub details: CommissionDetails,
}

pub async fn calculate_commission(
    State(_state): State<AppState>,
    Json(body): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    let role = PartnerRole::from_str(&body.role)?;
    let product = Product::from_str(&body.product)?;
    let vertical = body
        .vertical
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Vertical::from_str)
        .transpose()?;
    let tier = body
        .tier
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let quote = engine::quote(&QuoteRequest {
        role,
        monthly_gmv: body.monthly_gmv,
        product,
        vertical,
        tier,
    })?;

    Ok(Json(CalculateResponse {
        amount: quote.amount,
        display_amount: quote.amount.to_display_string(),
        details: quote.details,
    }))
}

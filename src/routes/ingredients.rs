use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::IngredientSearchResult,
    routes::AppState,
    services::ingredients::{self, IngredientSort},
};

#[derive(Debug, Deserialize)]
pub struct IngredientSearchRequest {
    pub ingredient: Option<String>,
    #[serde(default)]
    pub sorting: IngredientSort,
}

/// Handler for ingredient search endpoint
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<IngredientSearchRequest>,
) -> AppResult<Json<Vec<IngredientSearchResult>>> {
    let query = request
        .ingredient
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput("Ingredient not provided in the request".to_string())
        })?;

    let results =
        ingredients::search_ingredients(state.provider.as_ref(), &query, request.sorting).await?;
    Ok(Json(results))
}

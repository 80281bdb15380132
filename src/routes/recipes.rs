use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Ingredient, RecipeCandidate, RecipeDetails},
    routes::AppState,
    services::{estimate_difficulty, missing_ingredients, pantry, rank_recipes_by_ingredients},
};

/// Searched when a request names no ingredients
const DEFAULT_INGREDIENTS: [&str; 3] = ["chicken", "broccoli", "rice"];

#[derive(Debug, Deserialize)]
pub struct RecipeSearchRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeViewQuery {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub recipe: RecipeDetails,
    pub missing_ingredients: Vec<Ingredient>,
    pub difficulty: u8,
}

#[derive(Debug, Serialize)]
pub struct RecipeCostResponse {
    pub recipe_id: u64,
    /// US cents per serving
    pub total_cost: f64,
}

/// Rank recipes by how many of the requested ingredients they use
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecipeSearchRequest>,
) -> AppResult<Json<Vec<RecipeCandidate>>> {
    let ingredients = if request.ingredients.is_empty() {
        DEFAULT_INGREDIENTS.iter().map(|s| s.to_string()).collect()
    } else {
        request.ingredients
    };

    tracing::info!(
        request_id = %request_id,
        ingredients = ?ingredients,
        cuisine = ?request.cuisine,
        "Processing recipe search"
    );

    let recipes = rank_recipes_by_ingredients(
        state.provider.clone(),
        &ingredients,
        request.cuisine.as_deref(),
    )
    .await?;

    Ok(Json(recipes))
}

/// Recipe details with difficulty and, for a known user, the missing ingredients
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<u64>,
    Query(query): Query<RecipeViewQuery>,
) -> AppResult<Json<RecipeView>> {
    let recipe = state.provider.get_details(recipe_id).await?;

    let (fridge, shopping_list) = match &query.username {
        Some(username) => match state.store.find_user(username).await? {
            Some(user) => (user.fridge, user.shopping_list),
            None => {
                tracing::warn!(username = %username, "User not found, showing every ingredient as missing");
                (Vec::new(), Vec::new())
            }
        },
        None => (Vec::new(), Vec::new()),
    };

    let missing_ingredients =
        missing_ingredients(&recipe.extended_ingredients, &fridge, &shopping_list);

    let difficulty = estimate_difficulty(
        recipe.step_count(),
        recipe.ingredient_count(),
        recipe.ready_in_minutes.unwrap_or(0),
    );

    Ok(Json(RecipeView {
        recipe,
        missing_ingredients,
        difficulty,
    }))
}

/// Price per serving of a recipe
pub async fn get_recipe_cost(
    State(state): State<AppState>,
    Path(recipe_id): Path<u64>,
) -> AppResult<Json<RecipeCostResponse>> {
    let total_cost = pantry::recipe_cost(state.provider.as_ref(), recipe_id).await?;
    Ok(Json(RecipeCostResponse {
        recipe_id,
        total_cost,
    }))
}

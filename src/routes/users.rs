use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{
        FridgeEntry, Ingredient, OneOrMany, RecipeDetails, ShoppingListEntry, User, UserMutation,
    },
    routes::AppState,
    services::{matcher, pantry},
};

const MAX_USERNAME_LEN: usize = 20;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

impl CreateUserRequest {
    fn validate(&self) -> AppResult<()> {
        if self.username.is_empty()
            || self.username.len() > MAX_USERNAME_LEN
            || !self.username.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::InvalidInput(format!(
                "Username must be 1-{} alphanumeric characters",
                MAX_USERNAME_LEN
            )));
        }

        let valid_email = self
            .email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid_email {
            return Err(AppError::InvalidInput("Invalid email address".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct InsertIntoFridgeRequest {
    pub ingredients: Option<OneOrMany<Ingredient>>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    pub recipe_id: u64,
}

#[derive(Debug, Serialize)]
pub struct SavedRecipesResponse {
    pub saved_recipes: Vec<u64>,
}

impl From<User> for SavedRecipesResponse {
    fn from(user: User) -> Self {
        Self {
            saved_recipes: user.saved_recipes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MissingIngredientsResponse {
    pub recipe_id: u64,
    pub missing_ingredients: Vec<Ingredient>,
}

// Handlers

/// Register a user with empty fridge, shopping list and saved recipes
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    request.validate()?;
    let user = state
        .store
        .create_user(&request.username, &request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get the user's fridge
pub async fn get_fridge(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<FridgeEntry>>> {
    let user = pantry::require_user(state.store.as_ref(), &username).await?;
    Ok(Json(user.fridge))
}

/// Insert one or more ingredients into the fridge
pub async fn insert_into_fridge(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<InsertIntoFridgeRequest>,
) -> AppResult<Json<Vec<FridgeEntry>>> {
    let ingredients = request
        .ingredients
        .map(OneOrMany::into_vec)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Ingredients must be provided".to_string()))?;

    tracing::info!(
        username = %username,
        count = ingredients.len(),
        "Inserting into fridge"
    );

    let user = state
        .store
        .update_user(&username, UserMutation::InsertIntoFridge(ingredients))
        .await?;
    Ok(Json(user.fridge))
}

/// Get the user's shopping list
pub async fn get_shopping_list(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<ShoppingListEntry>>> {
    let user = pantry::require_user(state.store.as_ref(), &username).await?;
    Ok(Json(user.shopping_list))
}

/// Price an ingredient and append it to the shopping list
pub async fn add_to_shopping_list(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(ingredient): Json<Ingredient>,
) -> AppResult<(StatusCode, Json<Vec<ShoppingListEntry>>)> {
    let user = pantry::add_to_shopping_list(
        state.store.as_ref(),
        state.provider.as_ref(),
        &username,
        ingredient,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user.shopping_list)))
}

/// Get the ids of the user's saved recipes
pub async fn get_saved_recipes(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<SavedRecipesResponse>> {
    let user = pantry::require_user(state.store.as_ref(), &username).await?;
    Ok(Json(user.into()))
}

/// Save a recipe
pub async fn save_recipe(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<SaveRecipeRequest>,
) -> AppResult<Json<SavedRecipesResponse>> {
    let user = state
        .store
        .update_user(&username, UserMutation::SaveRecipe(request.recipe_id))
        .await?;
    Ok(Json(user.into()))
}

/// Remove a saved recipe
pub async fn remove_recipe(
    State(state): State<AppState>,
    Path((username, recipe_id)): Path<(String, u64)>,
) -> AppResult<Json<SavedRecipesResponse>> {
    let user = state
        .store
        .update_user(&username, UserMutation::RemoveRecipe(recipe_id))
        .await?;
    Ok(Json(user.into()))
}

/// Full details of the user's saved recipes
pub async fn saved_recipe_details(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<RecipeDetails>>> {
    let recipes =
        pantry::saved_recipe_details(state.store.as_ref(), state.provider.clone(), &username)
            .await?;
    Ok(Json(recipes))
}

/// Ingredients of a recipe the user still needs to get
///
/// An empty list may also mean the recipe could not be loaded.
pub async fn missing_ingredients(
    State(state): State<AppState>,
    Path((username, recipe_id)): Path<(String, u64)>,
) -> AppResult<Json<MissingIngredientsResponse>> {
    let user = pantry::require_user(state.store.as_ref(), &username).await?;

    let missing_ingredients = matcher::missing_ingredients_for_recipe(
        state.provider.as_ref(),
        recipe_id,
        &user.fridge,
        &user.shopping_list,
    )
    .await;

    Ok(Json(MissingIngredientsResponse {
        recipe_id,
        missing_ingredients,
    }))
}

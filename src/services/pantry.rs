use std::sync::Arc;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{Ingredient, RecipeDetails, ShoppingListEntry, User, UserMutation},
    services::providers::{fetch_details_batch, RecipeProvider},
};

/// Loads a user or fails with `NotFound`
pub async fn require_user(store: &dyn UserStore, username: &str) -> AppResult<User> {
    store
        .find_user(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
}

/// Prices an ingredient through the provider and appends it to the shopping list
pub async fn add_to_shopping_list(
    store: &dyn UserStore,
    provider: &dyn RecipeProvider,
    username: &str,
    ingredient: Ingredient,
) -> AppResult<User> {
    let ingredient_id = ingredient.id.ok_or_else(|| {
        AppError::InvalidInput("Shopping list items need an ingredient id".to_string())
    })?;

    // Fail before spending an API call on an unknown user
    require_user(store, username).await?;

    let amount = ingredient.amount.unwrap_or(1.0);
    let unit = ingredient.unit.clone().unwrap_or_default();
    let cost_cents = provider
        .ingredient_cost(ingredient_id, amount, &unit)
        .await?;

    let entry = ShoppingListEntry::from_cost_cents(ingredient, cost_cents);

    tracing::info!(
        username = %username,
        ingredient_id,
        price = entry.price,
        "Adding ingredient to shopping list"
    );

    store
        .update_user(username, UserMutation::AddToShoppingList(entry))
        .await
}

/// Details of every recipe the user saved; recipes that fail to load are left out
pub async fn saved_recipe_details(
    store: &dyn UserStore,
    provider: Arc<dyn RecipeProvider>,
    username: &str,
) -> AppResult<Vec<RecipeDetails>> {
    let user = require_user(store, username).await?;
    Ok(fetch_details_batch(provider, &user.saved_recipes).await)
}

/// Price per serving, in cents, of a recipe
pub async fn recipe_cost(provider: &dyn RecipeProvider, recipe_id: u64) -> AppResult<f64> {
    let details = provider.get_details(recipe_id).await?;

    details.price_per_serving.ok_or_else(|| {
        AppError::ExternalApi(format!(
            "Price per serving not available for recipe {}",
            recipe_id
        ))
    })
}

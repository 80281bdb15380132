use crate::{
    models::{FridgeEntry, Ingredient, RecipeIngredient, ShoppingListEntry},
    services::providers::RecipeProvider,
};

/// Returns the recipe ingredients the user has neither in the fridge nor on the shopping list
///
/// Coverage is presence only: an ingredient counts as covered as soon as a matching
/// entry exists, whatever its amount or unit. Missing ingredients keep recipe order,
/// are not deduplicated, and are named after the recipe's `original` text.
pub fn missing_ingredients(
    recipe_ingredients: &[RecipeIngredient],
    fridge: &[FridgeEntry],
    shopping_list: &[ShoppingListEntry],
) -> Vec<Ingredient> {
    recipe_ingredients
        .iter()
        .filter(|recipe_ingredient| {
            let ingredient = recipe_ingredient.as_ingredient();
            let in_fridge = fridge
                .iter()
                .any(|entry| entry.ingredient.matches(&ingredient));
            let on_list = shopping_list
                .iter()
                .any(|entry| entry.ingredient.matches(&ingredient));
            !in_fridge && !on_list
        })
        .map(RecipeIngredient::to_display_ingredient)
        .collect()
}

/// Fetches a recipe and computes its missing ingredients
///
/// A failed lookup yields an empty list, so an empty result means either
/// "nothing missing" or "lookup failed". Callers should treat it as advisory.
pub async fn missing_ingredients_for_recipe(
    provider: &dyn RecipeProvider,
    recipe_id: u64,
    fridge: &[FridgeEntry],
    shopping_list: &[ShoppingListEntry],
) -> Vec<Ingredient> {
    match provider.get_details(recipe_id).await {
        Ok(details) => missing_ingredients(&details.extended_ingredients, fridge, shopping_list),
        Err(e) => {
            tracing::warn!(
                recipe_id,
                error = %e,
                provider = provider.name(),
                "Recipe lookup failed, reporting no missing ingredients"
            );
            Vec::new()
        }
    }
}

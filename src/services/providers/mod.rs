//! Recipe data provider abstraction
//!
//! The ranking and matching services only talk to the outside world through this
//! trait, so tests can swap in a recording or mocked provider.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ComplexSearch, IngredientSearchResult, RecipeDetails, RecipeSummary},
};

pub mod spoonacular;

pub use spoonacular::SpoonacularProvider;

/// Trait for recipe data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Find recipes that use the given ingredients
    ///
    /// `ranking` is passed through to the provider (2 = minimize missing ingredients).
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        ranking: u8,
    ) -> AppResult<Vec<RecipeSummary>>;

    /// General recipe search with optional query, cuisine and ingredient filters
    async fn search_complex(&self, search: &ComplexSearch) -> AppResult<Vec<RecipeSummary>>;

    /// Full recipe information including the extended ingredient list
    async fn get_details(&self, recipe_id: u64) -> AppResult<RecipeDetails>;

    /// Ingredient lookup by name
    async fn search_ingredients(&self, query: &str) -> AppResult<Vec<IngredientSearchResult>>;

    /// Estimated cost, in cents, of `amount` `unit` of an ingredient
    async fn ingredient_cost(&self, ingredient_id: i64, amount: f64, unit: &str)
        -> AppResult<f64>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches details for several recipes in parallel
///
/// One task per recipe. Results come back in the order of `recipe_ids`, not in
/// completion order. Failed lookups are logged and left out; they never fail the batch.
pub async fn fetch_details_batch(
    provider: Arc<dyn RecipeProvider>,
    recipe_ids: &[u64],
) -> Vec<RecipeDetails> {
    let mut tasks = Vec::with_capacity(recipe_ids.len());

    for &recipe_id in recipe_ids {
        let provider = Arc::clone(&provider);
        let task = tokio::spawn(async move { provider.get_details(recipe_id).await });
        tasks.push((recipe_id, task));
    }

    let mut results = Vec::with_capacity(tasks.len());
    let mut error_count = 0;

    for (recipe_id, task) in tasks {
        match task.await {
            Ok(Ok(details)) => results.push(details),
            Ok(Err(e)) => {
                tracing::error!(
                    recipe_id,
                    error = %e,
                    provider_error = e.is_provider_error(),
                    "Recipe detail fetch failed"
                );
                error_count += 1;
            }
            Err(e) => {
                tracing::error!(recipe_id, error = %e, "Task join error");
                error_count += 1;
            }
        }
    }

    if error_count > 0 {
        tracing::warn!(
            success_count = results.len(),
            error_count,
            provider = provider.name(),
            "Partial recipe detail fetch failure"
        );
    }

    results
}

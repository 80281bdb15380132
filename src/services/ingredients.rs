use serde::Deserialize;

use crate::{
    error::AppResult, models::IngredientSearchResult, services::providers::RecipeProvider,
};

/// Result ordering for ingredient searches
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSort {
    /// Provider order (calories, descending)
    #[default]
    Calories,
    /// Alphabetical by name
    Alphabet,
}

/// Searches ingredients by name
pub async fn search_ingredients(
    provider: &dyn RecipeProvider,
    query: &str,
    sort: IngredientSort,
) -> AppResult<Vec<IngredientSearchResult>> {
    let mut results = provider.search_ingredients(query).await?;

    if sort == IngredientSort::Alphabet {
        results.sort_by_key(|ingredient| ingredient.name.to_lowercase());
    }

    Ok(results)
}

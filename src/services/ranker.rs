use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{ComplexSearch, RecipeCandidate, RecipeDetails, RecipeSummary},
    services::{
        difficulty::estimate_difficulty,
        providers::{fetch_details_batch, RecipeProvider},
    },
};

/// Ranking mode sent to the ingredient-match endpoint
pub const INGREDIENT_SEARCH_RANKING: u8 = 2;

/// Sort order for single-ingredient searches
pub const SINGLE_INGREDIENT_SORT: &str = "popularity";

/// Cuisine value meaning "no cuisine filter"
pub const ANY_CUISINE: &str = "any";

/// Finds recipes for a set of ingredients, best matches first
///
/// Candidates come from the provider, are enriched with full details (one call
/// each, run concurrently), scored by how many of their ingredient names equal
/// one of `ingredients` ignoring case, and sorted by that score. The sort is
/// stable, so equal scores keep the provider's order.
///
/// Errors from the initial search propagate. A failed detail lookup only drops
/// that candidate.
pub async fn rank_recipes_by_ingredients(
    provider: Arc<dyn RecipeProvider>,
    ingredients: &[String],
    cuisine: Option<&str>,
) -> AppResult<Vec<RecipeCandidate>> {
    let start = Instant::now();

    let candidates = search_candidates(provider.as_ref(), ingredients, cuisine).await?;

    tracing::info!(
        ingredients = ingredients.len(),
        cuisine = ?cuisine,
        candidates = candidates.len(),
        provider = provider.name(),
        "Recipe candidates retrieved"
    );

    let recipe_ids: Vec<u64> = candidates.iter().map(|c| c.id).collect();
    let details = fetch_details_batch(Arc::clone(&provider), &recipe_ids).await;

    let mut ranked: Vec<RecipeCandidate> = details
        .into_iter()
        .map(|details| score_candidate(details, ingredients))
        .collect();

    sort_by_matches(&mut ranked);

    tracing::info!(
        ranked = ranked.len(),
        dropped = candidates.len() - ranked.len(),
        processing_time_ms = start.elapsed().as_millis(),
        "Recipe ranking completed"
    );

    Ok(ranked)
}

/// Picks the provider endpoint for the initial candidate search
async fn search_candidates(
    provider: &dyn RecipeProvider,
    ingredients: &[String],
    cuisine: Option<&str>,
) -> AppResult<Vec<RecipeSummary>> {
    let cuisine = cuisine
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ANY_CUISINE));

    match (ingredients, cuisine) {
        ([], _) => Err(AppError::InvalidInput(
            "At least one ingredient is required".to_string(),
        )),
        ([single], cuisine) => {
            let search = ComplexSearch {
                query: Some(single.clone()),
                cuisine: cuisine.map(str::to_string),
                sort: Some(SINGLE_INGREDIENT_SORT.to_string()),
                ..Default::default()
            };
            provider.search_complex(&search).await
        }
        (_, None) => {
            provider
                .search_by_ingredients(ingredients, INGREDIENT_SEARCH_RANKING)
                .await
        }
        (_, Some(cuisine)) => {
            let search = ComplexSearch {
                include_ingredients: ingredients.to_vec(),
                cuisine: Some(cuisine.to_string()),
                ..Default::default()
            };
            provider.search_complex(&search).await
        }
    }
}

/// Number of recipe ingredient names equal to one of `ingredients`, ignoring case
pub fn count_ingredient_matches(details: &RecipeDetails, ingredients: &[String]) -> usize {
    let wanted: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();

    details
        .extended_ingredients
        .iter()
        .filter(|ingredient| wanted.contains(&ingredient.name.to_lowercase()))
        .count()
}

fn score_candidate(details: RecipeDetails, ingredients: &[String]) -> RecipeCandidate {
    let ingredient_matches = count_ingredient_matches(&details, ingredients);
    let step_count = details.step_count();
    let difficulty = estimate_difficulty(
        step_count,
        details.ingredient_count(),
        details.ready_in_minutes.unwrap_or(0),
    );

    RecipeCandidate {
        id: details.id,
        title: details.title,
        image: details.image,
        ingredients: details.extended_ingredients,
        instructions: details.instructions,
        step_count,
        ready_in_minutes: details.ready_in_minutes,
        price_per_serving: details.price_per_serving,
        difficulty,
        ingredient_matches,
    }
}

/// Descending by `ingredient_matches`; ties keep their current order
pub fn sort_by_matches(candidates: &mut [RecipeCandidate]) {
    candidates.sort_by(|a, b| b.ingredient_matches.cmp(&a.ingredient_matches));
}

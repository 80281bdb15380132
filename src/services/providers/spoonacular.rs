//! Spoonacular API provider
//!
//! Endpoints used:
//! 1. Ingredient-match search: /recipes/findByIngredients
//! 2. General search: /recipes/complexSearch
//! 3. Recipe details: /recipes/{id}/information
//! 4. Ingredient search: /food/ingredients/search
//! 5. Ingredient cost: /food/ingredients/{id}/information
//!
//! Every request carries the API key as the `apiKey` query parameter.
use crate::{
    db::ApiUsage,
    error::{AppError, AppResult},
    models::{
        recipe::{ComplexSearchResponse, IngredientInformation, IngredientSearchResponse},
        ComplexSearch, IngredientSearchResult, RecipeDetails, RecipeSummary,
    },
    services::providers::RecipeProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const PROVIDER_NAME: &str = "spoonacular";
const INGREDIENT_SEARCH_LIMIT: u32 = 99;

#[derive(Clone)]
pub struct SpoonacularProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    result_limit: u32,
    usage: Option<ApiUsage>,
}

impl SpoonacularProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        timeout: Duration,
        result_limit: u32,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            result_limit,
            usage: None,
        })
    }

    /// Counts requests against a daily quota
    pub fn with_usage(mut self, usage: ApiUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Maps a non-success status to the matching error kind
    fn status_error(status: StatusCode, body: String) -> AppError {
        match status {
            StatusCode::PAYMENT_REQUIRED | StatusCode::TOO_MANY_REQUESTS => {
                AppError::ProviderQuotaExceeded
            }
            _ => AppError::ProviderResponse {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Issues a GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        if let Some(usage) = &self.usage {
            usage.check_quota().await?;
        }

        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = %path, provider = PROVIDER_NAME, "Request failed");
                AppError::network(e)
            })?;

        if let Some(usage) = &self.usage {
            usage.record_request().await;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                path = %path,
                provider = PROVIDER_NAME,
                "External API request failed"
            );
            return Err(Self::status_error(status, body));
        }

        let response_text = response.text().await.map_err(AppError::network)?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                path = %path,
                "Failed to deserialize Spoonacular response"
            );
            AppError::ExternalApi(format!("Failed to parse Spoonacular response: {}", e))
        })
    }

    fn complex_search_params(&self, search: &ComplexSearch) -> Vec<(&'static str, String)> {
        let mut params = vec![("number", self.result_limit.to_string())];

        if let Some(query) = &search.query {
            params.push(("query", query.clone()));
        }
        if !search.include_ingredients.is_empty() {
            params.push(("includeIngredients", search.include_ingredients.join(",")));
        }
        if let Some(cuisine) = &search.cuisine {
            params.push(("cuisine", cuisine.clone()));
        }
        if let Some(sort) = &search.sort {
            params.push(("sort", sort.clone()));
        }

        params
    }
}

#[async_trait::async_trait]
impl RecipeProvider for SpoonacularProvider {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        ranking: u8,
    ) -> AppResult<Vec<RecipeSummary>> {
        let params = [
            ("ingredients", ingredients.join(",")),
            ("ranking", ranking.to_string()),
            ("number", self.result_limit.to_string()),
        ];

        let recipes: Vec<RecipeSummary> = self
            .get_json("/recipes/findByIngredients", &params)
            .await?;

        tracing::info!(
            ingredients = ingredients.len(),
            results = recipes.len(),
            provider = PROVIDER_NAME,
            "Ingredient-match search completed"
        );

        Ok(recipes)
    }

    async fn search_complex(&self, search: &ComplexSearch) -> AppResult<Vec<RecipeSummary>> {
        let params = self.complex_search_params(search);

        let response: ComplexSearchResponse =
            self.get_json("/recipes/complexSearch", &params).await?;

        tracing::info!(
            query = ?search.query,
            cuisine = ?search.cuisine,
            results = response.results.len(),
            provider = PROVIDER_NAME,
            "Complex search completed"
        );

        Ok(response.results)
    }

    async fn get_details(&self, recipe_id: u64) -> AppResult<RecipeDetails> {
        let path = format!("/recipes/{}/information", recipe_id);
        let params = [("includeNutrition", "false".to_string())];

        let details: RecipeDetails = self.get_json(&path, &params).await?;

        tracing::debug!(
            recipe_id,
            ingredients = details.extended_ingredients.len(),
            provider = PROVIDER_NAME,
            "Recipe details fetched"
        );

        Ok(details)
    }

    async fn search_ingredients(&self, query: &str) -> AppResult<Vec<IngredientSearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Ingredient query cannot be empty".to_string(),
            ));
        }

        let params = [
            ("query", query.to_string()),
            ("number", INGREDIENT_SEARCH_LIMIT.to_string()),
            ("sort", "calories".to_string()),
            ("sortDirection", "desc".to_string()),
        ];

        let response: IngredientSearchResponse =
            self.get_json("/food/ingredients/search", &params).await?;

        tracing::info!(
            query = %query,
            results = response.results.len(),
            provider = PROVIDER_NAME,
            "Ingredient search completed"
        );

        Ok(response.results)
    }

    async fn ingredient_cost(
        &self,
        ingredient_id: i64,
        amount: f64,
        unit: &str,
    ) -> AppResult<f64> {
        let path = format!("/food/ingredients/{}/information", ingredient_id);
        let params = [("amount", amount.to_string()), ("unit", unit.to_string())];

        let info: IngredientInformation = self.get_json(&path, &params).await?;

        Ok(info.estimated_cost.value)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use pantry_api::{
    db::InMemoryUserStore,
    error::{AppError, AppResult},
    models::{
        AnalyzedInstruction, ComplexSearch, IngredientSearchResult, InstructionStep,
        RecipeDetails, RecipeIngredient, RecipeSummary,
    },
    routes::{create_router, AppState},
    services::providers::RecipeProvider,
};

/// A provider call as seen by [`FakeProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    SearchByIngredients { ingredients: Vec<String>, ranking: u8 },
    SearchComplex(ComplexSearch),
    GetDetails(u64),
    SearchIngredients(String),
    IngredientCost { ingredient_id: i64, amount: f64, unit: String },
}

/// In-process provider that serves canned data and records every call
#[derive(Default)]
pub struct FakeProvider {
    candidates: Vec<RecipeSummary>,
    details: HashMap<u64, RecipeDetails>,
    failing_details: HashSet<u64>,
    ingredients: Vec<IngredientSearchResult>,
    cost_cents: f64,
    search_error: Mutex<Option<AppError>>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a search candidate together with its detail record
    pub fn with_recipe(mut self, details: RecipeDetails) -> Self {
        self.candidates.push(RecipeSummary {
            id: details.id,
            title: details.title.clone(),
            image: None,
        });
        self.details.insert(details.id, details);
        self
    }

    /// Adds a search candidate whose detail lookup fails
    pub fn with_failing_recipe(mut self, id: u64) -> Self {
        self.candidates.push(RecipeSummary {
            id,
            title: format!("Broken recipe {}", id),
            image: None,
        });
        self.failing_details.insert(id);
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<IngredientSearchResult>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_cost(mut self, cents: f64) -> Self {
        self.cost_cents = cents;
        self
    }

    /// Makes the next candidate search fail with `error`
    pub fn with_search_error(self, error: AppError) -> Self {
        *self.search_error.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<ProviderCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    ProviderCall::SearchByIngredients { .. } | ProviderCall::SearchComplex(_)
                )
            })
            .collect()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn search_result(&self) -> AppResult<Vec<RecipeSummary>> {
        match self.search_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(self.candidates.clone()),
        }
    }
}

#[async_trait::async_trait]
impl RecipeProvider for FakeProvider {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
        ranking: u8,
    ) -> AppResult<Vec<RecipeSummary>> {
        self.record(ProviderCall::SearchByIngredients {
            ingredients: ingredients.to_vec(),
            ranking,
        });
        self.search_result()
    }

    async fn search_complex(&self, search: &ComplexSearch) -> AppResult<Vec<RecipeSummary>> {
        self.record(ProviderCall::SearchComplex(search.clone()));
        self.search_result()
    }

    async fn get_details(&self, recipe_id: u64) -> AppResult<RecipeDetails> {
        self.record(ProviderCall::GetDetails(recipe_id));
        if self.failing_details.contains(&recipe_id) {
            return Err(AppError::ProviderNetwork("connection reset".to_string()));
        }
        self.details
            .get(&recipe_id)
            .cloned()
            .ok_or_else(|| AppError::ProviderResponse {
                status: 404,
                body: "not found".to_string(),
            })
    }

    async fn search_ingredients(&self, query: &str) -> AppResult<Vec<IngredientSearchResult>> {
        self.record(ProviderCall::SearchIngredients(query.to_string()));
        Ok(self.ingredients.clone())
    }

    async fn ingredient_cost(
        &self,
        ingredient_id: i64,
        amount: f64,
        unit: &str,
    ) -> AppResult<f64> {
        self.record(ProviderCall::IngredientCost {
            ingredient_id,
            amount,
            unit: unit.to_string(),
        });
        Ok(self.cost_cents)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn ingredient(id: i64, name: &str, original: &str) -> RecipeIngredient {
    RecipeIngredient {
        id: Some(id),
        name: name.to_string(),
        original: original.to_string(),
        amount: Some(1.0),
        unit: None,
    }
}

/// Recipe whose ingredients are named `names`, with ids 1..
pub fn recipe(id: u64, title: &str, names: &[&str]) -> RecipeDetails {
    RecipeDetails {
        id,
        title: title.to_string(),
        image: None,
        extended_ingredients: names
            .iter()
            .enumerate()
            .map(|(i, name)| ingredient(i as i64 + 1, name, &format!("1 cup {}", name)))
            .collect(),
        instructions: Some("Cook everything.".to_string()),
        analyzed_instructions: vec![AnalyzedInstruction {
            name: String::new(),
            steps: vec![InstructionStep {
                number: 1,
                step: "Cook everything.".to_string(),
            }],
        }],
        ready_in_minutes: Some(20),
        price_per_serving: Some(250.0),
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Router backed by an in-memory store and the given provider
pub fn test_app(provider: Arc<FakeProvider>) -> axum::Router {
    let state = AppState::new(Arc::new(InMemoryUserStore::new()), provider);
    create_router(state)
}

use serde::{Deserialize, Serialize};

use super::Ingredient;

// ============================================================================
// Spoonacular API Types
// ============================================================================

/// Candidate returned by either recipe search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response body of `/recipes/complexSearch`
#[derive(Debug, Deserialize)]
pub struct ComplexSearchResponse {
    pub results: Vec<RecipeSummary>,
}

/// Response body of `/food/ingredients/search`
#[derive(Debug, Deserialize)]
pub struct IngredientSearchResponse {
    pub results: Vec<IngredientSearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSearchResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response body of `/food/ingredients/{id}/information`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInformation {
    pub estimated_cost: EstimatedCost,
}

#[derive(Debug, Deserialize)]
pub struct EstimatedCost {
    /// US cents
    pub value: f64,
}

/// One entry of a recipe's `extendedIngredients`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    /// Human readable line, e.g. "2 cups cooked rice"
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RecipeIngredient {
    /// Ingredient view used for coverage checks (raw name, not the display line)
    pub fn as_ingredient(&self) -> Ingredient {
        Ingredient {
            id: self.id,
            name: self.name.clone(),
            amount: self.amount,
            unit: self.unit.clone(),
        }
    }

    /// Ingredient view shown to users, named after the `original` text
    pub fn to_display_ingredient(&self) -> Ingredient {
        let name = if self.original.is_empty() {
            self.name.clone()
        } else {
            self.original.clone()
        };

        Ingredient {
            id: self.id,
            name,
            amount: self.amount,
            unit: self.unit.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

/// Response body of `/recipes/{id}/information`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    /// US cents
    #[serde(default)]
    pub price_per_serving: Option<f64>,
}

impl RecipeDetails {
    /// Total number of steps across every instruction block
    pub fn step_count(&self) -> u32 {
        self.analyzed_instructions
            .iter()
            .map(|instruction| instruction.steps.len() as u32)
            .sum()
    }

    pub fn ingredient_count(&self) -> u32 {
        self.extended_ingredients.len() as u32
    }
}

// ============================================================================
// Search & Ranking Types
// ============================================================================

/// Parameters for the provider's general search endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexSearch {
    pub query: Option<String>,
    pub include_ingredients: Vec<String>,
    pub cuisine: Option<String>,
    pub sort: Option<String>,
}

/// A detailed recipe scored against the ingredients a user asked for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeCandidate {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Option<String>,
    pub step_count: u32,
    pub ready_in_minutes: Option<u32>,
    pub price_per_serving: Option<f64>,
    pub difficulty: u8,
    pub ingredient_matches: usize,
}

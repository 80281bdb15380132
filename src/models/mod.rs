use serde::{Deserialize, Serialize};

pub mod recipe;
pub mod user;

pub use recipe::{
    AnalyzedInstruction, ComplexSearch, IngredientSearchResult, InstructionStep, RecipeCandidate,
    RecipeDetails, RecipeIngredient, RecipeSummary,
};
pub use user::{FridgeEntry, ShoppingListEntry, User, UserMutation};

/// An ingredient as the rest of the service sees it
///
/// The identifier is assigned by the recipe provider. Ingredients typed in by hand
/// may not carry one, in which case matching falls back to the name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            amount: None,
            unit: None,
        }
    }

    /// Identifier equality when both sides have one, case-insensitive name otherwise
    pub fn matches(&self, other: &Ingredient) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.to_lowercase() == other.name.to_lowercase(),
        }
    }
}

/// Accepts either a single JSON object or an array of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

pub mod difficulty;
pub mod ingredients;
pub mod matcher;
pub mod pantry;
pub mod providers;
pub mod ranker;

pub use difficulty::estimate_difficulty;
pub use matcher::{missing_ingredients, missing_ingredients_for_recipe};
pub use ranker::rank_recipes_by_ingredients;

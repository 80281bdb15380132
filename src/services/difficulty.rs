/// Highest difficulty rating a recipe can get
pub const MAX_DIFFICULTY: u8 = 3;

const STEP_THRESHOLD: u32 = 5;
const INGREDIENT_THRESHOLD: u32 = 5;
const COOK_TIME_THRESHOLD_MINUTES: u32 = 45;

/// Rates a recipe from 1 (easy) to 3 (hard)
///
/// Starts at 1 and adds a point for each of: more than 5 steps, more than 5
/// ingredients, more than 45 minutes. The sum is clamped to `MAX_DIFFICULTY`.
pub fn estimate_difficulty(step_count: u32, ingredient_count: u32, cook_time_minutes: u32) -> u8 {
    let mut difficulty = 1;

    if step_count > STEP_THRESHOLD {
        difficulty += 1;
    }
    if ingredient_count > INGREDIENT_THRESHOLD {
        difficulty += 1;
    }
    if cook_time_minutes > COOK_TIME_THRESHOLD_MINUTES {
        difficulty += 1;
    }

    difficulty.min(MAX_DIFFICULTY)
}

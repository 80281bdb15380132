use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Ingredient;

/// Smallest price a shopping-list entry can carry
pub const MIN_ITEM_PRICE: f64 = 0.01;

/// An ingredient the user has on hand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FridgeEntry {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub quantity: u32,
}

/// An ingredient the user plans to buy, with its estimated price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListEntry {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub price: f64,
}

impl ShoppingListEntry {
    /// Builds an entry from the provider's estimated cost in cents
    ///
    /// The price is rounded to whole cents and never drops below `MIN_ITEM_PRICE`.
    pub fn from_cost_cents(ingredient: Ingredient, cost_cents: f64) -> Self {
        let price = (cost_cents.round() / 100.0).max(MIN_ITEM_PRICE);
        Self { ingredient, price }
    }
}

/// A change to one of the collections a user owns
#[derive(Debug, Clone, PartialEq)]
pub enum UserMutation {
    InsertIntoFridge(Vec<Ingredient>),
    AddToShoppingList(ShoppingListEntry),
    SaveRecipe(u64),
    RemoveRecipe(u64),
}

/// A registered user with their fridge, shopping list and saved recipes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub fridge: Vec<FridgeEntry>,
    pub shopping_list: Vec<ShoppingListEntry>,
    pub saved_recipes: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with empty collections
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            fridge: Vec::new(),
            shopping_list: Vec::new(),
            saved_recipes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Applies a mutation in place
    pub fn apply(&mut self, mutation: UserMutation) {
        match mutation {
            UserMutation::InsertIntoFridge(ingredients) => {
                for ingredient in ingredients {
                    self.insert_into_fridge(ingredient);
                }
            }
            UserMutation::AddToShoppingList(entry) => self.shopping_list.push(entry),
            UserMutation::SaveRecipe(recipe_id) => self.save_recipe(recipe_id),
            UserMutation::RemoveRecipe(recipe_id) => {
                self.saved_recipes.retain(|id| *id != recipe_id)
            }
        }
    }

    /// Adds an ingredient, bumping the quantity of a matching entry instead of duplicating it
    pub fn insert_into_fridge(&mut self, ingredient: Ingredient) {
        if let Some(existing) = self
            .fridge
            .iter_mut()
            .find(|entry| entry.ingredient.matches(&ingredient))
        {
            existing.quantity += 1;
        } else {
            self.fridge.push(FridgeEntry {
                ingredient,
                quantity: 1,
            });
        }
    }

    pub fn save_recipe(&mut self, recipe_id: u64) {
        if !self.saved_recipes.contains(&recipe_id) {
            self.saved_recipes.push(recipe_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_new_ingredient() {
        let mut user = User::new("alice", "alice@example.com");
        user.insert_into_fridge(Ingredient::new(5006, "chicken"));

        assert_eq!(user.fridge.len(), 1);
        assert_eq!(user.fridge[0].quantity, 1);
    }

    #[test]
    fn test_insert_existing_ingredient_increments_quantity() {
        let mut user = User::new("alice", "alice@example.com");
        user.insert_into_fridge(Ingredient::new(5006, "chicken"));
        user.insert_into_fridge(Ingredient::new(5006, "chicken"));

        assert_eq!(user.fridge.len(), 1);
        assert_eq!(user.fridge[0].quantity, 2);
    }

    #[test]
    fn test_insert_batch_with_duplicates_merges() {
        let mut user = User::new("alice", "alice@example.com");
        user.apply(UserMutation::InsertIntoFridge(vec![
            Ingredient::new(1, "egg"),
            Ingredient::new(2, "milk"),
            Ingredient::new(1, "egg"),
        ]));

        assert_eq!(user.fridge.len(), 2);
        assert_eq!(user.fridge[0].ingredient.name, "egg");
        assert_eq!(user.fridge[0].quantity, 2);
        assert_eq!(user.fridge[1].quantity, 1);
    }

    #[test]
    fn test_save_recipe_is_idempotent() {
        let mut user = User::new("alice", "alice@example.com");
        user.apply(UserMutation::SaveRecipe(42));
        user.apply(UserMutation::SaveRecipe(7));
        user.apply(UserMutation::SaveRecipe(42));

        assert_eq!(user.saved_recipes, vec![42, 7]);
    }

    #[test]
    fn test_remove_recipe() {
        let mut user = User::new("alice", "alice@example.com");
        user.apply(UserMutation::SaveRecipe(42));
        user.apply(UserMutation::RemoveRecipe(42));
        user.apply(UserMutation::RemoveRecipe(99));

        assert!(user.saved_recipes.is_empty());
    }

    #[test]
    fn test_shopping_list_price_rounds_to_cents() {
        let entry = ShoppingListEntry::from_cost_cents(Ingredient::new(1, "flour"), 123.6);
        assert_eq!(entry.price, 1.24);
    }

    #[test]
    fn test_shopping_list_price_has_floor() {
        let entry = ShoppingListEntry::from_cost_cents(Ingredient::new(1, "salt"), 0.2);
        assert_eq!(entry.price, MIN_ITEM_PRICE);

        let free = ShoppingListEntry::from_cost_cents(Ingredient::new(2, "water"), 0.0);
        assert_eq!(free.price, MIN_ITEM_PRICE);
    }

    #[test]
    fn test_fridge_entry_serializes_flat() {
        let entry = FridgeEntry {
            ingredient: Ingredient::new(5006, "chicken"),
            quantity: 3,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 5006);
        assert_eq!(json["name"], "chicken");
        assert_eq!(json["quantity"], 3);
    }
}

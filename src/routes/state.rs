use std::sync::Arc;

use crate::{db::UserStore, services::providers::RecipeProvider};

/// Shared application state
///
/// Built once in `main` and handed to the router; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub provider: Arc<dyn RecipeProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, provider: Arc<dyn RecipeProvider>) -> Self {
        Self { store, provider }
    }
}

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod ingredients;
pub mod recipes;
pub mod state;
pub mod users;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Users and the collections they own
        .route("/users", post(users::create_user))
        .route(
            "/users/:username/fridge",
            get(users::get_fridge).post(users::insert_into_fridge),
        )
        .route(
            "/users/:username/shopping-list",
            get(users::get_shopping_list).post(users::add_to_shopping_list),
        )
        .route(
            "/users/:username/saved-recipes",
            get(users::get_saved_recipes).post(users::save_recipe),
        )
        .route(
            "/users/:username/saved-recipes/details",
            get(users::saved_recipe_details),
        )
        .route(
            "/users/:username/saved-recipes/:recipe_id",
            delete(users::remove_recipe),
        )
        .route(
            "/users/:username/recipes/:recipe_id/missing",
            get(users::missing_ingredients),
        )
        // Recipes
        .route("/recipes/search", post(recipes::search))
        .route("/recipes/:recipe_id", get(recipes::get_recipe))
        .route("/recipes/:recipe_id/cost", get(recipes::get_recipe_cost))
        // Ingredients
        .route("/ingredients/search", post(ingredients::search))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

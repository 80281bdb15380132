use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pantry_api::{
    error::AppError,
    models::ComplexSearch,
    services::providers::{RecipeProvider, SpoonacularProvider},
};

fn provider_for(server: &MockServer) -> SpoonacularProvider {
    SpoonacularProvider::new(
        "test-key".to_string(),
        format!("{}/", server.uri()),
        Duration::from_secs(2),
        10,
    )
    .unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_ingredient_search_sends_ranking_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("ingredients", "chicken,rice"))
        .and(query_param("ranking", "2"))
        .and(query_param("number", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Chicken Rice", "image": "https://img/1.jpg", "usedIngredientCount": 2},
            {"id": 2, "title": "Rice Bowl"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let recipes = assert_ok!(
        provider
            .search_by_ingredients(&strings(&["chicken", "rice"]), 2)
            .await
    );

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, 1);
    assert_eq!(recipes[0].image.as_deref(), Some("https://img/1.jpg"));
    assert_eq!(recipes[1].image, None);
}

#[tokio::test]
async fn test_complex_search_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("includeIngredients", "chicken,basil"))
        .and(query_param("cuisine", "thai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 7, "title": "Thai Basil Chicken"}],
            "offset": 0,
            "number": 10,
            "totalResults": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let search = ComplexSearch {
        include_ingredients: strings(&["chicken", "basil"]),
        cuisine: Some("thai".to_string()),
        ..Default::default()
    };
    let recipes = assert_ok!(provider.search_complex(&search).await);

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Thai Basil Chicken");
}

#[tokio::test]
async fn test_recipe_details_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/42/information"))
        .and(query_param("includeNutrition", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "title": "Fried Rice",
            "readyInMinutes": 25,
            "pricePerServing": 120.5,
            "extendedIngredients": [
                {"id": 20444, "name": "rice", "original": "2 cups cooked rice", "amount": 2.0, "unit": "cups"}
            ],
            "analyzedInstructions": [
                {"name": "", "steps": [{"number": 1, "step": "Fry the rice."}]}
            ]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let details = assert_ok!(provider.get_details(42).await);

    assert_eq!(details.title, "Fried Rice");
    assert_eq!(details.ready_in_minutes, Some(25));
    assert_eq!(details.step_count(), 1);
    assert_eq!(details.extended_ingredients[0].original, "2 cups cooked rice");
}

#[tokio::test]
async fn test_ingredient_cost_returns_cents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/food/ingredients/9266/information"))
        .and(query_param("amount", "1"))
        .and(query_param("unit", "piece"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9266,
            "name": "pineapple",
            "estimatedCost": {"value": 299.0, "unit": "US Cents"}
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let cents = assert_ok!(provider.ingredient_cost(9266, 1.0, "piece").await);
    assert_eq!(cents, 299.0);
}

#[tokio::test]
async fn test_payment_required_is_quota_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .respond_with(ResponseTemplate::new(402).set_body_string("daily points limit reached"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = assert_err!(
        provider
            .search_by_ingredients(&strings(&["chicken", "rice"]), 2)
            .await
    );
    assert!(matches!(err, AppError::ProviderQuotaExceeded));
}

#[tokio::test]
async fn test_too_many_requests_is_quota_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1/information"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = assert_err!(provider.get_details(1).await);
    assert!(matches!(err, AppError::ProviderQuotaExceeded));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1/information"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = assert_err!(provider.get_details(1).await);

    match err {
        AppError::ProviderResponse { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_external_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1/information"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = assert_err!(provider.get_details(1).await);
    assert!(matches!(err, AppError::ExternalApi(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1/information"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "title": "Late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let provider = SpoonacularProvider::new(
        "test-key".to_string(),
        server.uri(),
        Duration::from_millis(200),
        10,
    )
    .unwrap();

    let err = assert_err!(provider.get_details(1).await);
    assert!(matches!(err, AppError::ProviderNetwork(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let provider = SpoonacularProvider::new(
        "test-key".to_string(),
        "http://127.0.0.1:1".to_string(),
        Duration::from_secs(2),
        10,
    )
    .unwrap();

    let err = assert_err!(provider.get_details(1).await);
    assert!(matches!(err, AppError::ProviderNetwork(_)));
}

#[tokio::test]
async fn test_empty_ingredient_query_never_hits_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = assert_err!(provider.search_ingredients("  ").await);
    assert!(matches!(err, AppError::InvalidInput(_)));
}

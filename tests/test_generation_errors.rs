use mockito::{Matcher, Server};
use pantry_chef::providers::OpenAIProvider;
use pantry_chef::{
    DetailOutcome, DetailService, GenerationClient, RecipeDetailer, RecipeSuggester, Session,
    SessionState, SuggestionOutcome, SuggestionService,
};
use serde_json::json;
use std::sync::Arc;

/// Wrap `content` in an OpenAI chat completion envelope
fn completion(content: &serde_json::Value) -> String {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": content.to_string() }
        }]
    })
    .to_string()
}

fn client_for(server: &Server) -> GenerationClient {
    GenerationClient::new(Box::new(OpenAIProvider::with_base_url(
        "fake_api_key".to_string(),
        server.url(),
        "gpt-4o-mini".to_string(),
    )))
}

fn pasta_json() -> serde_json::Value {
    json!({
        "name": "Pasta",
        "description": "Garlicky tomato pasta.",
        "prepTime": "10 minutes",
        "cookTime": "15 minutes",
        "servings": "2 servings",
        "ingredients": ["200g spaghetti", "3 tomatoes"],
        "instructions": ["Boil.", "Toss."]
    })
}

#[tokio::test]
async fn test_missing_servings_is_schema_violation() {
    let mut server = Server::new_async().await;
    let mut recipe = pasta_json();
    recipe.as_object_mut().unwrap().remove("servings");

    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&recipe))
        .create_async()
        .await;

    let service = DetailService::new(client_for(&server));
    let err = service.get_details("Pasta").await.unwrap_err();

    assert!(err.is_schema_violation());
    assert!(!err.is_generation_failure());
    assert!(err.to_string().contains("servings"));
}

#[tokio::test]
async fn test_server_error_is_generation_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let service = DetailService::new(client_for(&server));
    let err = service.get_details("Pasta").await.unwrap_err();

    assert!(err.is_generation_failure());
    assert!(!err.is_schema_violation());
}

#[tokio::test]
async fn test_unreachable_model_is_generation_failure() {
    // Nothing listens on port 9 on a test host
    let client = GenerationClient::new(Box::new(OpenAIProvider::with_base_url(
        "fake_api_key".to_string(),
        "http://127.0.0.1:9".to_string(),
        "gpt-4o-mini".to_string(),
    )));

    let err = SuggestionService::new(client)
        .suggest(&["Egg".to_string()], &[])
        .await
        .unwrap_err();
    assert!(err.is_generation_failure());
}

#[tokio::test]
async fn test_full_session_round_trip() {
    let mut server = Server::new_async().await;
    let suggest_mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("Suggest recipes".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&json!({"recipes": ["Pasta", "Bruschetta"]})))
        .expect(1)
        .create_async()
        .await;
    let detail_mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex("detailed but straightforward".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&pasta_json()))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let suggester: Arc<dyn RecipeSuggester> = Arc::new(SuggestionService::new(client.clone()));
    let detailer: Arc<dyn RecipeDetailer> = Arc::new(DetailService::new(client));
    let mut session = Session::new(
        SessionState::with_seed(["Tomatoes", "Garlic"]),
        suggester,
        detailer,
    );

    assert_eq!(
        session.generate_suggestions().await.unwrap(),
        SuggestionOutcome::Loaded(2)
    );
    assert_eq!(session.select_recipe("Pasta").await, DetailOutcome::Applied);
    assert_eq!(session.state_mut().toggle_selected_favorite(), Some(true));

    // Second selection comes from favorites; the detail mock stays at one hit
    session.state_mut().close_dialog();
    assert_eq!(session.select_recipe("Pasta").await, DetailOutcome::Cached);
    assert_eq!(session.state().selected().unwrap().recipe.servings, "2 servings");

    suggest_mock.assert_async().await;
    detail_mock.assert_async().await;
}

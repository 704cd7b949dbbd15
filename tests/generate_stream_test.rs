// Integration tests for the streamed generate endpoint

use magpie::config::GenerationConfig;
use magpie::ollama::{GenerateRequest, OllamaClient};

fn request(prompt: &str) -> GenerateRequest {
    GenerationConfig::default().request(prompt)
}

#[tokio::test]
async fn test_fragments_accumulate_in_arrival_order() {
    let mut server = mockito::Server::new_async().await;
    let body = concat!(
        "{\"response\":\"Hello\"}\n",
        "{\"response\":\", \"}\n",
        "{\"response\":\"world\",\"done\":true}\n",
    );
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    let out = client.generate(&request("hi")).await.unwrap();

    assert_eq!(out, "Hello, world");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_fragment_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let body = concat!(
        "{\"response\":\"before\"}\n",
        "this line is not json\n",
        "{\"response\":\" after\",\"done\":true}\n",
    );
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    let out = client.generate(&request("hi")).await.unwrap();

    assert_eq!(out, "before after");
}

#[tokio::test]
async fn test_accumulation_stops_at_done() {
    let mut server = mockito::Server::new_async().await;
    let body = concat!(
        "{\"response\":\"kept\",\"done\":true}\n",
        "{\"response\":\" dropped\"}\n",
    );
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    let out = client.generate(&request("hi")).await.unwrap();

    assert_eq!(out, "kept");
}

#[tokio::test]
async fn test_trailing_fragment_without_newline() {
    let mut server = mockito::Server::new_async().await;
    let body = "{\"response\":\"first \"}\n{\"response\":\"last\"}";
    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    let out = client.generate(&request("hi")).await.unwrap();

    assert_eq!(out, "first last");
}

#[tokio::test]
async fn test_non_200_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/generate")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    let err = client.generate(&request("hi")).await.unwrap_err();

    let message = format!("{}", err);
    assert!(message.contains("500"), "error should embed status: {}", message);
    assert!(message.contains("internal error"));
}

#[tokio::test]
async fn test_health_check() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body("Ollama is running")
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    assert!(client.health().await.is_ok());

    let unreachable = OllamaClient::new("http://127.0.0.1:1").unwrap();
    assert!(unreachable.health().await.is_err());
}

#[tokio::test]
async fn test_request_body_carries_generation_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "llama3",
            "prompt": "hi",
            "top_p": 0.95,
        })))
        .with_status(200)
        .with_body("{\"response\":\"ok\",\"done\":true}\n")
        .create_async()
        .await;

    let client = OllamaClient::new(server.url()).unwrap();
    client.generate(&request("hi")).await.unwrap();
    mock.assert_async().await;
}

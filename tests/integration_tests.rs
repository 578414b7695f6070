//! Integration tests for LimerickBot against local mock services

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use limerick_bot::agent::{Agent, AgentRuntime, OpenAiRuntime};
use limerick_bot::chat::ChatSession;
use limerick_bot::config::{ModelConfig, ServicesConfig};
use limerick_bot::models::{Coordinates, FactRequest};
use limerick_bot::tools::{self, ToolSet};
use limerick_bot::{FactFetcher, Geocoder, LimerickError, WeatherFetcher, http};
use serde_json::{Value, json};

type Params = Query<HashMap<String, String>>;

/// Serve a router on an ephemeral loopback port and return its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Nominatim and Open-Meteo stand-ins: Paris resolves, everything else does not
async fn mock_weather_services() -> String {
    async fn search(Query(params): Params) -> Json<Value> {
        assert_eq!(params.get("format").map(String::as_str), Some("json"));
        assert_eq!(params.get("limit").map(String::as_str), Some("1"));
        match params.get("q").map(String::as_str) {
            Some("Paris, France") => Json(json!([
                {"place_id": 1, "lat": "48.8588897", "lon": "2.3200410", "display_name": "Paris"}
            ])),
            _ => Json(json!([])),
        }
    }

    async fn forecast(Query(params): Params) -> Json<Value> {
        assert_eq!(params.get("current_weather").map(String::as_str), Some("true"));
        match params.get("latitude").map(String::as_str) {
            Some("48.8588897") => Json(json!({
                "latitude": 48.86,
                "longitude": 2.32,
                "current_weather": {"temperature": 14.2, "windspeed": 9.4, "weathercode": 3}
            })),
            _ => Json(json!({"latitude": 0.0, "longitude": 0.0})),
        }
    }

    serve(
        Router::new()
            .route("/search", get(search))
            .route("/forecast", get(forecast)),
    )
    .await
}

fn services(base: &str) -> ServicesConfig {
    ServicesConfig {
        geocoding_url: format!("{base}/search"),
        forecast_url: format!("{base}/forecast"),
        facts_url: format!("{base}/facts"),
        ..ServicesConfig::default()
    }
}

#[tokio::test]
async fn test_paris_weather_is_overcast() {
    let base = mock_weather_services().await;
    let client = http::build_client("weather-agent/1.0").unwrap();
    let tools = tools::standard_tools(&client, &services(&base));

    let result = tools
        .call("weather_tool", json!({"location": "Paris, France"}))
        .await
        .unwrap();

    assert_eq!(result["location"], "Paris, France");
    assert_eq!(result["condition"], "Overcast");
    assert_eq!(result["temperature_celsius"], 14.2);
    assert!(result["time_retrieved"].as_str().unwrap().starts_with("20"));
}

#[tokio::test]
async fn test_geocoder_reports_unknown_location() {
    let base = mock_weather_services().await;
    let geocoder = Geocoder::new(reqwest::Client::new(), format!("{base}/search"));

    let err = geocoder.geocode("Atlantis").await.unwrap_err();
    match err {
        LimerickError::LocationNotFound { query } => assert_eq!(query, "Atlantis"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_forecast_without_current_weather() {
    let base = mock_weather_services().await;
    let fetcher = WeatherFetcher::new(reqwest::Client::new(), format!("{base}/forecast"));

    let err = fetcher
        .current_conditions(&Coordinates::new("0", "0"))
        .await
        .unwrap_err();
    assert!(matches!(err, LimerickError::WeatherUnavailable));
}

#[tokio::test]
async fn test_geocoder_http_error_propagates() {
    let base = serve(Router::new().route(
        "/search",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;
    let geocoder = Geocoder::new(reqwest::Client::new(), format!("{base}/search"));

    let err = geocoder.geocode("Paris, France").await.unwrap_err();
    assert!(matches!(err, LimerickError::Api { .. }));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    async fn search(headers: axum::http::HeaderMap) -> Json<Value> {
        let agent = headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!([{"lat": agent, "lon": "0"}]))
    }

    let base = serve(Router::new().route("/search", get(search))).await;
    let client = http::build_client("weather-agent/1.0").unwrap();
    let geocoder = Geocoder::new(client, format!("{base}/search"));

    let coordinates = geocoder.geocode("anywhere").await.unwrap();
    assert_eq!(coordinates.latitude, "weather-agent/1.0");
}

#[tokio::test]
async fn test_fact_from_api() {
    let base = serve(Router::new().route(
        "/facts",
        get(|Query(params): Params| async move {
            // The category hint stays local: only the language is sent.
            assert_eq!(params.get("language").map(String::as_str), Some("en"));
            assert!(!params.contains_key("category"));
            assert_eq!(params.len(), 1);
            Json(json!({"id": "1", "text": "Octopuses have three hearts.", "language": "en"}))
        }),
    ))
    .await;
    let fetcher = FactFetcher::new(
        reqwest::Client::new(),
        format!("{base}/facts"),
        Duration::from_secs(5),
    );

    let fact = fetcher
        .random_fact(&FactRequest::with_category("Animal"))
        .await;
    assert_eq!(fact.content, "Octopuses have three hearts.");
    assert_eq!(fact.source, "UselessFacts API");
    assert_eq!(fact.category.as_deref(), Some("Animal"));
}

#[tokio::test]
async fn test_fact_timeout_returns_fallback_mapping() {
    let base = serve(Router::new().route(
        "/facts",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"text": "too late"}))
        }),
    ))
    .await;
    let client = reqwest::Client::new();
    let fetcher = FactFetcher::new(client.clone(), format!("{base}/facts"), Duration::from_millis(200));

    let err = fetcher.fetch(&FactRequest::default()).await.unwrap_err();
    assert!(matches!(err, limerick_bot::FetchError::Timeout));

    let tools = ToolSet::new().with_tool(tools::RandomFactTool::new(fetcher));
    let result = tools.call("random_fact_tool", json!({})).await.unwrap();
    assert_eq!(
        result,
        json!({
            "content": "Did you know APIs sometimes fail? That's a fact!",
            "category": null,
            "source": "Fallback fact"
        })
    );
}

#[tokio::test]
async fn test_fact_http_error_and_malformed_body_fall_back() {
    let base = serve(
        Router::new()
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/garbled", get(|| async { "<html>oops</html>" })),
    )
    .await;

    for path in ["broken", "garbled"] {
        let fetcher = FactFetcher::new(
            reqwest::Client::new(),
            format!("{base}/{path}"),
            Duration::from_secs(5),
        );
        let fact = fetcher.random_fact(&FactRequest::default()).await;
        assert!(fact.is_fallback(), "{path} should fall back");
        assert!(!fact.content.is_empty());
    }
}

/// Chat-completions stand-in: asks for the weather tool once, then echoes the tool result
#[derive(Clone, Default)]
struct ModelState {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn chat_completions(State(state): State<ModelState>, Json(body): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(body.clone());
    let messages = body["messages"].as_array().cloned().unwrap_or_default();

    if let Some(tool_message) = messages.iter().find(|m| m["role"] == "tool") {
        let result: Value = serde_json::from_str(tool_message["content"].as_str().unwrap()).unwrap();
        return Json(json!({
            "choices": [{"message": {"role": "assistant", "content": format!("It is {} in {}", result["condition"].as_str().unwrap(), result["location"].as_str().unwrap())}}]
        }));
    }

    let user = messages
        .iter()
        .find(|m| m["role"] == "user")
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default();
    let location = user.trim_start_matches("weather in ");
    Json(json!({
        "choices": [{"message": {
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "weather_tool", "arguments": json!({"location": location}).to_string()}
            }]
        }}]
    }))
}

async fn mock_model(state: ModelState) -> String {
    let router = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state);
    format!("{}/v1", serve(router).await)
}

fn model_config(base_url: String) -> ModelConfig {
    ModelConfig {
        base_url,
        ..ModelConfig::default()
    }
}

#[tokio::test]
async fn test_runtime_folds_tool_result_into_reply() {
    let services_base = mock_weather_services().await;
    let state = ModelState::default();
    let model_base = mock_model(state.clone()).await;

    let client = http::build_client("weather-agent/1.0").unwrap();
    let agent = Agent::limerick_bot(tools::standard_tools(&client, &services(&services_base)));
    let runtime = OpenAiRuntime::new(model_config(model_base));

    let reply = runtime.run(&agent, "weather in Paris, France").await.unwrap();
    assert_eq!(reply.as_deref(), Some("It is Overcast in Paris, France"));

    let requests = state.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["messages"][0]["role"], "system");
    assert!(requests[0]["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("weather_tool"));
    assert_eq!(requests[0]["tools"][0]["function"]["name"], "weather_tool");
    assert_eq!(requests[1]["messages"][3]["tool_call_id"], "call_1");
}

#[tokio::test]
async fn test_unknown_location_becomes_apology() {
    let services_base = mock_weather_services().await;
    let model_base = mock_model(ModelState::default()).await;

    let client = http::build_client("weather-agent/1.0").unwrap();
    let agent = Agent::limerick_bot(tools::standard_tools(&client, &services(&services_base)));
    let session = ChatSession::new(agent, OpenAiRuntime::new(model_config(model_base)));

    let reply = session.process_input("weather in Tokyo").await;
    let message = LimerickError::location_not_found("Tokyo").to_string();
    assert!(reply.contains(&format!("With this message: \"{message}\".")));
}

#[tokio::test]
async fn test_model_endpoint_failure_becomes_apology() {
    let base = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    ))
    .await;

    let session = ChatSession::new(
        Agent::limerick_bot(ToolSet::new()),
        OpenAiRuntime::new(model_config(format!("{base}/v1"))),
    );

    let mut output = Vec::new();
    session_run(session, b"hello\nexit\n", &mut output).await;

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("model crashed"));
    assert!(printed.contains("Goodbye!"));
}

#[tokio::test]
async fn test_unreachable_model_apology_keeps_cause() {
    let session = ChatSession::new(
        Agent::limerick_bot(ToolSet::new()),
        OpenAiRuntime::new(model_config("http://127.0.0.1:9/v1".to_string())),
    );

    let reply = session.process_input("hello").await;
    assert!(reply.contains("With this message: \"Model request failed: "));
    assert!(!reply.contains("\"Model request failed\"."));
}

#[tokio::test]
async fn test_runtime_gives_up_after_max_turns() {
    // Always asks for a tool, never answers.
    let base = serve(Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            Json(json!({"choices": [{"message": {"content": null, "tool_calls": [{
                "id": "loop",
                "type": "function",
                "function": {"name": "random_fact_tool", "arguments": "{}"}
            }]}}]}))
        }),
    ))
    .await;

    let facts = FactFetcher::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9/facts",
        Duration::from_secs(1),
    );
    let agent = Agent::limerick_bot(ToolSet::new().with_tool(tools::RandomFactTool::new(facts)));
    let mut config = model_config(format!("{base}/v1"));
    config.max_turns = 2;

    let err = OpenAiRuntime::new(config).run(&agent, "a fact please").await.unwrap_err();
    assert_eq!(err.to_string(), "Max turns (2) exceeded");
}

async fn session_run<R: AgentRuntime>(mut session: ChatSession<R>, input: &[u8], output: &mut Vec<u8>) {
    session.run(input, output).await.unwrap();
}

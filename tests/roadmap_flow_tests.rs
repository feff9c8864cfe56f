//! Tests for the roadmap flow using the mock provider.

mod common;

use std::sync::{Arc, Mutex};

use common::{node_json, MockProvider};
use pretty_assertions::assert_eq;
use roadmap_forge::error::{ForgeError, GenerationFailure};
use roadmap_forge::flow::Flow;
use roadmap_forge::roadmap::{Roadmap, RoadmapFlow, ROADMAP_SYSTEM_INSTRUCTION};
use roadmap_forge::types::*;
use serde_json::json;

fn flow_with(provider: &Arc<MockProvider>) -> RoadmapFlow {
    RoadmapFlow::new(provider.clone()).unwrap()
}

#[tokio::test]
async fn returns_nodes_in_model_order() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!({
        "roadmap": [
            node_json("3", "Policy"),
            node_json("1", "Solar"),
            node_json("2", "Storage")
        ]
    }));

    let roadmap = flow_with(&provider)
        .run("Renewable energy policy basics".into())
        .await
        .unwrap();

    let ids: Vec<&str> = roadmap.iter().map(|n| n.node_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
    assert_eq!(roadmap.nodes[0].topic, "Policy");
    assert_eq!(roadmap.nodes[1].estimated_time, "3 hours");
}

#[tokio::test]
async fn request_carries_instructions_schema_and_zero_temperature() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!({"roadmap": [node_json("1", "Wind")]}));

    flow_with(&provider)
        .run("Wind turbines 101".into())
        .await
        .unwrap();

    let request = provider.last_request();
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].text(), ROADMAP_SYSTEM_INSTRUCTION);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(
        request.messages[1].text(),
        "Create a detailed roadmap for the given text: Wind turbines 101"
    );
    assert_eq!(request.settings.temperature, Some(0.0));

    let response = request.settings.response_schema.expect("response schema must be set");
    assert_eq!(response.name, "Roadmap");
    assert_eq!(&response.schema, Roadmap::output_schema().unwrap().schema());
}

#[tokio::test]
async fn empty_roadmap_is_valid() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!({"roadmap": []}));

    let roadmap = flow_with(&provider).run(String::new()).await.unwrap();
    assert!(roadmap.is_empty());
}

#[tokio::test]
async fn empty_input_yields_roadmap_or_generation_failure() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_empty(Some(FinishReason::Stop));

    let err = flow_with(&provider).run(String::new()).await.unwrap_err();
    assert!(err.is_generation_failure(), "{err}");
}

#[tokio::test]
async fn node_missing_a_field_is_rejected() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    let mut partial = node_json("2", "Grid");
    partial.as_object_mut().unwrap().remove("estimated_time");
    provider.queue_json(json!({"roadmap": [node_json("1", "Solar"), partial]}));

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    match err {
        ForgeError::Generation(GenerationFailure::SchemaViolation { errors, raw }) => {
            assert!(errors.iter().any(|e| e.contains("estimated_time")), "{errors:?}");
            assert!(raw.contains("Grid"));
        }
        other => panic!("expected schema violation, got {other:?}"),
    }
}

#[tokio::test]
async fn non_string_field_is_not_coerced() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    let mut node = node_json("1", "Hydro");
    node["estimated_time"] = json!(4);
    provider.queue_json(json!({"roadmap": [node]}));

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Generation(GenerationFailure::SchemaViolation { .. })
    ));
}

#[tokio::test]
async fn bare_array_without_wrapper_is_rejected() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!([node_json("1", "Solar")]));

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Generation(GenerationFailure::SchemaViolation { .. })
    ));
}

#[tokio::test]
async fn prose_reply_is_malformed_output() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_response("Here is your roadmap: first learn solar, then wind.");

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Generation(GenerationFailure::MalformedOutput { .. })
    ));
}

#[tokio::test]
async fn safety_block_is_empty_output() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_empty(Some(FinishReason::Safety));

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Generation(GenerationFailure::EmptyOutput {
            finish_reason: Some(FinishReason::Safety)
        })
    ));
}

#[tokio::test]
async fn remote_failure_propagates_without_retry() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_error(ForgeError::api(503, "overloaded"));
    provider.queue_json(json!({"roadmap": []}));

    let err = flow_with(&provider).run("doc".into()).await.unwrap_err();
    assert!(matches!(err, ForgeError::Api { status: 503, .. }));
    assert!(!err.is_generation_failure());
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn observer_sees_validated_output_only() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!({"roadmap": [node_json("1", "Solar")]}));
    provider.queue_response("not json");

    let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let flow = flow_with(&provider).with_observer(Arc::new(move |name: &str, roadmap: &Roadmap| {
        sink.lock().unwrap().push((name.to_string(), roadmap.len()));
    }));

    flow.run("first".into()).await.unwrap();
    assert!(flow.run("second".into()).await.is_err());

    assert_eq!(*seen.lock().unwrap(), vec![("roadmapFlow".to_string(), 1)]);
}

#[tokio::test]
async fn generate_exposes_raw_text_and_usage() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_response("```json\n{\"roadmap\": []}\n```");

    let result = flow_with(&provider).generate("doc").await.unwrap();
    assert!(result.object.is_empty());
    assert!(result.raw_text.starts_with("```json"));
    assert_eq!(result.usage.total_tokens, 30);
    assert_eq!(result.finish_reason, Some(FinishReason::Stop));
}

#[tokio::test]
async fn max_tokens_keeps_temperature_pinned() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_json(json!({"roadmap": []}));

    flow_with(&provider)
        .with_max_tokens(2048)
        .run("doc".into())
        .await
        .unwrap();

    let settings = provider.last_request().settings;
    assert_eq!(settings.max_tokens, Some(2048));
    assert_eq!(settings.temperature, Some(0.0));
}

#[tokio::test]
async fn concurrent_runs_share_one_flow() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    for i in 0..4 {
        provider.queue_json(json!({"roadmap": [node_json(&i.to_string(), "Topic")]}));
    }
    let flow = Arc::new(flow_with(&provider));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let flow = flow.clone();
            tokio::spawn(async move { flow.run(format!("doc {i}")).await })
        })
        .collect();

    for handle in handles {
        let roadmap = handle.await.unwrap().unwrap();
        assert_eq!(roadmap.len(), 1);
    }
    assert_eq!(provider.requests().len(), 4);
}

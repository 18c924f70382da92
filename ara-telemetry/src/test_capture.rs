use crate::capture_subscriber;
use crate::memory::CapturedEvents;

#[test]
fn captures_stage_fields_and_message() {
    let storage = CapturedEvents::new();
    tracing::subscriber::with_default(capture_subscriber(storage.clone()), || {
        tracing::info!(stage = "classify", category = "greeting", query_len = 5u64, "query classified");
        tracing::warn!(stage = "load", error = %"file not found", "continuing with an empty corpus");
    });

    let events = storage.events();
    assert_eq!(events.len(), 2);

    let classify = &events[0];
    assert_eq!(classify.level, "INFO");
    assert_eq!(classify.stage(), Some("classify"));
    assert_eq!(classify.field_str("category"), Some("greeting"));
    assert_eq!(classify.fields.get("query_len"), Some(&serde_json::json!(5)));
    assert_eq!(classify.message.as_deref(), Some("query classified"));

    assert_eq!(events[1].field_str("error"), Some("file not found"));
    assert_eq!(storage.stages(), vec!["classify", "load"]);
}

#[test]
fn filters_by_stage_and_clears() {
    let storage = CapturedEvents::new();
    tracing::subscriber::with_default(capture_subscriber(storage.clone()), || {
        tracing::info!(stage = "retrieve", result_count = 2u64, "retrieved facts");
        tracing::info!("no stage here");
        tracing::info!(stage = "retrieve", result_count = 0u64, "retrieved facts");
    });

    assert_eq!(storage.with_stage("retrieve").len(), 2);
    assert_eq!(storage.events().len(), 3);

    storage.clear();
    assert!(storage.events().is_empty());
}

#[tokio::test]
async fn events_from_async_code_on_current_thread_are_captured() {
    let storage = CapturedEvents::new();
    let _guard = tracing::subscriber::set_default(capture_subscriber(storage.clone()));

    async {
        tracing::info!(stage = "compose", response_type = "topic_match", "response composed");
    }
    .await;

    assert_eq!(storage.with_stage("compose").len(), 1);
}

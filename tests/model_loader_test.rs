mod common;

use component_detector::{ModelError, ModelLoader, ModelSource};
use mockito::Server;

use common::{METADATA_JSON, MODEL_JSON};

#[tokio::test]
async fn test_fetches_both_documents() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new_async().await;
    let model_mock = server
        .mock("GET", "/models/xyz/model.json")
        .with_status(200)
        .with_body(MODEL_JSON)
        .create_async()
        .await;
    let metadata_mock = server
        .mock("GET", "/models/xyz/metadata.json")
        .with_status(200)
        .with_body(METADATA_JSON)
        .create_async()
        .await;

    let source = ModelSource::parse(&format!("{}/models/xyz", server.url()))?;
    let definition = ModelLoader::new().load_definition(&source).await?;

    model_mock.assert_async().await;
    metadata_mock.assert_async().await;
    assert_eq!(definition.metadata.labels, vec!["Resistor", "LED", "Capacitor"]);
    assert_eq!(definition.metadata.tm_version.as_deref(), Some("2.4.7"));
    assert_eq!(definition.topology.format.as_deref(), Some("layers-model"));
    assert_eq!(definition.topology.weight_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_fingerprint_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/m/model.json")
        .with_body(MODEL_JSON)
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/m/metadata.json")
        .with_body(METADATA_JSON)
        .expect(2)
        .create_async()
        .await;

    let loader = ModelLoader::new();
    let source = ModelSource::parse(&format!("{}/m/", server.url()))?;
    let first = loader.load_definition(&source).await?;
    let second = loader.load_definition(&source).await?;
    assert_eq!(first.fingerprint, second.fingerprint);
    assert!(first.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    Ok(())
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/m/model.json")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/m/metadata.json")
        .with_body(METADATA_JSON)
        .create_async()
        .await;

    let source = ModelSource::parse(&format!("{}/m", server.url())).unwrap();
    let result = ModelLoader::new().load_definition(&source).await;
    assert!(matches!(result, Err(ModelError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_model_without_weights_is_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/m/model.json")
        .with_body(r#"{"modelTopology": {"class_name": "Sequential"}, "weightsManifest": []}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/m/metadata.json")
        .with_body(METADATA_JSON)
        .create_async()
        .await;

    let source = ModelSource::parse(&format!("{}/m", server.url())).unwrap();
    let result = ModelLoader::new().load_definition(&source).await;
    assert!(matches!(result, Err(ModelError::InvalidMetadata(_))));
}

#[tokio::test]
async fn test_invalid_json_is_reported_per_file() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/m/model.json")
        .with_body("<html>not json</html>")
        .create_async()
        .await;
    server
        .mock("GET", "/m/metadata.json")
        .with_body(METADATA_JSON)
        .create_async()
        .await;

    let source = ModelSource::parse(&format!("{}/m", server.url())).unwrap();
    match ModelLoader::new().load_definition(&source).await {
        Err(ModelError::Malformed { file, .. }) => assert_eq!(file, "model.json"),
        other => panic!("expected malformed model.json, got {:?}", other),
    }
}

#[tokio::test]
async fn test_local_directory_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("model.json"), MODEL_JSON).unwrap();

    let source = ModelSource::parse(&dir.path().to_string_lossy()).unwrap();
    let result = ModelLoader::new().load_definition(&source).await;
    assert!(matches!(result, Err(ModelError::IoError(_))));
}

#[test]
fn test_trailing_slash_is_appended() {
    let without = ModelSource::parse("https://teachablemachine.withgoogle.com/models/bN8AfPvwC").unwrap();
    let with = ModelSource::parse("https://teachablemachine.withgoogle.com/models/bN8AfPvwC/").unwrap();
    assert_eq!(without, with);
    assert_eq!(
        without.model_url(),
        "https://teachablemachine.withgoogle.com/models/bN8AfPvwC/model.json"
    );
}

// End-to-end pipeline tests against a scripted gateway.

mod test_utils;

use coder_core::{GenerationRequest, Stage};
use coder_error::{CoderErrorKind, StageErrorKind};
use coder_pipeline::Pipeline;
use std::sync::Arc;
use test_utils::{MockGateway, WORKSPACE_SCHEMA, WORKSPACE_STATE_MACHINE};

fn workspace_request() -> GenerationRequest {
    GenerationRequest::builder()
        .sql_schema(WORKSPACE_SCHEMA)
        .state_machine(WORKSPACE_STATE_MACHINE)
        .current_storage_interface("package storage\n\ntype Storage interface {}\n")
        .current_storage_impl("package storage\n\ntype postgrestStorage struct{}\n")
        .build()
        .expect("valid request")
}

#[tokio::test]
async fn test_workspace_generates_five_files() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::workspace());
    let pipeline = Pipeline::new(gateway.clone());

    let artifacts = pipeline.run(&workspace_request()).await?;

    let paths: Vec<String> = artifacts
        .iter()
        .map(|a| a.path().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        paths,
        vec![
            "api/v1/workspace_types.go",
            "pkg/storage/storage.go",
            "pkg/storage/postgrest.go",
            "controllers/workspace_controller.go",
            "controllers/workspace_controller_test.go",
        ]
    );
    assert!(artifacts.iter().all(|a| !a.content().trim().is_empty()));
    assert_eq!(gateway.calls().len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_stage_order() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::workspace());
    Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await?;

    let stages = gateway.stages_called();
    assert_eq!(stages.first(), Some(&Stage::ResourceType));
    assert_eq!(stages.last(), Some(&Stage::Controller));
    assert!(stages.contains(&Stage::StorageInterface));
    assert!(stages.contains(&Stage::StorageImpl));
    Ok(())
}

#[tokio::test]
async fn test_controller_sees_exact_prior_outputs() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::workspace());
    let artifacts = Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await?;

    let controller = gateway
        .exchange_for(Stage::Controller)
        .expect("controller stage called");
    let text = controller.user_text();

    assert!(text.contains("<input_resource_name>workspace</input_resource_name>"));
    assert!(text.contains(&format!(
        "<input_state_machine>{}</input_state_machine>",
        WORKSPACE_STATE_MACHINE
    )));
    for artifact in artifacts.iter().take(3) {
        assert!(
            text.contains(artifact.content().as_str()),
            "controller input lacks {}",
            artifact.path().display()
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_stage_inputs_and_preferences() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::workspace());
    Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await?;

    let resource_type = gateway.exchange_for(Stage::ResourceType).unwrap();
    assert!(resource_type
        .user_text()
        .contains(&format!("<input_sql_schema>{}</input_sql_schema>", WORKSPACE_SCHEMA)));
    assert!(resource_type.model_preferences().is_none());
    assert_eq!(*resource_type.max_tokens(), 32_768);

    let interface = gateway.exchange_for(Stage::StorageInterface).unwrap();
    assert!(interface.user_text().contains(
        "<input_storage_interface>package storage\n\ntype Storage interface {}\n</input_storage_interface>"
    ));
    assert!(interface.model_preferences().is_none());

    let storage_impl = gateway.exchange_for(Stage::StorageImpl).unwrap();
    assert!(storage_impl
        .user_text()
        .contains("<input_resource_name>workspace</input_resource_name>"));
    assert_eq!(
        storage_impl
            .model_preferences()
            .and_then(|p| *p.intelligence_priority()),
        Some(1.0)
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_field_stops_pipeline() {
    let gateway = Arc::new(
        MockGateway::workspace().respond(Stage::ResourceType, "```yaml\nresource_name: workspace\n```"),
    );

    let err = Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await
        .expect_err("go_type is missing");

    match err.kind() {
        CoderErrorKind::Stage(e) => {
            let StageErrorKind::SchemaViolation { stage, missing, .. } = &e.kind;
            assert_eq!(stage, "resource_type");
            assert_eq!(missing, &vec!["go_type".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(gateway.stages_called(), vec![Stage::ResourceType]);
}

#[tokio::test]
async fn test_unusable_resource_name_is_rejected() {
    let gateway = Arc::new(MockGateway::workspace().respond(
        Stage::ResourceType,
        "```yaml\nresource_name: work space\ngo_type: x\n```",
    ));

    let err = Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await
        .expect_err("resource name has a space");

    assert!(format!("{}", err).contains("mistyped: [resource_name]"));
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_unbranchable_resource_name_stops_after_first_stage() {
    for name in ["role:v2", "role*", "role..v2", "role.lock"] {
        let gateway = Arc::new(MockGateway::workspace().respond(
            Stage::ResourceType,
            &format!("```yaml\nresource_name: \"{}\"\ngo_type: x\n```", name),
        ));

        let err = Pipeline::new(gateway.clone())
            .run(&workspace_request())
            .await
            .expect_err("not a valid branch component");

        assert!(
            format!("{}", err).contains("mistyped: [resource_name]"),
            "{} was accepted",
            name
        );
        assert_eq!(gateway.calls().len(), 1);
    }
}

#[tokio::test]
async fn test_ambiguous_controller_output_aborts() {
    let gateway = Arc::new(MockGateway::workspace().respond(
        Stage::Controller,
        "```yaml\ncontroller_impl: a\n```\n```yaml\ncontroller_test: b\n```",
    ));

    let err = Pipeline::new(gateway.clone())
        .run(&workspace_request())
        .await
        .expect_err("two blocks");

    assert!(matches!(err.kind(), CoderErrorKind::Extraction(_)));
    assert_eq!(gateway.calls().len(), 4);
}

#[tokio::test]
async fn test_absent_current_sources_sent_empty() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::workspace());
    let request = GenerationRequest::builder()
        .sql_schema(WORKSPACE_SCHEMA)
        .state_machine(WORKSPACE_STATE_MACHINE)
        .build()?;

    Pipeline::new(gateway.clone()).run(&request).await?;

    let interface = gateway.exchange_for(Stage::StorageInterface).unwrap();
    assert!(interface
        .user_text()
        .contains("<input_storage_interface></input_storage_interface>"));
    Ok(())
}

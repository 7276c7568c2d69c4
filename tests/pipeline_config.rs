// tests/pipeline_config.rs

use passgraph::config::{PipelineFile, load_and_validate, load_from_path, parse_and_validate};
use passgraph::errors::PassgraphError;
use passgraph::types::ReloadFailureBehaviour;
use passgraph_test_utils::builders::{PassConfigBuilder, PipelineBuilder};
use passgraph_test_utils::pipeline_file;

#[test]
fn test_load_full_pipeline() {
    let file = pipeline_file(
        r#"
[config]
frames = 3
on_reload_error = "exit"

[resource.color]
description = "HDR colour target"

[pass.geometry]
writes = ["color", "depth"]

[pass.lighting]
reads = ["color"]
optional_reads = ["ssao"]
writes = ["final"]
"#,
    );

    let pipeline = load_and_validate(file.path()).unwrap();

    assert_eq!(pipeline.config().frames, 3);
    assert!(pipeline.config().allow_undeclared_resources);
    assert_eq!(pipeline.config().on_reload_error, ReloadFailureBehaviour::Exit);
    assert_eq!(
        pipeline.resources()["color"].description.as_deref(),
        Some("HDR colour target")
    );
    assert_eq!(pipeline.passes()["lighting"].optional_reads, vec!["ssao"]);

    let names: Vec<&str> = pipeline.resource_names().into_iter().collect();
    assert_eq!(names, vec!["color", "depth", "final"]);
}

#[test]
fn test_defaults_apply_without_config_section() {
    let pipeline = parse_and_validate("[pass.only]\n").unwrap();

    assert_eq!(pipeline.config().frames, 1);
    assert!(pipeline.config().allow_undeclared_resources);
    assert_eq!(pipeline.config().on_reload_error, ReloadFailureBehaviour::KeepLast);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_from_path(dir.path().join("Missing.toml"));

    assert!(matches!(result, Err(PassgraphError::IoError(_))));
}

#[test]
fn test_bad_toml_is_toml_error() {
    let file = pipeline_file("[pass.geometry\nwrites = [");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PassgraphError::TomlError(_))
    ));
}

#[test]
fn test_unknown_reload_behaviour_is_rejected() {
    let result = parse_and_validate("[config]\non_reload_error = \"retry\"\n[pass.a]\n");

    assert!(matches!(result, Err(PassgraphError::TomlError(_))));
}

#[test]
fn test_empty_pipeline_is_rejected() {
    match parse_and_validate("[config]\nframes = 1\n") {
        Err(PassgraphError::PipelineError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("expected PipelineError, got {other:?}"),
    }
}

#[test]
fn test_zero_frames_is_rejected() {
    let raw = PipelineBuilder::new()
        .frames(0)
        .with_pass("geometry", PassConfigBuilder::new().build())
        .build_raw();

    match PipelineFile::try_from(raw) {
        Err(PassgraphError::PipelineError(msg)) => assert!(msg.contains("frames")),
        other => panic!("expected PipelineError, got {other:?}"),
    }
}

#[test]
fn test_undeclared_resource_rejected_when_disallowed() {
    let raw = PipelineBuilder::new()
        .allow_undeclared_resources(false)
        .with_resource("color")
        .with_pass("geometry", PassConfigBuilder::new().writes("color").build())
        .with_pass("post", PassConfigBuilder::new().reads("bloom").build())
        .build_raw();

    match PipelineFile::try_from(raw) {
        Err(PassgraphError::PipelineError(msg)) => {
            assert!(msg.contains("'post'"), "got: {msg}");
            assert!(msg.contains("'bloom'"), "got: {msg}");
        }
        other => panic!("expected PipelineError, got {other:?}"),
    }
}

#[test]
fn test_undeclared_optional_read_is_allowed_when_disallowed() {
    let pipeline = PipelineBuilder::new()
        .allow_undeclared_resources(false)
        .with_resource("color")
        .with_pass("geometry", PassConfigBuilder::new().writes("color").build())
        .with_pass(
            "post",
            PassConfigBuilder::new()
                .reads("color")
                .optional_reads("bloom")
                .build(),
        )
        .build();

    let names: Vec<&str> = pipeline.resource_names().into_iter().collect();
    assert_eq!(names, vec!["color"]);
}

#[test]
fn test_read_and_write_same_resource_is_rejected() {
    let raw = PipelineBuilder::new()
        .with_pass(
            "blur",
            PassConfigBuilder::new().reads("color").writes("color").build(),
        )
        .build_raw();

    match PipelineFile::try_from(raw) {
        Err(PassgraphError::PipelineError(msg)) => {
            assert!(msg.contains("both read and write"), "got: {msg}")
        }
        other => panic!("expected PipelineError, got {other:?}"),
    }
}

#[test]
fn test_cycle_through_resources_is_graph_cycle() {
    let file = pipeline_file(
        r#"
[pass.a]
reads = ["r2"]
writes = ["r1"]

[pass.b]
reads = ["r1"]
writes = ["r2"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(PassgraphError::GraphCycle(msg)) => {
            assert!(msg.contains("cycle detected"), "got: {msg}");
            assert!(msg.contains("'a'") || msg.contains("'b'"), "got: {msg}");
        }
        other => panic!("expected GraphCycle, got {other:?}"),
    }
}

#[test]
fn test_reload_behaviour_from_str() {
    assert_eq!(
        "keep-last".parse::<ReloadFailureBehaviour>().unwrap(),
        ReloadFailureBehaviour::KeepLast
    );
    assert_eq!(
        " EXIT ".parse::<ReloadFailureBehaviour>().unwrap(),
        ReloadFailureBehaviour::Exit
    );
    assert!("retry".parse::<ReloadFailureBehaviour>().is_err());
}

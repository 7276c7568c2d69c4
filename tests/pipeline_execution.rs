// tests/pipeline_execution.rs

use passgraph::errors::PassgraphError;
use passgraph::exec::{CommandQueue, TraceRenderer, run_frames};
use passgraph::pipeline::build_render_graph;
use passgraph::render_graph::Node;
use passgraph_test_utils::builders::{PassConfigBuilder, PipelineBuilder};

fn deferred_pipeline() -> passgraph::config::PipelineFile {
    PipelineBuilder::new()
        .with_pass(
            "tonemap",
            PassConfigBuilder::new().reads("hdr").writes("final").build(),
        )
        .with_pass(
            "lighting",
            PassConfigBuilder::new()
                .reads("gbuffer")
                .optional_reads("ssao")
                .writes("hdr")
                .build(),
        )
        .with_pass("geometry", PassConfigBuilder::new().writes("gbuffer").build())
        .build()
}

#[test]
fn test_built_graph_schedules_by_resources() {
    passgraph_test_utils::init_tracing();

    let mut built = build_render_graph(&deferred_pipeline()).unwrap();
    built.graph.compile().unwrap();

    assert_eq!(built.schedule_names(), vec!["geometry", "lighting", "tonemap"]);
    assert_eq!(built.passes.len(), 3);
    assert_eq!(
        built.resources.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["final", "gbuffer", "hdr"]
    );
}

#[test]
fn test_missing_optional_read_adds_no_edge() {
    let mut built = build_render_graph(&deferred_pipeline()).unwrap();
    built.graph.compile().unwrap();

    // gbuffer -> lighting, lighting -> hdr, hdr -> tonemap,
    // tonemap -> final, geometry -> gbuffer
    assert_eq!(built.graph.dependencies().edge_count(), 5);
    assert!(built.graph.find_resource("ssao").is_none());
}

#[test]
fn test_present_optional_read_orders_passes() {
    let pipeline = PipelineBuilder::new()
        .with_pass(
            "composite",
            PassConfigBuilder::new().optional_reads("ssao").build(),
        )
        .with_pass("ssao", PassConfigBuilder::new().writes("ssao").build())
        .build();

    let mut built = build_render_graph(&pipeline).unwrap();
    built.graph.compile().unwrap();

    assert_eq!(built.schedule_names(), vec!["ssao", "composite"]);
}

#[test]
fn test_run_frames_submits_in_schedule_order() {
    let mut built = build_render_graph(&deferred_pipeline()).unwrap();
    let mut renderer = TraceRenderer::new();
    let mut queue = CommandQueue::new();

    run_frames(&mut built.graph, &mut renderer, &mut queue, 2).unwrap();

    let submitted: Vec<(u64, String)> = queue
        .drain()
        .into_iter()
        .map(|s| (s.frame, s.pass))
        .collect();
    assert_eq!(
        submitted,
        vec![
            (1, "geometry".to_string()),
            (1, "lighting".to_string()),
            (1, "tonemap".to_string()),
            (2, "geometry".to_string()),
            (2, "lighting".to_string()),
            (2, "tonemap".to_string()),
        ]
    );
    assert!(queue.is_empty());
    assert_eq!(renderer.frame(), 2);
    assert!(!renderer.in_frame());
    assert_eq!(built.graph.executions(), 2);
}

#[test]
fn test_zero_frames_runs_nothing() {
    let mut built = build_render_graph(&deferred_pipeline()).unwrap();
    let mut renderer = TraceRenderer::new();
    let mut queue = CommandQueue::new();

    run_frames(&mut built.graph, &mut renderer, &mut queue, 0).unwrap();

    assert!(queue.submissions().is_empty());
    assert_eq!(renderer.frame(), 0);
}

#[test]
fn test_resolve_node_namespaces() {
    let pipeline = PipelineBuilder::new()
        .with_pass("bloom", PassConfigBuilder::new().writes("bloom").build())
        .with_pass("post", PassConfigBuilder::new().reads("bloom").build())
        .build();
    let built = build_render_graph(&pipeline).unwrap();

    let bloom_resource = built.resources["bloom"];
    let bloom_pass = built.passes["bloom"];

    // Bare names prefer resources.
    assert_eq!(built.resolve_node("bloom").unwrap(), Node::Resource(bloom_resource));
    assert_eq!(built.resolve_node("pass:bloom").unwrap(), Node::Pass(bloom_pass));
    assert_eq!(
        built.resolve_node("resource:bloom").unwrap(),
        Node::Resource(bloom_resource)
    );
    assert_eq!(built.resolve_node("post").unwrap(), Node::Pass(built.passes["post"]));

    assert!(matches!(
        built.resolve_node("resource:post"),
        Err(PassgraphError::UnknownNode(_))
    ));
}

#[test]
fn test_downstream_of_pipeline_resource() {
    let mut built = build_render_graph(&deferred_pipeline()).unwrap();
    built.graph.compile().unwrap();

    let node = built.resolve_node("gbuffer").unwrap();
    let names: Vec<&str> = built
        .graph
        .downstream_passes(node)
        .into_iter()
        .filter_map(|id| built.graph.pass_name(id))
        .collect();

    // Handle order follows pass creation order (pass names sorted).
    assert_eq!(names, vec!["lighting", "tonemap"]);
}

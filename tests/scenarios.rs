//! End-to-end scenarios run through the public analyzer.
mod common;
use common::*;
use keifu::prelude::*;
use serde_json::json;

#[test]
fn test_checkpoint_feeding_save_node() {
    let workflow = json!({
        "nodes": {
            "1": { "type": "SaveImage", "inputs": [{ "name": "image", "type": "IMAGE" }] },
            "2": { "type": "CheckpointLoader", "widgets_values": ["model.safetensors"] }
        },
        "links": [[0, 2, 0, 1, 0, "MODEL"]]
    });

    let graph = WorkflowGraph::from_value(&workflow).unwrap();
    let config = AnalyzerConfig::default();
    let roles = keifu::graph::NodeRoles::new(&config);
    let (sink_id, _) = keifu::graph::locate_sink(&graph, &roles).unwrap();
    assert_eq!(sink_id, "1");

    let map = analyze_workflow(&workflow).expect("analysis should run");
    assert_eq!(map.len(), 1);
    let models = map.get(labels::BASE_MODELS).unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].node_id, "2");
    assert_eq!(models[0].node_type, "CheckpointLoader");
    assert_eq!(models[0].value, Some(json!("model.safetensors")));
}

#[test]
fn test_positive_prompt_from_literal_encoder() {
    let workflow = json!({
        "nodes": {
            "1": sink_with_slots(&["positive"]),
            "4": { "type": "CLIPTextEncode", "widgets_values": ["a red fox"] }
        },
        "links": [[0, 4, 0, 1, 1, "CONDITIONING"]]
    });

    let map = analyze_workflow(&workflow).unwrap();
    let prompts = map.get(labels::POSITIVE_PROMPTS).unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].node_id, "4");
    assert_eq!(prompts[0].payload_type.as_deref(), Some("TEXT"));
    assert_eq!(prompts[0].value, Some(json!("a red fox")));
}

#[test]
fn test_negative_prompt_through_concatenation() {
    let workflow = json!({
        "nodes": {
            "1": sink_with_slots(&["negative"]),
            "5": { "type": "TextConcatenate", "widgets_values": [", masterpiece"] },
            "6": { "type": "PrimitiveString", "widgets_values": ["a cat"] }
        },
        "links": [
            [0, 6, 0, 5, 0, "STRING"],
            [1, 5, 0, 1, 1, "CONDITIONING"]
        ]
    });

    let map = analyze_workflow(&workflow).unwrap();
    let prompts = map.get(labels::NEGATIVE_PROMPTS).unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].node_id, "5");
    assert_eq!(prompts[0].value, Some(json!("a cat , masterpiece")));
    assert!(map.get(labels::POSITIVE_PROMPTS).is_none());
}

#[test]
fn test_missing_nodes_key_yields_no_result() {
    let workflow = json!({ "links": [[0, 2, 0, 1, 0, "MODEL"]] });

    assert!(analyze_workflow(&workflow).is_none());
    let err = Analyzer::new().analyze(&workflow).unwrap_err();
    assert_eq!(err, AnalysisError::MissingGraphData { nodes: 0, links: 1 });
}

#[test]
fn test_lora_between_checkpoint_and_sampler() {
    let workflow = json!({
        "nodes": {
            "1": { "type": "SaveImage", "inputs": [{ "name": "images", "type": "IMAGE" }] },
            "3": {
                "type": "KSampler",
                "inputs": [{ "name": "model", "type": "MODEL" }],
                "widgets_values": [7, "fixed", 20, 6.5, "euler", "normal", 1.0]
            },
            "10": {
                "type": "LoraLoader",
                "inputs": [{ "name": "model", "type": "MODEL" }],
                "widgets_values": ["loras/ink.safetensors", 0.7, 0.7]
            },
            "2": { "type": "CheckpointLoader", "widgets_values": ["C:\\models\\base.safetensors"] }
        },
        "links": [
            [0, 3, 0, 1, 0, "IMAGE"],
            [1, 10, 0, 3, 0, "MODEL"],
            [2, 2, 0, 10, 0, "MODEL"]
        ]
    });

    let map = analyze_workflow(&workflow).unwrap();
    let loras = map.get(labels::LORA_MODELS).unwrap();
    assert_eq!(loras.len(), 1);
    assert_eq!(loras[0].node_id, "10");
    assert_eq!(loras[0].value, Some(json!(["loras/ink.safetensors", 0.7, 0.7])));

    let bases = map.get(labels::BASE_MODELS).unwrap();
    assert_eq!(bases.len(), 1);
    assert_eq!(bases[0].node_id, "2");
    assert_eq!(bases[0].value, Some(json!("base.safetensors")));
}

#[test]
fn test_full_txt2img_graph() {
    let map = analyze_workflow(&txt2img_workflow()).unwrap();

    let categories: Vec<_> = map.categories().collect();
    assert_eq!(
        categories,
        vec![
            "LATENT",
            labels::LORA_MODELS,
            labels::BASE_MODELS,
            labels::POSITIVE_PROMPTS,
            labels::NEGATIVE_PROMPTS,
            "VAE"
        ]
    );

    let latents: Vec<_> = map
        .get("LATENT")
        .unwrap()
        .iter()
        .map(|f| f.node_id.as_str())
        .collect();
    assert_eq!(latents, vec!["3", "5"]);

    let positive = &map.get(labels::POSITIVE_PROMPTS).unwrap()[0];
    assert_eq!(positive.node_id, "6");
    assert_eq!(positive.title.as_deref(), Some("Positive"));
    assert_eq!(
        positive.value,
        Some(json!("a castle on a hill highly detailed"))
    );

    let negative = &map.get(labels::NEGATIVE_PROMPTS).unwrap()[0];
    assert_eq!(negative.value, Some(json!("blurry, lowres")));

    assert_eq!(
        map.get(labels::BASE_MODELS).unwrap()[0].value,
        Some(json!("juggernaut.safetensors"))
    );
    assert_eq!(
        map.get("VAE").unwrap()[0].value,
        Some(json!("sdxl_vae.safetensors"))
    );
    assert!(map.get(labels::SOURCE_NODES).is_none());
}

#[test]
fn test_keyed_and_listed_forms_agree() {
    let listed = analyze_workflow(&txt2img_workflow()).unwrap();
    let keyed = analyze_workflow(&txt2img_workflow_keyed()).unwrap();
    assert_eq!(listed, keyed);
}

#[test]
fn test_json_output_shape() {
    let map = analyze_workflow(&txt2img_workflow()).unwrap();
    let value = serde_json::to_value(&map).unwrap();
    assert_eq!(
        value["Base Models"][0],
        json!({
            "node_id": "4",
            "node_type": "CheckpointLoaderSimple",
            "type": "MODEL",
            "value": "juggernaut.safetensors"
        })
    );
}

#[test]
fn test_text_report() {
    let map = analyze_workflow(&txt2img_workflow()).unwrap();
    let report = ReportFormatter::format(&map);
    assert!(report.contains("Category: Positive Prompts"));
    assert!(report.contains("  Value: a castle on a hill highly detailed"));
    assert!(report.contains("  Title: Negative"));
}

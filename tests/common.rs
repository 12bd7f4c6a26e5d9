//! Common test utilities: workflow documents shaped like real exports.
use serde_json::{Value, json};

/// A typical text-to-image graph in list form.
///
/// Checkpoint -> LoRA -> sampler, a positive prompt built from a literal
/// string run through a concatenation node, a plain negative prompt, an empty
/// latent, a separate VAE loader, and a save node at the end.
#[allow(dead_code)]
pub fn txt2img_workflow() -> Value {
    json!({
        "nodes": [
            {
                "id": 4, "type": "CheckpointLoaderSimple", "mode": 0,
                "widgets_values": ["sdxl/juggernaut.safetensors"]
            },
            {
                "id": 10, "type": "LoraLoader", "mode": 0,
                "inputs": [{ "name": "model", "type": "MODEL" }, { "name": "clip", "type": "CLIP" }],
                "widgets_values": ["styles/ink.safetensors", 0.8, 1.0]
            },
            {
                "id": 13, "type": "PrimitiveString", "mode": 0,
                "widgets_values": ["a castle on a hill"]
            },
            {
                "id": 12, "type": "Text Concatenate", "mode": 0,
                "inputs": [{ "name": "text_a", "type": "STRING" }],
                "widgets_values": ["highly detailed"]
            },
            {
                "id": 6, "type": "CLIPTextEncode", "title": "Positive", "mode": 0,
                "inputs": [{ "name": "clip", "type": "CLIP" }, { "name": "text", "type": "STRING" }],
                "widgets_values": ["placeholder"]
            },
            {
                "id": 7, "type": "CLIPTextEncode", "title": "Negative", "mode": 0,
                "inputs": [{ "name": "clip", "type": "CLIP" }],
                "widgets_values": ["blurry, lowres"]
            },
            {
                "id": 5, "type": "EmptyLatentImage", "mode": 0,
                "widgets_values": [1024, 1024, 1]
            },
            {
                "id": 3, "type": "KSampler", "mode": 0,
                "inputs": [
                    { "name": "model", "type": "MODEL" },
                    { "name": "positive", "type": "CONDITIONING" },
                    { "name": "negative", "type": "CONDITIONING" },
                    { "name": "latent_image", "type": "LATENT" }
                ],
                "widgets_values": [42, "randomize", 30, 7.0, "euler", "normal", 1.0]
            },
            {
                "id": 11, "type": "VAELoader", "mode": 0,
                "widgets_values": ["vae/sdxl_vae.safetensors"]
            },
            {
                "id": 8, "type": "VAEDecode", "mode": 0,
                "inputs": [{ "name": "samples", "type": "LATENT" }, { "name": "vae", "type": "VAE" }]
            },
            {
                "id": 9, "type": "SaveImage", "mode": 0,
                "inputs": [{ "name": "images", "type": "IMAGE" }],
                "widgets_values": ["ComfyUI"]
            }
        ],
        "links": [
            [1, 4, 0, 10, 0, "MODEL"],
            [2, 4, 1, 10, 1, "CLIP"],
            [3, 10, 0, 3, 0, "MODEL"],
            [4, 10, 1, 6, 0, "CLIP"],
            [5, 10, 1, 7, 0, "CLIP"],
            [6, 13, 0, 12, 0, "STRING"],
            [7, 12, 0, 6, 1, "STRING"],
            [8, 6, 0, 3, 1, "CONDITIONING"],
            [9, 7, 0, 3, 2, "CONDITIONING"],
            [10, 5, 0, 3, 3, "LATENT"],
            [11, 3, 0, 8, 0, "LATENT"],
            [12, 11, 0, 8, 1, "VAE"],
            [13, 8, 0, 9, 0, "IMAGE"]
        ]
    })
}

/// The same graph with its nodes keyed by id instead of listed.
#[allow(dead_code)]
pub fn txt2img_workflow_keyed() -> Value {
    let mut document = txt2img_workflow();
    let nodes = document["nodes"].as_array().cloned().unwrap_or_default();
    let keyed: serde_json::Map<String, Value> = nodes
        .into_iter()
        .map(|node| (node["id"].to_string(), node))
        .collect();
    document["nodes"] = Value::Object(keyed);
    document
}

/// A save node whose `images` input sits at slot 0, followed by the given
/// conditioning slot names.
#[allow(dead_code)]
pub fn sink_with_slots(slots: &[&str]) -> Value {
    let mut inputs = vec![json!({ "name": "images", "type": "IMAGE" })];
    inputs.extend(
        slots
            .iter()
            .map(|name| json!({ "name": name, "type": "CONDITIONING" })),
    );
    json!({ "type": "SaveImage", "inputs": inputs })
}

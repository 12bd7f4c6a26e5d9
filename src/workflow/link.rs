use serde_json::Value;
use std::fmt;

/// The payload tag carried by a link, with a fallback for tags the tracer has
/// no special handling for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PayloadType {
    Conditioning,
    Model,
    Vae,
    Latent,
    Cfg,
    Sampler,
    Scheduler,
    Denoise,
    Steps,
    String,
    Text,
    Other(String),
}

impl PayloadType {
    /// Maps a raw tag to its variant. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CONDITIONING" => PayloadType::Conditioning,
            "MODEL" => PayloadType::Model,
            "VAE" => PayloadType::Vae,
            "LATENT" => PayloadType::Latent,
            "CFG" => PayloadType::Cfg,
            "SAMPLER" => PayloadType::Sampler,
            "SCHEDULER" => PayloadType::Scheduler,
            "DENOISE" => PayloadType::Denoise,
            "STEPS" => PayloadType::Steps,
            "STRING" => PayloadType::String,
            "TEXT" => PayloadType::Text,
            other => PayloadType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PayloadType::Conditioning => "CONDITIONING",
            PayloadType::Model => "MODEL",
            PayloadType::Vae => "VAE",
            PayloadType::Latent => "LATENT",
            PayloadType::Cfg => "CFG",
            PayloadType::Sampler => "SAMPLER",
            PayloadType::Scheduler => "SCHEDULER",
            PayloadType::Denoise => "DENOISE",
            PayloadType::Steps => "STEPS",
            PayloadType::String => "STRING",
            PayloadType::Text => "TEXT",
            PayloadType::Other(tag) => tag,
        }
    }

    /// Payloads the text resolver follows upstream.
    pub fn carries_text(&self) -> bool {
        matches!(
            self,
            PayloadType::String | PayloadType::Text | PayloadType::Conditioning
        )
    }

    /// Payloads recorded under a category named after the tag itself.
    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            PayloadType::Vae
                | PayloadType::Latent
                | PayloadType::Cfg
                | PayloadType::Sampler
                | PayloadType::Scheduler
                | PayloadType::Denoise
                | PayloadType::Steps
        )
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, directed connection from one node's output to another's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub source: String,
    pub target: String,
    pub target_slot: Option<usize>,
    pub payload: PayloadType,
}

impl Link {
    pub fn new(
        id: i64,
        source: impl Into<String>,
        target: impl Into<String>,
        target_slot: usize,
        payload: &str,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            target: target.into(),
            target_slot: Some(target_slot),
            payload: PayloadType::from_tag(payload),
        }
    }

    /// Reads a link from either the positional form
    /// `[id, source, source_slot, target, target_slot, type]` or the keyed form
    /// with `origin_id` / `target_id` fields. Returns `None` when either
    /// endpoint is unreadable.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) if items.len() >= 6 => Some(Self {
                id: as_int(&items[0]).unwrap_or(0),
                source: node_key(&items[1])?,
                target: node_key(&items[3])?,
                target_slot: as_slot(&items[4]),
                payload: payload_of(&items[5]),
            }),
            Value::Object(map) => Some(Self {
                id: map.get("id").and_then(as_int).unwrap_or(0),
                source: map.get("origin_id").and_then(node_key)?,
                target: map.get("target_id").and_then(node_key)?,
                target_slot: map.get("target_slot").and_then(as_slot),
                payload: map
                    .get("type")
                    .map(payload_of)
                    .unwrap_or_else(|| PayloadType::Other(String::new())),
            }),
            _ => None,
        }
    }
}

/// Canonical string form of a node identifier. Integral numbers lose any
/// fractional suffix so `3`, `3.0` and `"3"` all name the same node.
pub fn node_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(|f| {
                if f.fract() == 0.0 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }),
        },
        _ => None,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_slot(value: &Value) -> Option<usize> {
    as_int(value).and_then(|i| usize::try_from(i).ok())
}

fn payload_of(value: &Value) -> PayloadType {
    match value {
        Value::String(tag) => PayloadType::from_tag(tag),
        Value::Null => PayloadType::Other(String::new()),
        other => PayloadType::Other(other.to_string()),
    }
}

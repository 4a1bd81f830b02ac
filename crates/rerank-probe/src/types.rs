use serde::Deserialize;
use serde_json::{Map, Value};

pub const UNKNOWN_MODEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    pub top_n: usize,
}

/// One ranked entry. Only a JSON object decodes; the `[index, score]` array
/// form that derived struct impls also take is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RerankResult {
    pub index: usize,
    pub relevance_score: f64,
}

/// Decoded success body. Results keep the order the service returned.
/// Like [`RerankResult`], only a JSON object decodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RerankResponse {
    pub model: String,
    pub results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RawResult {
    #[serde(default)]
    index: usize,
    #[serde(default, alias = "score")]
    relevance_score: f64,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default = "unknown_model")]
    model: String,
    #[serde(default)]
    results: Vec<RerankResult>,
}

fn unknown_model() -> String {
    UNKNOWN_MODEL.to_string()
}

impl TryFrom<Map<String, Value>> for RerankResult {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let raw: RawResult = serde_json::from_value(Value::Object(fields))?;
        Ok(Self {
            index: raw.index,
            relevance_score: raw.relevance_score,
        })
    }
}

impl TryFrom<Map<String, Value>> for RerankResponse {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let raw: RawResponse = serde_json::from_value(Value::Object(fields))?;
        Ok(Self {
            model: raw.model,
            results: raw.results,
        })
    }
}

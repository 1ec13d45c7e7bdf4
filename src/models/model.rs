use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCapability {
    Text,
    Vision,
    Embedding,
    Reasoning,
    FunctionCalling,
    WebSearch,
    Rerank,
    ImageGeneration,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointType {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "openai-response")]
    OpenAIResponse,
    Anthropic,
    Gemini,
    ImageGeneration,
    JinaRerank,
    #[serde(other)]
    Unknown,
}

/// A model as listed by `GET /models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: u64,
    #[serde(default)]
    pub provider_id: u64,
    #[serde(default)]
    pub model_id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owned_by: Option<String>,
    #[serde(default)]
    pub capabilities: Option<Vec<ModelCapability>>,
    #[serde(default)]
    pub supported_endpoint_types: Option<Vec<EndpointType>>,
    #[serde(default)]
    pub endpoint_type: Option<EndpointType>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub input_price: Option<f64>,
    #[serde(default)]
    pub output_price: Option<f64>,
    #[serde(default)]
    pub supported_text_delta: Option<bool>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Model {
    #[cfg(test)]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            provider_id: 0,
            model_id: String::new(),
            name: name.into(),
            group: None,
            description: None,
            owned_by: None,
            capabilities: None,
            supported_endpoint_types: None,
            endpoint_type: None,
            max_tokens: None,
            input_price: None,
            output_price: None,
            supported_text_delta: None,
            enabled: None,
            is_default: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn capabilities(&self) -> &[ModelCapability] {
        self.capabilities.as_deref().unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn is_default(&self) -> bool {
        self.is_default.unwrap_or(false)
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.model_id.is_empty() || self.model_id == self.name {
            return write!(f, "{}", self.name);
        }
        write!(f, "{} ({})", self.name, self.model_id)
    }
}

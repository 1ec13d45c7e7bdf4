#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "openai-response")]
    OpenAIResponse,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "azure-openai")]
    AzureOpenAI,
    #[serde(rename = "vertexai")]
    VertexAI,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "aws-bedrock")]
    AwsBedrock,
    #[serde(rename = "vertex-anthropic")]
    VertexAnthropic,
    #[serde(rename = "new-api")]
    NewApi,
    #[serde(rename = "gateway")]
    Gateway,
    #[serde(rename = "ollama")]
    Ollama,
}

/// A provider the settings screen offers as a starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ProviderType,
    pub base_url: &'static str,
    pub description: &'static str,
}

pub const PREDEFINED_PROVIDERS: &[PredefinedProvider] = &[
    PredefinedProvider {
        id: "openai",
        name: "OpenAI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.openai.com/v1",
        description: "GPT-4, GPT-3.5, DALL-E",
    },
    PredefinedProvider {
        id: "anthropic",
        name: "Anthropic",
        kind: ProviderType::Anthropic,
        base_url: "https://api.anthropic.com",
        description: "Claude series models",
    },
    PredefinedProvider {
        id: "google",
        name: "Google AI",
        kind: ProviderType::Gemini,
        base_url: "https://generativelanguage.googleapis.com",
        description: "Gemini, PaLM",
    },
    PredefinedProvider {
        id: "azure-openai",
        name: "Azure OpenAI",
        kind: ProviderType::AzureOpenAI,
        base_url: "https://YOUR_RESOURCE.openai.azure.com",
        description: "Azure hosted OpenAI",
    },
    PredefinedProvider {
        id: "aws-bedrock",
        name: "AWS Bedrock",
        kind: ProviderType::AwsBedrock,
        base_url: "https://bedrock-runtime.us-east-1.amazonaws.com",
        description: "Claude, Llama, Titan",
    },
    PredefinedProvider {
        id: "vertex-ai",
        name: "Google Vertex AI",
        kind: ProviderType::VertexAI,
        base_url: "https://us-central1-aiplatform.googleapis.com",
        description: "Enterprise AI platform",
    },
    PredefinedProvider {
        id: "ollama",
        name: "Ollama",
        kind: ProviderType::Ollama,
        base_url: "http://localhost:11434",
        description: "Local LLM runtime",
    },
    PredefinedProvider {
        id: "mistral",
        name: "Mistral AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.mistral.ai/v1",
        description: "Mistral, Mixtral",
    },
    PredefinedProvider {
        id: "cohere",
        name: "Cohere",
        kind: ProviderType::OpenAI,
        base_url: "https://api.cohere.ai/v1",
        description: "Command, Embed",
    },
    PredefinedProvider {
        id: "replicate",
        name: "Replicate",
        kind: ProviderType::OpenAI,
        base_url: "https://api.replicate.com/v1",
        description: "Various open-source models",
    },
    PredefinedProvider {
        id: "together",
        name: "Together AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.together.xyz/v1",
        description: "Open-source LLMs",
    },
    PredefinedProvider {
        id: "groq",
        name: "Groq",
        kind: ProviderType::OpenAI,
        base_url: "https://api.groq.com/openai/v1",
        description: "Fast inference",
    },
    PredefinedProvider {
        id: "perplexity",
        name: "Perplexity",
        kind: ProviderType::OpenAI,
        base_url: "https://api.perplexity.ai",
        description: "AI search",
    },
    PredefinedProvider {
        id: "deepseek",
        name: "DeepSeek",
        kind: ProviderType::OpenAI,
        base_url: "https://api.deepseek.com/v1",
        description: "DeepSeek models",
    },
    PredefinedProvider {
        id: "moonshot",
        name: "Moonshot AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.moonshot.cn/v1",
        description: "Kimi models",
    },
    PredefinedProvider {
        id: "zhipu",
        name: "Zhipu AI",
        kind: ProviderType::OpenAI,
        base_url: "https://open.bigmodel.cn/api/paas/v4",
        description: "GLM models",
    },
    PredefinedProvider {
        id: "baidu",
        name: "Baidu ERNIE",
        kind: ProviderType::OpenAI,
        base_url: "https://aip.baidubce.com/rpc/2.0/ai_custom/v1",
        description: "ERNIE, Wenxin",
    },
    PredefinedProvider {
        id: "alibaba",
        name: "Alibaba Qwen",
        kind: ProviderType::OpenAI,
        base_url: "https://dashscope.aliyuncs.com/api/v1",
        description: "Qwen, Tongyi",
    },
    PredefinedProvider {
        id: "minimax",
        name: "MiniMax",
        kind: ProviderType::OpenAI,
        base_url: "https://api.minimax.chat/v1",
        description: "abab models",
    },
    PredefinedProvider {
        id: "yi",
        name: "01.AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.lingyiwanwu.com/v1",
        description: "Yi models",
    },
    PredefinedProvider {
        id: "baichuan",
        name: "Baichuan",
        kind: ProviderType::OpenAI,
        base_url: "https://api.baichuan-ai.com/v1",
        description: "Baichuan models",
    },
    PredefinedProvider {
        id: "sensetime",
        name: "SenseTime",
        kind: ProviderType::OpenAI,
        base_url: "https://api.sensenova.cn/v1",
        description: "SenseChat",
    },
    PredefinedProvider {
        id: "xunfei",
        name: "iFlytek",
        kind: ProviderType::OpenAI,
        base_url: "https://spark-api-open.xf-yun.com/v1",
        description: "Spark models",
    },
    PredefinedProvider {
        id: "huggingface",
        name: "Hugging Face",
        kind: ProviderType::OpenAI,
        base_url: "https://api-inference.huggingface.co/models",
        description: "Inference API",
    },
    PredefinedProvider {
        id: "novita",
        name: "Novita AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.novita.ai/v3/openai",
        description: "LLM hosting",
    },
    PredefinedProvider {
        id: "siliconflow",
        name: "SiliconFlow",
        kind: ProviderType::OpenAI,
        base_url: "https://api.siliconflow.cn/v1",
        description: "Model hosting",
    },
    PredefinedProvider {
        id: "fireworks",
        name: "Fireworks AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.fireworks.ai/inference/v1",
        description: "Fast inference",
    },
    PredefinedProvider {
        id: "anyscale",
        name: "Anyscale",
        kind: ProviderType::OpenAI,
        base_url: "https://api.endpoints.anyscale.com/v1",
        description: "Ray-based hosting",
    },
    PredefinedProvider {
        id: "lepton",
        name: "Lepton AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.lepton.ai/v1",
        description: "AI deployment",
    },
    PredefinedProvider {
        id: "modal",
        name: "Modal",
        kind: ProviderType::OpenAI,
        base_url: "https://api.modal.ai/v1",
        description: "Serverless AI",
    },
    PredefinedProvider {
        id: "runpod",
        name: "RunPod",
        kind: ProviderType::OpenAI,
        base_url: "https://api.runpod.ai/v1",
        description: "GPU rental",
    },
    PredefinedProvider {
        id: "vast",
        name: "Vast AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.vast.ai/v1",
        description: "GPU marketplace",
    },
    PredefinedProvider {
        id: "lambda",
        name: "Lambda Labs",
        kind: ProviderType::OpenAI,
        base_url: "https://api.lambdalabs.com/v1",
        description: "GPU cloud",
    },
    PredefinedProvider {
        id: "cerebras",
        name: "Cerebras",
        kind: ProviderType::OpenAI,
        base_url: "https://api.cerebras.ai/v1",
        description: "Wafer-scale inference",
    },
    PredefinedProvider {
        id: "sambanova",
        name: "SambaNova",
        kind: ProviderType::OpenAI,
        base_url: "https://api.sambanova.ai/v1",
        description: "Enterprise AI",
    },
    PredefinedProvider {
        id: "grok",
        name: "xAI Grok",
        kind: ProviderType::OpenAI,
        base_url: "https://api.x.ai/v1",
        description: "Grok models",
    },
    PredefinedProvider {
        id: "inflection",
        name: "Inflection AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.inflection.ai/v1",
        description: "Pi assistant",
    },
    PredefinedProvider {
        id: "character",
        name: "Character.AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.character.ai/v1",
        description: "Character chat",
    },
    PredefinedProvider {
        id: "stability",
        name: "Stability AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.stability.ai/v1",
        description: "Stable Diffusion",
    },
    PredefinedProvider {
        id: "midjourney",
        name: "Midjourney",
        kind: ProviderType::OpenAI,
        base_url: "https://api.midjourney.com/v1",
        description: "Image generation",
    },
    PredefinedProvider {
        id: "leonardo",
        name: "Leonardo AI",
        kind: ProviderType::OpenAI,
        base_url: "https://cloud.leonardo.ai/api/v1",
        description: "Creative AI",
    },
    PredefinedProvider {
        id: "ideogram",
        name: "Ideogram",
        kind: ProviderType::OpenAI,
        base_url: "https://api.ideogram.ai/v1",
        description: "Text in images",
    },
    PredefinedProvider {
        id: "flux",
        name: "Flux",
        kind: ProviderType::OpenAI,
        base_url: "https://api.flux.ai/v1",
        description: "Image generation",
    },
    PredefinedProvider {
        id: "jina",
        name: "Jina AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.jina.ai/v1",
        description: "Embeddings, Rerank",
    },
    PredefinedProvider {
        id: "voyage",
        name: "Voyage AI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.voyageai.com/v1",
        description: "Embeddings",
    },
    PredefinedProvider {
        id: "pinecone",
        name: "Pinecone",
        kind: ProviderType::OpenAI,
        base_url: "https://api.pinecone.io",
        description: "Vector database",
    },
    PredefinedProvider {
        id: "weaviate",
        name: "Weaviate",
        kind: ProviderType::OpenAI,
        base_url: "https://api.weaviate.io/v1",
        description: "Vector search",
    },
    PredefinedProvider {
        id: "qdrant",
        name: "Qdrant",
        kind: ProviderType::OpenAI,
        base_url: "https://api.qdrant.io/v1",
        description: "Vector DB",
    },
    PredefinedProvider {
        id: "milvus",
        name: "Milvus",
        kind: ProviderType::OpenAI,
        base_url: "https://api.milvus.io/v1",
        description: "Vector database",
    },
    PredefinedProvider {
        id: "chroma",
        name: "Chroma",
        kind: ProviderType::OpenAI,
        base_url: "https://api.trychroma.com/v1",
        description: "Embedding DB",
    },
    PredefinedProvider {
        id: "elevenlabs",
        name: "ElevenLabs",
        kind: ProviderType::OpenAI,
        base_url: "https://api.elevenlabs.io/v1",
        description: "Voice AI",
    },
    PredefinedProvider {
        id: "assemblyai",
        name: "AssemblyAI",
        kind: ProviderType::OpenAI,
        base_url: "https://api.assemblyai.com/v2",
        description: "Speech-to-text",
    },
    PredefinedProvider {
        id: "deepgram",
        name: "Deepgram",
        kind: ProviderType::OpenAI,
        base_url: "https://api.deepgram.com/v1",
        description: "Audio AI",
    },
    PredefinedProvider {
        id: "whisper",
        name: "OpenAI Whisper",
        kind: ProviderType::OpenAI,
        base_url: "https://api.openai.com/v1",
        description: "Speech recognition",
    },
    PredefinedProvider {
        id: "tavily",
        name: "Tavily",
        kind: ProviderType::OpenAI,
        base_url: "https://api.tavily.com/v1",
        description: "Web search API",
    },
    PredefinedProvider {
        id: "serper",
        name: "Serper",
        kind: ProviderType::OpenAI,
        base_url: "https://api.serper.dev/v1",
        description: "Google search",
    },
    PredefinedProvider {
        id: "bing",
        name: "Bing Search",
        kind: ProviderType::OpenAI,
        base_url: "https://api.bing.microsoft.com/v7.0",
        description: "Microsoft search",
    },
    PredefinedProvider {
        id: "custom",
        name: "Custom Provider",
        kind: ProviderType::OpenAI,
        base_url: "",
        description: "Custom OpenAI-compatible API",
    },
];

pub fn predefined_providers() -> &'static [PredefinedProvider] {
    PREDEFINED_PROVIDERS
}

pub fn provider_by_id(id: &str) -> Option<&'static PredefinedProvider> {
    PREDEFINED_PROVIDERS.iter().find(|p| p.id == id)
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "openai",
            ProviderType::OpenAIResponse => "openai-response",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Gemini => "gemini",
            ProviderType::AzureOpenAI => "azure-openai",
            ProviderType::VertexAI => "vertexai",
            ProviderType::Mistral => "mistral",
            ProviderType::AwsBedrock => "aws-bedrock",
            ProviderType::VertexAnthropic => "vertex-anthropic",
            ProviderType::NewApi => "new-api",
            ProviderType::Gateway => "gateway",
            ProviderType::Ollama => "ollama",
        }
    }
}

impl Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for PredefinedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.name, self.kind, self.description)
    }
}

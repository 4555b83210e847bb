use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::shopping::entities::{ShoppingLink, dedupe_links};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 encoded payload.
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerationConfig {
    /// JSON output constrained by `schema`.
    pub fn structured(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            tools: Vec::new(),
        }
    }

    pub fn grounded_search() -> Self {
        Self {
            response_mime_type: None,
            response_schema: None,
            tools: vec![Tool {
                google_search: Some(GoogleSearch {}),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.response_mime_type.is_none() && self.response_schema.is_none() && self.tools.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsRepr {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Accepts either a bare prompt string or a list of parts.
fn deserialize_contents<'de, D>(deserializer: D) -> Result<Vec<ContentPart>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ContentsRepr::deserialize(deserializer)? {
        ContentsRepr::Text(text) => vec![ContentPart::Text { text }],
        ContentsRepr::Parts(parts) => parts,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentParams {
    #[serde(default)]
    pub model: String,
    #[serde(deserialize_with = "deserialize_contents")]
    pub contents: Vec<ContentPart>,
    #[serde(default, skip_serializing_if = "GenerationConfig::is_empty")]
    pub config: GenerationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Provider response trimmed to what callers use: the text and the candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let text = candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());

        Self { text, candidates }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Web sources cited by a grounded search, de-duplicated by URL.
    pub fn grounding_links(&self) -> Vec<ShoppingLink> {
        let chunks = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or_default();

        dedupe_links(chunks.iter().filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            Some(ShoppingLink {
                title: web.title.clone().unwrap_or_default(),
                url: web.uri.clone()?,
            })
        }))
    }
}

fn default_number_of_images() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl Default for ImageGenerationConfig {
    fn default() -> Self {
        Self {
            number_of_images: default_number_of_images(),
            output_mime_type: None,
            aspect_ratio: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesParams {
    #[serde(default)]
    pub model: String,
    pub prompt: String,
    #[serde(default)]
    pub config: ImageGenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImageData {
    /// Base64 encoded image.
    pub image_bytes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image: GeneratedImageData,
}

impl GeneratedImage {
    pub fn data_url(&self, fallback_mime_type: &str) -> String {
        format!(
            "data:{};base64,{}",
            self.image.mime_type.as_deref().unwrap_or(fallback_mime_type),
            self.image.image_bytes
        )
    }
}

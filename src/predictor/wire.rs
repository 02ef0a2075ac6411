//! Wire types for the generative language API.
//!
//! The payload shape (field names, required-ness) is load-bearing: every
//! field of the model's JSON answer feeds the dashboard, so nothing here is
//! optional unless the API itself makes it so.

use crate::error::{Error, Result};
use crate::state::{
    GroundingSource, PartyShare, Platform, PredictionSnapshot, Sentiment, SentimentPost,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============ Request ============

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    #[serde(rename = "google_search")]
    pub google_search: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

impl GenerateContentRequest {
    /// A grounded-search request asking for a JSON answer.
    pub fn grounded(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            tools: vec![Tool {
                google_search: serde_json::json!({}),
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

// ============ Response envelope ============

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata", default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    /// The model's answer text from the first candidate.
    pub fn answer_text(&self) -> Result<&str> {
        let text = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(Error::malformed("empty response from model"));
        }
        Ok(text)
    }

    /// Grounding sources attached to the first candidate.
    pub fn sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| GroundingSource {
                        title: web.title.clone(),
                        uri: web.uri.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============ Model answer payload ============

/// The JSON document the model is instructed to emit.
#[derive(Debug, Deserialize)]
pub struct WirePrediction {
    pub predictions: Vec<WirePartyShare>,
    pub analysis: String,
    #[serde(rename = "likelyPrimeMinister")]
    pub likely_prime_minister: String,
    #[serde(rename = "sentimentFeed")]
    pub sentiment_feed: Vec<WirePost>,
}

#[derive(Debug, Deserialize)]
pub struct WirePartyShare {
    pub party: String,
    pub percentage: Decimal,
    pub leader: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct WirePost {
    pub platform: Platform,
    pub username: String,
    pub content: String,
    pub sentiment: Sentiment,
    pub timestamp: String,
}

/// Strip markdown code fences the model sometimes wraps its JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the model's answer text into the wire payload.
pub fn parse_prediction(text: &str) -> Result<WirePrediction> {
    let clean = strip_code_fences(text);
    serde_json::from_str(&clean)
        .map_err(|e| Error::malformed(format!("prediction payload: {e}")))
}

/// Assemble the domain snapshot from the parsed payload and sources.
pub fn into_snapshot(
    wire: WirePrediction,
    sources: Vec<GroundingSource>,
) -> (PredictionSnapshot, Vec<SentimentPost>) {
    let party_shares = wire
        .predictions
        .into_iter()
        .map(|p| PartyShare {
            party: p.party,
            percentage: p.percentage,
            leader: p.leader,
            color_tag: p.color,
        })
        .collect();

    let feed = wire
        .sentiment_feed
        .into_iter()
        .map(|p| SentimentPost {
            platform: p.platform,
            author: p.username,
            content: p.content,
            sentiment: p.sentiment,
            posted_at_label: p.timestamp,
        })
        .collect();

    let snapshot = PredictionSnapshot {
        party_shares,
        analysis: wire.analysis,
        projected_leader: wire.likely_prime_minister,
        sources,
        captured_at: chrono::Utc::now(),
    };

    (snapshot, feed)
}
